// Copyright 2026 The sparse_maq Authors
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module defines the error type returned at the public boundary of the
//! crate (`fit`, `predict`, and the interning/ingestion steps they wrap).

use thiserror::Error;

/// Everything that can go wrong while fitting or querying a path.
#[derive(Debug, Clone, Error)]
pub enum SolverError {
    /// The caller-supplied data violates a structural precondition: mismatched
    /// array lengths, a NaN/non-finite value, an unresolvable arm id, a
    /// duplicate id, or a non-(0,0) control entry.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// `predict` was called with a budget beyond the end of a truncated path.
    #[error("budget beyond path: {0}")]
    BudgetBeyondPath(String),

    /// The caller's cancellation flag was observed mid-solve. Not an error in
    /// the usual sense: callers that request cancellation get this back only
    /// if they ignore the partial result carried in a successful `fit` and
    /// instead treat the run as aborted outright.
    #[error("cancelled before completion")]
    Cancelled,

    /// An internal invariant was violated in a way that the caller cannot
    /// have caused (e.g. a non-monotone frontier reaching the path solver).
    /// Distinct from `InvalidInput` because the fault is ours, not the
    /// caller's data.
    #[error("internal consistency violation: {0}")]
    InternalConsistency(String),

    /// The requested parallelism or input size could not be honored with the
    /// resources available (e.g. thread spawn failure).
    #[error("resource exhaustion: {0}")]
    ResourceExhaustion(String),
}
