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

//! # sparse_maq
//!
//! A deterministic solver for the multi-choice knapsack path problem: given,
//! for each of `N` units (e.g. patients), a sparse set of candidate arms
//! (e.g. treatments) each with a reward and a cost, compute the single
//! global sequence of upgrades — each unit moving from its current arm to a
//! strictly better one — ordered by marginal reward-per-cost, so that any
//! prefix of the sequence is the best allocation achievable under the
//! prefix's cumulative spend.
//!
//! The appeal of framing the problem this way is that a single `fit` run
//! produces an answer for *every* budget at once: [`predict`] reads an
//! assignment off the fitted path for an arbitrary budget without
//! re-solving.
//!
//! ## Quick example
//!
//! ```
//! use sparse_maq::{fit, predict, FitConfig, Id, Record, SparseInput};
//!
//! let input = SparseInput {
//!     unit_ids: vec![Id::from("p0"), Id::from("p1")],
//!     records: vec![
//!         Record { arm_ids: vec![Id::from("x")], rewards: vec![10.0], costs: vec![5.0] },
//!         Record { arm_ids: vec![Id::from("y")], rewards: vec![12.0], costs: vec![3.0] },
//!     ],
//!     arm_vocabulary: None,
//! };
//!
//! let output = fit(&input, &FitConfig::new()).unwrap();
//! assert!(output.complete_path);
//!
//! let assignment = predict(&output, 3.0).unwrap();
//! assert_eq!(assignment, vec![0, 2]); // p0 still on control, p1 upgraded to y (arm index 2)
//! ```
//!
//! No logging framework is pulled in: set `SPARSE_MAQ_PROFILE=1` to have
//! [`fit`] report per-stage timings to stderr, and recoverable diagnostics
//! (currently limited to a defensively-dropped degenerate candidate) are
//! routed through a plain function-pointer sink rather than a trait object.

pub mod assemble;
pub mod common;
pub mod concurrency;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod frontier;
pub mod ingest;
pub mod interner;
pub mod predict;
pub mod solver;

pub use assemble::SolverOutput;
pub use common::{ArmIndex, Entry, Id, PathStep, UnitIndex, CONTROL_ARM};
pub use config::FitConfig;
pub use error::SolverError;
pub use ingest::{Record, SparseInput};
pub use predict::predict;

use diagnostics::Profiler;

/// Runs the full pipeline — intern ids, validate and flatten records, reduce
/// each unit to its Pareto frontier, and greedily walk the global path —
/// returning the resulting [`SolverOutput`].
pub fn fit(input: &SparseInput, config: &FitConfig) -> Result<SolverOutput, SolverError> {
    let profiler = Profiler::from_env();

    let unit_interner =
        profiler.stage("intern_units", || interner::UnitInterner::intern(&input.unit_ids))?;

    let vocabulary = match &input.arm_vocabulary {
        Some(v) => v.clone(),
        None => profiler.stage("collect_vocabulary", || {
            interner::collect_vocabulary(&input.records)
        }),
    };
    let arm_interner = profiler.stage("intern_arms", || interner::ArmInterner::intern(&vocabulary))?;

    let buffers = profiler.stage("ingest", || {
        ingest::ingest(&unit_interner, &arm_interner, &input.records)
    })?;
    profiler.note(&format!(
        "flat buffers occupy approximately {} bytes",
        buffers.approx_bytes()
    ));

    let n_threads = concurrency::resolve_n_threads(config.n_threads);
    let frontiers = profiler.stage("filter_frontiers", || frontier::filter_all(&buffers, n_threads));

    let sink = diagnostics::stderr_sink;
    let (outcome, _state) =
        profiler.stage("solve_path", || solver::solve_path(&frontiers, config, &sink));

    Ok(profiler.stage("assemble", || {
        assemble::assemble(outcome, &arm_interner, &unit_interner)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(arms: &[&str], rewards: &[f64], costs: &[f64]) -> Record {
        Record {
            arm_ids: arms.iter().map(|s| Id::from(*s)).collect(),
            rewards: rewards.to_vec(),
            costs: costs.to_vec(),
        }
    }

    #[test]
    fn end_to_end_two_unit_fit_produces_a_complete_path() {
        let input = SparseInput {
            unit_ids: vec![Id::from("p0"), Id::from("p1")],
            records: vec![
                record(&["x"], &[10.0], &[5.0]),
                record(&["y"], &[12.0], &[3.0]),
            ],
            arm_vocabulary: None,
        };
        let output = fit(&input, &FitConfig::new()).unwrap();
        assert!(output.complete_path);
        assert_eq!(output.spend, vec![3.0, 8.0]);
        assert_eq!(output.gain, vec![12.0, 22.0]);
        assert_eq!(output.unit_id_mapping.len(), 2);
        assert_eq!(output.arm_id_mapping.len(), 3); // dns, x, y
    }

    #[test]
    fn a_unit_with_no_records_stays_on_control() {
        let input = SparseInput {
            unit_ids: vec![Id::from("p0")],
            records: vec![record(&[], &[], &[])],
            arm_vocabulary: Some(vec![Id::from("x")]),
        };
        let output = fit(&input, &FitConfig::new()).unwrap();
        assert!(output.ipath.is_empty());
        let assignment = predict(&output, 0.0).unwrap();
        assert_eq!(assignment, vec![0]);
    }

    #[test]
    fn mismatched_unit_and_record_counts_is_an_invalid_input_error() {
        let input = SparseInput {
            unit_ids: vec![Id::from("p0"), Id::from("p1")],
            records: vec![record(&["x"], &[1.0], &[1.0])],
            arm_vocabulary: None,
        };
        assert!(matches!(
            fit(&input, &FitConfig::new()),
            Err(SolverError::InvalidInput(_))
        ));
    }

    #[test]
    fn budget_cap_truncates_the_global_path() {
        let input = SparseInput {
            unit_ids: vec![Id::from("p0"), Id::from("p1")],
            records: vec![
                record(&["x"], &[10.0], &[5.0]),
                record(&["y"], &[12.0], &[3.0]),
            ],
            arm_vocabulary: None,
        };
        let output = fit(&input, &FitConfig::new().with_budget(3.0)).unwrap();
        // p0's single upgrade (cost 5.0) doesn't fit after p1's is taken, so
        // the global path is truncated, not exhausted.
        assert!(!output.complete_path);
        assert_eq!(output.spend, vec![3.0]);
    }

    #[test]
    fn explicit_arm_vocabulary_is_respected_even_for_unused_arms() {
        let input = SparseInput {
            unit_ids: vec![Id::from("p0")],
            records: vec![record(&["x"], &[10.0], &[5.0])],
            arm_vocabulary: Some(vec![Id::from("x"), Id::from("y"), Id::from("z")]),
        };
        let output = fit(&input, &FitConfig::new()).unwrap();
        assert_eq!(output.arm_id_mapping.len(), 4); // dns, x, y, z
    }
}
