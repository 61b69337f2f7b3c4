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

//! No logging framework is pulled in here: a pluggable sink (a plain function
//! reference) receives recoverable diagnostic lines, and an opt-in stage
//! profiler writes timings to stderr when `SPARSE_MAQ_PROFILE` is set.

use std::time::Instant;

/// A diagnostic sink receives human-readable lines describing recoverable,
/// non-fatal anomalies (e.g. a defensively-dropped degenerate candidate).
/// Kept as a plain function reference rather than a trait object: the only
/// "polymorphism" needed here is swapping the sink in tests.
pub type DiagnosticSink<'a> = &'a dyn Fn(&str);

/// The default sink used by [`crate::fit`]: writes to stderr, prefixed so it
/// is easy to grep out of mixed output.
pub fn stderr_sink(msg: &str) {
    eprintln!("[sparse_maq] {msg}");
}

/// A sink that discards everything. Useful in tests that want to assert on
/// the solver's output without caring about diagnostic noise.
pub fn null_sink(_msg: &str) {}

fn truthy(v: &str) -> bool {
    !matches!(v, "" | "0" | "false" | "False" | "FALSE" | "no" | "No")
}

/// Reads `SPARSE_MAQ_PROFILE` once at construction and, if enabled, writes a
/// per-stage elapsed-time line to stderr around each call to [`Profiler::stage`].
pub struct Profiler {
    enabled: bool,
}

impl Profiler {
    pub fn from_env() -> Self {
        let enabled = std::env::var("SPARSE_MAQ_PROFILE")
            .map(|v| truthy(&v))
            .unwrap_or(false);
        Self { enabled }
    }

    /// Runs `f`, and if profiling is enabled, reports the wall-clock time it
    /// took under `name`.
    pub fn stage<T>(&self, name: &str, f: impl FnOnce() -> T) -> T {
        if !self.enabled {
            return f();
        }
        let start = Instant::now();
        let out = f();
        eprintln!(
            "[sparse_maq] stage={name} elapsed_ms={:.3}",
            start.elapsed().as_secs_f64() * 1000.0
        );
        out
    }

    /// Emits a free-form profiling note (used for the approximate memory
    /// figures noted below) when profiling is enabled.
    pub fn note(&self, msg: &str) {
        if self.enabled {
            eprintln!("[sparse_maq] {msg}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn disabled_profiler_still_runs_the_closure() {
        let profiler = Profiler { enabled: false };
        let ran = Cell::new(false);
        let out = profiler.stage("x", || {
            ran.set(true);
            42
        });
        assert_eq!(out, 42);
        assert!(ran.get());
    }

    #[test]
    fn truthy_recognizes_common_false_spellings() {
        assert!(!truthy(""));
        assert!(!truthy("0"));
        assert!(!truthy("false"));
        assert!(truthy("1"));
        assert!(truthy("true"));
    }
}
