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

//! The global path-following solver: a single priority queue over all units'
//! next candidate upgrade, repeatedly popped and applied until the budget is
//! exhausted, the queue runs dry, or the caller cancels.

use binary_heap_plus::BinaryHeap;

use crate::common::{ArmIndex, PathStep, UnitIndex};
use crate::config::FitConfig;
use crate::diagnostics::DiagnosticSink;
use crate::frontier::Frontier;

use super::candidate::{Candidate, CompareCandidate};

/// Where the solve loop currently stands. Exposed mainly for tests; the
/// public result only distinguishes the two terminal states via
/// `complete_path`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    Running,
    /// Stopped early: either the next candidate would exceed the budget, or
    /// the caller's cancellation flag was observed.
    BudgetBound,
    /// The priority queue ran dry: every unit reached the end of its
    /// frontier.
    Exhausted,
}

/// The global path produced by one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct PathOutcome {
    pub steps: Vec<PathStep>,
    pub complete_path: bool,
}

fn push_candidate(
    heap: &mut BinaryHeap<Candidate, CompareCandidate>,
    frontier: &Frontier,
    unit: UnitIndex,
    pos: usize,
    sink: DiagnosticSink,
) {
    let delta_reward = frontier.rewards[pos] - frontier.rewards[pos - 1];
    let delta_cost = frontier.costs[pos] - frontier.costs[pos - 1];
    if delta_cost <= 0.0 {
        sink(&format!(
            "dropping candidate for unit {unit} at frontier position {pos}: \
             non-positive marginal cost ({delta_cost}) violates the strictly \
             increasing cost invariant a correctly filtered frontier must have"
        ));
        return;
    }
    heap.push(Candidate {
        ratio: delta_reward / delta_cost,
        delta_reward,
        delta_cost,
        unit,
        frontier_pos: pos as u32,
        arm: frontier.arms[pos],
    });
}

/// Runs the global path-following solve over the given per-unit frontiers.
pub fn solve_path(
    frontiers: &[Frontier],
    config: &FitConfig,
    sink: DiagnosticSink,
) -> (PathOutcome, SolverState) {
    let mut heap = BinaryHeap::from_vec_cmp(Vec::with_capacity(frontiers.len()), CompareCandidate);
    for (u, frontier) in frontiers.iter().enumerate() {
        if frontier.len() >= 2 {
            push_candidate(&mut heap, frontier, UnitIndex(u as u32), 1, sink);
        }
    }

    let has_budget = config.has_budget();
    let mut steps: Vec<PathStep> = Vec::new();
    let mut s = 0.0_f64;
    let mut g = 0.0_f64;

    let state = loop {
        if config.is_cancelled() {
            break SolverState::BudgetBound;
        }
        let Some(candidate) = heap.pop() else {
            break SolverState::Exhausted;
        };
        if has_budget && s + candidate.delta_cost > config.budget {
            break SolverState::BudgetBound;
        }

        s += candidate.delta_cost;
        g += candidate.delta_reward;
        steps.push(PathStep {
            spend: s,
            gain: g,
            unit: candidate.unit,
            arm: candidate.arm,
        });

        let next_pos = candidate.frontier_pos as usize + 1;
        let frontier = &frontiers[candidate.unit.id()];
        if next_pos < frontier.len() {
            push_candidate(&mut heap, frontier, candidate.unit, next_pos, sink);
        }
    };

    let outcome = PathOutcome {
        steps,
        complete_path: state == SolverState::Exhausted,
    };
    (outcome, state)
}
