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

//! A `Candidate` is one unit's proposed next upgrade along its frontier. The
//! global solve is a repeated "pop the best candidate" loop, so candidates
//! are ordered by a [`compare::Compare`] implementation rather than `Ord`:
//! `f64` ratios have no total order, and ties need a multi-key tie-break
//! that plain derived `Ord` can't express.

use std::cmp::Ordering;

use compare::Compare;

use crate::common::{ArmIndex, UnitIndex};

/// Two ratios within this relative tolerance of each other are considered
/// tied and broken by the secondary keys instead.
const TIE_TOLERANCE: f64 = 1e-12;

/// One unit's proposed move from its current frontier position to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub ratio: f64,
    pub delta_reward: f64,
    pub delta_cost: f64,
    pub unit: UnitIndex,
    /// The position within the unit's frontier this candidate targets.
    pub frontier_pos: u32,
    pub arm: ArmIndex,
}

fn ratios_tied(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs());
    if scale == 0.0 {
        return true;
    }
    (a - b).abs() <= TIE_TOLERANCE * scale
}

/// Orders candidates so that the priority queue always pops the best one
/// first: highest marginal efficiency, ties broken by lower marginal cost,
/// further ties broken by lower unit index.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareCandidate;

impl Compare<Candidate> for CompareCandidate {
    fn compare(&self, l: &Candidate, r: &Candidate) -> Ordering {
        if ratios_tied(l.ratio, r.ratio) {
            l.delta_cost
                .partial_cmp(&r.delta_cost)
                .unwrap_or(Ordering::Equal)
                .reverse()
                .then_with(|| l.unit.0.cmp(&r.unit.0).reverse())
        } else {
            l.ratio.partial_cmp(&r.ratio).unwrap_or(Ordering::Equal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(ratio: f64, delta_cost: f64, unit: u32) -> Candidate {
        Candidate {
            ratio,
            delta_reward: ratio * delta_cost,
            delta_cost,
            unit: UnitIndex(unit),
            frontier_pos: 1,
            arm: ArmIndex(1),
        }
    }

    #[test]
    fn higher_ratio_wins() {
        let cmp = CompareCandidate;
        let a = candidate(2.0, 1.0, 0);
        let b = candidate(1.0, 1.0, 1);
        assert_eq!(cmp.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn tied_ratio_prefers_lower_delta_cost() {
        let cmp = CompareCandidate;
        let cheap = candidate(1.0, 1.0, 5);
        let expensive = candidate(1.0, 2.0, 0);
        assert_eq!(cmp.compare(&cheap, &expensive), Ordering::Greater);
    }

    #[test]
    fn tied_ratio_and_cost_prefers_lower_unit_index() {
        let cmp = CompareCandidate;
        let low_unit = candidate(1.0, 1.0, 0);
        let high_unit = candidate(1.0, 1.0, 5);
        assert_eq!(cmp.compare(&low_unit, &high_unit), Ordering::Greater);
    }

    #[test]
    fn ratios_within_tolerance_are_tied() {
        assert!(ratios_tied(1.0, 1.0 + 1e-13));
        assert!(!ratios_tied(1.0, 1.01));
    }

    #[test]
    fn a_binary_heap_pops_the_globally_best_candidate_first() {
        let mut heap = binary_heap_plus::BinaryHeap::from_vec_cmp(
            vec![candidate(1.0, 1.0, 0), candidate(3.0, 1.0, 1), candidate(2.0, 1.0, 2)],
            CompareCandidate,
        );
        assert_eq!(heap.pop().unwrap().ratio, 3.0);
        assert_eq!(heap.pop().unwrap().ratio, 2.0);
        assert_eq!(heap.pop().unwrap().ratio, 1.0);
        assert!(heap.pop().is_none());
    }
}
