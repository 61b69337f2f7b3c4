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

//! Property-based tests covering the invariants that must hold for any
//! well-formed input, not just the handful of fixed scenarios exercised by
//! the unit tests alongside each module.

use std::collections::HashSet;

use proptest::prelude::*;
use sparse_maq::{fit, predict, FitConfig, Id, Record, SparseInput};

fn arbitrary_input() -> impl Strategy<Value = SparseInput> {
    (1usize..6usize).prop_flat_map(|n_units| {
        let record_strategy = prop::collection::vec((0u32..6, -5.0f64..20.0, 0.0f64..20.0), 0..5)
            .prop_map(|entries| {
                let mut seen = HashSet::new();
                let mut arm_ids = Vec::new();
                let mut rewards = Vec::new();
                let mut costs = Vec::new();
                for (arm, reward, cost) in entries {
                    if seen.insert(arm) {
                        arm_ids.push(Id::from(format!("a{arm}")));
                        rewards.push(reward);
                        costs.push(cost);
                    }
                }
                Record {
                    arm_ids,
                    rewards,
                    costs,
                }
            });
        prop::collection::vec(record_strategy, n_units..=n_units).prop_map(move |records| {
            let unit_ids = (0..n_units).map(|i| Id::from(format!("u{i}"))).collect();
            SparseInput {
                unit_ids,
                records,
                arm_vocabulary: None,
            }
        })
    })
}

proptest! {
    /// Invariant: cumulative spend and gain never decrease along the path.
    #[test]
    fn spend_and_gain_are_non_decreasing(input in arbitrary_input()) {
        let output = fit(&input, &FitConfig::new()).unwrap();
        for w in output.spend.windows(2) {
            prop_assert!(w[1] >= w[0]);
        }
        for w in output.gain.windows(2) {
            prop_assert!(w[1] >= w[0]);
        }
    }

    /// Invariant: the marginal reward-per-cost of each step is non-increasing
    /// along the path (within a small floating-point tolerance).
    #[test]
    fn marginal_efficiency_is_non_increasing(input in arbitrary_input()) {
        let output = fit(&input, &FitConfig::new()).unwrap();
        let mut prev_ratio = f64::INFINITY;
        let mut prev_spend = 0.0;
        let mut prev_gain = 0.0;
        for i in 0..output.spend.len() {
            let dc = output.spend[i] - prev_spend;
            let dr = output.gain[i] - prev_gain;
            if dc > 0.0 {
                let ratio = dr / dc;
                prop_assert!(ratio <= prev_ratio + 1e-9);
                prev_ratio = ratio;
            }
            prev_spend = output.spend[i];
            prev_gain = output.gain[i];
        }
    }

    /// Invariant: no unit can be stepped through more arms than it had
    /// eligible candidates for in the first place.
    #[test]
    fn a_unit_never_appears_more_often_than_it_has_candidate_arms(input in arbitrary_input()) {
        let candidate_counts: Vec<usize> = input.records.iter().map(|r| r.arm_ids.len()).collect();
        let output = fit(&input, &FitConfig::new()).unwrap();
        let mut occurrences = vec![0usize; candidate_counts.len()];
        for &u in &output.ipath {
            occurrences[u as usize] += 1;
        }
        for (u, count) in occurrences.iter().enumerate() {
            prop_assert!(*count <= candidate_counts[u]);
        }
    }

    /// Invariant: a budget cap is always honored -- the path never spends
    /// beyond it.
    #[test]
    fn budget_is_never_exceeded(input in arbitrary_input(), budget in 0.0f64..200.0) {
        let output = fit(&input, &FitConfig::new().with_budget(budget)).unwrap();
        if let Some(&last) = output.spend.last() {
            prop_assert!(last <= budget + 1e-9);
        }
    }

    /// Invariant: fitting the same input twice gives byte-for-byte the same
    /// path. Nothing in the pipeline depends on wall-clock timing or thread
    /// scheduling order to decide ties.
    #[test]
    fn fitting_twice_with_the_same_input_is_deterministic(input in arbitrary_input()) {
        let a = fit(&input, &FitConfig::new()).unwrap();
        let b = fit(&input, &FitConfig::new()).unwrap();
        prop_assert_eq!(a.spend, b.spend);
        prop_assert_eq!(a.gain, b.gain);
        prop_assert_eq!(a.ipath, b.ipath);
        prop_assert_eq!(a.kpath, b.kpath);
    }

    /// Invariant: at budget zero every unit predicts to the control arm.
    #[test]
    fn control_is_the_default_for_every_unit_at_zero_budget(input in arbitrary_input()) {
        let output = fit(&input, &FitConfig::new()).unwrap();
        let assignment = predict(&output, 0.0).unwrap();
        prop_assert!(assignment.iter().all(|&a| a == 0));
    }

    /// Invariant: with no budget cap, the solve always runs the queue dry.
    #[test]
    fn no_cap_always_reaches_exhaustion(input in arbitrary_input()) {
        let output = fit(&input, &FitConfig::new()).unwrap();
        prop_assert!(output.complete_path);
    }

    /// Invariant: predicting at a budget `b2` gives the same answer whether
    /// the path was fit at `b2` directly or at any larger budget `b1`, as
    /// long as `b2` falls within what both paths actually cover.
    #[test]
    fn predict_is_idempotent_across_fit_time_budgets(
        input in arbitrary_input(),
        b1 in 1.0f64..100.0,
        b2 in 0.0f64..100.0,
    ) {
        prop_assume!(b2 <= b1);
        let wide = fit(&input, &FitConfig::new().with_budget(b1)).unwrap();
        let narrow = fit(&input, &FitConfig::new().with_budget(b2)).unwrap();
        if let (Ok(from_wide), Ok(from_narrow)) = (predict(&wide, b2), predict(&narrow, b2)) {
            prop_assert_eq!(from_wide, from_narrow);
        }
    }
}
