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

//! Reduces each unit's raw (arm, reward, cost) entries down to its Pareto
//! frontier: the subsequence of arms for which no cheaper-or-equal
//! alternative gives at least as much reward, and for which marginal
//! reward-per-cost is strictly decreasing as cost increases. The control
//! arm is always frontier position 0.

use crate::common::{ArmIndex, Entry, UnitIndex, CONTROL_ARM};
use crate::concurrency;
use crate::ingest::FlatBuffers;

/// The non-dominated, concavity-respecting (arm, cumulative reward,
/// cumulative cost) sequence for one unit. `arms[0]`/`rewards[0]`/`costs[0]`
/// is always `(CONTROL_ARM, 0.0, 0.0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontier {
    pub arms: Vec<ArmIndex>,
    pub rewards: Vec<f64>,
    pub costs: Vec<f64>,
}

impl Frontier {
    pub fn len(&self) -> usize {
        self.arms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }
}

/// Computes the Pareto frontier for every unit, using up to `n_threads`
/// worker threads (`0` resolves to all hardware threads).
pub fn filter_all(buffers: &FlatBuffers, n_threads: usize) -> Vec<Frontier> {
    let indices: Vec<u32> = (0..buffers.n_units() as u32).collect();
    concurrency::parallel_map(&indices, n_threads, |_, &u| {
        filter_unit(buffers, UnitIndex(u))
    })
}

/// Computes the Pareto frontier for a single unit.
pub fn filter_unit(buffers: &FlatBuffers, u: UnitIndex) -> Frontier {
    let range = buffers.unit_range(u.id());

    let mut candidates: Vec<Entry> = Vec::with_capacity(range.len());
    for i in range {
        let arm = buffers.arms[i];
        if arm == CONTROL_ARM {
            // The control arm is always (0.0, 0.0) and is synthesized below
            // regardless of whether it was explicitly present.
            continue;
        }
        let reward = buffers.rewards[i];
        let cost = buffers.costs[i];
        if cost <= 0.0 || reward <= 0.0 {
            continue;
        }
        candidates.push(Entry { arm, reward, cost });
    }

    // Ascending cost; ties broken by descending reward so that, among equal
    // costs, the dominant one is considered first and the rest fall out of
    // the sweep below via the reward check alone.
    candidates.sort_by(|a, b| {
        a.cost
            .partial_cmp(&b.cost)
            .unwrap()
            .then_with(|| b.reward.partial_cmp(&a.reward).unwrap())
    });

    let mut stack: Vec<Entry> = Vec::with_capacity(candidates.len() + 1);
    stack.push(Entry {
        arm: CONTROL_ARM,
        reward: 0.0,
        cost: 0.0,
    });

    for entry in candidates {
        let mut dropped = false;
        loop {
            let top = *stack.last().expect("control entry always present");
            if entry.reward <= top.reward {
                dropped = true;
                break;
            }
            if stack.len() >= 2 {
                let prior = stack[stack.len() - 2];
                let slope_prior_top = (top.reward - prior.reward) / (top.cost - prior.cost);
                let slope_top_entry = (entry.reward - top.reward) / (entry.cost - top.cost);
                if slope_top_entry >= slope_prior_top {
                    stack.pop();
                    continue;
                }
            }
            break;
        }
        if !dropped {
            stack.push(entry);
        }
    }

    let mut arms = Vec::with_capacity(stack.len());
    let mut rewards = Vec::with_capacity(stack.len());
    let mut costs = Vec::with_capacity(stack.len());
    for entry in stack {
        arms.push(entry.arm);
        rewards.push(entry.reward);
        costs.push(entry.cost);
    }
    Frontier {
        arms,
        rewards,
        costs,
    }
}
