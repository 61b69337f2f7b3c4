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

//! Validates the caller's per-unit records against interned ids and flattens
//! them into contiguous, CSR-like buffers. Each output buffer is allocated
//! exactly once, at its final size, after a single length-accounting pass
//! over the input.

use fxhash::FxHashSet;

use crate::common::{ArmIndex, Id, CONTROL_ARM};
use crate::error::SolverError;
use crate::interner::{ArmInterner, UnitInterner};

/// One unit's raw, uninterned arm/reward/cost lists as supplied by the
/// caller. `arm_ids`, `rewards`, and `costs` must have equal length.
#[derive(Debug, Clone)]
pub struct Record {
    pub arm_ids: Vec<Id>,
    pub rewards: Vec<f64>,
    pub costs: Vec<f64>,
}

/// The full caller-supplied input to [`crate::fit`].
#[derive(Debug, Clone)]
pub struct SparseInput {
    pub unit_ids: Vec<Id>,
    pub records: Vec<Record>,
    /// Explicit arm vocabulary, in the order arms should be dense-ranked.
    /// When `None`, the vocabulary is derived from the records themselves
    /// (first-occurrence order).
    pub arm_vocabulary: Option<Vec<Id>>,
}

/// Flattened, validated per-unit arm/reward/cost buffers, CSR-style:
/// unit `u`'s entries occupy `offsets[u]..offsets[u + 1]` across `arms`,
/// `rewards`, and `costs`.
#[derive(Debug, Clone)]
pub struct FlatBuffers {
    pub arms: Vec<ArmIndex>,
    pub rewards: Vec<f64>,
    pub costs: Vec<f64>,
    pub offsets: Vec<u32>,
    /// The original id of each unit, indexed by internal unit index.
    pub unit_ids: Vec<Id>,
}

impl FlatBuffers {
    pub fn n_units(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn unit_range(&self, u: usize) -> std::ops::Range<usize> {
        self.offsets[u] as usize..self.offsets[u + 1] as usize
    }

    /// Approximate resident footprint of the flat buffers, in bytes. Used
    /// only for the optional profiling note; not a precise peak-RSS figure.
    pub fn approx_bytes(&self) -> usize {
        self.arms.len() * std::mem::size_of::<ArmIndex>()
            + self.rewards.len() * std::mem::size_of::<f64>()
            + self.costs.len() * std::mem::size_of::<f64>()
            + self.offsets.len() * std::mem::size_of::<u32>()
    }
}

pub fn ingest(
    unit_interner: &UnitInterner,
    arm_interner: &ArmInterner,
    records: &[Record],
) -> Result<FlatBuffers, SolverError> {
    if records.len() != unit_interner.len() {
        return Err(SolverError::InvalidInput(format!(
            "record count ({}) does not match unit count ({})",
            records.len(),
            unit_interner.len()
        )));
    }

    let total: usize = records.iter().map(|r| r.arm_ids.len()).sum();
    let mut arms = Vec::with_capacity(total);
    let mut rewards = Vec::with_capacity(total);
    let mut costs = Vec::with_capacity(total);
    let mut offsets = Vec::with_capacity(records.len() + 1);
    offsets.push(0u32);

    for (u, record) in records.iter().enumerate() {
        if record.arm_ids.len() != record.rewards.len() || record.arm_ids.len() != record.costs.len()
        {
            return Err(SolverError::InvalidInput(format!(
                "unit {u}: arm_ids ({}), rewards ({}), and costs ({}) must have equal length",
                record.arm_ids.len(),
                record.rewards.len(),
                record.costs.len()
            )));
        }

        let mut seen_arms: FxHashSet<ArmIndex> = FxHashSet::default();
        for i in 0..record.arm_ids.len() {
            let arm_id = &record.arm_ids[i];
            let reward = record.rewards[i];
            let cost = record.costs[i];

            if reward.is_nan() || cost.is_nan() {
                return Err(SolverError::InvalidInput(format!(
                    "unit {u}, arm {arm_id}: reward/cost must not be NaN"
                )));
            }
            if !cost.is_finite() || cost < 0.0 {
                return Err(SolverError::InvalidInput(format!(
                    "unit {u}, arm {arm_id}: cost must be finite and non-negative, got {cost}"
                )));
            }
            if !reward.is_finite() {
                return Err(SolverError::InvalidInput(format!(
                    "unit {u}, arm {arm_id}: reward must be finite, got {reward}"
                )));
            }

            let arm = arm_interner.index_of(arm_id).ok_or_else(|| {
                SolverError::InvalidInput(format!(
                    "unit {u}: arm id {arm_id} is not in the arm vocabulary"
                ))
            })?;

            if !seen_arms.insert(arm) {
                return Err(SolverError::InvalidInput(format!(
                    "unit {u}: arm {arm_id} appears more than once"
                )));
            }

            if arm == CONTROL_ARM && (reward != 0.0 || cost != 0.0) {
                return Err(SolverError::InvalidInput(format!(
                    "unit {u}: the control/dns arm must have zero reward and zero cost, got ({reward}, {cost})"
                )));
            }

            arms.push(arm);
            rewards.push(reward);
            costs.push(cost);
        }
        offsets.push(arms.len() as u32);
    }

    Ok(FlatBuffers {
        arms,
        rewards,
        costs,
        offsets,
        unit_ids: unit_interner.ids().to_vec(),
    })
}
