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

//! Packages a [`crate::solver::PathOutcome`] together with the id mappings
//! needed to translate it back into the caller's own vocabulary.

use crate::common::Id;
use crate::interner::{ArmInterner, UnitInterner};
use crate::solver::PathOutcome;

/// The complete result of a [`crate::fit`] call: the global path plus the
/// id mappings needed to interpret `ipath`/`kpath` or to call
/// [`crate::predict`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutput {
    pub spend: Vec<f64>,
    pub gain: Vec<f64>,
    pub ipath: Vec<u32>,
    pub kpath: Vec<u32>,
    pub complete_path: bool,
    /// Original arm id for each dense [`crate::common::ArmIndex`].
    pub arm_id_mapping: Vec<Id>,
    /// Original unit id for each dense [`crate::common::UnitIndex`].
    pub unit_id_mapping: Vec<Id>,
}

pub fn assemble(
    outcome: PathOutcome,
    arm_interner: &ArmInterner,
    unit_interner: &UnitInterner,
) -> SolverOutput {
    let mut spend = Vec::with_capacity(outcome.steps.len());
    let mut gain = Vec::with_capacity(outcome.steps.len());
    let mut ipath = Vec::with_capacity(outcome.steps.len());
    let mut kpath = Vec::with_capacity(outcome.steps.len());
    for step in outcome.steps {
        spend.push(step.spend);
        gain.push(step.gain);
        ipath.push(step.unit.0);
        kpath.push(step.arm.0);
    }
    SolverOutput {
        spend,
        gain,
        ipath,
        kpath,
        complete_path: outcome.complete_path,
        arm_id_mapping: arm_interner.ids().to_vec(),
        unit_id_mapping: unit_interner.ids().to_vec(),
    }
}
