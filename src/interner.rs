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

//! Maps the caller's opaque unit/arm identifiers onto the dense indices the
//! rest of the crate operates on. Arm interning additionally folds the
//! "dns" (do-not-serve) identifier, case-insensitively, onto index 0 so that
//! the synthesized control arm and a caller-supplied "dns" row are always the
//! same arm.

use fxhash::{FxHashMap, FxHashSet};

use crate::common::{ArmIndex, Id, UnitIndex};
use crate::error::SolverError;
use crate::ingest::Record;

/// Dense unit-id <-> [`UnitIndex`] mapping. Units are ranked in the order
/// their ids are first seen; duplicates and null ids are rejected.
#[derive(Debug, Clone)]
pub struct UnitInterner {
    index_of: FxHashMap<Id, u32>,
    ids: Vec<Id>,
}

impl UnitInterner {
    pub fn intern(unit_ids: &[Id]) -> Result<Self, SolverError> {
        let mut index_of = FxHashMap::default();
        index_of.reserve(unit_ids.len());
        let mut ids = Vec::with_capacity(unit_ids.len());
        for id in unit_ids {
            if id.is_null() {
                return Err(SolverError::InvalidInput(
                    "unit id must not be null/empty".to_string(),
                ));
            }
            if index_of.contains_key(id) {
                return Err(SolverError::InvalidInput(format!(
                    "duplicate unit id: {id}"
                )));
            }
            let idx = ids.len() as u32;
            index_of.insert(id.clone(), idx);
            ids.push(id.clone());
        }
        Ok(Self { index_of, ids })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn index_of(&self, id: &Id) -> Option<UnitIndex> {
        self.index_of.get(id).copied().map(UnitIndex)
    }

    pub fn ids(&self) -> &[Id] {
        &self.ids
    }
}

/// Dense arm-id <-> [`ArmIndex`] mapping. Index 0 is always the control arm:
/// the caller's "dns" entry if one is present in the vocabulary, or a
/// synthesized `Id::Str("dns")` otherwise. Remaining arms keep the stable
/// dense rank of the vocabulary's iteration order.
#[derive(Debug, Clone)]
pub struct ArmInterner {
    index_of: FxHashMap<Id, u32>,
    ids: Vec<Id>,
}

impl ArmInterner {
    pub fn intern(vocabulary: &[Id]) -> Result<Self, SolverError> {
        let mut seen = FxHashSet::default();
        seen.reserve(vocabulary.len());
        let mut dns_id: Option<Id> = None;
        let mut others: Vec<Id> = Vec::with_capacity(vocabulary.len());

        for id in vocabulary {
            if id.is_null() {
                return Err(SolverError::InvalidInput(
                    "arm id must not be null/empty".to_string(),
                ));
            }
            if !seen.insert(id.clone()) {
                return Err(SolverError::InvalidInput(format!(
                    "duplicate arm id in vocabulary: {id}"
                )));
            }
            if id.is_dns() {
                dns_id = Some(id.clone());
            } else {
                others.push(id.clone());
            }
        }

        let mut ids = Vec::with_capacity(others.len() + 1);
        ids.push(dns_id.unwrap_or_else(|| Id::from("dns")));
        ids.extend(others);

        let mut index_of = FxHashMap::default();
        index_of.reserve(ids.len());
        for (i, id) in ids.iter().enumerate() {
            index_of.insert(id.clone(), i as u32);
        }

        Ok(Self { index_of, ids })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn index_of(&self, id: &Id) -> Option<ArmIndex> {
        self.index_of.get(id).copied().map(ArmIndex)
    }

    pub fn ids(&self) -> &[Id] {
        &self.ids
    }
}

/// When the caller doesn't supply an explicit arm vocabulary, it is derived
/// from the records themselves: the first-occurrence order across all units,
/// scanned in unit order and, within a unit, in record order.
pub fn collect_vocabulary(records: &[Record]) -> Vec<Id> {
    let mut seen = FxHashSet::default();
    let mut vocab = Vec::new();
    for record in records {
        for id in &record.arm_ids {
            if seen.insert(id.clone()) {
                vocab.push(id.clone());
            }
        }
    }
    vocab
}
