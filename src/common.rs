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

//! This module defines the most basic data types used throughout the crate:
//! dense unit/arm indices, the opaque identifiers they are interned from, and
//! the (reward, cost) entry that a unit/arm pair carries.

use std::fmt;

// ----------------------------------------------------------------------------
// --- UNIT / ARM INDICES -------------------------------------------------------
// ----------------------------------------------------------------------------

/// A dense, zero-based index identifying a unit among the `N` units of a
/// `fit` call. Interning (see [`crate::interner`]) is the only place that
/// manufactures these.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct UnitIndex(pub u32);
impl UnitIndex {
    #[inline]
    pub fn id(self) -> usize {
        self.0 as usize
    }
}
impl fmt::Display for UnitIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A dense, zero-based index identifying an arm among the `K` arms of a `fit`
/// call. Index 0 is always [`CONTROL_ARM`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ArmIndex(pub u32);
impl ArmIndex {
    #[inline]
    pub fn id(self) -> usize {
        self.0 as usize
    }
}
impl fmt::Display for ArmIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The mandatory zero-cost, zero-reward control arm, implicitly present for
/// every unit at frontier position 0.
pub const CONTROL_ARM: ArmIndex = ArmIndex(0);

// ----------------------------------------------------------------------------
// --- OPAQUE IDENTIFIERS -------------------------------------------------------
// ----------------------------------------------------------------------------

/// An opaque unit-id or arm-id as supplied by the caller, before interning.
/// Callers may identify units and arms by string or by integer; both forms
/// are accepted and compared structurally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Id {
    Str(Box<str>),
    Int(i64),
}
impl Id {
    /// A null id is an empty string. Integer ids have no null representation.
    pub fn is_null(&self) -> bool {
        matches!(self, Id::Str(s) if s.is_empty())
    }
    /// True for the case-insensitive literal `"dns"` ("do not serve"), the
    /// domain-specific name for the control arm.
    pub fn is_dns(&self) -> bool {
        matches!(self, Id::Str(s) if s.eq_ignore_ascii_case("dns"))
    }
}
impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::Str(s.into())
    }
}
impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::Str(s.into_boxed_str())
    }
}
impl From<i64> for Id {
    fn from(v: i64) -> Self {
        Id::Int(v)
    }
}
impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Str(s) => write!(f, "{s}"),
            Id::Int(v) => write!(f, "{v}"),
        }
    }
}

// ----------------------------------------------------------------------------
// --- ENTRY / PATH STEP --------------------------------------------------------
// ----------------------------------------------------------------------------

/// The (arm, reward, cost) triple for one (unit, arm) pair, prior to Pareto
/// filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub arm: ArmIndex,
    pub reward: f64,
    pub cost: f64,
}

/// One step of the global path: unit `unit` moves from its previous arm to
/// `arm`, bringing running totals to `spend`/`gain`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    pub spend: f64,
    pub gain: f64,
    pub unit: UnitIndex,
    pub arm: ArmIndex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dns_is_case_insensitive() {
        assert!(Id::from("dns").is_dns());
        assert!(Id::from("DNS").is_dns());
        assert!(Id::from("DnS").is_dns());
        assert!(!Id::from("x").is_dns());
    }

    #[test]
    fn integers_are_never_dns_or_null() {
        assert!(!Id::from(0i64).is_dns());
        assert!(!Id::from(0i64).is_null());
    }

    #[test]
    fn empty_string_is_null() {
        assert!(Id::from("").is_null());
        assert!(!Id::from("a").is_null());
    }
}
