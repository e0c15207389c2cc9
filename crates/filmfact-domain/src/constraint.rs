//! Acceptance constraints over extracted attribute values
//!
//! Constraints are a closed tagged-variant type, not an open class hierarchy.
//! Every constraint is disabled by default; a disabled constraint always
//! passes. Only [`Constraint::Availability`] rejects on an absent field —
//! the other three treat absence or extraction failure as "not applicable"
//! and pass.

use std::collections::BTreeSet;
use std::fmt;

/// What an attribute managed to extract from a record, as seen by a
/// constraint check
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// The field is absent or nothing could be parsed from it
    Unavailable,
    /// Number of fact lines the attribute generated (availability checks)
    Lines(usize),
    /// A single numeric value (range checks)
    Number(i64),
    /// Several numeric values (range-multiple checks)
    Numbers(Vec<i64>),
    /// Vocabulary terms (value-set checks)
    Terms(Vec<String>),
}

/// An acceptance gate applied to one attribute
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// The field must yield at least one fact line; `unique` demands exactly one
    Availability {
        /// Require exactly one line instead of at least one
        unique: bool,
    },
    /// A single numeric value must lie in `[min, max]`
    Range {
        /// Inclusive lower bound
        min: i64,
        /// Inclusive upper bound
        max: i64,
    },
    /// At least one of several numeric values must lie in `[min, max]`
    RangeMultiple {
        /// Inclusive lower bound
        min: i64,
        /// Inclusive upper bound
        max: i64,
    },
    /// At least one extracted term must belong to the enabled subset of a
    /// fixed vocabulary
    ValueSet {
        /// The full fixed vocabulary for this attribute
        vocabulary: Vec<String>,
        /// The subset currently selected for acceptance
        enabled: BTreeSet<String>,
    },
}

impl Constraint {
    /// Evaluate against an extraction result.
    ///
    /// The disabled case is handled by [`ConstraintSlot`]; this is the
    /// enabled-path predicate.
    pub fn evaluate(&self, extraction: &Extraction) -> bool {
        match (self, extraction) {
            // availability is the one constraint that fails on absence
            (Constraint::Availability { .. }, Extraction::Unavailable) => false,
            (Constraint::Availability { unique }, Extraction::Lines(n)) => {
                if *unique {
                    *n == 1
                } else {
                    *n >= 1
                }
            }
            // everything else treats absence as "not applicable"
            (_, Extraction::Unavailable) => true,
            (Constraint::Range { min, max }, Extraction::Number(v)) => *min <= *v && *v <= *max,
            (Constraint::RangeMultiple { min, max }, Extraction::Numbers(vs)) => {
                // one number in the range is enough
                vs.iter().any(|v| *min <= *v && *v <= *max)
            }
            (Constraint::ValueSet { enabled, .. }, Extraction::Terms(ts)) => {
                // one enabled term is enough
                ts.iter().any(|t| enabled.contains(t))
            }
            // mismatched probe shape: not applicable
            _ => true,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Availability { unique: true } => write!(f, "Availability (unique)"),
            Constraint::Availability { unique: false } => write!(f, "Availability"),
            Constraint::Range { min, max } => write!(f, "Range {}-{}", min, max),
            Constraint::RangeMultiple { min, max } => write!(f, "RangeMultiple {}-{}", min, max),
            Constraint::ValueSet { enabled, .. } => {
                let chosen: Vec<_> = enabled.iter().map(String::as_str).collect();
                write!(f, "ValueSet {}", chosen.join(","))
            }
        }
    }
}

/// A constraint together with its opt-in flag
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSlot {
    /// Whether the constraint participates in acceptance
    pub enabled: bool,
    /// The constraint itself
    pub constraint: Constraint,
}

impl ConstraintSlot {
    /// New disabled slot (constraints are opt-in gates)
    pub fn new(constraint: Constraint) -> Self {
        Self {
            enabled: false,
            constraint,
        }
    }

    /// New enabled slot
    pub fn enabled(constraint: Constraint) -> Self {
        Self {
            enabled: true,
            constraint,
        }
    }

    /// Evaluate; a disabled slot always passes
    pub fn evaluate(&self, extraction: &Extraction) -> bool {
        if !self.enabled {
            return true;
        }
        self.constraint.evaluate(extraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_set(vocabulary: &[&str], enabled: &[&str]) -> Constraint {
        Constraint::ValueSet {
            vocabulary: vocabulary.iter().map(|s| s.to_string()).collect(),
            enabled: enabled.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_disabled_slot_always_passes() {
        let slot = ConstraintSlot::new(Constraint::Availability { unique: false });
        assert!(slot.evaluate(&Extraction::Unavailable));
        assert!(slot.evaluate(&Extraction::Lines(0)));
    }

    #[test]
    fn test_availability_fails_on_absence() {
        let slot = ConstraintSlot::enabled(Constraint::Availability { unique: false });
        assert!(!slot.evaluate(&Extraction::Unavailable));
        assert!(!slot.evaluate(&Extraction::Lines(0)));
        assert!(slot.evaluate(&Extraction::Lines(1)));
        assert!(slot.evaluate(&Extraction::Lines(3)));
    }

    #[test]
    fn test_availability_unique_needs_exactly_one() {
        let slot = ConstraintSlot::enabled(Constraint::Availability { unique: true });
        assert!(!slot.evaluate(&Extraction::Lines(0)));
        assert!(slot.evaluate(&Extraction::Lines(1)));
        assert!(!slot.evaluate(&Extraction::Lines(2)));
    }

    #[test]
    fn test_range_passes_when_absent() {
        let slot = ConstraintSlot::enabled(Constraint::Range { min: 1888, max: 2050 });
        assert!(slot.evaluate(&Extraction::Unavailable));
        assert!(slot.evaluate(&Extraction::Number(1976)));
        assert!(!slot.evaluate(&Extraction::Number(1500)));
    }

    #[test]
    fn test_range_multiple_one_hit_is_enough() {
        let slot = ConstraintSlot::enabled(Constraint::RangeMultiple { min: 0, max: 100 });
        assert!(slot.evaluate(&Extraction::Numbers(vec![5000, 42])));
        assert!(!slot.evaluate(&Extraction::Numbers(vec![5000, 9000])));
        assert!(slot.evaluate(&Extraction::Unavailable));
    }

    #[test]
    fn test_value_set_membership() {
        let slot = ConstraintSlot::enabled(value_set(
            &["Color", "Black and White"],
            &["Black and White"],
        ));
        assert!(slot.evaluate(&Extraction::Terms(vec![
            "Color".to_string(),
            "Black and White".to_string()
        ])));
        assert!(!slot.evaluate(&Extraction::Terms(vec!["Color".to_string()])));
        assert!(slot.evaluate(&Extraction::Unavailable));
    }
}
