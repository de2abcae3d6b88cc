//! FILENAME: core/pivot-engine/src/cache.rs
//! Axis Cache - Interned axis labels.
//!
//! Each distinct axis label is stored once and referenced by a dense id.
//! Ids are handed out in first-occurrence order, so iterating the id space
//! reproduces the order in which labels first appear in the dataset.

use std::fmt;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use dataset::{format_number, Value};

// ============================================================================
// LABEL INTERNING
// ============================================================================

/// A reference to an interned label within one axis.
/// Using u32 to save memory (supports up to 4B distinct labels per axis).
pub type LabelId = u32;

/// A normalized, hashable representation of a record value.
/// Used as the key for axis lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisLabel {
    Empty,
    Number(OrderedFloat),
    Text(String),
    Boolean(bool),
}

impl From<&Value> for AxisLabel {
    fn from(value: &Value) -> Self {
        match value {
            Value::Empty => AxisLabel::Empty,
            Value::Number(n) => AxisLabel::Number(OrderedFloat(*n)),
            Value::Text(s) => AxisLabel::Text(s.clone()),
            Value::Boolean(b) => AxisLabel::Boolean(*b),
        }
    }
}

impl From<Value> for AxisLabel {
    fn from(value: Value) -> Self {
        match value {
            Value::Text(s) => AxisLabel::Text(s),
            other => AxisLabel::from(&other),
        }
    }
}

impl From<&AxisLabel> for AxisLabel {
    fn from(label: &AxisLabel) -> Self {
        label.clone()
    }
}

impl From<&str> for AxisLabel {
    fn from(s: &str) -> Self {
        AxisLabel::Text(s.to_string())
    }
}

impl From<String> for AxisLabel {
    fn from(s: String) -> Self {
        AxisLabel::Text(s)
    }
}

impl From<f64> for AxisLabel {
    fn from(n: f64) -> Self {
        AxisLabel::Number(OrderedFloat(n))
    }
}

impl From<bool> for AxisLabel {
    fn from(b: bool) -> Self {
        AxisLabel::Boolean(b)
    }
}

impl fmt::Display for AxisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisLabel::Empty => Ok(()),
            AxisLabel::Number(n) => f.write_str(&format_number(n.0)),
            AxisLabel::Text(s) => f.write_str(s),
            AxisLabel::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

/// Wrapper around f64 that implements Eq and Hash for use as HashMap keys.
/// NaN values are treated as equal to each other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        if self.0.is_nan() && other.0.is_nan() {
            true
        } else {
            self.0 == other.0
        }
    }
}

impl Eq for OrderedFloat {}

impl std::hash::Hash for OrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        if self.0.is_nan() {
            // All NaN values hash to the same thing
            u64::MAX.hash(state);
        } else if self.0 == 0.0 {
            // 0.0 == -0.0, so they must hash alike
            0u64.hash(state);
        } else {
            self.0.to_bits().hash(state);
        }
    }
}

impl OrderedFloat {
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

// ============================================================================
// AXIS VALUES
// ============================================================================

/// Distinct labels of one axis, in first-occurrence order.
/// Provides O(1) lookup in both directions.
#[derive(Debug, Clone, Default)]
pub struct AxisValues {
    /// Map from label to its id (for deduplication and query lookups).
    label_to_id: FxHashMap<AxisLabel, LabelId>,

    /// Ordered list of distinct labels (indexed by LabelId).
    id_to_label: Vec<AxisLabel>,
}

impl AxisValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a label and returns its id.
    /// If the label already exists, returns the existing id.
    pub fn intern(&mut self, label: AxisLabel) -> LabelId {
        if let Some(&id) = self.label_to_id.get(&label) {
            return id;
        }

        let id = self.id_to_label.len() as LabelId;
        self.id_to_label.push(label.clone());
        self.label_to_id.insert(label, id);
        id
    }

    /// Looks up the id of a label without interning it.
    pub fn id_of(&self, label: &AxisLabel) -> Option<LabelId> {
        self.label_to_id.get(label).copied()
    }

    pub fn label(&self, id: LabelId) -> Option<&AxisLabel> {
        self.id_to_label.get(id as usize)
    }

    /// All labels, in first-occurrence order.
    pub fn labels(&self) -> &[AxisLabel] {
        &self.id_to_label
    }

    pub fn len(&self) -> usize {
        self.id_to_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_label.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedupes_in_first_seen_order() {
        let mut axis = AxisValues::new();
        assert_eq!(axis.intern("Jan".into()), 0);
        assert_eq!(axis.intern("Feb".into()), 1);
        assert_eq!(axis.intern("Jan".into()), 0);
        assert_eq!(axis.intern(3.0.into()), 2);

        assert_eq!(axis.len(), 3);
        assert_eq!(
            axis.labels(),
            &[AxisLabel::from("Jan"), AxisLabel::from("Feb"), AxisLabel::from(3.0)]
        );
        assert_eq!(axis.id_of(&"Feb".into()), Some(1));
        assert_eq!(axis.id_of(&"Mar".into()), None);
        assert_eq!(axis.label(2), Some(&AxisLabel::from(3.0)));
    }

    #[test]
    fn test_number_and_text_labels_are_distinct() {
        let mut axis = AxisValues::new();
        let number = axis.intern(AxisLabel::from(&Value::Number(1.0)));
        let text = axis.intern(AxisLabel::from(&Value::Text("1".to_string())));
        assert_ne!(number, text);
    }

    #[test]
    fn test_nan_and_signed_zero_keys() {
        let mut axis = AxisValues::new();
        let a = axis.intern(f64::NAN.into());
        let b = axis.intern(f64::NAN.into());
        assert_eq!(a, b);

        let zero = axis.intern(0.0.into());
        let neg_zero = axis.intern((-0.0).into());
        assert_eq!(zero, neg_zero);
    }

    #[test]
    fn test_display() {
        assert_eq!(AxisLabel::from(2024.0).to_string(), "2024");
        assert_eq!(AxisLabel::from(1.5).to_string(), "1.5");
        assert_eq!(AxisLabel::from("North").to_string(), "North");
        assert_eq!(AxisLabel::Empty.to_string(), "");
        assert_eq!(AxisLabel::from(true).to_string(), "TRUE");
    }
}
