//! Runtime sort keys
//!
//! Key extractors return any type convertible into `SortKey`. The comparison
//! mode is chosen once per sort from the runtime types of all keys.

use std::cmp::Ordering;
use std::fmt;

use crate::features::parsing::domain::NodeRef;

/// Sort key value
#[derive(Debug, Clone)]
pub enum SortKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Ordered by full textual rendering
    Node(NodeRef),
}

/// How a set of keys is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrdering {
    /// Int and Float keys compared as numbers
    Numeric,
    /// All keys share one variant
    Natural,
    /// Mixed variants, compared by string rendering
    Rendered,
}

impl SortKey {
    pub fn is_null(&self) -> bool {
        matches!(self, SortKey::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, SortKey::Int(_) | SortKey::Float(_))
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, SortKey::Float(f) if f.is_nan())
    }

    /// String rendering used for mixed-type comparison
    pub fn render(&self) -> String {
        match self {
            SortKey::Null => String::new(),
            SortKey::Bool(b) => b.to_string(),
            SortKey::Int(i) => i.to_string(),
            SortKey::Float(f) => f.to_string(),
            SortKey::Text(s) => s.clone(),
            SortKey::Node(n) => n.text().to_string(),
        }
    }

    /// Pick the comparison mode for a whole key set. Nulls do not vote.
    pub fn ordering_for(keys: &[SortKey]) -> KeyOrdering {
        let mut present = keys.iter().filter(|k| !k.is_null());
        let first = match present.next() {
            Some(first) => first,
            None => return KeyOrdering::Natural,
        };

        let mut all_numeric = first.is_numeric();
        let mut same_type = true;
        for key in present {
            all_numeric &= key.is_numeric();
            same_type &= std::mem::discriminant(key) == std::mem::discriminant(first);
        }

        if all_numeric {
            KeyOrdering::Numeric
        } else if same_type {
            KeyOrdering::Natural
        } else {
            KeyOrdering::Rendered
        }
    }

    /// Compare under `mode`. Null is the least value.
    ///
    /// NaN keys must be rejected before a numeric sort; they compare equal here.
    pub fn compare(&self, other: &SortKey, mode: KeyOrdering) -> Ordering {
        match (self, other) {
            (SortKey::Null, SortKey::Null) => return Ordering::Equal,
            (SortKey::Null, _) => return Ordering::Less,
            (_, SortKey::Null) => return Ordering::Greater,
            _ => {}
        }

        match mode {
            KeyOrdering::Numeric => match (self, other) {
                (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
                (SortKey::Float(a), SortKey::Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
                (SortKey::Int(a), SortKey::Float(b)) => compare_int_float(*a, *b),
                (SortKey::Float(a), SortKey::Int(b)) => compare_int_float(*b, *a).reverse(),
                _ => self.render().cmp(&other.render()),
            },
            KeyOrdering::Natural => match (self, other) {
                (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
                (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
                (SortKey::Node(a), SortKey::Node(b)) => a.text().cmp(b.text()),
                _ => self.render().cmp(&other.render()),
            },
            KeyOrdering::Rendered => self.render().cmp(&other.render()),
        }
    }
}

/// Exact `i64` vs `f64` comparison; no rounding through `as f64`
fn compare_int_float(int: i64, float: f64) -> Ordering {
    // 2^63: the first float above every i64
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return Ordering::Equal;
    }
    if float >= I64_BOUND {
        return Ordering::Less;
    }
    if float < -I64_BOUND {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    match i128::from(int).cmp(&(whole as i128)) {
        Ordering::Equal => whole.partial_cmp(&float).unwrap_or(Ordering::Equal),
        unequal => unequal,
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Null => f.write_str("null"),
            other => f.write_str(&other.render()),
        }
    }
}

impl From<bool> for SortKey {
    fn from(value: bool) -> Self {
        SortKey::Bool(value)
    }
}

macro_rules! int_sort_key {
    ($($t:ty),+) => {$(
        impl From<$t> for SortKey {
            fn from(value: $t) -> Self {
                SortKey::Int(i64::from(value))
            }
        }
    )+};
}

int_sort_key!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for SortKey {
    fn from(value: usize) -> Self {
        i64::try_from(value)
            .map(SortKey::Int)
            .unwrap_or(SortKey::Float(value as f64))
    }
}

impl From<u64> for SortKey {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(SortKey::Int)
            .unwrap_or(SortKey::Float(value as f64))
    }
}

impl From<f32> for SortKey {
    fn from(value: f32) -> Self {
        SortKey::Float(f64::from(value))
    }
}

impl From<f64> for SortKey {
    fn from(value: f64) -> Self {
        SortKey::Float(value)
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        SortKey::Text(value)
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        SortKey::Text(value.to_string())
    }
}

impl From<NodeRef> for SortKey {
    fn from(value: NodeRef) -> Self {
        SortKey::Node(value)
    }
}

impl<K: Into<SortKey>> From<Option<K>> for SortKey {
    fn from(value: Option<K>) -> Self {
        value.map_or(SortKey::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::domain::{DeclarationKind, DeclarationNode};

    fn sorted(mut keys: Vec<SortKey>) -> Vec<String> {
        let mode = SortKey::ordering_for(&keys);
        keys.sort_by(|a, b| a.compare(b, mode));
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_numeric_mixes_int_and_float() {
        let keys = vec![SortKey::from(10), SortKey::from(2.5), SortKey::from(3)];
        assert_eq!(SortKey::ordering_for(&keys), KeyOrdering::Numeric);
        assert_eq!(sorted(keys), vec!["2.5", "3", "10"]);
    }

    #[test]
    fn test_text_is_ordinal() {
        let keys = vec![SortKey::from("beta"), SortKey::from("Alpha"), SortKey::from("alpha")];
        assert_eq!(sorted(keys), vec!["Alpha", "alpha", "beta"]);
    }

    #[test]
    fn test_null_sorts_first() {
        let keys = vec![SortKey::from(Some(2)), SortKey::from(None::<i32>), SortKey::from(1)];
        assert_eq!(SortKey::ordering_for(&keys), KeyOrdering::Numeric);
        assert_eq!(sorted(keys), vec!["null", "1", "2"]);
    }

    #[test]
    fn test_mixed_types_compare_rendered() {
        let keys = vec![SortKey::from("b"), SortKey::from(true), SortKey::from(7)];
        assert_eq!(SortKey::ordering_for(&keys), KeyOrdering::Rendered);
        assert_eq!(sorted(keys), vec!["7", "b", "true"]);
    }

    #[test]
    fn test_node_keys_compare_by_text() {
        let a = DeclarationNode::new(DeclarationKind::Class, "class A {}").into_ref();
        let b = DeclarationNode::new(DeclarationKind::Class, "class B {}").into_ref();
        let keys = vec![SortKey::from(b), SortKey::from(a)];
        assert_eq!(SortKey::ordering_for(&keys), KeyOrdering::Natural);
        assert_eq!(sorted(keys), vec!["class A {}", "class B {}"]);
    }

    #[test]
    fn test_int_float_compare_exactly_past_f64_precision() {
        let two_53 = 1_i64 << 53;
        let above = SortKey::Int(two_53 + 1);
        let float = SortKey::Float(two_53 as f64);

        assert_eq!(above.compare(&float, KeyOrdering::Numeric), Ordering::Greater);
        assert_eq!(float.compare(&above, KeyOrdering::Numeric), Ordering::Less);
        assert_eq!(
            SortKey::Int(two_53).compare(&float, KeyOrdering::Numeric),
            Ordering::Equal
        );

        let keys = vec![above.clone(), float.clone(), SortKey::Int(two_53), SortKey::Float(-0.5)];
        let mode = SortKey::ordering_for(&keys);
        for a in &keys {
            for b in &keys {
                for c in &keys {
                    if a.compare(b, mode) != Ordering::Greater && b.compare(c, mode) != Ordering::Greater {
                        assert_ne!(a.compare(c, mode), Ordering::Greater, "{} {} {}", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_int_float_fractions_and_extremes() {
        let cmp = |i: i64, f: f64| SortKey::Int(i).compare(&SortKey::Float(f), KeyOrdering::Numeric);
        assert_eq!(cmp(2, 2.5), Ordering::Less);
        assert_eq!(cmp(-1, -1.5), Ordering::Greater);
        assert_eq!(cmp(-1, -0.5), Ordering::Less);
        assert_eq!(cmp(i64::MAX, f64::INFINITY), Ordering::Less);
        assert_eq!(cmp(i64::MIN, f64::NEG_INFINITY), Ordering::Greater);
        assert_eq!(cmp(i64::MAX, 9_223_372_036_854_775_808.0), Ordering::Less);
        assert_eq!(cmp(i64::MIN, -9_223_372_036_854_775_808.0), Ordering::Equal);
    }

    #[test]
    fn test_nan_detected() {
        assert!(SortKey::from(f64::NAN).is_nan());
        assert!(!SortKey::from(1.0).is_nan());
        assert!(!SortKey::from("NaN").is_nan());
    }
}
