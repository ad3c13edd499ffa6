//! Canonical key representation.
//!
//! A [`CanonicalKey`] is the normalized, comparable form of one argument
//! value. Every variant is `Eq + Ord + Hash`, so canonical keys can be
//! stored in hash maps and sorted regardless of where they came from.
//!
//! ## Variant Order
//!
//! ```text
//!   Unit < Bool < Int < UInt < Float < Char < Str < Seq < Map < Repr
//! ```
//!
//! Ordering is total: keys of different variants compare by variant
//! position, keys of the same variant compare by payload. This is what
//! lets mapping arguments be sorted by key even when the keys are of mixed
//! types.

use std::fmt;

/// Normalized representation of a single argument value.
///
/// Produced by [`Normalize::normalize`](crate::key::Normalize::normalize).
/// Two argument values that are equal under normalization produce equal
/// canonical keys with identical hashes.
///
/// Integers of any width share one key per value, but integers, floats
/// and booleans never share keys with each other: `1`, `1.0` and `true`
/// are three distinct keys, unlike in dynamically typed memoizers where
/// they compare equal.
///
/// # Example
///
/// ```
/// use memokit::key::{CanonicalKey, Normalize};
///
/// assert_eq!(7u8.normalize(), CanonicalKey::Int(7));
/// assert_eq!(7i64.normalize(), 7u32.normalize());
/// assert_ne!(1i64.normalize(), 1.0f64.normalize());
/// assert_ne!(1i64.normalize(), true.normalize());
/// assert_eq!(
///     vec![1, 2].normalize(),
///     CanonicalKey::Seq(vec![CanonicalKey::Int(1), CanonicalKey::Int(2)])
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalKey {
    /// The unit value `()`.
    Unit,
    /// A boolean.
    Bool(bool),
    /// Any integer representable as `i128`.
    Int(i128),
    /// A `u128` above `i128::MAX`.
    UInt(u128),
    /// Canonical IEEE-754 bits of a float (see [`CanonicalKey::float`]).
    Float(u64),
    /// A single character.
    Char(char),
    /// An owned string.
    Str(String),
    /// An ordered sequence; equality is order-sensitive.
    Seq(Vec<CanonicalKey>),
    /// Mapping entries sorted ascending by key.
    Map(Vec<(CanonicalKey, CanonicalKey)>),
    /// String rendering of a value with no structural normalization.
    ///
    /// Distinct values that render identically collapse to the same key.
    Repr(String),
}

impl CanonicalKey {
    /// Builds a [`CanonicalKey::Float`] from canonical bits.
    ///
    /// `-0.0` and `0.0` map to the same key, and every NaN maps to one
    /// NaN payload.
    ///
    /// ```
    /// use memokit::key::CanonicalKey;
    ///
    /// assert_eq!(CanonicalKey::float(-0.0), CanonicalKey::float(0.0));
    /// assert_eq!(CanonicalKey::float(f64::NAN), CanonicalKey::float(-f64::NAN));
    /// assert_ne!(CanonicalKey::float(1.0), CanonicalKey::float(1.5));
    /// ```
    #[inline]
    pub fn float(value: f64) -> Self {
        let bits = if value.is_nan() {
            f64::NAN.to_bits()
        } else if value == 0.0 {
            0
        } else {
            value.to_bits()
        };
        CanonicalKey::Float(bits)
    }

    /// Builds a [`CanonicalKey::Map`] from unsorted entries.
    ///
    /// Entries are sorted by key so that insertion order does not affect
    /// equality.
    pub fn map_from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (CanonicalKey, CanonicalKey)>,
    {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort();
        CanonicalKey::Map(entries)
    }

    /// Builds a [`CanonicalKey::Seq`] whose order does not matter (sets).
    pub fn unordered<I>(items: I) -> Self
    where
        I: IntoIterator<Item = CanonicalKey>,
    {
        let mut items: Vec<_> = items.into_iter().collect();
        items.sort();
        CanonicalKey::Seq(items)
    }

    /// Returns `true` for keys produced by the string fallback.
    #[inline]
    pub fn is_repr(&self) -> bool {
        matches!(self, CanonicalKey::Repr(_))
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalKey::Unit => f.write_str("()"),
            CanonicalKey::Bool(b) => write!(f, "{b}"),
            CanonicalKey::Int(i) => write!(f, "{i}"),
            CanonicalKey::UInt(u) => write!(f, "{u}"),
            CanonicalKey::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            CanonicalKey::Char(c) => write!(f, "{c:?}"),
            CanonicalKey::Str(s) => write!(f, "{s:?}"),
            CanonicalKey::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
            CanonicalKey::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            },
            CanonicalKey::Repr(s) => write!(f, "<{s}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(key: &CanonicalKey) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn numeric_kinds_stay_distinct() {
        use crate::key::Normalize;

        let int = 1i64.normalize();
        let float = 1.0f64.normalize();
        let boolean = true.normalize();
        assert_ne!(int, float);
        assert_ne!(int, boolean);
        assert_ne!(float, boolean);
        assert_eq!(int, 1u8.normalize());
        assert_eq!(float, 1.0f32.normalize());
    }

    #[test]
    fn signed_zero_and_nan_collapse() {
        assert_eq!(CanonicalKey::float(0.0), CanonicalKey::float(-0.0));
        assert_eq!(
            hash_of(&CanonicalKey::float(0.0)),
            hash_of(&CanonicalKey::float(-0.0))
        );
        assert_eq!(
            CanonicalKey::float(f64::NAN),
            CanonicalKey::float(f64::from_bits(0x7ff8_0000_0000_0001))
        );
    }

    #[test]
    fn map_from_entries_ignores_input_order() {
        let a = CanonicalKey::map_from_entries(vec![
            (CanonicalKey::Str("b".into()), CanonicalKey::Int(2)),
            (CanonicalKey::Str("a".into()), CanonicalKey::Int(1)),
        ]);
        let b = CanonicalKey::map_from_entries(vec![
            (CanonicalKey::Str("a".into()), CanonicalKey::Int(1)),
            (CanonicalKey::Str("b".into()), CanonicalKey::Int(2)),
        ]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn mixed_variants_are_totally_ordered() {
        let mut keys = vec![
            CanonicalKey::Str("x".into()),
            CanonicalKey::Int(3),
            CanonicalKey::Unit,
            CanonicalKey::Bool(true),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                CanonicalKey::Unit,
                CanonicalKey::Bool(true),
                CanonicalKey::Int(3),
                CanonicalKey::Str("x".into()),
            ]
        );
    }

    #[test]
    fn display_renders_nested_structure() {
        let key = CanonicalKey::Seq(vec![
            CanonicalKey::Int(1),
            CanonicalKey::map_from_entries(vec![(
                CanonicalKey::Str("k".into()),
                CanonicalKey::Bool(false),
            )]),
        ]);
        assert_eq!(key.to_string(), r#"[1, {"k": false}]"#);
    }

    #[test]
    fn repr_is_flagged() {
        assert!(CanonicalKey::Repr("obj".into()).is_repr());
        assert!(!CanonicalKey::Str("obj".into()).is_repr());
    }
}
