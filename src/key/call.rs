//! Composite cache keys for whole calls.
//!
//! A [`CacheKey`] pairs the canonical keys of a call's positional
//! arguments (in call order) with its keyword arguments (sorted by name).
//!
//! ```text
//!   f(1, [2, 3], scale = 2.0, mode = "fast")
//!
//!   CacheKey {
//!       positional: [Int(1), Seq[Int(2), Int(3)]],
//!       keyword:    [("mode", Str("fast")), ("scale", Float(..))],
//!   }
//! ```
//!
//! Argument types describe their own key through [`CallKey`]. Tuples cover
//! positional-only calls, [`Kwargs`] covers keyword-only calls and [`Call`]
//! combines the two. Anything else can build a key by hand with
//! [`KeyBuilder`].

use std::collections::BTreeMap;
use std::fmt;

use crate::key::canonical::CanonicalKey;
use crate::key::normalize::Normalize;

/// Composite key identifying one call of a memoized function.
///
/// Two calls with the same positional arguments and the same keyword
/// arguments, in any keyword order, produce equal keys.
///
/// # Example
///
/// ```
/// use memokit::key::CacheKey;
///
/// let a = CacheKey::builder().arg(&1).kwarg("x", &1).kwarg("y", &2).build();
/// let b = CacheKey::builder().arg(&1).kwarg("y", &2).kwarg("x", &1).build();
/// assert_eq!(a, b);
///
/// let c = CacheKey::builder().arg(&2).arg(&1).build();
/// let d = CacheKey::builder().arg(&1).arg(&2).build();
/// assert_ne!(c, d);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CacheKey {
    positional: Vec<CanonicalKey>,
    keyword: Vec<(String, CanonicalKey)>,
}

impl CacheKey {
    /// Starts an empty key builder.
    #[inline]
    pub fn builder() -> KeyBuilder {
        KeyBuilder::default()
    }

    /// Canonical keys of the positional arguments, in call order.
    #[inline]
    pub fn positional(&self) -> &[CanonicalKey] {
        &self.positional
    }

    /// Keyword arguments as `(name, key)` pairs sorted by name.
    #[inline]
    pub fn keyword(&self) -> &[(String, CanonicalKey)] {
        &self.keyword
    }

    /// Returns `true` if any argument went through the string fallback.
    pub fn is_lossy(&self) -> bool {
        fn lossy(key: &CanonicalKey) -> bool {
            match key {
                CanonicalKey::Repr(_) => true,
                CanonicalKey::Seq(items) => items.iter().any(lossy),
                CanonicalKey::Map(entries) => entries.iter().any(|(k, v)| lossy(k) || lossy(v)),
                _ => false,
            }
        }

        self.positional.iter().any(lossy) || self.keyword.iter().any(|(_, v)| lossy(v))
    }
}

/// Renders as an argument list, e.g. `(1, [2, 3], mode="fast")`.
impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        let positional = self.positional.iter().map(|k| (None, k));
        let keyword = self.keyword.iter().map(|(name, k)| (Some(name), k));
        for (i, (name, key)) in positional.chain(keyword).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match name {
                Some(name) => write!(f, "{name}={key}")?,
                None => write!(f, "{key}")?,
            }
        }
        f.write_str(")")
    }
}

/// Incremental builder for a [`CacheKey`].
///
/// Keyword arguments may be supplied in any order. Supplying the same name
/// twice keeps the last value.
#[derive(Debug, Clone, Default)]
pub struct KeyBuilder {
    positional: Vec<CanonicalKey>,
    keyword: BTreeMap<String, CanonicalKey>,
}

impl KeyBuilder {
    /// Appends a positional argument.
    #[inline]
    pub fn arg<T: Normalize + ?Sized>(mut self, value: &T) -> Self {
        self.positional.push(value.normalize());
        self
    }

    /// Sets a keyword argument.
    #[inline]
    pub fn kwarg<T: Normalize + ?Sized>(mut self, name: impl Into<String>, value: &T) -> Self {
        self.keyword.insert(name.into(), value.normalize());
        self
    }

    /// Appends an already-normalized positional argument.
    #[inline]
    pub fn push_canonical(&mut self, key: CanonicalKey) {
        self.positional.push(key);
    }

    /// Finishes the key, with keyword arguments sorted by name.
    pub fn build(self) -> CacheKey {
        CacheKey {
            positional: self.positional,
            keyword: self.keyword.into_iter().collect(),
        }
    }
}

/// Types that describe the arguments of one call.
///
/// Implemented for tuples (positional arguments), [`Kwargs`] and [`Call`].
///
/// # Example
///
/// ```
/// use memokit::key::{CacheKey, CallKey};
///
/// struct Query<'a> {
///     table: &'a str,
///     limit: u32,
/// }
///
/// impl CallKey for Query<'_> {
///     fn cache_key(&self) -> CacheKey {
///         CacheKey::builder()
///             .kwarg("table", self.table)
///             .kwarg("limit", &self.limit)
///             .build()
///     }
/// }
///
/// let q = Query { table: "users", limit: 10 };
/// assert_eq!(q.cache_key().keyword()[0].0, "limit");
/// ```
pub trait CallKey {
    /// Returns the composite key for this call.
    fn cache_key(&self) -> CacheKey;
}

/// Types whose elements are individual positional arguments.
///
/// A tuple `(a, b)` is two positional arguments, not one sequence
/// argument.
pub trait Positional {
    /// Appends one canonical key per positional argument.
    fn push_args(&self, builder: &mut KeyBuilder);
}

impl Positional for () {
    #[inline]
    fn push_args(&self, _builder: &mut KeyBuilder) {}
}

impl CallKey for () {
    #[inline]
    fn cache_key(&self) -> CacheKey {
        CacheKey::default()
    }
}

macro_rules! positional_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Normalize),+> Positional for ($($name,)+) {
            fn push_args(&self, builder: &mut KeyBuilder) {
                $(builder.push_canonical(self.$idx.normalize());)+
            }
        }

        impl<$($name: Normalize),+> CallKey for ($($name,)+) {
            fn cache_key(&self) -> CacheKey {
                let mut builder = KeyBuilder::default();
                self.push_args(&mut builder);
                builder.build()
            }
        }
    };
}

positional_tuple!(A 0);
positional_tuple!(A 0, B 1);
positional_tuple!(A 0, B 1, C 2);
positional_tuple!(A 0, B 1, C 2, D 3);
positional_tuple!(A 0, B 1, C 2, D 3, E 4);
positional_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
positional_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
positional_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

/// Named arguments sharing one value type.
///
/// # Example
///
/// ```
/// use memokit::key::{CallKey, Kwargs};
///
/// let a = Kwargs::new().with("x", 1).with("y", 2);
/// let b = Kwargs::new().with("y", 2).with("x", 1);
/// assert_eq!(a.cache_key(), b.cache_key());
/// assert_eq!(a.get("y"), Some(&2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Kwargs<V> {
    entries: Vec<(String, V)>,
}

impl<V> Kwargs<V> {
    /// Creates an empty argument set.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a named argument, replacing any earlier value with that name.
    pub fn with(mut self, name: impl Into<String>, value: V) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a named argument, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            },
        }
    }

    /// Returns the value of a named argument.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterates arguments in the order they were supplied.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of named arguments.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no named arguments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for Kwargs<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Normalize> Kwargs<V> {
    fn push_kwargs(&self, mut builder: KeyBuilder) -> KeyBuilder {
        for (name, value) in &self.entries {
            builder = builder.kwarg(name.as_str(), value);
        }
        builder
    }
}

impl<V: Normalize> CallKey for Kwargs<V> {
    fn cache_key(&self) -> CacheKey {
        self.push_kwargs(KeyBuilder::default()).build()
    }
}

/// Positional arguments plus named arguments.
///
/// # Example
///
/// ```
/// use memokit::key::{Call, CallKey, Kwargs};
///
/// let a = Call::new((1, 2), Kwargs::new().with("scale", 3).with("bias", 0));
/// let b = Call::new((1, 2), Kwargs::new().with("bias", 0).with("scale", 3));
/// assert_eq!(a.cache_key(), b.cache_key());
/// assert_eq!(a.cache_key().positional().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Call<P, V> {
    /// Positional arguments.
    pub args: P,
    /// Named arguments.
    pub kwargs: Kwargs<V>,
}

impl<P, V> Call<P, V> {
    /// Pairs positional and named arguments.
    #[inline]
    pub fn new(args: P, kwargs: Kwargs<V>) -> Self {
        Self { args, kwargs }
    }
}

impl<P: Positional, V: Normalize> CallKey for Call<P, V> {
    fn cache_key(&self) -> CacheKey {
        let mut builder = KeyBuilder::default();
        self.args.push_args(&mut builder);
        self.kwargs.push_kwargs(builder).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_elements_are_separate_positional_args() {
        let key = (1, "a").cache_key();
        assert_eq!(
            key.positional(),
            &[CanonicalKey::Int(1), CanonicalKey::Str("a".into())]
        );
        assert!(key.keyword().is_empty());
    }

    #[test]
    fn single_sequence_argument_stays_nested() {
        let key = (vec![1, 2],).cache_key();
        assert_eq!(key.positional().len(), 1);
        assert_ne!(key, (1, 2).cache_key());
    }

    #[test]
    fn unit_call_has_empty_key() {
        assert_eq!(().cache_key(), CacheKey::default());
        assert_eq!(().cache_key().to_string(), "()");
    }

    #[test]
    fn display_lists_positional_then_keyword() {
        let key = CacheKey::builder()
            .arg(&1)
            .arg(&vec![2, 3])
            .kwarg("mode", "fast")
            .build();
        assert_eq!(key.to_string(), r#"(1, [2, 3], mode="fast")"#);
    }

    #[test]
    fn keyword_order_does_not_matter() {
        let a = CacheKey::builder().kwarg("x", &1).kwarg("y", &2).build();
        let b = CacheKey::builder().kwarg("y", &2).kwarg("x", &1).build();
        assert_eq!(a, b);
        assert_eq!(a.keyword()[0].0, "x");
        assert_eq!(a.keyword()[1].0, "y");
    }

    #[test]
    fn duplicate_keyword_keeps_last_value() {
        let key = CacheKey::builder().kwarg("x", &1).kwarg("x", &9).build();
        assert_eq!(key.keyword(), &[("x".to_string(), CanonicalKey::Int(9))]);

        let mut kwargs = Kwargs::new().with("x", 1);
        assert_eq!(kwargs.insert("x", 9), Some(1));
        assert_eq!(kwargs.len(), 1);
        assert_eq!(kwargs.cache_key(), key);
    }

    #[test]
    fn positional_and_keyword_slots_do_not_alias() {
        let positional = (1,).cache_key();
        let keyword = Kwargs::new().with("a", 1).cache_key();
        assert_ne!(positional, keyword);
    }

    #[test]
    fn call_combines_both_kinds() {
        let call = Call::new((1, 2), Kwargs::new().with("z", "q"));
        let key = call.cache_key();
        assert_eq!(key.positional().len(), 2);
        assert_eq!(key.keyword(), &[("z".to_string(), CanonicalKey::Str("q".into()))]);
    }

    #[test]
    fn lossy_detection_looks_inside_containers() {
        use crate::key::normalize::ByRepr;

        let clean = (vec![1, 2],).cache_key();
        let lossy = (vec![ByRepr(1.5)],).cache_key();
        assert!(!clean.is_lossy());
        assert!(lossy.is_lossy());
    }
}
