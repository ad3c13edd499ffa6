//! Argument normalization.
//!
//! [`Normalize`] converts one argument value into a [`CanonicalKey`]. The
//! conversion is total and deterministic:
//!
//! ```text
//!   value ──► ordered sequence?  ──► Seq[normalize(e) for e in value]
//!         ──► mapping?           ──► Map[(normalize(k), normalize(v))] sorted by key
//!         ──► hashable scalar?   ──► the scalar itself (Int, Str, Bool, ...)
//!         ──► otherwise          ──► opt-in string fallback (ByRepr / ByDebug)
//! ```
//!
//! Whether a type can be used as a memoized argument is decided at compile
//! time: it must implement `Normalize`. Types outside the impls below
//! either implement the trait themselves or go through one of the string
//! adapters.
//!
//! ## String Fallback
//!
//! [`ByRepr`] and [`ByDebug`] render a value with `Display` / `Debug` and
//! wrap the result in [`CanonicalKey::Repr`]. Two distinct values with the
//! same rendering share a key. Only use them for types whose rendering is
//! injective, or where that imprecision is acceptable.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::key::canonical::CanonicalKey;

/// Converts a value into its canonical cache-key form.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use memokit::key::Normalize;
///
/// let mut a = HashMap::new();
/// a.insert("x", 1);
/// a.insert("y", 2);
///
/// let mut b = HashMap::new();
/// b.insert("y", 2);
/// b.insert("x", 1);
///
/// // Mappings compare by content, not insertion order
/// assert_eq!(a.normalize(), b.normalize());
///
/// // Sequences are order-sensitive
/// assert_ne!(vec![1, 2].normalize(), vec![2, 1].normalize());
/// ```
///
/// Implementing it for a domain type:
///
/// ```
/// use memokit::key::{CanonicalKey, Normalize};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Normalize for Point {
///     fn normalize(&self) -> CanonicalKey {
///         CanonicalKey::Seq(vec![self.x.normalize(), self.y.normalize()])
///     }
/// }
///
/// assert_eq!(Point { x: 1, y: 2 }.normalize(), (1, 2).normalize());
/// ```
pub trait Normalize {
    /// Returns the canonical key for `self`.
    fn normalize(&self) -> CanonicalKey;
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

macro_rules! normalize_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl Normalize for $t {
                #[inline]
                fn normalize(&self) -> CanonicalKey {
                    CanonicalKey::Int(i128::from(*self))
                }
            }
        )*
    };
}

normalize_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl Normalize for isize {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::Int(*self as i128)
    }
}

impl Normalize for usize {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::Int(*self as i128)
    }
}

impl Normalize for u128 {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        match i128::try_from(*self) {
            Ok(v) => CanonicalKey::Int(v),
            Err(_) => CanonicalKey::UInt(*self),
        }
    }
}

impl Normalize for f64 {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::float(*self)
    }
}

impl Normalize for f32 {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::float(f64::from(*self))
    }
}

impl Normalize for bool {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::Bool(*self)
    }
}

impl Normalize for char {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::Char(*self)
    }
}

impl Normalize for () {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::Unit
    }
}

impl Normalize for str {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::Str(self.to_owned())
    }
}

impl Normalize for String {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::Str(self.clone())
    }
}

impl Normalize for Cow<'_, str> {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::Str(self.as_ref().to_owned())
    }
}

impl Normalize for CanonicalKey {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        self.clone()
    }
}

// ---------------------------------------------------------------------------
// Transparent wrappers
// ---------------------------------------------------------------------------

impl<T: Normalize + ?Sized> Normalize for &T {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        (**self).normalize()
    }
}

impl<T: Normalize + ?Sized> Normalize for &mut T {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        (**self).normalize()
    }
}

impl<T: Normalize + ?Sized> Normalize for Box<T> {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        (**self).normalize()
    }
}

impl<T: Normalize + ?Sized> Normalize for Rc<T> {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        (**self).normalize()
    }
}

impl<T: Normalize + ?Sized> Normalize for Arc<T> {
    #[inline]
    fn normalize(&self) -> CanonicalKey {
        (**self).normalize()
    }
}

/// `None` is an empty sequence and `Some(v)` a one-element sequence, so
/// `Some(())` and `None` stay distinct.
impl<T: Normalize> Normalize for Option<T> {
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::Seq(self.iter().map(Normalize::normalize).collect())
    }
}

// ---------------------------------------------------------------------------
// Ordered sequences
// ---------------------------------------------------------------------------

impl<T: Normalize> Normalize for [T] {
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::Seq(self.iter().map(Normalize::normalize).collect())
    }
}

impl<T: Normalize, const N: usize> Normalize for [T; N] {
    fn normalize(&self) -> CanonicalKey {
        self.as_slice().normalize()
    }
}

impl<T: Normalize> Normalize for Vec<T> {
    fn normalize(&self) -> CanonicalKey {
        self.as_slice().normalize()
    }
}

impl<T: Normalize> Normalize for VecDeque<T> {
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::Seq(self.iter().map(Normalize::normalize).collect())
    }
}

macro_rules! normalize_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Normalize),+> Normalize for ($($name,)+) {
            fn normalize(&self) -> CanonicalKey {
                CanonicalKey::Seq(vec![$(self.$idx.normalize()),+])
            }
        }
    };
}

normalize_tuple!(A 0);
normalize_tuple!(A 0, B 1);
normalize_tuple!(A 0, B 1, C 2);
normalize_tuple!(A 0, B 1, C 2, D 3);
normalize_tuple!(A 0, B 1, C 2, D 3, E 4);
normalize_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
normalize_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
normalize_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

// ---------------------------------------------------------------------------
// Mappings and sets
// ---------------------------------------------------------------------------

fn normalize_entries<'a, K, V, I>(entries: I) -> CanonicalKey
where
    K: Normalize + 'a,
    V: Normalize + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    CanonicalKey::map_from_entries(entries.map(|(k, v)| (k.normalize(), v.normalize())))
}

impl<K: Normalize, V: Normalize, S> Normalize for HashMap<K, V, S> {
    fn normalize(&self) -> CanonicalKey {
        normalize_entries(self.iter())
    }
}

impl<K: Normalize, V: Normalize> Normalize for BTreeMap<K, V> {
    fn normalize(&self) -> CanonicalKey {
        // Re-sorted on the canonical order, which may differ from `K: Ord`.
        normalize_entries(self.iter())
    }
}

impl<T: Normalize, S> Normalize for HashSet<T, S> {
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::unordered(self.iter().map(Normalize::normalize))
    }
}

impl<T: Normalize> Normalize for BTreeSet<T> {
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::unordered(self.iter().map(Normalize::normalize))
    }
}

// ---------------------------------------------------------------------------
// String fallback
// ---------------------------------------------------------------------------

/// Normalizes a value through its `Display` rendering.
///
/// # Example
///
/// ```
/// use std::net::Ipv4Addr;
/// use memokit::key::{ByRepr, CanonicalKey, Normalize};
///
/// let addr = Ipv4Addr::new(127, 0, 0, 1);
/// assert_eq!(ByRepr(&addr).normalize(), CanonicalKey::Repr("127.0.0.1".into()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ByRepr<T>(pub T);

impl<T: fmt::Display> Normalize for ByRepr<T> {
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::Repr(self.0.to_string())
    }
}

/// Normalizes a value through its `Debug` rendering.
///
/// # Example
///
/// ```
/// use memokit::key::{ByDebug, Normalize};
///
/// #[derive(Debug)]
/// struct Opaque {
///     id: u32,
/// }
///
/// assert_eq!(
///     ByDebug(Opaque { id: 1 }).normalize(),
///     ByDebug(Opaque { id: 1 }).normalize()
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ByDebug<T>(pub T);

impl<T: fmt::Debug> Normalize for ByDebug<T> {
    fn normalize(&self) -> CanonicalKey {
        CanonicalKey::Repr(format!("{:?}", self.0))
    }
}
