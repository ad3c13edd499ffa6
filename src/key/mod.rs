//! Argument normalization and cache-key assembly.
//!
//! - [`CanonicalKey`]: comparable, hashable form of one argument.
//! - [`Normalize`]: converts an argument into its canonical key.
//! - [`CacheKey`] / [`CallKey`]: composite key for a whole call.

pub mod call;
pub mod canonical;
pub mod normalize;

pub use call::{Call, CacheKey, CallKey, KeyBuilder, Kwargs, Positional};
pub use canonical::CanonicalKey;
pub use normalize::{ByDebug, ByRepr, Normalize};
