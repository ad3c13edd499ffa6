//! Error types for memokit.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a memoizer is configured with invalid
//!   parameters (e.g. `max_keys == 0`).
//! - [`InvariantError`]: Returned by [`FifoCache::check_invariants`](crate::policy::fifo::FifoCache::check_invariants)
//!   when the map and the insertion queue disagree.
//!
//! Failures of the memoized computation itself are never wrapped: they
//! propagate to the caller unchanged (see [`TryMemoized`](crate::memo::TryMemoized)).
//!
//! ## Example Usage
//!
//! ```
//! use memokit::error::ConfigError;
//! use memokit::memo::memoize;
//!
//! let ok = memoize(2, |(x, y): (i32, i32)| x + y);
//! assert!(ok.is_ok());
//!
//! let err = memoize(0, |(x, y): (i32, i32)| x + y).err().unwrap();
//! assert!(err.to_string().contains("max_keys"));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when memoization parameters are invalid.
///
/// Produced at wrap time by [`memoize`](crate::memo::memoize),
/// [`MemoCache::new`](crate::memo::MemoCache::new) and
/// [`MemoBuilder::try_build`](crate::builder::MemoBuilder::try_build), so a
/// bad bound is reported before any call is made.
///
/// # Example
///
/// ```
/// use memokit::memo::MemoCache;
///
/// let err = MemoCache::<u64>::new(0).unwrap_err();
/// assert_eq!(err.message(), "max_keys must be greater than 0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("order queue length mismatch");
        assert_eq!(err.to_string(), "order queue length mismatch");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("max_keys must be greater than 0");
        assert_eq!(err.to_string(), "max_keys must be greater than 0");
    }

    #[test]
    fn config_debug_includes_message() {
        let err = ConfigError::new("bad bound");
        assert!(format!("{:?}", err).contains("bad bound"));
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn config_is_send_sync_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ConfigError>();
    }
}
