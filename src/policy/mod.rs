//! Eviction policies.
//!
//! Memoization uses [`fifo::FifoCache`]: entries are evicted strictly in
//! insertion order and reads never change that order.

pub mod fifo;
