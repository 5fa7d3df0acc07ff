//! The fetch/cache coordination engine.
//!
//! [`synchronizer`] runs the cache-then-revalidate cycle for one sheet;
//! [`coordinator`] fans cycles out across a batch and reduces their signals
//! into batch-level callbacks.

pub mod coordinator;
pub mod synchronizer;
