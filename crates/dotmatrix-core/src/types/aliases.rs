//! Type aliases for shared mutable state.
//!
//! The printer runs on a single control thread, but request logs and prompt
//! records are read from other threads (the operator side, tests inspecting
//! recorded requests). These aliases name the `Arc<Mutex<T>>` shapes used
//! for that.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dotmatrix_core::types::*;
//!
//! // Instead of: Arc<Mutex<Vec<Waypoint>>>
//! let log: ThreadSafeVec<Waypoint> = thread_safe_vec();
//! log.lock().push(waypoint);
//! ```

use parking_lot::Mutex;
use std::sync::Arc;

/// A thread-safe vector for cross-thread collection management.
///
/// Uses `parking_lot::Mutex` for better performance than `std::sync::Mutex`.
pub type ThreadSafeVec<T> = Arc<Mutex<Vec<T>>>;

/// A boxed iterator, for choosing between iteration orders at runtime.
pub type BoxedIterator<T> = Box<dyn Iterator<Item = T>>;

/// Create a new empty `ThreadSafeVec<T>`.
#[inline]
pub fn thread_safe_vec<T>() -> ThreadSafeVec<T> {
    Arc::new(Mutex::new(Vec::new()))
}
