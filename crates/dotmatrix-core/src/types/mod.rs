//! Type system utilities and aliases.
//!
//! - [`aliases`]: Type aliases for `Arc<Mutex<T>>` shared state.

pub mod aliases;

pub use aliases::*;
