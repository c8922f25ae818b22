//! Printer lifecycle events

pub mod event;
