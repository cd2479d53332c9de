//! Lock-free shared-ownership primitives.
//!
//! * [`AtomicCell`]: a slot holding an optional `Arc<T>` that any number of
//!   threads may swap and read without blocking.

#![warn(missing_docs)]

pub mod cell;

pub use cell::AtomicCell;
