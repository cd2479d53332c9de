//! Relaxed-order atomically swappable `Arc` slot.
//!
//! # Concurrency & ordering
//!
//! * [`AtomicCell::store`] and [`AtomicCell::load`] are atomic with respect to
//!   each other on the same cell: a load observes the initial value or the
//!   argument of some completed store, never a torn value.
//! * The only guarantee offered is relaxed ordering. Nothing here establishes a
//!   happens-before edge with other cells or with plain memory reachable from
//!   elsewhere; callers needing that must synchronize on top.
//! * Operations never block. Readers and writers are lock-free.
//!
//! # Ownership
//!
//! The cell shares ownership with every `Arc` handed out by `load`. Dropping
//! the cell releases only the reference it holds.
//!
//! # Moves
//!
//! There is no operation that moves the atomic storage out of a cell
//! (`into_inner`, `take`, `swap` by value). Transferring a cell by value in
//! Rust needs exclusive ownership, which the borrow checker already proves; a
//! shared `&AtomicCell` can only copy the held value out (`load`, `clone`).

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

/// Atomically swappable, possibly-null shared reference to a `T`.
pub struct AtomicCell<T> {
	slot: ArcSwapOption<T>,
}

impl<T> AtomicCell<T> {
	/// Creates a cell holding `value` (which may be `None`).
	pub fn new(value: Option<Arc<T>>) -> Self {
		Self {
			slot: ArcSwapOption::new(value),
		}
	}

	/// Creates a cell holding a freshly allocated `value`.
	pub fn with_value(value: T) -> Self {
		Self::new(Some(Arc::new(value)))
	}

	/// Creates a null cell.
	pub fn empty() -> Self {
		Self::new(None)
	}

	/// Replaces the held reference. The previous reference is released.
	pub fn store(&self, value: Option<Arc<T>>) {
		self.slot.store(value);
	}

	/// Returns a new owner of the held reference, or `None` if the cell is null.
	pub fn load(&self) -> Option<Arc<T>> {
		self.slot.load_full()
	}

	/// Same as [`Self::store`]; pass `None` to null the cell.
	pub fn reset(&self, value: Option<Arc<T>>) {
		self.store(value);
	}

	/// Returns true when the cell is currently null.
	pub fn is_empty(&self) -> bool {
		self.slot.load().is_none()
	}
}

impl<T> Default for AtomicCell<T> {
	fn default() -> Self {
		Self::empty()
	}
}

/// Copies the held value, never the storage: the two cells are independent
/// afterwards.
impl<T> Clone for AtomicCell<T> {
	fn clone(&self) -> Self {
		Self::new(self.load())
	}

	fn clone_from(&mut self, source: &Self) {
		self.store(source.load());
	}
}

impl<T> From<Arc<T>> for AtomicCell<T> {
	fn from(value: Arc<T>) -> Self {
		Self::new(Some(value))
	}
}

impl<T> From<Option<Arc<T>>> for AtomicCell<T> {
	fn from(value: Option<Arc<T>>) -> Self {
		Self::new(value)
	}
}

impl<T: fmt::Debug> fmt::Debug for AtomicCell<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("AtomicCell").field(&self.load()).finish()
	}
}
