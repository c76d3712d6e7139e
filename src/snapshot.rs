//! Read-mostly tables shared between the calculator and whatever reloads them.

use std::{fmt, sync::Arc};

use parking_lot::RwLock;

/// A shared handle to an immutable table that can be swapped as a whole.
///
/// Readers get an `Arc` to the table that was current when they called `load`, so
/// a reload never shows them a half-built table.
pub struct Shared<T>(Arc<RwLock<Arc<T>>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Shared(Arc::new(RwLock::new(Arc::new(value))))
    }

    pub fn load(&self) -> Arc<T> {
        Arc::clone(&self.0.read())
    }

    /// swap in a fully built replacement, returning the previous table
    pub fn replace(&self, value: T) -> Arc<T> {
        let mut guard = self.0.write();
        std::mem::replace(&mut *guard, Arc::new(value))
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Shared(Arc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shared({:?})", &*self.load())
    }
}
