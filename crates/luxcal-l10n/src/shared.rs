//! Swappable resolver snapshot for hot reload.
//!
//! Readers take an `Arc` snapshot and keep using it for as long as they
//! hold it; a reload replaces the whole snapshot at once. The lock only
//! guards the pointer, never a lookup.

use std::sync::{Arc, PoisonError, RwLock};

use crate::resolver::LocalizationResolver;

/// Shared handle to the current [`LocalizationResolver`].
#[derive(Debug)]
pub struct SharedResolver {
    current: RwLock<Arc<LocalizationResolver>>,
}

impl SharedResolver {
    /// Wrap an initial resolver.
    #[must_use]
    pub fn new(resolver: LocalizationResolver) -> Self {
        Self {
            current: RwLock::new(Arc::new(resolver)),
        }
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<LocalizationResolver> {
        // The guarded value is a single Arc; a poisoned lock still holds a
        // complete snapshot.
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Install `next` and return the snapshot it replaced.
    pub fn replace(&self, next: LocalizationResolver) -> Arc<LocalizationResolver> {
        let next = Arc::new(next);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        tracing::debug!(
            locales = guard.available_locales().len(),
            reference = guard.reference_locale(),
            "l10n snapshot replaced"
        );
        previous
    }
}

impl From<LocalizationResolver> for SharedResolver {
    fn from(resolver: LocalizationResolver) -> Self {
        Self::new(resolver)
    }
}
