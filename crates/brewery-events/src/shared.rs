//! Process-wide access to the current [`EventRegistry`].
//!
//! Readers take an `Arc` snapshot and never block a reload for longer than
//! the pointer swap. A failed reload leaves the previous registry in place.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::builtin::BuiltinRegistry;
use crate::loader::{LoadError, load_events_file};
use crate::registry::EventRegistry;
use crate::resolver::ResolveOptions;

/// Cloneable handle to the registry currently in use.
#[derive(Debug, Clone, Default)]
pub struct SharedEventRegistry {
    current: Arc<RwLock<Arc<EventRegistry>>>,
}

impl SharedEventRegistry {
    /// Wrap an initial registry.
    pub fn new(registry: EventRegistry) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(registry))),
        }
    }

    /// The registry in use right now.
    ///
    /// The snapshot stays valid after a later [`replace`](Self::replace).
    pub fn snapshot(&self) -> Arc<EventRegistry> {
        // A poisoned lock still holds a fully built registry.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Swap in a new registry, returning the old one.
    pub fn replace(&self, registry: EventRegistry) -> Arc<EventRegistry> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(registry))
    }
}

/// Loads an event file into a [`SharedEventRegistry`] and reloads it on
/// demand.
#[derive(Debug)]
pub struct EventLoader {
    path: PathBuf,
    builtins: BuiltinRegistry,
    options: ResolveOptions,
    shared: SharedEventRegistry,
}

impl EventLoader {
    /// Create a loader with an empty registry. Call
    /// [`reload`](Self::reload) to populate it.
    pub fn new(path: impl Into<PathBuf>, builtins: BuiltinRegistry, options: ResolveOptions) -> Self {
        Self {
            path: path.into(),
            builtins,
            options,
            shared: SharedEventRegistry::default(),
        }
    }

    /// The file this loader reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A handle readers can hold on to across reloads.
    pub fn shared(&self) -> SharedEventRegistry {
        self.shared.clone()
    }

    /// Re-read the event file and publish the result.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] that stopped the reload. The previously
    /// published registry stays in use.
    pub fn reload(&self) -> Result<Arc<EventRegistry>, LoadError> {
        match load_events_file(&self.path, &self.builtins, self.options) {
            Ok(registry) => {
                let count = registry.len();
                self.shared.replace(registry);
                info!(path = %self.path.display(), events = count, "Event registry reloaded");
                Ok(self.shared.snapshot())
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Event reload failed, keeping previous registry"
                );
                Err(e)
            }
        }
    }
}
