use crate::config::ContainerConfig;
use crate::container::entry::{Entry, Invokable};
use crate::container::identity::IdentitySet;
use crate::errors::{ContainerError, Result};
use crate::map::OrderedMap;
use crate::providers::ServiceProvider;
use std::any::Any;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Keyed dependency injection container
///
/// Entries are plain values or invokables. Resolution through [`get`](Self::get)
/// invokes factories lazily, caches shared results in place, hands protected
/// invokables back untouched and runs extensions over every fresh result.
pub struct Container {
    entries: OrderedMap<Entry>,
    shared: IdentitySet,
    protected: IdentitySet,
    extensions: OrderedMap<Vec<Invokable>>,
    origins: HashMap<String, Invokable>,
    resolving: Vec<String>,
    config: ContainerConfig,
}

impl Container {
    /// Create an empty container with the default configuration
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// Create an empty container with the given configuration
    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            entries: OrderedMap::new(),
            shared: IdentitySet::new(),
            protected: IdentitySet::new(),
            extensions: OrderedMap::new(),
            origins: HashMap::new(),
            resolving: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Store `item` under `key`, replacing any previous entry
    ///
    /// Shared/protected membership and extensions recorded for the previous
    /// entry are left in place; only [`remove`](Self::remove) clears them.
    pub fn set(&mut self, key: impl Into<String>, item: impl Into<Entry>) {
        let key = key.into();
        self.origins.remove(&key);
        self.entries.set(key, item.into());
    }

    /// Store an invokable whose first result is cached under `key`
    pub fn share(&mut self, key: impl Into<String>, item: impl Into<Entry>) -> Result<()> {
        let item = item.into();
        let Entry::Invokable(invokable) = &item else {
            return Err(ContainerError::invalid_payload(
                "Can only share invokable objects or closures",
            ));
        };
        self.shared.attach(invokable);

        let key = key.into();
        debug!(key = %key, "Sharing item");
        self.origins.remove(&key);
        self.entries.set(key, item);
        Ok(())
    }

    /// Store an invokable that resolution returns without executing
    pub fn protect(&mut self, key: impl Into<String>, item: impl Into<Entry>) -> Result<()> {
        let item = item.into();
        let Entry::Invokable(invokable) = &item else {
            return Err(ContainerError::invalid_payload(
                "Can only protect invokable objects or closures",
            ));
        };
        self.protected.attach(invokable);

        let key = key.into();
        debug!(key = %key, "Protecting item");
        self.origins.remove(&key);
        self.entries.set(key, item);
        Ok(())
    }

    /// Attach an extension that runs over every fresh result for `key`
    ///
    /// Extensions run in attach order; attaching the same extension twice
    /// to one key has no further effect.
    pub fn extend(&mut self, key: &str, extension: impl Into<Entry>) -> Result<()> {
        let Entry::Invokable(factory) = self.entries.get(key)? else {
            return Err(ContainerError::not_extendable(key));
        };
        if self.protected.contains(factory) {
            return Err(ContainerError::protected_item(key));
        }
        let Entry::Invokable(extension) = extension.into() else {
            return Err(ContainerError::extension_not_invokable());
        };

        match self.extensions.get_mut(key) {
            Ok(attached) => {
                if !attached.iter().any(|existing| existing.ptr_eq(&extension)) {
                    attached.push(extension);
                }
            }
            Err(_) => {
                self.extensions.set(key, vec![extension]);
            }
        }
        debug!(key = %key, "Extension attached");
        Ok(())
    }

    /// Resolve the entry stored under `key`
    pub fn get(&mut self, key: &str) -> Result<Entry> {
        let item = self.entries.get(key)?;
        let factory = match item {
            Entry::Invokable(invokable) if !self.protected.contains(invokable) => {
                invokable.clone()
            }
            _ => return Ok(item.clone()),
        };

        let mut resolving = self.enter(key)?;
        resolving.produce(key, &factory)
    }

    /// Resolve `key` and downcast the result to `T`
    pub fn resolve<T: Any + Send + Sync>(&mut self, key: &str) -> Result<Arc<T>> {
        self.get(key)?
            .downcast::<T>()
            .ok_or_else(|| ContainerError::TypeMismatch {
                key: key.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Remove `key` together with its shared/protected membership and extensions
    ///
    /// A cached shared result also releases the factory that produced it.
    pub fn remove(&mut self, key: &str) -> Result<Entry> {
        let item = self.entries.remove(key)?;
        if self.extensions.has(key) {
            self.extensions.remove(key)?;
        }
        let origin = self.origins.remove(key);
        for invokable in item.as_invokable().into_iter().chain(origin.as_ref()) {
            self.shared.detach(invokable);
            self.protected.detach(invokable);
        }
        debug!(key = %key, "Item removed");
        Ok(item)
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.has(key)
    }

    /// Stored payload for `key` without resolving it
    pub fn raw(&self, key: &str) -> Result<&Entry> {
        self.entries.get(key)
    }

    /// Registered keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if the entry under `key` is an unresolved shared invokable
    pub fn is_shared(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Ok(Entry::Invokable(invokable)) if self.shared.contains(invokable))
    }

    /// Check if the entry under `key` is a protected invokable
    pub fn is_protected(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Ok(Entry::Invokable(invokable)) if self.protected.contains(invokable))
    }

    /// Number of extensions attached to `key`
    pub fn extension_count(&self, key: &str) -> usize {
        self.extensions.get(key).map(Vec::len).unwrap_or(0)
    }

    /// Let a provider register its services
    pub fn register<P: ServiceProvider + ?Sized>(&mut self, provider: &P) -> Result<()> {
        info!("Registering provider: {}", provider.name());
        provider.register(self)
    }

    fn produce(&mut self, key: &str, factory: &Invokable) -> Result<Entry> {
        let item = factory.call(self, &[])?;

        if self.shared.contains(factory) {
            trace!(key = %key, "Caching shared result");
            self.entries.set(key, item.clone());
            self.origins.insert(key.to_string(), factory.clone());
        }

        let extensions = self.extensions.get(key).map(Vec::clone).unwrap_or_default();
        for extension in &extensions {
            trace!(key = %key, "Applying extension");
            extension.call(self, std::slice::from_ref(&item))?;
        }

        Ok(item)
    }

    fn enter(&mut self, key: &str) -> Result<Resolving<'_>> {
        if !self.config.detect_cycles {
            return Ok(Resolving {
                container: self,
                tracked: false,
            });
        }
        if self.resolving.iter().any(|resolving| resolving == key) {
            let mut path = self.resolving.join(" -> ");
            path.push_str(" -> ");
            path.push_str(key);
            warn!(key = %key, path = %path, "Cyclic resolution detected");
            return Err(ContainerError::CyclicResolution { path });
        }
        if self.resolving.len() >= self.config.max_resolution_depth {
            warn!(key = %key, limit = self.config.max_resolution_depth, "Resolution depth exceeded");
            return Err(ContainerError::ResolutionDepthExceeded {
                key: key.to_string(),
                limit: self.config.max_resolution_depth,
            });
        }
        self.resolving.push(key.to_string());
        Ok(Resolving {
            container: self,
            tracked: true,
        })
    }
}

/// Borrow of a container with one key pushed on its resolution stack
///
/// Dropping pops the key, including while unwinding from a panicking factory.
struct Resolving<'a> {
    container: &'a mut Container,
    tracked: bool,
}

impl Deref for Resolving<'_> {
    type Target = Container;

    fn deref(&self) -> &Container {
        self.container
    }
}

impl DerefMut for Resolving<'_> {
    fn deref_mut(&mut self) -> &mut Container {
        self.container
    }
}

impl Drop for Resolving<'_> {
    fn drop(&mut self) {
        if self.tracked {
            self.container.resolving.pop();
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .field("shared", &self.shared.len())
            .field("protected", &self.protected.len())
            .field("extended_keys", &self.extensions.len())
            .field("config", &self.config)
            .finish()
    }
}
