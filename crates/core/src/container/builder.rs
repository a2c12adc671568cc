use crate::config::ContainerConfig;
use crate::container::{Container, Entry};
use crate::errors::Result;
use crate::providers::ServiceProvider;

enum Registration {
    Set(String, Entry),
    Share(String, Entry),
    Protect(String, Entry),
    Extend(String, Entry),
    Provider(Box<dyn ServiceProvider>),
}

/// Builder for constructing containers with registrations
///
/// Registrations are replayed in order by [`build`](Self::build), which
/// reports the first one that fails.
pub struct ContainerBuilder {
    config: ContainerConfig,
    registrations: Vec<Registration>,
}

impl ContainerBuilder {
    /// Create a new container builder
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
            registrations: Vec::new(),
        }
    }

    /// Set the resolution configuration
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set(mut self, key: impl Into<String>, item: impl Into<Entry>) -> Self {
        self.registrations.push(Registration::Set(key.into(), item.into()));
        self
    }

    pub fn share(mut self, key: impl Into<String>, item: impl Into<Entry>) -> Self {
        self.registrations.push(Registration::Share(key.into(), item.into()));
        self
    }

    pub fn protect(mut self, key: impl Into<String>, item: impl Into<Entry>) -> Self {
        self.registrations.push(Registration::Protect(key.into(), item.into()));
        self
    }

    pub fn extend(mut self, key: impl Into<String>, extension: impl Into<Entry>) -> Self {
        self.registrations.push(Registration::Extend(key.into(), extension.into()));
        self
    }

    /// Add a service provider
    pub fn provider<P: ServiceProvider + 'static>(mut self, provider: P) -> Self {
        self.registrations.push(Registration::Provider(Box::new(provider)));
        self
    }

    /// Build the container
    pub fn build(self) -> Result<Container> {
        self.config.validate()?;
        let mut container = Container::with_config(self.config);

        for registration in self.registrations {
            match registration {
                Registration::Set(key, item) => container.set(key, item),
                Registration::Share(key, item) => container.share(key, item)?,
                Registration::Protect(key, item) => container.protect(key, item)?,
                Registration::Extend(key, extension) => container.extend(&key, extension)?,
                Registration::Provider(provider) => container.register(provider.as_ref())?,
            }
        }

        Ok(container)
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
