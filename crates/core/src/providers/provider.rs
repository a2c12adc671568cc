use crate::container::Container;
use crate::errors::Result;

/// Groups related registrations so they can be applied to a container at once
pub trait ServiceProvider: Send + Sync {
    /// Provider name for identification in logs
    fn name(&self) -> &'static str;

    /// Register services in the container
    fn register(&self, container: &mut Container) -> Result<()>;
}
