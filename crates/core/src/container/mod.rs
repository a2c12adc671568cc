#[allow(clippy::module_inception)]
pub mod container;
pub mod builder;
pub mod entry;
pub mod identity;

pub use container::Container;
pub use builder::ContainerBuilder;
pub use entry::{Entry, Invokable, Service};
pub use identity::{IdentitySet, InvokableId};
