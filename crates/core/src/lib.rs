//! Keyed service container.
//!
//! Values are registered under string keys either as plain data or as
//! [`Invokable`]s. Resolving a key with [`Container::get`] invokes factories
//! lazily, caches results of shared factories in place, returns protected
//! invokables unexecuted and applies any extensions attached to the key.
//!
//! ```
//! use servio_core::{Container, Entry, Invokable};
//! use std::sync::Mutex;
//!
//! # fn main() -> servio_core::Result<()> {
//! let mut container = Container::new();
//! container.set("greeting", Entry::value(String::from("hello")));
//! container.share(
//!     "log",
//!     Invokable::service(|_| Ok(Mutex::new(Vec::<String>::new()))),
//! )?;
//! container.extend(
//!     "log",
//!     Invokable::extension(|c, item| {
//!         let greeting = c.resolve::<String>("greeting")?;
//!         if let Some(log) = item.downcast_ref::<Mutex<Vec<String>>>() {
//!             log.lock().unwrap().push(greeting.to_string());
//!         }
//!         Ok(())
//!     }),
//! )?;
//!
//! let log = container.resolve::<Mutex<Vec<String>>>("log")?;
//! assert_eq!(log.lock().unwrap().as_slice(), ["hello"]);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod container;
pub mod errors;
pub mod map;
pub mod providers;

pub use config::{ConfigError, ContainerConfig};
pub use container::{Container, ContainerBuilder, Entry, IdentitySet, Invokable, InvokableId, Service};
pub use errors::{ContainerError, Result};
pub use map::OrderedMap;
pub use providers::ServiceProvider;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get crate version
pub fn version() -> &'static str {
    VERSION
}
