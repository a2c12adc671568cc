pub mod provider;

pub use provider::ServiceProvider;
