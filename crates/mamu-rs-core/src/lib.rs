pub mod error;
pub use error::Result;
pub use error::Error;

pub mod config;
pub use config::Config;

pub mod reference;
pub use reference::ProjectReference;

pub mod registry;
pub use registry::Registry;
pub use registry::RegistryError;
pub use registry::ModrinthClient;

pub mod relationship_resolver;
pub mod installation;
