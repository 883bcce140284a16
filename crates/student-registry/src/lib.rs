pub mod api;
pub mod config;
pub mod error;
pub mod registry;
pub mod store;
pub mod student;

pub use config::Config;
pub use error::{ConfigError, RegistryError};
pub use registry::StudentRegistry;
pub use store::StudentStore;
pub use student::{NewStudent, RegisterStudent, Student};
