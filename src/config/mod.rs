//! Configuration: TOML file, environment token and CLI overrides.

mod credentials;
mod loader;
mod types;

pub use credentials::{AuthType, Credential, SecureString};
pub use loader::{ConfigError, TOKEN_ENV_VAR};
pub use types::{ColumnNames, Config, SheetConfig};
