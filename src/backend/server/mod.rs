//! Server Module
//!
//! - **`config`** - `AppConfig` loading and the database connection
//! - **`state`** - `AppState` and `FromRef` implementations
//! - **`init`** - Application construction
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports
//! ├── config.rs       - Environment configuration, pool setup
//! ├── state.rs        - AppState and FromRef implementations
//! └── init.rs         - Server initialization and app creation
//! ```

pub mod config;

pub mod state;

pub mod init;

pub use config::{connect_database, AppConfig, ConfigError};
pub use init::{build_app, create_app, StartupError};
pub use state::AppState;
