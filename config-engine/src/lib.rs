//! Configuration for the BiteCare clinic engine
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! - **Defaults** built into each section
//! - **File**: `clinic.toml` / `clinic.yaml` in the working directory, or an
//!   explicit path
//! - **Environment**: `CLINIC__<SECTION>__<KEY>`, with `.env` loaded first
//!
//! # Sections
//!
//! - `server`: listen host and port
//! - `database`: optional PostgreSQL URL and pool sizing; without a URL the
//!   server keeps records in memory
//! - `logging`: level, JSON output, contact-data redaction
//! - `ledger`: consumed-counter accounting, negative-buffer policy and the
//!   conflict retry bound for inventory deductions
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::ConfigLoader;
//!
//! let config = ConfigLoader::new().load()?;
//! println!("listening on {}", config.server.bind_address());
//! # Ok::<(), config_engine::ConfigError>(())
//! ```

pub mod error;
pub mod loader;
pub mod settings;
pub mod validator;

pub use error::*;
pub use loader::*;
pub use settings::*;
pub use validator::*;
