// src/config/mod.rs

//! Configuration layer: the optional `Crbuild.toml` file, the derived
//! per-invocation [`BuildSettings`] record, and the command-line-flags file.

pub mod flags;
pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use flags::load_flags_file;
pub use loader::{default_config_path, load_and_validate};
pub use model::{ConfigFile, ProjectSection, ShellSection};
pub use settings::BuildSettings;
