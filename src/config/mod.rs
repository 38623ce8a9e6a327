//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation and rule conversion in [`validator`]
//!
//! # Example
//!
//! ```
//! use vskit::config::{load_merged_config, rule_table, validate};
//! use vskit::requirements::{Classification, Library};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".vskit");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(
//!     dir.join("config.local.yml"),
//!     "rules:\n  - library: numpy\n    prefix: \"1.25\"\n    classification: ok\n",
//! )
//! .unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! let table = rule_table(&config).unwrap();
//! assert_eq!(
//!     table.classify(Library::NumPy, "1.25.2").classification,
//!     Classification::Ok
//! );
//! ```

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    apply_env_overrides, load_config, load_config_file, load_config_value, load_merged_config,
    parse_config, ConfigPaths, CONFIG_DIR, ENV_FFMPEG, ENV_PYTHON,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{
    expand_home, ApplicationPaths, LauncherConfig, RuleConfig, VskitConfig, DEFAULT_FFMPEG,
    DEFAULT_PYTHON,
};
pub use validator::{rule_table, to_compatibility_rule, validate, validate_config, ValidationError};
