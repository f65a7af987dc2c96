//! Configuration system for idlfix
//!
//! ## Configuration Files
//!
//! Four file names are recognised, in priority order:
//! - `.idlfixrc.toml`
//! - `.idlfixrc.json`
//! - `idlfix.yaml`
//! - `idlfix.yml`
//!
//! ## Configuration Discovery
//!
//! When no explicit config path is provided, the loader searches from the
//! current directory up to the filesystem root. No file found means defaults:
//! the gecko dialect, `.webidl` files, every rule enabled, and only
//! `replace-void` fixes applied.
//!
//! ## Example Configuration
//!
//! ```yaml
//! dialect: gecko
//! linter:
//!   rules:
//!     no-nointerfaceobject: off
//! autofix:
//!   rules: ["*"]
//!   exclude: ["require-exposed"]
//! ```

mod idlfix_config;
mod loader;

pub use idlfix_config::{
    ALL_RULES, AutofixConfiguration, DEFAULT_AUTOFIX_RULES, FilesConfiguration, IdlfixConfig,
    LinterConfiguration, RuleSeverity,
};
pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};
