//! Project configuration.
//!
//! pycc reads an optional `.pycc.yml` (or `pycc.yml`) from the project root.
//! Every field is optional; command-line flags override file values.
//!
//! ```yaml
//! timeout: 120
//! output: quiet
//! disabled: [safety]
//! checkers:
//!   todo:
//!     description: Find TODO markers
//!     command: grep
//!     args: ["-rn", "TODO", "."]
//!     availability: path
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    find_config, load_config_file, load_project_config, parse_config, register_plugins,
    CONFIG_FILENAMES,
};
pub use schema::{PluginConfig, PyccConfig};
