//! Utility modules shared across commands.
//!
//! - [`path`]: Filesystem path helpers (`normalize_path`, `lexical_normalize`,
//!   `relative_from`, `to_forward_slashes`)
//! - [`url`]: URL-shaped string helpers (`is_external_link`, `split_path_suffix`)
//! - [`plural`]: Pluralization for log output

pub mod path;
pub mod plural;
pub mod url;

pub use plural::{plural_count, plural_s};
