//! Static analyzers over the parsed command tree.

mod paths;
mod structure;

pub use paths::check_paths;
pub use structure::{check_control_characters, check_structure};
