//! Infrastructure layer for filesystem and desktop interactions.
//!
//! - `paths`: XDG data and config locations, tilde expansion
//! - `desktop`: Clipboard writes and URL opening through platform commands

pub mod desktop;
pub mod paths;

pub use desktop::{copy_to_clipboard, open_url};
pub use paths::{default_config_path, expand_tilde, get_data_dir};
