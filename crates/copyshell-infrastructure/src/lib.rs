//! Infrastructure for Copyshell: everything that touches the host system
//! outside of child processes.

pub mod clipboard;
pub mod config;
pub mod history;
pub mod identity;
pub mod paths;

pub use clipboard::SystemClipboard;
pub use config::{ClipboardConfig, RootConfig, ShellConfig, load_config, load_config_from};
pub use history::HistoryStore;
pub use identity::current_identity;
pub use paths::CopyshellPaths;
