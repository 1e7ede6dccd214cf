//! CLI command handlers, one file per command.

mod host;
mod set_key;
mod settings;
mod suggest;
mod validate_key;

pub use host::run_host;
pub use set_key::run_set_key;
pub use settings::{run_settings, SettingsUpdate};
pub use suggest::run_suggest;
pub use validate_key::run_validate_key;
