mod key;
pub mod settings_manager;

pub use key::Key;
pub use settings_manager::{Error, SettingsManager};
