// Airwaves - settings_manager.rs
// Copyright (C) 2021  The Airwaves developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use serde_json::{Map, Value};
use thiserror::Error;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::path;
use crate::settings::Key;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input/Output error: {0}")]
    Io(#[from] io::Error),
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Key/value settings, stored as a JSON object. Keys which aren't set
/// fall back to `Key::default_value`.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    path: PathBuf,
    values: Map<String, Value>,
}

impl SettingsManager {
    pub fn load(path: &Path) -> Self {
        let values = match Self::read(path) {
            Ok(values) => values,
            Err(Error::Io(ref err)) if err.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(err) => {
                warn!("Unable to read settings from {}, using defaults: {}", path.display(), err);
                Map::new()
            }
        };

        Self {
            path: path.to_path_buf(),
            values,
        }
    }

    pub fn load_default() -> Self {
        Self::load(&path::CONFIG.join("settings.json"))
    }

    fn read(path: &Path) -> Result<Map<String, Value>, Error> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, data)?;

        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }

    pub fn list_keys(&self) {
        debug!("Settings values:");
        for key in Key::all() {
            debug!("  \"{}\" -> {}", key, self.value(key));
        }
    }

    pub fn value(&self, key: Key) -> Value {
        self.values.get(&key.to_string()).cloned().unwrap_or_else(|| key.default_value())
    }

    pub fn string(&self, key: Key) -> String {
        match self.value(key) {
            Value::String(value) => value,
            other => {
                warn!("Setting \"{}\" is not a string: {}", key, other);
                key.default_value().as_str().unwrap_or_default().to_string()
            }
        }
    }

    pub fn set_string(&mut self, key: Key, value: &str) {
        self.values.insert(key.to_string(), Value::from(value));
    }

    pub fn boolean(&self, key: Key) -> bool {
        match self.value(key) {
            Value::Bool(value) => value,
            other => {
                warn!("Setting \"{}\" is not a boolean: {}", key, other);
                key.default_value().as_bool().unwrap_or_default()
            }
        }
    }

    pub fn set_boolean(&mut self, key: Key, value: bool) {
        self.values.insert(key.to_string(), Value::from(value));
    }

    pub fn reset(&mut self, key: Key) {
        self.values.remove(&key.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsManager::load(&dir.path().join("settings.json"));
        assert_eq!(settings.string(Key::ApiServer), config::API_SERVER);
        assert!(settings.boolean(Key::HideBroken));
    }

    #[test]
    fn values_survive_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = SettingsManager::load(&path);
        settings.set_string(Key::ApiServer, "https://fi1.api.radio-browser.info/");
        settings.set_boolean(Key::HideBroken, false);
        settings.save().unwrap();

        let settings = SettingsManager::load(&path);
        assert_eq!(settings.string(Key::ApiServer), "https://fi1.api.radio-browser.info/");
        assert!(!settings.boolean(Key::HideBroken));
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let mut settings = SettingsManager::load(&path);
        assert!(settings.boolean(Key::HideBroken));

        settings.set_string(Key::HideBroken, "yes");
        assert!(settings.boolean(Key::HideBroken));
        settings.reset(Key::HideBroken);
        assert_eq!(settings.value(Key::HideBroken), Value::from(true));
    }
}
