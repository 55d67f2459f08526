// Airwaves - key.rs
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

use serde_json::Value;
use strum::IntoEnumIterator;

use crate::config;
use crate::database;

#[derive(Display, Debug, Clone, Copy, EnumString, EnumIter, PartialEq, Eq, Hash)]
#[strum(serialize_all = "kebab_case")]
pub enum Key {
    /* Client Backend */
    ApiServer,
    HideBroken,

    /* Library */
    DatabasePath,
}

impl Key {
    pub fn default_value(self) -> Value {
        match self {
            Key::ApiServer => Value::from(config::API_SERVER),
            Key::HideBroken => Value::from(true),
            Key::DatabasePath => Value::from(database::DB_PATH.to_string_lossy().to_string()),
        }
    }

    pub fn all() -> Vec<Key> {
        Key::iter().collect()
    }
}
