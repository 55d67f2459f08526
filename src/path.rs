// Airwaves - path.rs
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

use once_cell::sync::Lazy;

use std::env;
use std::fs;
use std::path::PathBuf;

use crate::config;

pub static BASE: Lazy<Option<xdg::BaseDirectories>> = Lazy::new(|| match xdg::BaseDirectories::with_prefix(config::NAME.to_lowercase()) {
    Ok(base) => Some(base),
    Err(err) => {
        warn!("Unable to determine XDG base directories: {}", err);
        None
    }
});

pub static DATA: Lazy<PathBuf> = Lazy::new(|| directory(BASE.as_ref().map(|base| base.get_data_home())));
pub static CONFIG: Lazy<PathBuf> = Lazy::new(|| directory(BASE.as_ref().map(|base| base.get_config_home())));

// Falls back to the temporary directory when there is no usable home
fn directory(path: Option<PathBuf>) -> PathBuf {
    let path = path.unwrap_or_else(|| env::temp_dir().join(config::NAME.to_lowercase()));
    if let Err(err) = fs::create_dir_all(&path) {
        warn!("Unable to create directory {}: {}", path.display(), err);
    }
    path
}
