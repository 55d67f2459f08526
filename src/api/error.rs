// Airwaves - error.rs
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

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::error::Error),
    #[error("URL parser error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("Input/Output error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Network error: {0}")]
    Network(#[from] isahc::Error),
    #[error("Unable to encode request: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("Invalid server URL \"{0}\"")]
    InvalidServer(String),
    #[error("Invalid station \"{0}\"")]
    InvalidStation(String),
}
