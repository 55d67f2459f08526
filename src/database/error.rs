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
    #[error("Schema migration to version {version} failed: {source}")]
    Schema {
        version: i32,
        #[source]
        source: diesel::result::Error,
    },
    #[error("Database connection error: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("Database pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("Database query error: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("Invalid collection name \"{0}\"")]
    InvalidCollectionName(String),
    #[error("A collection named \"{0}\" already exists")]
    DuplicateCollectionName(String),
    #[error("The standard collection \"{0}\" cannot be changed")]
    StandardCollection(String),
    #[error("Unknown station with id {0}")]
    UnknownStation(i64),
    #[error("Unknown collection with id {0}")]
    UnknownCollection(i64),
}

impl Error {
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Error::Schema { .. } | Error::Connection(_) | Error::Pool(_))
    }
}
