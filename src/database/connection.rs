// Airwaves - connection.rs
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

// Based on gnome-podcasts by Jordan Petridis
// https://gitlab.gnome.org/World/podcasts/blob/cf644d508d8d7dab3c9357d12b1262ae6b44c8e8/podcasts-data/src/database.rs

use std::path::{Path, PathBuf};

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2;
use diesel::r2d2::{ConnectionManager, CustomizeConnection};
use once_cell::sync::Lazy;

use crate::config;
use crate::database::migrations;
use crate::database::Error;
use crate::path;

// Define 'Pool' type
pub type Pool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type PooledConnection = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

// Default database path
pub static DB_PATH: Lazy<PathBuf> = Lazy::new(|| {
    let mut path = path::DATA.clone();
    path.push(format!("{}.db", config::NAME.to_lowercase()));
    path
});

pub const IN_MEMORY: &str = ":memory:";

// Cascading deletes of memberships depend on foreign keys,
// which SQLite only enforces when enabled per connection.
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        connection.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;").map_err(r2d2::Error::QueryError)
    }
}

// Inits database connection pool, and run migrations.
// If there's no database, it get's created automatically.
pub fn init_connection_pool(db_path: &Path) -> Result<Pool, Error> {
    let db_path = db_path.to_string_lossy();
    let manager = ConnectionManager::<SqliteConnection>::new(db_path.as_ref());

    // A single connection keeps the library single-writer, and keeps an
    // in-memory database alive for the whole lifetime of the pool.
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)?;

    let con = pool.get()?;
    migrations::run_migrations(&*con)?;

    info!("Initialized database connection pool ({}).", db_path);
    Ok(pool)
}
