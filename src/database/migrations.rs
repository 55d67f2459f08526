// Airwaves - migrations.rs
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

use chrono::Utc;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;

use super::schema::schema_version;
use crate::database::Error;

/// One numbered schema step. Versions are not required to be contiguous,
/// only strictly increasing.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i32,
    pub name: &'static str,
    pub statements: &'static [&'static str],
}

// Read database migrations
pub static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_stations",
        statements: &[include_str!("../../data/database/migrations/0001_create_stations/up.sql")],
    },
    Migration {
        version: 3,
        name: "create_collections",
        statements: &[include_str!("../../data/database/migrations/0003_create_collections/up.sql")],
    },
    Migration {
        version: 5,
        name: "create_memberships",
        statements: &[include_str!("../../data/database/migrations/0005_create_memberships/up.sql")],
    },
    Migration {
        version: 7,
        name: "collection_sort_key",
        statements: &[include_str!("../../data/database/migrations/0007_collection_sort_key/up.sql")],
    },
    Migration {
        version: 9,
        name: "change_log",
        statements: &[include_str!("../../data/database/migrations/0009_change_log/up.sql")],
    },
    Migration {
        version: 11,
        name: "unique_station_uuid",
        statements: &[include_str!("../../data/database/migrations/0011_unique_station_uuid/up.sql")],
    },
    Migration {
        version: 13,
        name: "membership_change_rows",
        statements: &[include_str!("../../data/database/migrations/0013_membership_change_rows/up.sql")],
    },
];

pub fn latest_version() -> i32 {
    MIGRATIONS.iter().map(|m| m.version).max().unwrap_or(0)
}

/// Returns the schema version stored in the database, creating the
/// single-row version table when it doesn't exist yet.
pub fn current_version(con: &SqliteConnection) -> Result<i32, diesel::result::Error> {
    con.batch_execute(
        "CREATE TABLE IF NOT EXISTS schema_version (id INTEGER PRIMARY KEY NOT NULL, version INTEGER NOT NULL);
         INSERT OR IGNORE INTO schema_version (id, version) VALUES (0, 0);",
    )?;

    let version = schema_version::table.select(schema_version::version).first::<i32>(con).optional()?;
    Ok(version.unwrap_or(0))
}

/// Applies `statements` and bumps the stored version to `target` in one
/// transaction, unless `current` is already at or beyond `target`.
pub fn migrate(con: &SqliteConnection, current: i32, target: i32, statements: &[&str]) -> Result<i32, Error> {
    if current >= target {
        return Ok(current);
    }

    let start = Utc::now();
    con.transaction::<_, diesel::result::Error, _>(|| {
        for statement in statements {
            con.batch_execute(statement)?;
        }
        diesel::update(schema_version::table).set(schema_version::version.eq(target)).execute(con)?;
        Ok(())
    })
    .map_err(|source| Error::Schema { version: target, source })?;

    let elapsed = Utc::now() - start;
    info!("Updated database schema to version {} in {} ms", target, elapsed.num_milliseconds());
    Ok(target)
}

pub fn run_migrations(con: &SqliteConnection) -> Result<i32, Error> {
    run(con, MIGRATIONS)
}

pub(crate) fn run(con: &SqliteConnection, migrations: &[Migration]) -> Result<i32, Error> {
    info!("Running DB Migrations...");
    let mut version = current_version(con).map_err(|source| Error::Schema { version: 0, source })?;

    for migration in migrations {
        debug!("Migration {} ({})", migration.version, migration.name);
        version = migrate(con, version, migration.version, migration.statements)?;
    }

    Ok(version)
}
