// Airwaves - library.rs
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

use diesel::prelude::*;

use std::fmt;
use std::path::Path;

use super::changes::ChangeTracker;
use super::collections::{self, CollectionKind};
use super::connection::{self, Pool, PooledConnection, DB_PATH, IN_MEMORY};
use super::migrations;
use super::models::*;
use super::stations;
use crate::config;
use crate::database::Error;

#[derive(Display, Copy, Debug, Clone, EnumString, PartialEq)]
pub enum LibraryStatus {
    Content,
    Empty,
}

/// The local station library.
///
/// Owns the database and is its only writer. Every write runs in its own
/// transaction; afterwards the committed row changes are counted by the
/// library's `ChangeTracker`. Everything handed out is a plain copy of the
/// stored rows.
pub struct Library {
    pool: Pool,
    changes: ChangeTracker,
    favorites_id: i64,
    recents_id: i64,
}

// The pool isn't Debug, SqliteConnection doesn't implement it
impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("changes", &self.changes)
            .field("favorites_id", &self.favorites_id)
            .field("recents_id", &self.recents_id)
            .finish()
    }
}

impl Library {
    /// Opens (or creates) the library at `path` and brings its schema up to
    /// date. Any error here leaves the library unusable.
    pub fn open(path: &Path) -> Result<Self, Error> {
        info!("Database Path: {}", path.display());
        let pool = connection::init_connection_pool(path)?;

        let mut library = Self {
            pool,
            changes: ChangeTracker::new(),
            favorites_id: 0,
            recents_id: 0,
        };
        library.initialize_collections()?;

        info!("Stations: {}", library.stations()?.len());
        Ok(library)
    }

    pub fn open_default() -> Result<Self, Error> {
        Self::open(&DB_PATH)
    }

    pub fn open_in_memory() -> Result<Self, Error> {
        Self::open(Path::new(IN_MEMORY))
    }

    fn initialize_collections(&mut self) -> Result<(), Error> {
        let (recents, favorites) = self.write(|con| {
            let recents = collections::find_or_create_named(con, RECENTS_COLLECTION_NAME)?;
            let favorites = collections::find_or_create_named(con, FAVORITES_COLLECTION_NAME)?;
            Ok((recents, favorites))
        })?;

        self.recents_id = recents.id;
        self.favorites_id = favorites.id;
        Ok(())
    }

    fn connection(&self) -> Result<PooledConnection, Error> {
        Ok(self.pool.get()?)
    }

    fn read<T, F>(&self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&SqliteConnection) -> QueryResult<T>,
    {
        let pooled = self.connection()?;
        let con: &SqliteConnection = &pooled;
        Ok(f(con)?)
    }

    fn write<T, F>(&self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&SqliteConnection) -> Result<T, Error>,
    {
        let pooled = self.connection()?;
        let con: &SqliteConnection = &pooled;
        let result = con.transaction::<T, Error, _>(|| f(con))?;

        if let Err(err) = self.changes.collect(con) {
            warn!("Unable to read change log: {}", err);
        }
        Ok(result)
    }

    /// The mutation counter of this library.
    pub fn changes(&self) -> &ChangeTracker {
        &self.changes
    }

    pub fn schema_version(&self) -> Result<i32, Error> {
        self.read(migrations::current_version)
    }

    pub fn status(&self) -> Result<LibraryStatus, Error> {
        let count: i64 = self.read(|con| super::schema::stations::table.count().get_result(con))?;
        Ok(if count == 0 { LibraryStatus::Empty } else { LibraryStatus::Content })
    }

    /* Stations */

    pub fn save_station(&self, station: NewStation, unless_exists: bool) -> Result<Station, Error> {
        self.write(|con| Ok(stations::save(con, station, unless_exists)?))
    }

    pub fn station(&self, id: i64) -> Result<Option<Station>, Error> {
        self.read(|con| stations::find(con, id))
    }

    pub fn station_by_uuid(&self, uuid: &str) -> Result<Option<Station>, Error> {
        self.read(|con| stations::find_by_uuid(con, uuid))
    }

    pub fn stations(&self) -> Result<Vec<Station>, Error> {
        self.read(stations::stations)
    }

    /// Deletes the station and removes it from every collection.
    pub fn delete_station(&self, station: &Station) -> Result<(), Error> {
        self.write(|con| Ok(stations::delete(con, station)?))?;
        Ok(())
    }

    /* Collections */

    pub fn favorites(&self) -> Result<Collection, Error> {
        self.collection(self.favorites_id)?.ok_or(Error::UnknownCollection(self.favorites_id))
    }

    pub fn recents(&self) -> Result<Collection, Error> {
        self.collection(self.recents_id)?.ok_or(Error::UnknownCollection(self.recents_id))
    }

    pub fn collection(&self, id: i64) -> Result<Option<Collection>, Error> {
        self.read(|con| collections::find(con, id))
    }

    pub fn collection_named(&self, name: &str) -> Result<Option<Collection>, Error> {
        self.read(|con| collections::find_named(con, name))
    }

    /// Looks up a collection by name, optionally creating it when missing.
    /// New names go through the same validation as `create_collection`.
    pub fn collection_named_or_create(&self, name: &str, create: bool) -> Result<Option<Collection>, Error> {
        let name = name.trim();
        if let Some(collection) = self.collection_named(name)? {
            return Ok(Some(collection));
        }
        if !create {
            return Ok(None);
        }
        self.create_collection(name, None).map(Some)
    }

    pub fn create_collection(&self, name: &str, sort_key: Option<f64>) -> Result<Collection, Error> {
        self.write(|con| collections::create(con, name, sort_key))
    }

    /// Whether `name` would be accepted for a new collection.
    pub fn is_valid_collection_name(&self, name: &str) -> bool {
        match self.connection() {
            Ok(pooled) => collections::validate_name(&pooled, name).is_ok(),
            Err(err) => {
                warn!("Unable to validate collection name: {}", err);
                false
            }
        }
    }

    pub fn standard_collections(&self) -> Result<Vec<Collection>, Error> {
        self.read(|con| collections::collections(con, CollectionKind::Standard))
    }

    pub fn custom_collections(&self) -> Result<Vec<Collection>, Error> {
        self.read(|con| collections::collections(con, CollectionKind::Custom))
    }

    pub fn all_collections(&self) -> Result<Vec<Collection>, Error> {
        self.read(|con| collections::collections(con, CollectionKind::All))
    }

    pub fn rename_collection(&self, collection: &Collection, name: &str) -> Result<Collection, Error> {
        self.write(|con| collections::rename(con, collection, name))
    }

    pub fn set_collection_icon(&self, collection: &Collection, icon: Option<&str>) -> Result<(), Error> {
        self.write(|con| Ok(collections::set_icon(con, collection, icon)?))?;
        Ok(())
    }

    /// Removes a custom collection. Its memberships go with it, the stations
    /// stay in the library.
    pub fn remove_collection(&self, collection: &Collection) -> Result<(), Error> {
        self.write(|con| collections::remove(con, collection))?;
        Ok(())
    }

    pub fn add_station(&self, station: &Station, collection: &Collection) -> Result<Membership, Error> {
        self.write(|con| collections::add_station(con, station.id, collection.id))
    }

    /// Stores the station (reusing a stored one with the same UUID) and adds
    /// it to the collection.
    pub fn add_new_station(&self, station: NewStation, collection: &Collection) -> Result<Station, Error> {
        self.write(|con| {
            let station = stations::save(con, station, true)?;
            collections::add_station(con, station.id, collection.id)?;
            Ok(station)
        })
    }

    /// Batch form of `add_new_station`. The last station ends up on top.
    pub fn add_stations(&self, new_stations: Vec<NewStation>, collection: &Collection) -> Result<Vec<Station>, Error> {
        debug!("Add {} station(s) to collection #{}", new_stations.len(), collection.id);
        self.write(|con| {
            let mut result = Vec::new();
            for station in new_stations {
                let station = stations::save(con, station, true)?;
                collections::add_station(con, station.id, collection.id)?;
                result.push(station);
            }
            Ok(result)
        })
    }

    /// Returns false when the station wasn't a member.
    pub fn remove_station(&self, station: &Station, collection: &Collection) -> Result<bool, Error> {
        let count = self.write(|con| Ok(collections::remove_station(con, station.id, collection.id)?))?;
        Ok(count > 0)
    }

    pub fn members(&self, collection: &Collection) -> Result<Vec<(Station, Membership)>, Error> {
        self.read(|con| collections::members(con, collection.id))
    }

    pub fn is_member(&self, station: &Station, collection: &Collection) -> Result<bool, Error> {
        self.read(|con| collections::is_member(con, station.id, collection.id))
    }

    pub fn collections_containing(&self, station: &Station) -> Result<Vec<Collection>, Error> {
        self.read(|con| collections::containing(con, station.id))
    }

    pub fn collection_counts(&self, kind: CollectionKind) -> Result<Vec<(Collection, i64)>, Error> {
        self.read(|con| collections::counts(con, kind))
    }

    pub fn shuffle_members(&self, collection: &Collection) -> Result<(), Error> {
        self.write(|con| Ok(collections::shuffle(con, collection.id)?))?;
        Ok(())
    }

    /// Drag-and-drop reorder of a member to `target` in the displayed
    /// (descending) order. Returns false when the station is no member.
    pub fn move_member(&self, collection: &Collection, station: &Station, target: usize) -> Result<bool, Error> {
        self.write(|con| Ok(collections::move_member(con, collection.id, station.id, target)?))
    }

    /// Drag-and-drop reorder of a collection among the collections of the
    /// same kind.
    pub fn move_collection(&self, collection: &Collection, target: usize) -> Result<bool, Error> {
        self.write(|con| Ok(collections::move_collection(con, collection, target)?))
    }

    /// Puts the station on top of the recents, dropping the oldest entries
    /// beyond `config::RECENTS_LIMIT`.
    pub fn record_recent(&self, station: &Station) -> Result<Membership, Error> {
        let recents_id = self.recents_id;
        self.write(|con| {
            let membership = collections::add_station(con, station.id, recents_id)?;
            collections::trim(con, recents_id, config::RECENTS_LIMIT)?;
            Ok(membership)
        })
    }

    /// Keeps only the `limit` most recently played stations. Returns the
    /// number of dropped entries.
    pub fn trim_recents(&self, limit: usize) -> Result<usize, Error> {
        let recents_id = self.recents_id;
        self.write(|con| Ok(collections::trim(con, recents_id, limit)?))
    }
}
