// Airwaves - stations.rs
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

use super::last_insert_rowid;
use super::models::{NewStation, Station};
use super::schema::stations;

pub fn stations(con: &SqliteConnection) -> QueryResult<Vec<Station>> {
    stations::table.order(stations::name.asc()).load::<Station>(con)
}

pub fn find(con: &SqliteConnection, id: i64) -> QueryResult<Option<Station>> {
    stations::table.find(id).first::<Station>(con).optional()
}

pub fn find_by_uuid(con: &SqliteConnection, uuid: &str) -> QueryResult<Option<Station>> {
    stations::table.filter(stations::stationuuid.eq(uuid)).order(stations::id.asc()).first::<Station>(con).optional()
}

pub fn contains_station(con: &SqliteConnection, id: i64) -> QueryResult<bool> {
    diesel::select(diesel::dsl::exists(stations::table.find(id))).get_result(con)
}

/// Stores `station`.
///
/// With `unless_exists`, a station whose UUID is already stored is returned
/// as it is. Otherwise the row with the same UUID gets replaced, whatever
/// id the caller passed, so a UUID is never stored twice. Stations without
/// UUID are only matched by id.
pub fn save(con: &SqliteConnection, station: NewStation, unless_exists: bool) -> QueryResult<Station> {
    let existing = match station.stationuuid {
        Some(ref uuid) => find_by_uuid(con, uuid)?,
        None => None,
    };

    if unless_exists {
        if let Some(ref existing) = existing {
            debug!("Station \"{}\" already stored as #{}", existing.name, existing.id);
            return Ok(existing.clone());
        }
    }

    let target = match (existing, station.id) {
        (Some(existing), id) => {
            if id.map_or(false, |id| id != existing.id) {
                debug!("Station UUID already stored as #{}, ignoring id {:?}", existing.id, id);
            }
            Some(existing.id)
        }
        (None, Some(id)) => find(con, id)?.map(|s| s.id),
        (None, None) => None,
    };

    match target {
        Some(id) => {
            let station = station.into_station(id);
            diesel::update(stations::table.find(id)).set(&station).execute(con)?;
            debug!("Updated station #{} \"{}\"", id, station.name);
            Ok(station)
        }
        None => {
            diesel::insert_into(stations::table).values(&station).execute(con)?;
            let id = match station.id {
                Some(id) => id,
                None => diesel::select(last_insert_rowid).get_result::<i64>(con)?,
            };
            debug!("Inserted station #{} \"{}\"", id, station.name);
            Ok(station.into_station(id))
        }
    }
}

/// Deletes the station. Its memberships are removed by the database.
pub fn delete(con: &SqliteConnection, station: &Station) -> QueryResult<usize> {
    let count = diesel::delete(stations::table.find(station.id)).execute(con)?;
    debug!("Deleted station #{} \"{}\" ({} row)", station.id, station.name, count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::migrations;

    fn connection() -> SqliteConnection {
        let con = SqliteConnection::establish(":memory:").unwrap();
        migrations::run_migrations(&con).unwrap();
        con
    }

    fn paradise() -> NewStation {
        NewStation::new("Radio Paradise", "https://stream.radioparadise.com/aac-320").with_uuid("9617a958-0601-11e8-ae97-52543be04c81")
    }

    #[test]
    fn save_deduplicates_by_uuid() {
        let con = connection();
        let first = save(&con, paradise(), true).unwrap();
        let second = save(&con, paradise(), true).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(stations(&con).unwrap().len(), 1);
    }

    #[test]
    fn save_unless_exists_keeps_stored_row() {
        let con = connection();
        let first = save(&con, paradise(), true).unwrap();

        let mut renamed = paradise();
        renamed.name = "Paradise".to_string();
        let second = save(&con, renamed, true).unwrap();

        assert_eq!(second, first);
        assert_eq!(find(&con, first.id).unwrap().unwrap().name, "Radio Paradise");
    }

    #[test]
    fn save_replaces_without_unless_exists() {
        let con = connection();
        let first = save(&con, paradise(), true).unwrap();

        let mut renamed = paradise();
        renamed.name = "Paradise".to_string();
        let second = save(&con, renamed, false).unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(find(&con, first.id).unwrap().unwrap().name, "Paradise");
        assert_eq!(stations(&con).unwrap().len(), 1);
    }

    #[test]
    fn custom_stations_are_never_deduplicated() {
        let con = connection();
        let custom = NewStation::new("My Stream", "http://localhost:8000/stream");
        let a = save(&con, custom.clone(), true).unwrap();
        let b = save(&con, custom, true).unwrap();
        assert_ne!(a.id, b.id);

        // Unless the caller passes the local id
        let mut same = NewStation::from(&a);
        same.url = "http://localhost:8000/other".to_string();
        let c = save(&con, same, true).unwrap();
        assert_eq!(c.id, a.id);
        assert_eq!(find(&con, a.id).unwrap().unwrap().url, "http://localhost:8000/other");
    }

    #[test]
    fn find_missing_returns_none() {
        let con = connection();
        assert_eq!(find(&con, 42).unwrap(), None);
        assert_eq!(find_by_uuid(&con, "nope").unwrap(), None);
        assert!(!contains_station(&con, 42).unwrap());
    }

    #[test]
    fn delete_station() {
        let con = connection();
        let station = save(&con, paradise(), true).unwrap();
        assert_eq!(delete(&con, &station).unwrap(), 1);
        assert_eq!(delete(&con, &station).unwrap(), 0);
        assert_eq!(find(&con, station.id).unwrap(), None);
    }

    #[test]
    fn uuid_wins_over_a_foreign_id() {
        let con = connection();
        let a = save(&con, paradise(), true).unwrap();
        let other = save(&con, NewStation::new("Other", "http://example.com/other"), true).unwrap();

        // Unknown id
        let mut unknown = paradise();
        unknown.id = Some(a.id + 50);
        let saved = save(&con, unknown, false).unwrap();
        assert_eq!(saved.id, a.id);

        // Id of another row
        let mut foreign = paradise();
        foreign.id = Some(other.id);
        foreign.name = "Paradise".to_string();
        let saved = save(&con, foreign, false).unwrap();
        assert_eq!(saved.id, a.id);
        assert_eq!(find(&con, a.id).unwrap().unwrap().name, "Paradise");
        assert_eq!(find(&con, other.id).unwrap().unwrap().name, "Other");

        let uuid = paradise().stationuuid.unwrap();
        let rows = stations(&con).unwrap().into_iter().filter(|s| s.stationuuid.as_deref() == Some(uuid.as_str())).count();
        assert_eq!(rows, 1);
    }
}
