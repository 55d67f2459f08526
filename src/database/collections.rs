// Airwaves - collections.rs
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

use diesel::dsl::{exists, max};
use diesel::prelude::*;
use rand::seq::SliceRandom;

use std::collections::HashMap;

use super::last_insert_rowid;
use super::models::*;
use super::schema::{collections, memberships, stations};
use super::stations::contains_station;
use crate::database::Error;
use crate::model::sort_key::{self, Reorder, SortOrder};

const STANDARD_NAMES: [&str; 2] = [FAVORITES_COLLECTION_NAME, RECENTS_COLLECTION_NAME];

/// Which collections a listing includes.
#[derive(Display, Copy, Debug, Clone, EnumString, PartialEq, Eq)]
#[strum(serialize_all = "kebab_case")]
pub enum CollectionKind {
    All,
    Standard,
    Custom,
}

impl From<&Collection> for CollectionKind {
    fn from(collection: &Collection) -> Self {
        if collection.is_standard() {
            CollectionKind::Standard
        } else {
            CollectionKind::Custom
        }
    }
}

type BoxedCollections<'a> = collections::BoxedQuery<'a, diesel::sqlite::Sqlite>;

fn filtered<'a>(kind: CollectionKind) -> BoxedCollections<'a> {
    let query = collections::table.into_boxed();
    match kind {
        CollectionKind::All => query,
        CollectionKind::Standard => query.filter(collections::name.eq_any(STANDARD_NAMES.to_vec())),
        CollectionKind::Custom => query.filter(collections::name.ne_all(STANDARD_NAMES.to_vec())),
    }
}

pub fn find(con: &SqliteConnection, id: i64) -> QueryResult<Option<Collection>> {
    collections::table.find(id).first::<Collection>(con).optional()
}

pub fn find_named(con: &SqliteConnection, name: &str) -> QueryResult<Option<Collection>> {
    collections::table.filter(collections::name.eq(name)).first::<Collection>(con).optional()
}

/// Collections of the given kind, by descending sort key. Ties are broken
/// by id, newest first.
pub fn collections(con: &SqliteConnection, kind: CollectionKind) -> QueryResult<Vec<Collection>> {
    filtered(kind).order((collections::sort_key.desc(), collections::id.desc())).load::<Collection>(con)
}

fn max_sort_key(con: &SqliteConnection) -> QueryResult<Option<f64>> {
    collections::table.select(max(collections::sort_key)).first::<Option<f64>>(con)
}

/// Checks `name` for a new collection (or a rename). Blank names, names in
/// use and the reserved `_`-prefixed names are rejected. Surrounding
/// whitespace doesn't count, collections are stored under the trimmed name.
pub fn validate_name(con: &SqliteConnection, name: &str) -> Result<(), Error> {
    let name = name.trim();
    if name.is_empty() || name.starts_with('_') || is_standard_name(name) {
        return Err(Error::InvalidCollectionName(name.to_string()));
    }
    if find_named(con, name)?.is_some() {
        return Err(Error::DuplicateCollectionName(name.to_string()));
    }
    Ok(())
}

fn insert(con: &SqliteConnection, name: &str, sort_key: f64) -> QueryResult<Collection> {
    let new = NewCollection { name, icon: None, sort_key };
    diesel::insert_into(collections::table).values(&new).execute(con)?;
    let id = diesel::select(last_insert_rowid).get_result::<i64>(con)?;

    debug!("Created collection #{} \"{}\" (sort key {})", id, name, sort_key);
    Ok(Collection {
        id,
        name: name.to_string(),
        icon: None,
        sort_key,
    })
}

/// Creates a collection. Without `sort_key` the new collection shares the
/// largest existing key, or 0 for the first one.
pub fn create(con: &SqliteConnection, name: &str, sort_key: Option<f64>) -> Result<Collection, Error> {
    let name = name.trim();
    validate_name(con, name)?;
    let sort_key = match sort_key {
        Some(key) => key,
        None => max_sort_key(con)?.unwrap_or(0.0),
    };
    Ok(insert(con, name, sort_key)?)
}

/// Looks up a collection by name, creating it when missing. This is how
/// the standard collections come into existence.
pub fn find_or_create_named(con: &SqliteConnection, name: &str) -> QueryResult<Collection> {
    if let Some(collection) = find_named(con, name)? {
        return Ok(collection);
    }
    let sort_key = max_sort_key(con)?.unwrap_or(0.0);
    insert(con, name, sort_key)
}

pub fn rename(con: &SqliteConnection, collection: &Collection, name: &str) -> Result<Collection, Error> {
    if collection.is_standard() {
        return Err(Error::StandardCollection(collection.name.clone()));
    }
    let name = name.trim();
    if collection.name == name {
        return Ok(collection.clone());
    }
    validate_name(con, name)?;

    let count = diesel::update(collections::table.find(collection.id)).set(collections::name.eq(name)).execute(con)?;
    if count == 0 {
        return Err(Error::UnknownCollection(collection.id));
    }

    debug!("Renamed collection #{} \"{}\" -> \"{}\"", collection.id, collection.name, name);
    let mut collection = collection.clone();
    collection.name = name.to_string();
    Ok(collection)
}

pub fn set_icon(con: &SqliteConnection, collection: &Collection, icon: Option<&str>) -> QueryResult<usize> {
    diesel::update(collections::table.find(collection.id)).set(collections::icon.eq(icon)).execute(con)
}

/// Deletes a custom collection together with all of its memberships.
pub fn remove(con: &SqliteConnection, collection: &Collection) -> Result<usize, Error> {
    if collection.is_standard() {
        return Err(Error::StandardCollection(collection.name.clone()));
    }

    let count = diesel::delete(collections::table.find(collection.id)).execute(con)?;
    debug!("Removed collection #{} \"{}\"", collection.id, collection.name);
    Ok(count)
}

/// Adds the station on top of the collection. A station which is already a
/// member is moved to the top instead.
pub fn add_station(con: &SqliteConnection, station_id: i64, collection_id: i64) -> Result<Membership, Error> {
    if !contains_station(con, station_id)? {
        return Err(Error::UnknownStation(station_id));
    }
    if find(con, collection_id)?.is_none() {
        return Err(Error::UnknownCollection(collection_id));
    }

    let top = memberships::table
        .filter(memberships::collection_id.eq(collection_id))
        .select(max(memberships::sort_key))
        .first::<Option<f64>>(con)?;
    let membership = Membership {
        station_id,
        collection_id,
        sort_key: sort_key::key_after(top),
    };

    if is_member(con, station_id, collection_id)? {
        diesel::update(memberships::table.find((station_id, collection_id)))
            .set(memberships::sort_key.eq(membership.sort_key))
            .execute(con)?;
        debug!("Moved station #{} to the top of collection #{}", station_id, collection_id);
    } else {
        diesel::insert_into(memberships::table).values(&membership).execute(con)?;
        debug!("Added station #{} to collection #{}", station_id, collection_id);
    }

    Ok(membership)
}

pub fn remove_station(con: &SqliteConnection, station_id: i64, collection_id: i64) -> QueryResult<usize> {
    let count = diesel::delete(memberships::table.find((station_id, collection_id))).execute(con)?;
    if count == 0 {
        debug!("Station #{} is no member of collection #{}", station_id, collection_id);
    }
    Ok(count)
}

pub fn is_member(con: &SqliteConnection, station_id: i64, collection_id: i64) -> QueryResult<bool> {
    diesel::select(exists(memberships::table.find((station_id, collection_id)))).get_result(con)
}

/// Stations of a collection, most recently added or moved first.
pub fn members(con: &SqliteConnection, collection_id: i64) -> QueryResult<Vec<(Station, Membership)>> {
    stations::table
        .inner_join(memberships::table)
        .filter(memberships::collection_id.eq(collection_id))
        .order((memberships::sort_key.desc(), memberships::station_id.asc()))
        .load::<(Station, Membership)>(con)
}

fn member_keys(con: &SqliteConnection, collection_id: i64) -> QueryResult<Vec<Membership>> {
    memberships::table
        .filter(memberships::collection_id.eq(collection_id))
        .order((memberships::sort_key.desc(), memberships::station_id.asc()))
        .load::<Membership>(con)
}

pub fn containing(con: &SqliteConnection, station_id: i64) -> QueryResult<Vec<Collection>> {
    collections::table
        .inner_join(memberships::table)
        .filter(memberships::station_id.eq(station_id))
        .select(collections::all_columns)
        .order((collections::sort_key.desc(), collections::id.desc()))
        .load::<Collection>(con)
}

/// Every collection of the given kind together with its number of members.
///
/// The left join yields one row per membership, and a single row without
/// membership for an empty collection. Such a row counts as zero.
pub fn counts(con: &SqliteConnection, kind: CollectionKind) -> QueryResult<Vec<(Collection, i64)>> {
    let mut query = collections::table.left_join(memberships::table).into_boxed();
    query = match kind {
        CollectionKind::All => query,
        CollectionKind::Standard => query.filter(collections::name.eq_any(STANDARD_NAMES.to_vec())),
        CollectionKind::Custom => query.filter(collections::name.ne_all(STANDARD_NAMES.to_vec())),
    };
    let rows = query
        .order((collections::sort_key.desc(), collections::id.desc()))
        .load::<(Collection, Option<Membership>)>(con)?;

    let mut result: Vec<(Collection, i64)> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();
    for (collection, membership) in rows {
        let i = *index.entry(collection.id).or_insert_with(|| {
            result.push((collection, 0));
            result.len() - 1
        });
        if membership.is_some() {
            result[i].1 += 1;
        }
    }

    Ok(result)
}

/// Randomly permutes the sort keys of all members: they get the keys
/// 1..=n in random order.
pub fn shuffle(con: &SqliteConnection, collection_id: i64) -> QueryResult<usize> {
    let mut members = member_keys(con, collection_id)?;
    members.shuffle(&mut rand::thread_rng());

    for (i, membership) in members.iter().enumerate() {
        diesel::update(memberships::table.find((membership.station_id, collection_id)))
            .set(memberships::sort_key.eq(i as f64 + 1.0))
            .execute(con)?;
    }

    debug!("Shuffled {} member(s) of collection #{}", members.len(), collection_id);
    Ok(members.len())
}

/// Moves a member to `target` in the descending display order of the
/// collection. Returns false if the station is no member.
pub fn move_member(con: &SqliteConnection, collection_id: i64, station_id: i64, target: usize) -> QueryResult<bool> {
    let members = member_keys(con, collection_id)?;
    let from = match members.iter().position(|m| m.station_id == station_id) {
        Some(from) => from,
        None => return Ok(false),
    };

    let siblings: Vec<&Membership> = members.iter().filter(|m| m.station_id != station_id).collect();
    let keys: Vec<f64> = members.iter().map(|m| m.sort_key).collect();

    match sort_key::move_item_default(&keys, from, target, SortOrder::Descending) {
        Reorder::Single(key) => {
            diesel::update(memberships::table.find((station_id, collection_id)))
                .set(memberships::sort_key.eq(key))
                .execute(con)?;
        }
        Reorder::Renumber(keys) => {
            let mut order: Vec<i64> = siblings.iter().map(|m| m.station_id).collect();
            order.insert(target.min(order.len()), station_id);
            for (id, key) in order.iter().zip(keys) {
                diesel::update(memberships::table.find((*id, collection_id)))
                    .set(memberships::sort_key.eq(key))
                    .execute(con)?;
            }
        }
    }

    debug!("Moved station #{} to position {} of collection #{}", station_id, target, collection_id);
    Ok(true)
}

/// Moves a collection to `target` among the collections of the same kind,
/// in descending display order.
pub fn move_collection(con: &SqliteConnection, collection: &Collection, target: usize) -> QueryResult<bool> {
    let all = collections(con, CollectionKind::from(collection))?;
    let from = match all.iter().position(|c| c.id == collection.id) {
        Some(from) => from,
        None => return Ok(false),
    };

    let siblings: Vec<&Collection> = all.iter().filter(|c| c.id != collection.id).collect();
    let keys: Vec<f64> = all.iter().map(|c| c.sort_key).collect();

    match sort_key::move_item_default(&keys, from, target, SortOrder::Descending) {
        Reorder::Single(key) => {
            diesel::update(collections::table.find(collection.id)).set(collections::sort_key.eq(key)).execute(con)?;
        }
        Reorder::Renumber(keys) => {
            let mut order: Vec<i64> = siblings.iter().map(|c| c.id).collect();
            order.insert(target.min(order.len()), collection.id);
            for (id, key) in order.iter().zip(keys) {
                diesel::update(collections::table.find(*id)).set(collections::sort_key.eq(key)).execute(con)?;
            }
        }
    }

    debug!("Moved collection #{} to position {}", collection.id, target);
    Ok(true)
}

/// Removes all but the `limit` most recent members of a collection.
pub fn trim(con: &SqliteConnection, collection_id: i64, limit: usize) -> QueryResult<usize> {
    let members = member_keys(con, collection_id)?;
    let mut removed = 0;
    for membership in members.iter().skip(limit) {
        removed += remove_station(con, membership.station_id, collection_id)?;
    }

    if removed > 0 {
        debug!("Trimmed {} member(s) from collection #{}", removed, collection_id);
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{migrations, stations as station_repo};

    fn connection() -> SqliteConnection {
        let con = SqliteConnection::establish(":memory:").unwrap();
        con.execute("PRAGMA foreign_keys = ON").unwrap();
        migrations::run_migrations(&con).unwrap();
        con
    }

    fn station(con: &SqliteConnection, name: &str) -> Station {
        let new = NewStation::new(name, &format!("http://example.com/{}", name)).with_uuid(&format!("uuid-{}", name));
        station_repo::save(con, new, true).unwrap()
    }

    fn names(members: &[(Station, Membership)]) -> Vec<String> {
        members.iter().map(|(s, _)| s.name.clone()).collect()
    }

    #[test]
    fn create_rejects_empty_and_duplicate_names() {
        let con = connection();
        create(&con, "Jazz", None).unwrap();

        assert!(matches!(create(&con, "", None), Err(Error::InvalidCollectionName(_))));
        assert!(matches!(create(&con, "   ", None), Err(Error::InvalidCollectionName(_))));
        assert!(matches!(create(&con, "Jazz", None), Err(Error::DuplicateCollectionName(_))));
        assert!(matches!(create(&con, FAVORITES_COLLECTION_NAME, None), Err(Error::InvalidCollectionName(_))));
    }

    #[test]
    fn names_are_trimmed() {
        let con = connection();
        let jazz = create(&con, "  Jazz ", None).unwrap();
        assert_eq!(jazz.name, "Jazz");
        assert_eq!(find_named(&con, "Jazz").unwrap(), Some(jazz.clone()));

        assert!(matches!(create(&con, " Jazz", None), Err(Error::DuplicateCollectionName(_))));
        assert!(matches!(create(&con, " _secret", None), Err(Error::InvalidCollectionName(_))));

        create(&con, "Rock", None).unwrap();
        assert!(matches!(rename(&con, &jazz, "Rock  "), Err(Error::DuplicateCollectionName(_))));
        assert_eq!(rename(&con, &jazz, " Jazz ").unwrap(), jazz);
        assert_eq!(rename(&con, &jazz, " Bebop ").unwrap().name, "Bebop");
    }

    #[test]
    fn default_sort_key_is_current_maximum() {
        let con = connection();
        let first = create(&con, "Jazz", None).unwrap();
        assert_eq!(first.sort_key, 0.0);

        create(&con, "Rock", Some(5.0)).unwrap();
        let third = create(&con, "Pop", None).unwrap();
        assert_eq!(third.sort_key, 5.0);
    }

    #[test]
    fn standard_collections_reject_rename_and_remove() {
        let con = connection();
        let favorites = find_or_create_named(&con, FAVORITES_COLLECTION_NAME).unwrap();
        assert_eq!(find_or_create_named(&con, FAVORITES_COLLECTION_NAME).unwrap(), favorites);

        assert!(matches!(rename(&con, &favorites, "Faves"), Err(Error::StandardCollection(_))));
        assert!(matches!(remove(&con, &favorites), Err(Error::StandardCollection(_))));
    }

    #[test]
    fn rename_custom_collection() {
        let con = connection();
        let jazz = create(&con, "Jazz", None).unwrap();
        create(&con, "Rock", None).unwrap();

        assert!(matches!(rename(&con, &jazz, "Rock"), Err(Error::DuplicateCollectionName(_))));
        let renamed = rename(&con, &jazz, "Smooth Jazz").unwrap();
        assert_eq!(find(&con, jazz.id).unwrap().unwrap(), renamed);
    }

    #[test]
    fn add_twice_moves_to_top_without_duplicate() {
        let con = connection();
        let jazz = create(&con, "Jazz", None).unwrap();
        let a = station(&con, "a");
        let b = station(&con, "b");

        add_station(&con, a.id, jazz.id).unwrap();
        add_station(&con, b.id, jazz.id).unwrap();
        assert_eq!(names(&members(&con, jazz.id).unwrap()), vec!["b", "a"]);

        add_station(&con, a.id, jazz.id).unwrap();
        let members = members(&con, jazz.id).unwrap();
        assert_eq!(names(&members), vec!["a", "b"]);
        assert_eq!(members.len(), 2);
    }

    #[test]
    fn add_unknown_station_is_rejected() {
        let con = connection();
        let jazz = create(&con, "Jazz", None).unwrap();
        assert!(matches!(add_station(&con, 99, jazz.id), Err(Error::UnknownStation(99))));

        let a = station(&con, "a");
        assert!(matches!(add_station(&con, a.id, 99), Err(Error::UnknownCollection(99))));
    }

    #[test]
    fn remove_missing_member_is_a_no_op() {
        let con = connection();
        let jazz = create(&con, "Jazz", None).unwrap();
        let a = station(&con, "a");
        assert_eq!(remove_station(&con, a.id, jazz.id).unwrap(), 0);

        add_station(&con, a.id, jazz.id).unwrap();
        assert!(is_member(&con, a.id, jazz.id).unwrap());
        assert_eq!(remove_station(&con, a.id, jazz.id).unwrap(), 1);
        assert!(!is_member(&con, a.id, jazz.id).unwrap());
    }

    #[test]
    fn counts_include_empty_collections() {
        let con = connection();
        let jazz = create(&con, "Jazz", Some(1.0)).unwrap();
        let empty = create(&con, "Empty", Some(2.0)).unwrap();
        let a = station(&con, "a");
        add_station(&con, a.id, jazz.id).unwrap();

        let counts = counts(&con, CollectionKind::All).unwrap();
        assert_eq!(counts, vec![(empty, 0), (jazz, 1)]);
    }

    #[test]
    fn deleting_cascades_memberships() {
        let con = connection();
        let jazz = create(&con, "Jazz", None).unwrap();
        let rock = create(&con, "Rock", None).unwrap();
        let a = station(&con, "a");
        let b = station(&con, "b");
        for c in &[&jazz, &rock] {
            add_station(&con, a.id, c.id).unwrap();
            add_station(&con, b.id, c.id).unwrap();
        }

        station_repo::delete(&con, &a).unwrap();
        assert!(containing(&con, a.id).unwrap().is_empty());
        assert_eq!(names(&members(&con, rock.id).unwrap()), vec!["b"]);

        remove(&con, &jazz).unwrap();
        let orphans: i64 = memberships::table.filter(memberships::collection_id.eq(jazz.id)).count().get_result(&con).unwrap();
        assert_eq!(orphans, 0);
        assert_eq!(containing(&con, b.id).unwrap(), vec![find(&con, rock.id).unwrap().unwrap()]);
    }

    #[test]
    fn shuffle_assigns_consecutive_keys() {
        let con = connection();
        let jazz = create(&con, "Jazz", None).unwrap();
        for name in &["a", "b", "c", "d"] {
            let s = station(&con, name);
            add_station(&con, s.id, jazz.id).unwrap();
        }
        move_member(&con, jazz.id, members(&con, jazz.id).unwrap()[0].0.id, 2).unwrap();

        assert_eq!(shuffle(&con, jazz.id).unwrap(), 4);
        let mut keys: Vec<f64> = members(&con, jazz.id).unwrap().iter().map(|(_, m)| m.sort_key).collect();
        keys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(keys, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn move_member_touches_one_row() {
        let con = connection();
        let jazz = create(&con, "Jazz", None).unwrap();
        let mut ids = Vec::new();
        for name in &["a", "b", "c"] {
            let s = station(&con, name);
            add_station(&con, s.id, jazz.id).unwrap();
            ids.push(s.id);
        }
        // c (3.0), b (2.0), a (1.0)
        let before = members(&con, jazz.id).unwrap();

        assert!(move_member(&con, jazz.id, ids[2], 3).unwrap());
        let after = members(&con, jazz.id).unwrap();
        assert_eq!(names(&after), vec!["b", "a", "c"]);
        assert_eq!(after[2].1.sort_key, 0.5);
        assert_eq!(after[0].1, before[1].1);
        assert_eq!(after[1].1, before[2].1);

        assert!(move_member(&con, jazz.id, ids[2], 1).unwrap());
        assert_eq!(names(&members(&con, jazz.id).unwrap()), vec!["b", "c", "a"]);

        let d = station(&con, "d");
        assert!(!move_member(&con, jazz.id, d.id, 0).unwrap());
    }

    #[test]
    fn move_collection_among_custom_collections() {
        let con = connection();
        find_or_create_named(&con, FAVORITES_COLLECTION_NAME).unwrap();
        let jazz = create(&con, "Jazz", Some(1.0)).unwrap();
        create(&con, "Rock", Some(2.0)).unwrap();

        move_collection(&con, &jazz, 0).unwrap();
        let names: Vec<String> = collections(&con, CollectionKind::Custom).unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Jazz", "Rock"]);
        assert_eq!(find(&con, jazz.id).unwrap().unwrap().sort_key, 3.0);
    }

    #[test]
    fn trim_keeps_most_recent() {
        let con = connection();
        let recents = find_or_create_named(&con, RECENTS_COLLECTION_NAME).unwrap();
        for name in &["a", "b", "c"] {
            let s = station(&con, name);
            add_station(&con, s.id, recents.id).unwrap();
        }

        assert_eq!(trim(&con, recents.id, 2).unwrap(), 1);
        assert_eq!(names(&members(&con, recents.id).unwrap()), vec!["c", "b"]);
    }
}
