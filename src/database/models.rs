// Airwaves - models.rs
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

use super::schema::*;

/// The symbolic name of the favorites collection
pub const FAVORITES_COLLECTION_NAME: &str = "_favorites";
/// The symbolic name of the recently played stations collection
pub const RECENTS_COLLECTION_NAME: &str = "_recents";

/// A station stored in the local library.
///
/// Stations coming from the remote directory carry their `stationuuid`,
/// user entered stations don't have one.
#[derive(Queryable, Identifiable, AsChangeset, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[table_name = "stations"]
#[changeset_options(treat_none_as_null = "true")]
pub struct Station {
    pub id: i64,
    pub stationuuid: Option<String>,
    pub name: String,
    pub url: String,
    pub homepage: Option<String>,
    pub favicon: Option<String>,
    pub tags: Option<String>,
    pub countrycode: Option<String>,
}

impl Station {
    pub fn is_custom(&self) -> bool {
        self.stationuuid.is_none()
    }
}

/// A station which isn't stored yet. `id` is only set when the caller wants
/// to overwrite an existing row.
#[derive(Insertable, Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[table_name = "stations"]
pub struct NewStation {
    pub id: Option<i64>,
    pub stationuuid: Option<String>,
    pub name: String,
    pub url: String,
    pub homepage: Option<String>,
    pub favicon: Option<String>,
    pub tags: Option<String>,
    pub countrycode: Option<String>,
}

impl NewStation {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_uuid(mut self, stationuuid: &str) -> Self {
        self.stationuuid = Some(stationuuid.to_string());
        self
    }

    pub(crate) fn into_station(self, id: i64) -> Station {
        Station {
            id,
            stationuuid: self.stationuuid,
            name: self.name,
            url: self.url,
            homepage: self.homepage,
            favicon: self.favicon,
            tags: self.tags,
            countrycode: self.countrycode,
        }
    }
}

impl From<&Station> for NewStation {
    fn from(station: &Station) -> Self {
        Self {
            id: Some(station.id),
            stationuuid: station.stationuuid.clone(),
            name: station.name.clone(),
            url: station.url.clone(),
            homepage: station.homepage.clone(),
            favicon: station.favicon.clone(),
            tags: station.tags.clone(),
            countrycode: station.countrycode.clone(),
        }
    }
}

/// A named and ordered set of stations.
#[derive(Queryable, Identifiable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[table_name = "collections"]
pub struct Collection {
    pub id: i64,
    pub name: String,
    pub icon: Option<String>,
    pub sort_key: f64,
}

impl Collection {
    pub fn is_standard(&self) -> bool {
        is_standard_name(&self.name)
    }

    pub fn is_favorites(&self) -> bool {
        self.name == FAVORITES_COLLECTION_NAME
    }

    pub fn is_recents(&self) -> bool {
        self.name == RECENTS_COLLECTION_NAME
    }
}

pub fn is_standard_name(name: &str) -> bool {
    name == FAVORITES_COLLECTION_NAME || name == RECENTS_COLLECTION_NAME
}

#[derive(Insertable, Debug)]
#[table_name = "collections"]
pub struct NewCollection<'a> {
    pub name: &'a str,
    pub icon: Option<&'a str>,
    pub sort_key: f64,
}

/// The link between a station and a collection, with its position inside
/// the collection.
#[derive(Queryable, Insertable, Identifiable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[table_name = "memberships"]
#[primary_key(station_id, collection_id)]
pub struct Membership {
    pub station_id: i64,
    pub collection_id: i64,
    pub sort_key: f64,
}

#[derive(Queryable, Debug)]
pub struct ChangeEntry {
    pub id: i64,
    pub action: String,
    pub table_name: String,
    pub row_id: i64,
}
