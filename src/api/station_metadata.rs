// Airwaves - station_metadata.rs
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

use serde::{Deserialize, Deserializer, Serializer};
use std::convert::TryFrom;
use std::str::FromStr;
use url::Url;

use crate::api::Error;
use crate::database::NewStation;

/// A station as listed by the remote directory. Missing fields fall back to
/// their defaults, the directory isn't consistent about them.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StationMetadata {
    pub changeuuid: String,
    pub stationuuid: String,
    pub name: String,
    #[serde(serialize_with = "url_to_str")]
    #[serde(deserialize_with = "str_to_url")]
    pub url: Option<Url>,
    #[serde(serialize_with = "url_to_str")]
    #[serde(deserialize_with = "str_to_url")]
    pub url_resolved: Option<Url>,
    #[serde(serialize_with = "url_to_str")]
    #[serde(deserialize_with = "str_to_url")]
    pub homepage: Option<Url>,
    #[serde(serialize_with = "url_to_str")]
    #[serde(deserialize_with = "str_to_url")]
    pub favicon: Option<Url>,
    pub tags: String,
    pub country: String,
    pub countrycode: String,
    pub state: String,
    pub language: String,
    pub languagecodes: String,
    pub votes: i32,
    pub codec: String,
    pub bitrate: i32,
    pub hls: i32,
    pub lastcheckok: i32,
    pub clickcount: i32,
    pub clicktrend: i32,
}

impl StationMetadata {
    pub fn is_broken(&self) -> bool {
        self.lastcheckok == 0
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Maps a directory entry onto a storable station. Entries without any
/// stream URL can't be stored.
impl TryFrom<&StationMetadata> for NewStation {
    type Error = Error;

    fn try_from(metadata: &StationMetadata) -> Result<Self, Self::Error> {
        let url = metadata
            .url
            .as_ref()
            .or_else(|| metadata.url_resolved.as_ref())
            .ok_or_else(|| Error::InvalidStation(metadata.stationuuid.clone()))?;

        Ok(NewStation {
            id: None,
            stationuuid: non_empty(&metadata.stationuuid),
            name: metadata.name.trim().to_string(),
            url: url.to_string(),
            homepage: metadata.homepage.as_ref().map(Url::to_string),
            favicon: metadata.favicon.as_ref().map(Url::to_string),
            tags: non_empty(&metadata.tags),
            countrycode: non_empty(&metadata.countrycode),
        })
    }
}

fn url_to_str<S>(url: &Option<Url>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let value = if let Some(url) = url { url.as_str() } else { "" };
    serializer.serialize_str(value)
}

fn str_to_url<'de, D>(deserializer: D) -> Result<Option<Url>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.and_then(|s| Url::from_str(&s).ok()))
}
