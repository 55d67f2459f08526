// Airwaves - station_request.rs
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

/// Query parameters of the station search endpoint. Unset fields are left
/// out of the encoded query.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct StationRequest {
    pub name: Option<String>,
    pub name_exact: Option<bool>,
    pub country: Option<String>,
    pub country_exact: Option<bool>,
    pub countrycode: Option<String>,
    pub state: Option<String>,
    pub state_exact: Option<bool>,
    pub language: Option<String>,
    pub language_exact: Option<bool>,
    pub tag: Option<String>,
    pub tag_exact: Option<bool>,
    pub codec: Option<String>,
    pub bitrate_min: Option<u32>,
    pub bitrate_max: Option<u32>,
    pub is_https: Option<bool>,
    pub order: Option<String>,
    pub reverse: Option<bool>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub hidebroken: Option<bool>,
}

impl StationRequest {
    pub fn search_for_name(name: &str, limit: u32) -> Self {
        Self {
            name: Some(name.to_string()),
            limit: Some(limit),
            hidebroken: Some(true),
            order: Some(String::from("votes")),
            reverse: Some(true),
            ..Self::default()
        }
    }

    pub fn search_for_tag(tag: &str, limit: u32) -> Self {
        Self {
            tag: Some(tag.to_string()),
            tag_exact: Some(true),
            ..Self::search_for_name("", limit)
        }
        .without_name()
    }

    pub fn search_for_country(countrycode: &str, limit: u32) -> Self {
        Self {
            countrycode: Some(countrycode.to_uppercase()),
            ..Self::search_for_name("", limit)
        }
        .without_name()
    }

    pub fn hide_broken(mut self, hide: bool) -> Self {
        self.hidebroken = Some(hide);
        self
    }

    pub fn url_encode(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(self)
    }

    fn without_name(mut self) -> Self {
        self.name = None;
        self
    }
}
