// Airwaves - client.rs
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

use futures::future::join_all;
use isahc::prelude::*;
use isahc::HttpClient;
use url::Url;

use crate::api::*;
use crate::config;

/// Client for the radio-browser directory API.
#[derive(Clone, Debug)]
pub struct Client {
    server: Url,
    http: HttpClient,
}

impl Client {
    pub fn new(server: Url) -> Result<Self, Error> {
        let http = HttpClient::builder().default_header("User-Agent", config::USER_AGENT).build()?;
        Ok(Client { server, http })
    }

    pub fn server(&self) -> &Url {
        &self.server
    }

    pub async fn search(&self, request: &StationRequest) -> Result<Vec<StationMetadata>, Error> {
        let url = self.build_url(STATION_SEARCH, None, Some(&request.url_encode()?))?;
        debug!("Station request URL: {}", url);
        let data = self.send_message(url).await?;

        let stations: Vec<StationMetadata> = serde_json::from_str(data.as_str())?;
        debug!("Found {} station(s)!", stations.len());

        Ok(stations)
    }

    pub async fn station_by_uuid(&self, uuid: &str) -> Result<StationMetadata, Error> {
        let url = self.build_url(STATION_BY_UUID, Some(uuid), None)?;
        debug!("Request station by UUID URL: {}", url);

        let data = self.send_message(url).await?;

        let mut stations: Vec<StationMetadata> = serde_json::from_str(data.as_str())?;
        match stations.pop() {
            Some(station) => Ok(station),
            None => {
                warn!("API: No station for identifier \"{}\" found", uuid);
                Err(Error::InvalidStation(uuid.to_string()))
            }
        }
    }

    /// Looks up several stations at once. The results keep the order of
    /// `uuids`.
    pub async fn stations_by_uuid(&self, uuids: &[String]) -> Vec<Result<StationMetadata, Error>> {
        join_all(uuids.iter().map(|uuid| self.station_by_uuid(uuid))).await
    }

    pub async fn countries(&self, filter: Option<&str>) -> Result<Vec<CountryInfo>, Error> {
        let url = self.build_url(COUNTRY_CODES, filter, None)?;
        let data = self.send_message(url).await?;
        Ok(serde_json::from_str(data.as_str())?)
    }

    pub async fn tags(&self, filter: Option<&str>) -> Result<Vec<TagInfo>, Error> {
        let url = self.build_url(TAGS, filter, None)?;
        let data = self.send_message(url).await?;
        Ok(serde_json::from_str(data.as_str())?)
    }

    pub async fn languages(&self, filter: Option<&str>) -> Result<Vec<LanguageInfo>, Error> {
        let url = self.build_url(LANGUAGES, filter, None)?;
        let data = self.send_message(url).await?;
        Ok(serde_json::from_str(data.as_str())?)
    }

    // Create and send message, return the received data.
    async fn send_message(&self, url: Url) -> Result<String, Error> {
        let mut response = self.http.get_async(url.as_str()).await?;
        if !response.status().is_success() {
            warn!("API: {} answered with {}", url, response.status());
            return Err(Error::Status(response.status().as_u16()));
        }
        Ok(response.text().await?)
    }

    fn build_url(&self, endpoint: &str, filter: Option<&str>, query: Option<&str>) -> Result<Url, Error> {
        let mut url = self.server.join(endpoint)?;
        if let Some(filter) = filter {
            url.path_segments_mut().map_err(|_| Error::InvalidServer(self.server.to_string()))?.pop_if_empty().push(filter);
        }
        if let Some(query) = query {
            url.set_query(Some(query));
        }
        Ok(url)
    }
}
