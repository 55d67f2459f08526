// Airwaves - queue.rs
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

use crate::database::{Collection, Error, Library, Station};

/// The stations of a collection as they were listed when playback started.
///
/// Later changes to the collection don't show up here, next/previous keep
/// following the order the user saw when they picked the station.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackQueue {
    collection: Collection,
    stations: Vec<Station>,
}

impl PlaybackQueue {
    pub fn new(collection: Collection, stations: Vec<Station>) -> Self {
        Self { collection, stations }
    }

    pub fn snapshot(library: &Library, collection: &Collection) -> Result<Self, Error> {
        let stations = library.members(collection)?.into_iter().map(|(station, _)| station).collect::<Vec<_>>();
        debug!("Queue snapshot of \"{}\" with {} station(s)", collection.name, stations.len());
        Ok(Self::new(collection.clone(), stations))
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Index of `station`, matched by its UUID. Custom stations have none,
    /// those are matched by their local id.
    pub fn position(&self, station: &Station) -> Option<usize> {
        match station.stationuuid {
            Some(ref uuid) => self.stations.iter().position(|s| s.stationuuid.as_deref() == Some(uuid.as_str())),
            None => self.stations.iter().position(|s| s.id == station.id),
        }
    }

    pub fn next_after(&self, station: &Station) -> Option<&Station> {
        self.position(station).and_then(|index| self.stations.get(index + 1))
    }

    pub fn previous_before(&self, station: &Station) -> Option<&Station> {
        self.position(station).and_then(|index| index.checked_sub(1)).and_then(|index| self.stations.get(index))
    }
}
