// Airwaves - player.rs
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

use url::Url;

use std::sync::Arc;

use crate::audio::{AudioBackend, PlaybackQueue, PlaybackState};
use crate::database::{Collection, Library, Station};

/// Plays stations from the library.
///
/// Every played station lands on top of the recents. Next and previous walk
/// through a snapshot of the collection the station was picked from, taken
/// when `play` is called.
pub struct Player {
    library: Arc<Library>,
    backend: Box<dyn AudioBackend>,

    station: Option<Station>,
    queue: Option<PlaybackQueue>,
    state: PlaybackState,
}

impl Player {
    pub fn new(library: Arc<Library>, backend: Box<dyn AudioBackend>) -> Self {
        Self {
            library,
            backend,
            station: None,
            queue: None,
            state: PlaybackState::default(),
        }
    }

    pub fn station(&self) -> Option<&Station> {
        self.station.as_ref()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn queue(&self) -> Option<&PlaybackQueue> {
        self.queue.as_ref()
    }

    /// Starts `station`. Without `from` the recents become the queue.
    pub fn play(&mut self, station: Station, from: Option<&Collection>) {
        self.record_recent(&station);

        let active = match from {
            Some(collection) => Ok(collection.clone()),
            None => self.library.recents(),
        };
        self.queue = match active.and_then(|collection| PlaybackQueue::snapshot(&self.library, &collection)) {
            Ok(queue) => Some(queue),
            Err(err) => {
                warn!("Unable to build playback queue: {}", err);
                None
            }
        };

        self.station = Some(station);
        self.play_current();
    }

    /// Skips to the following station of the queue. Returns false when
    /// there is none.
    pub fn next(&mut self) -> bool {
        match self.neighbour(PlaybackQueue::next_after) {
            Some(station) => {
                self.skip_to(station);
                true
            }
            None => false,
        }
    }

    pub fn previous(&mut self) -> bool {
        match self.neighbour(PlaybackQueue::previous_before) {
            Some(station) => {
                self.skip_to(station);
                true
            }
            None => false,
        }
    }

    pub fn can_go_next(&self) -> bool {
        self.neighbour(PlaybackQueue::next_after).is_some()
    }

    pub fn can_go_previous(&self) -> bool {
        self.neighbour(PlaybackQueue::previous_before).is_some()
    }

    /// (Re-)starts the current station.
    pub fn play_current(&mut self) {
        let station = match self.station {
            Some(ref station) => station,
            None => {
                debug!("No station selected, nothing to play");
                return;
            }
        };

        let url = match Url::parse(&station.url) {
            Ok(url) => url,
            Err(err) => {
                warn!("Station \"{}\" has an invalid stream URL \"{}\": {}", station.name, station.url, err);
                self.backend.stop();
                self.state = PlaybackState::Failure(err.to_string());
                return;
            }
        };

        debug!("Play station \"{}\" ({})", station.name, url);
        self.state = PlaybackState::Loading;
        self.backend.load(&url);
        self.backend.play();
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.backend.pause();
            self.state = PlaybackState::Paused;
        }
    }

    pub fn stop(&mut self) {
        self.backend.stop();
        self.state = PlaybackState::Stopped;
    }

    fn neighbour<F>(&self, pick: F) -> Option<Station>
    where
        F: for<'a> Fn(&'a PlaybackQueue, &Station) -> Option<&'a Station>,
    {
        let queue = self.queue.as_ref()?;
        let station = self.station.as_ref()?;
        pick(queue, station).cloned()
    }

    // Keeps the queue as it is
    fn skip_to(&mut self, station: Station) {
        self.record_recent(&station);
        self.station = Some(station);
        self.play_current();
    }

    fn record_recent(&self, station: &Station) {
        if let Err(err) = self.library.record_recent(station) {
            warn!("Unable to add \"{}\" to the recently played stations: {}", station.name, err);
        }
    }
}
