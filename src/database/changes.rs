// Airwaves - changes.rs
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

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::models::ChangeEntry;
use super::schema::change_log;

#[derive(Display, Debug, Clone, Copy, EnumString, PartialEq, Eq)]
pub enum ChangeAction {
    #[strum(serialize = "INSERT")]
    Insert,
    #[strum(serialize = "UPDATE")]
    Update,
    #[strum(serialize = "DELETE")]
    Delete,
}

/// A single committed row mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub action: ChangeAction,
    pub table: String,
    /// Rowid of the mutated row. Memberships report their station id.
    pub row_id: i64,
}

/// The counter value observed by a reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChangeToken(u64);

impl ChangeToken {
    pub fn version(self) -> u64 {
        self.0
    }
}

/// Monotonic mutation counter owned by one library instance.
///
/// The storage layer records every insert, update and delete on the
/// station, collection and membership tables into `change_log` (see the
/// `change_log` migration). After each write the library drains that table
/// into this tracker, so only committed mutations are ever counted. Readers
/// capture a token and re-run their query once it went stale.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    counter: AtomicU64,
    last: Mutex<Option<Change>>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    pub fn capture(&self) -> ChangeToken {
        ChangeToken(self.version())
    }

    pub fn is_stale(&self, token: ChangeToken) -> bool {
        self.version() != token.0
    }

    pub fn last_change(&self) -> Option<Change> {
        self.last.lock().ok().and_then(|last| last.clone())
    }

    pub(crate) fn record(&self, change: Change) {
        trace!("{} {} #{}", change.action, change.table, change.row_id);
        self.counter.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last.lock() {
            *last = Some(change);
        }
    }

    /// Moves all pending entries of the change log into the counter.
    /// Returns how many changes were recorded.
    pub(crate) fn collect(&self, con: &SqliteConnection) -> Result<usize, diesel::result::Error> {
        let entries = change_log::table.order(change_log::id.asc()).load::<ChangeEntry>(con)?;
        let last_id = match entries.last() {
            Some(entry) => entry.id,
            None => return Ok(0),
        };
        diesel::delete(change_log::table.filter(change_log::id.le(last_id))).execute(con)?;

        for entry in &entries {
            match ChangeAction::from_str(&entry.action) {
                Ok(action) => self.record(Change {
                    action,
                    table: entry.table_name.clone(),
                    row_id: entry.row_id,
                }),
                Err(_) => warn!("Unknown change action \"{}\" in change log", entry.action),
            }
        }

        Ok(entries.len())
    }
}

/// A query result together with the counter value it was read at.
#[derive(Debug)]
pub struct Cached<T> {
    token: Option<ChangeToken>,
    value: Option<T>,
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Self { token: None, value: None }
    }
}

impl<T> Cached<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_stale(&self, tracker: &ChangeTracker) -> bool {
        match self.token {
            Some(token) => tracker.is_stale(token),
            None => true,
        }
    }

    pub fn invalidate(&mut self) {
        self.token = None;
        self.value = None;
    }

    /// Returns the cached value, re-running `query` first when any mutation
    /// was committed since it was read.
    pub fn get<E, F>(&mut self, tracker: &ChangeTracker, query: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let stale = self.is_stale(tracker);
        let value = match self.value.take() {
            Some(value) if !stale => value,
            _ => {
                let token = tracker.capture();
                let value = query()?;
                self.token = Some(token);
                value
            }
        };

        Ok(self.value.get_or_insert(value))
    }
}
