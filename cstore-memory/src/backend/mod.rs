// Copyright 2026 cstore Project Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{fmt::Debug, sync::Arc};

use cstore_common::{
    content::Content,
    event::{Event, EventListener},
    matching::MatchMode,
    name::Name,
    packet::Interest,
    scheduler::{NoopScheduler, Scheduler},
};

use crate::{config::AgingConfig, record::Entry};

/// Outcome of [`Backend::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insert {
    /// A new entry was created.
    Inserted,
    /// An entry with the same name was replaced.
    Replaced,
    /// The store is full and holds nothing evictable.
    Rejected,
}

/// A concrete storage strategy bound behind a [`ContentStore`](crate::ContentStore).
///
/// Arguments reach a backend only after the store validated them: names are never empty, content is well formed
/// and Interests name something.
///
/// Every method runs to completion on the caller's thread. A backend is driven by a single owner and needs no
/// internal locking.
pub trait Backend: Send + 'static {
    /// Short name used in logs and dumps.
    fn name(&self) -> &'static str;

    /// Cache `content` under `name`.
    ///
    /// If the store already holds `capacity` entries, the least recently used evictable entries are removed first,
    /// so that the size never exceeds `capacity` once the call returns. A rejected insertion leaves the store
    /// untouched.
    fn add(&mut self, name: &Name, content: Content, capacity: usize) -> Insert;

    /// Exact lookup. A hit refreshes the entry.
    fn lookup(&mut self, name: &Name) -> Option<Entry>;

    /// Exact lookup that leaves the entry as it is.
    fn peek(&self, name: &Name) -> Option<Entry>;

    /// Remove the entry with exactly `name`. Returns `false` if there is none.
    fn remove(&mut self, name: &Name) -> bool;

    /// Remove every entry.
    fn clear(&mut self);

    /// Write a human readable dump of the store.
    fn print(&self, out: &mut dyn std::fmt::Write) -> std::fmt::Result;

    /// One aging tick. Returns the number of entries it expired.
    fn age(&mut self, config: &AgingConfig) -> usize;

    /// Returns `true` if an entry satisfies `name` under `mode`. A hit refreshes the matched entry.
    fn exists(&mut self, name: &Name, mode: MatchMode) -> bool;

    /// Evict the least recently used evictable entry. Returns `false` if there is none.
    fn remove_oldest_entry(&mut self) -> bool;

    /// Find the entry that satisfies `interest`.
    ///
    /// The match mode comes from the Interest. A hit counts one served Interest and refreshes the entry.
    fn match_interest(&mut self, interest: &Interest) -> Option<Entry>;

    /// Entry count.
    fn len(&self) -> usize;

    /// Returns `true` if the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Host environment ports a backend calls into.
#[derive(Clone)]
pub struct Hooks {
    /// Timer port, armed for content carrying a freshness period.
    pub scheduler: Arc<dyn Scheduler>,
    /// Notified whenever an entry leaves the store.
    pub event_listener: Option<Arc<dyn EventListener>>,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            scheduler: Arc::new(NoopScheduler),
            event_listener: None,
        }
    }
}

impl Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("event_listener", &self.event_listener.is_some())
            .finish_non_exhaustive()
    }
}

impl Hooks {
    /// Notify the listener, if any.
    pub fn leave(&self, reason: Event, name: &Name, content: &Content) {
        if let Some(listener) = self.event_listener.as_ref() {
            listener.on_leave(reason, name, content);
        }
    }
}

pub mod lru;

#[cfg(test)]
mod tests;
