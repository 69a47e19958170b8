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
    error::{Error, Result, Status},
    event::EventListener,
    matching::MatchMode,
    name::Name,
    packet::Interest,
    scheduler::Scheduler,
};

use crate::{
    backend::{
        lru::{HashLru, OrderedLru},
        Backend, Hooks, Insert,
    },
    config::{AgingConfig, BackendConfig, StoreConfig},
    record::Entry,
};

/// The content store facade.
///
/// Every call is validated before it reaches the bound backend. Checks run in a fixed order and stop at the first
/// failure:
///
/// 1. a backend must be bound, else [`Error::OptionsNull`];
/// 2. the name must have at least one component, else [`Error::NameInvalid`];
/// 3. the content must be well formed, else [`Error::ContentInvalid`].
///
/// Request packets are checked in place of names by [`ContentStore::match_interest`] ([`Error::PacketInvalid`]).
///
/// The facade keeps no entry count of its own. Its only state is the per-store configuration.
///
/// A store is driven by a single owner. Share it between threads behind one exclusive lock.
pub struct ContentStore {
    config: StoreConfig,
    backend: Option<Box<dyn Backend>>,
}

impl Debug for ContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore")
            .field("config", &self.config)
            .field("backend", &self.backend.as_ref().map(|backend| backend.name()))
            .finish()
    }
}

impl ContentStore {
    /// Create a store without backend. Every operation reports [`Error::OptionsNull`] until [`ContentStore::init`]
    /// binds one.
    pub fn new(config: StoreConfig) -> Self {
        Self { config, backend: None }
    }

    /// Bind `backend`, replacing the current one.
    ///
    /// The replaced backend is cleared first so that it disarms its timers.
    pub fn init(&mut self, backend: impl Backend) {
        if let Some(mut old) = self.backend.take() {
            tracing::debug!("[cstore]: unbind backend {} with {} entries", old.name(), old.len());
            old.clear();
        }
        tracing::debug!("[cstore]: bind backend {}", backend.name());
        self.backend = Some(Box::new(backend));
        self.shrink();
    }

    /// Returns `true` if a backend is bound.
    pub fn is_bound(&self) -> bool {
        self.backend.is_some()
    }

    /// Store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Maximum entry count.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Set the maximum entry count.
    ///
    /// When the store holds more entries than the new capacity, least recently used entries are evicted until it
    /// fits or nothing evictable is left.
    pub fn set_capacity(&mut self, capacity: usize) {
        tracing::debug!("[cstore]: capacity {} => {}", self.config.capacity, capacity);
        self.config.capacity = capacity;
        self.shrink();
    }

    /// Entry count of the bound backend, 0 if none is bound.
    pub fn current_size(&self) -> usize {
        self.backend.as_ref().map(|backend| backend.len()).unwrap_or_default()
    }

    /// Cache `content` under `name`.
    ///
    /// Returns [`Status::Successful`] once the content is cached, evicting the least recently used entry if the
    /// store is full, and [`Status::Unsuccessful`] if the store is full of static content.
    pub fn add(&mut self, name: &Name, content: Content) -> Result<Status> {
        let capacity = self.config.capacity;
        let backend = self.bound("add")?;
        check_name("add", name)?;
        if !content.is_valid() {
            tracing::warn!(
                "[cstore]: add {} rejected: content is invalid (payload: {} bytes, packet: {} bytes)",
                name,
                content.payload().len(),
                content.packet().len()
            );
            return Err(Error::ContentInvalid);
        }
        let status = match backend.add(name, content, capacity) {
            Insert::Inserted | Insert::Replaced => Status::Successful,
            Insert::Rejected => Status::Unsuccessful,
        };
        Ok(status)
    }

    /// Exact lookup. A hit refreshes the entry.
    pub fn lookup(&mut self, name: &Name) -> Result<Option<Entry>> {
        let backend = self.bound("lookup")?;
        check_name("lookup", name)?;
        Ok(backend.lookup(name))
    }

    /// Exact lookup that does not count as a use: the entry is neither refreshed nor cleared of its stale mark.
    pub fn peek(&self, name: &Name) -> Result<Option<Entry>> {
        let Some(backend) = self.backend.as_deref() else {
            tracing::warn!("[cstore]: peek rejected: no backend is bound");
            return Err(Error::OptionsNull);
        };
        check_name("peek", name)?;
        Ok(backend.peek(name))
    }

    /// Remove the entry named exactly `name`.
    ///
    /// A miss is reported as [`Error::NameNotFound`].
    pub fn remove(&mut self, name: &Name) -> Result<Status> {
        let backend = self.bound("remove")?;
        check_name("remove", name)?;
        if backend.remove(name) {
            Ok(Status::Successful)
        } else {
            Err(Error::NameNotFound)
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) -> Result<Status> {
        self.bound("clear")?.clear();
        Ok(Status::Successful)
    }

    /// Log a dump of the store, one line per entry.
    pub fn print(&self) -> Result<Status> {
        let mut dump = String::new();
        let status = self.print_to(&mut dump)?;
        for line in dump.lines() {
            tracing::info!("{line}");
        }
        Ok(status)
    }

    /// Write a dump of the store to `out`.
    pub fn print_to(&self, out: &mut impl std::fmt::Write) -> Result<Status> {
        let Some(backend) = self.backend.as_ref() else {
            tracing::warn!("[cstore]: print rejected: no backend is bound");
            return Err(Error::OptionsNull);
        };
        if let Err(e) = backend.print(out) {
            tracing::warn!("[cstore]: print failed: {}", e);
            return Ok(Status::Unsuccessful);
        }
        Ok(Status::Successful)
    }

    /// One aging tick, driven by an external scheduler.
    pub fn age(&mut self) -> Result<Status> {
        let aging = self.config.aging;
        let expired = self.bound("age")?.age(&aging);
        if expired > 0 {
            tracing::debug!("[cstore]: aging expired {} entries", expired);
        }
        Ok(Status::Successful)
    }

    /// Check whether an entry satisfies `name` under `mode`. A hit refreshes the matched entry.
    pub fn exists(&mut self, name: &Name, mode: MatchMode) -> Result<Status> {
        let backend = self.bound("exists")?;
        check_name("exists", name)?;
        Ok(Status::from(backend.exists(name, mode)))
    }

    /// Evict the least recently used evictable entry.
    ///
    /// Returns [`Status::Unsuccessful`] if there is nothing to evict.
    pub fn remove_oldest_entry(&mut self) -> Result<Status> {
        Ok(Status::from(self.bound("remove_oldest_entry")?.remove_oldest_entry()))
    }

    /// Find the entry satisfying `interest` with the match mode the Interest asks for.
    ///
    /// A hit counts one served Interest and refreshes the entry.
    pub fn match_interest(&mut self, interest: &Interest) -> Result<Option<Entry>> {
        let backend = self.bound("match_interest")?;
        if !interest.is_valid() {
            tracing::warn!("[cstore]: match_interest rejected: packet is invalid");
            return Err(Error::PacketInvalid);
        }
        Ok(backend.match_interest(interest))
    }

    fn bound(&mut self, op: &'static str) -> Result<&mut dyn Backend> {
        match self.backend.as_deref_mut() {
            Some(backend) => Ok(backend),
            None => {
                tracing::warn!("[cstore]: {} rejected: no backend is bound", op);
                Err(Error::OptionsNull)
            }
        }
    }

    fn shrink(&mut self) {
        let capacity = self.config.capacity;
        let Some(backend) = self.backend.as_deref_mut() else {
            return;
        };
        while backend.len() > capacity {
            if !backend.remove_oldest_entry() {
                tracing::warn!(
                    "[cstore]: {} entries exceed capacity {} but none is evictable",
                    backend.len(),
                    capacity
                );
                break;
            }
        }
    }
}

fn check_name(op: &'static str, name: &Name) -> Result<()> {
    if name.is_empty() {
        tracing::warn!("[cstore]: {} rejected: name is invalid", op);
        return Err(Error::NameInvalid);
    }
    Ok(())
}

/// Builder of a [`ContentStore`] with a bound backend.
pub struct ContentStoreBuilder {
    config: StoreConfig,
    backend: BackendConfig,
    hooks: Hooks,
}

impl Default for ContentStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStoreBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: StoreConfig::default(),
            backend: BackendConfig::default(),
            hooks: Hooks::default(),
        }
    }

    /// Set the maximum entry count.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Set the aging thresholds.
    pub fn with_aging(mut self, aging: AgingConfig) -> Self {
        self.config.aging = aging;
        self
    }

    /// Set the whole store configuration.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Choose the backend.
    pub fn with_backend(mut self, backend: impl Into<BackendConfig>) -> Self {
        self.backend = backend.into();
        self
    }

    /// Set the timer port.
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.hooks.scheduler = scheduler;
        self
    }

    /// Set the leave event listener.
    pub fn with_event_listener(mut self, event_listener: Arc<dyn EventListener>) -> Self {
        self.hooks.event_listener = Some(event_listener);
        self
    }

    /// Build the store.
    pub fn build(self) -> Result<ContentStore> {
        self.config.aging.validate()?;

        let mut store = ContentStore::new(self.config);
        match self.backend {
            BackendConfig::Hash(config) => store.init(HashLru::new(&config, self.hooks)),
            BackendConfig::Ordered(config) => store.init(OrderedLru::new(&config, self.hooks)),
        }
        Ok(store)
    }
}
