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

use std::collections::BTreeMap;

use cstore_common::{
    content::Content, event::Event, matching::MatchMode, name::Name, packet::Interest, strict_assert,
    strict_assert_eq,
};
use itertools::Itertools;

use super::{Backend, Hooks, Insert};
use crate::{
    config::{AgingConfig, HashConfig, OrderedConfig},
    indexer::{hash_table::HashTableIndexer, ordered::OrderedIndexer, Indexer},
    record::{Entry, Record},
};

/// LRU store over a hash table index.
pub type HashLru = Lru<HashTableIndexer>;
/// LRU store over a name ordered index.
pub type OrderedLru = Lru<OrderedIndexer>;

/// Least recently used store.
///
/// Recency is a logical clock advanced on every insertion and every hit. The recency queue maps each evictable
/// record's last use to its name, so the eviction victim is always its first element. Static records never enter
/// the queue.
#[derive(Debug)]
pub struct Lru<I>
where
    I: Indexer,
{
    indexer: I,
    queue: BTreeMap<u64, Name>,
    clock: u64,
    hooks: Hooks,
}

impl HashLru {
    /// Create a hash table backed LRU store.
    pub fn new(config: &HashConfig, hooks: Hooks) -> Self {
        Self::with_indexer(HashTableIndexer::with_capacity(config.initial_capacity), hooks)
    }
}

impl OrderedLru {
    /// Create a name ordered LRU store.
    pub fn new(_: &OrderedConfig, hooks: Hooks) -> Self {
        Self::with_indexer(OrderedIndexer::default(), hooks)
    }
}

impl<I> Lru<I>
where
    I: Indexer,
{
    /// Create a store over the given index.
    pub fn with_indexer(indexer: I, hooks: Hooks) -> Self {
        Self {
            indexer,
            queue: BTreeMap::new(),
            clock: 0,
            hooks,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Refresh the record under `name` and return it.
    fn touch(&mut self, name: &Name) -> Option<&mut Record> {
        let now = self.tick();
        let record = self.indexer.get_mut(name)?;
        let previous = record.refresh(now);
        if !record.is_static() {
            let queued = self.queue.remove(&previous);
            strict_assert!(queued.is_some());
            self.queue.insert(now, name.clone());
        }
        Some(record)
    }

    /// Unlink a record that already left the index and tell the host.
    fn destroy(&mut self, mut record: Record, reason: Event) {
        if !record.is_static() {
            let queued = self.queue.remove(&record.last_used());
            strict_assert!(queued.is_some());
        }
        if let Some(timer) = record.take_timer() {
            self.hooks.scheduler.disarm(timer);
        }
        let (name, content) = record.into_parts();
        self.hooks.leave(reason, &name, &content);
    }

    fn evict(&mut self) -> bool {
        let Some((_, name)) = self.queue.first_key_value() else {
            return false;
        };
        let name = name.clone();
        let record = self.indexer.remove(&name);
        strict_assert!(record.is_some());
        let Some(record) = record else {
            return false;
        };
        tracing::debug!(
            "[cstore/{}]: evict {} (last used: {})",
            I::NAME,
            name,
            record.last_used()
        );
        self.destroy(record, Event::Evict);
        true
    }

    /// Name of the best match for `query`, skipping records `filter` rejects.
    fn select(&self, query: &Name, mode: MatchMode, filter: impl Fn(&Record) -> bool) -> Option<Name> {
        let candidates = self
            .indexer
            .candidates(query, mode)
            .filter(|&record| filter(record))
            .map(|record| (record.name(), record.last_used(), record.name()));
        mode.select(query, candidates).cloned()
    }

    fn sanity_check(&self) {
        strict_assert_eq!(
            self.queue.len(),
            self.indexer.iter().filter(|record| !record.is_static()).count()
        );
    }
}

impl<I> Backend for Lru<I>
where
    I: Indexer,
{
    fn name(&self) -> &'static str {
        I::NAME
    }

    fn add(&mut self, name: &Name, content: Content, capacity: usize) -> Insert {
        let replaced = match self.indexer.remove(name) {
            Some(old) => {
                self.destroy(old, Event::Replace);
                true
            }
            None => {
                // Victims needed to make room. Nothing is evicted unless all of them exist.
                let victims = (self.indexer.len() + 1).saturating_sub(capacity);
                if victims > self.queue.len() {
                    tracing::debug!(
                        "[cstore/{}]: reject {}, {} entries and {} evictable, {} needed",
                        I::NAME,
                        name,
                        self.indexer.len(),
                        self.queue.len(),
                        victims
                    );
                    return Insert::Rejected;
                }
                for _ in 0..victims {
                    let evicted = self.evict();
                    strict_assert!(evicted);
                }
                false
            }
        };

        let now = self.tick();
        let timer = content
            .freshness()
            .and_then(|freshness| self.hooks.scheduler.arm(name, freshness));
        let record = Record::new(name.clone(), content, now, timer);
        if !record.is_static() {
            self.queue.insert(now, name.clone());
        }
        let old = self.indexer.insert(record);
        strict_assert!(old.is_none());
        self.sanity_check();

        tracing::trace!("[cstore/{}]: add {} (replaced: {})", I::NAME, name, replaced);
        if replaced {
            Insert::Replaced
        } else {
            Insert::Inserted
        }
    }

    fn lookup(&mut self, name: &Name) -> Option<Entry> {
        let entry = self.touch(name).map(|record| record.entry());
        tracing::trace!("[cstore/{}]: lookup {} (hit: {})", I::NAME, name, entry.is_some());
        entry
    }

    fn peek(&self, name: &Name) -> Option<Entry> {
        self.indexer.get(name).map(Record::entry)
    }

    fn remove(&mut self, name: &Name) -> bool {
        match self.indexer.remove(name) {
            Some(record) => {
                self.destroy(record, Event::Remove);
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        let records = self.indexer.drain().collect_vec();
        tracing::debug!("[cstore/{}]: clear {} entries", I::NAME, records.len());
        for record in records {
            self.destroy(record, Event::Clear);
        }
        strict_assert!(self.queue.is_empty());
    }

    fn print(&self, out: &mut dyn std::fmt::Write) -> std::fmt::Result {
        writeln!(out, "content store ({}): {} entries", I::NAME, self.indexer.len())?;
        for record in self.indexer.iter().sorted_by(|a, b| a.name().cmp(b.name())) {
            writeln!(
                out,
                "  {} [{} bytes] served: {}, last used: {}, idle: {}, flags: {:?}",
                record.name(),
                record.content().payload().len(),
                record.served(),
                record.last_used(),
                record.idle(),
                record.flags(),
            )?;
        }
        Ok(())
    }

    fn age(&mut self, config: &AgingConfig) -> usize {
        let mut expired = vec![];
        for record in self.indexer.iter_mut().filter(|record| !record.is_static()) {
            let idle = record.tick();
            if idle >= config.stale_after {
                record.mark_stale();
            }
            if config.expire_after.is_some_and(|expire_after| idle >= expire_after) {
                expired.push(record.name().clone());
            }
        }

        let count = expired.len();
        for name in expired {
            if let Some(record) = self.indexer.remove(&name) {
                tracing::debug!("[cstore/{}]: expire {} (idle: {})", I::NAME, name, record.idle());
                self.destroy(record, Event::Expire);
            }
        }
        self.sanity_check();
        count
    }

    fn exists(&mut self, name: &Name, mode: MatchMode) -> bool {
        let Some(matched) = self.select(name, mode, |_| true) else {
            tracing::trace!("[cstore/{}]: exists {} ({}) missed", I::NAME, name, mode);
            return false;
        };
        self.touch(&matched);
        tracing::trace!("[cstore/{}]: exists {} ({}) matched {}", I::NAME, name, mode, matched);
        true
    }

    fn remove_oldest_entry(&mut self) -> bool {
        self.evict()
    }

    fn match_interest(&mut self, interest: &Interest) -> Option<Entry> {
        let must_be_fresh = interest.must_be_fresh();
        let matched = self.select(interest.name(), interest.match_mode(), |record| {
            !(must_be_fresh && record.is_stale())
        })?;
        let record = self.touch(&matched)?;
        record.serve();
        let entry = record.entry();
        tracing::trace!(
            "[cstore/{}]: interest {} satisfied by {} (served: {})",
            I::NAME,
            interest.name(),
            entry.name(),
            entry.served()
        );
        Some(entry)
    }

    fn len(&self) -> usize {
        self.indexer.len()
    }
}
