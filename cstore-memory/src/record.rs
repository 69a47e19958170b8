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

use bitflags::bitflags;
use cstore_common::{content::Content, name::Name, scheduler::TimerHandle};

bitflags! {
    /// Bookkeeping flags of a cached entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u8 {
        /// Never evicted nor expired.
        const STATIC = 0b00000001;
        /// Idle past the aging threshold. Cleared when the entry is used again.
        const STALE = 0b00000010;
    }
}

/// [`Record`] holds a cached content object and its bookkeeping.
#[derive(Debug)]
pub struct Record {
    name: Name,
    content: Content,
    served: u64,
    flags: Flags,
    last_used: u64,
    idle: u32,
    timer: Option<TimerHandle>,
}

impl Record {
    /// Create a record used at logical time `now`.
    pub fn new(name: Name, content: Content, now: u64, timer: Option<TimerHandle>) -> Self {
        let flags = if content.is_static() {
            Flags::STATIC
        } else {
            Flags::empty()
        };
        Self {
            name,
            content,
            served: 0,
            flags,
            last_used: now,
            idle: 0,
            timer,
        }
    }

    /// Record name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Cached content.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Times the record satisfied an Interest.
    pub fn served(&self) -> u64 {
        self.served
    }

    /// Bookkeeping flags.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Logical time of the last use.
    pub fn last_used(&self) -> u64 {
        self.last_used
    }

    /// Age ticks since the last use.
    pub fn idle(&self) -> u32 {
        self.idle
    }

    /// Armed timer, if any.
    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    /// Returns `true` if the record is exempt from eviction and expiry.
    pub fn is_static(&self) -> bool {
        self.flags.contains(Flags::STATIC)
    }

    /// Returns `true` if aging marked the record stale.
    pub fn is_stale(&self) -> bool {
        self.flags.contains(Flags::STALE)
    }

    /// Mark the record used at logical time `now`.
    ///
    /// Returns the previous logical time.
    pub fn refresh(&mut self, now: u64) -> u64 {
        let previous = std::mem::replace(&mut self.last_used, now);
        self.idle = 0;
        self.flags.remove(Flags::STALE);
        previous
    }

    /// Count one served Interest.
    pub fn serve(&mut self) {
        self.served += 1;
    }

    /// Advance the idle counter by one age tick and return it.
    pub fn tick(&mut self) -> u32 {
        self.idle = self.idle.saturating_add(1);
        self.idle
    }

    /// Set the stale flag.
    pub fn mark_stale(&mut self) {
        self.flags.insert(Flags::STALE);
    }

    /// Take the armed timer.
    pub fn take_timer(&mut self) -> Option<TimerHandle> {
        self.timer.take()
    }

    /// Snapshot the record for callers.
    pub fn entry(&self) -> Entry {
        Entry {
            name: self.name.clone(),
            content: self.content.clone(),
            served: self.served,
            last_used: self.last_used,
            flags: self.flags,
        }
    }

    /// Split the record into its name and content.
    pub fn into_parts(self) -> (Name, Content) {
        (self.name, self.content)
    }
}

/// A snapshot of a cached entry, as returned by lookups.
///
/// The content shares its payload and packet buffers with the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: Name,
    content: Content,
    served: u64,
    last_used: u64,
    flags: Flags,
}

impl Entry {
    /// Entry name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Cached content.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Times the entry satisfied an Interest, this one included.
    pub fn served(&self) -> u64 {
        self.served
    }

    /// Logical time of the last use.
    pub fn last_used(&self) -> u64 {
        self.last_used
    }

    /// Bookkeeping flags.
    pub fn flags(&self) -> Flags {
        self.flags
    }
}
