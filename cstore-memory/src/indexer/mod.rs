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

use cstore_common::{matching::MatchMode, name::Name};

use crate::record::Record;

/// Name index of a store. Owns the records.
pub trait Indexer: Send + Default + 'static {
    /// Short name used in logs and dumps.
    const NAME: &'static str;

    /// Insert a record, returning the one it replaced under the same name.
    fn insert(&mut self, record: Record) -> Option<Record>;
    /// Get a record by exact name.
    fn get(&self, name: &Name) -> Option<&Record>;
    /// Get a record by exact name, mutably.
    fn get_mut(&mut self, name: &Name) -> Option<&mut Record>;
    /// Remove a record by exact name.
    fn remove(&mut self, name: &Name) -> Option<Record>;
    /// Remove every record.
    fn drain(&mut self) -> impl Iterator<Item = Record>;
    /// Record count.
    fn len(&self) -> usize;
    /// All records, in no particular order.
    fn iter(&self) -> impl Iterator<Item = &Record>;
    /// All records mutably, in no particular order.
    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Record>;

    /// Records that may satisfy `query` under `mode`.
    ///
    /// Implementations may yield a superset; callers score every candidate with [`MatchMode::score`].
    fn candidates<'a>(&'a self, query: &'a Name, mode: MatchMode) -> Box<dyn Iterator<Item = &'a Record> + 'a>;

    /// Returns `true` if the index holds no record.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub mod hash_table;
pub mod ordered;
