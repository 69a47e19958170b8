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
use hashbrown::HashMap;

use super::Indexer;
use crate::record::Record;

/// Hash table index. Exact lookups are O(1), prefix queries scan every record.
#[derive(Debug, Default)]
pub struct HashTableIndexer {
    table: HashMap<Name, Record>,
}

impl HashTableIndexer {
    /// Create an index with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: HashMap::with_capacity(capacity),
        }
    }
}

impl Indexer for HashTableIndexer {
    const NAME: &'static str = "hash";

    fn insert(&mut self, record: Record) -> Option<Record> {
        self.table.insert(record.name().clone(), record)
    }

    fn get(&self, name: &Name) -> Option<&Record> {
        self.table.get(name)
    }

    fn get_mut(&mut self, name: &Name) -> Option<&mut Record> {
        self.table.get_mut(name)
    }

    fn remove(&mut self, name: &Name) -> Option<Record> {
        self.table.remove(name)
    }

    fn drain(&mut self) -> impl Iterator<Item = Record> {
        self.table.drain().map(|(_, record)| record)
    }

    fn len(&self) -> usize {
        self.table.len()
    }

    fn iter(&self) -> impl Iterator<Item = &Record> {
        self.table.values()
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        self.table.values_mut()
    }

    fn candidates<'a>(&'a self, query: &'a Name, mode: MatchMode) -> Box<dyn Iterator<Item = &'a Record> + 'a> {
        match mode {
            MatchMode::Exact => Box::new(self.table.get(query).into_iter()),
            MatchMode::Prefix | MatchMode::Longest => Box::new(self.table.values()),
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::test_utils::{content, name};

    #[test]
    fn test_candidates() {
        let mut indexer = HashTableIndexer::with_capacity(4);
        for (i, n) in ["/a", "/a/b", "/c"].into_iter().enumerate() {
            assert!(indexer.insert(Record::new(name(n), content(n), i as u64, None)).is_none());
        }

        let exact = indexer
            .candidates(&name("/a/b"), MatchMode::Exact)
            .map(|record| record.name().clone())
            .collect_vec();
        assert_eq!(exact, vec![name("/a/b")]);
        assert_eq!(indexer.candidates(&name("/a/x"), MatchMode::Exact).count(), 0);
        assert_eq!(indexer.candidates(&name("/a"), MatchMode::Prefix).count(), 3);

        assert_eq!(indexer.drain().count(), 3);
        assert!(indexer.is_empty());
    }
}
