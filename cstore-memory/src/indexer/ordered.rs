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

use cstore_common::{matching::MatchMode, name::Name};

use super::Indexer;
use crate::record::Record;

/// Name ordered index.
///
/// Names sharing a prefix are contiguous in [`Name`] order, so every name extending a query starts at the query
/// and ends at the first name that does not extend it. Names the query extends are found with one exact lookup per
/// strict prefix of the query.
#[derive(Debug, Default)]
pub struct OrderedIndexer {
    tree: BTreeMap<Name, Record>,
}

impl OrderedIndexer {
    fn extending<'a>(&'a self, query: &'a Name) -> impl Iterator<Item = &'a Record> + 'a {
        self.tree
            .range(query..)
            .take_while(move |(name, _)| query.is_prefix_of(name))
            .map(|(_, record)| record)
    }

    fn extended_by<'a>(&'a self, query: &'a Name) -> impl Iterator<Item = &'a Record> + 'a {
        (0..query.len()).filter_map(move |len| self.tree.get(&query.prefix(len)))
    }
}

impl Indexer for OrderedIndexer {
    const NAME: &'static str = "ordered";

    fn insert(&mut self, record: Record) -> Option<Record> {
        self.tree.insert(record.name().clone(), record)
    }

    fn get(&self, name: &Name) -> Option<&Record> {
        self.tree.get(name)
    }

    fn get_mut(&mut self, name: &Name) -> Option<&mut Record> {
        self.tree.get_mut(name)
    }

    fn remove(&mut self, name: &Name) -> Option<Record> {
        self.tree.remove(name)
    }

    fn drain(&mut self) -> impl Iterator<Item = Record> {
        std::mem::take(&mut self.tree).into_values()
    }

    fn len(&self) -> usize {
        self.tree.len()
    }

    fn iter(&self) -> impl Iterator<Item = &Record> {
        self.tree.values()
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        self.tree.values_mut()
    }

    fn candidates<'a>(&'a self, query: &'a Name, mode: MatchMode) -> Box<dyn Iterator<Item = &'a Record> + 'a> {
        match mode {
            MatchMode::Exact => Box::new(self.tree.get(query).into_iter()),
            MatchMode::Prefix => Box::new(self.extending(query)),
            MatchMode::Longest => Box::new(self.extended_by(query).chain(self.extending(query))),
        }
    }
}
