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

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::name::Name;

/// How a query name is matched against stored names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchMode {
    /// The query must be a prefix of the stored name. The stored name may be longer.
    Prefix,
    /// The stored name must equal the query component for component.
    Exact,
    /// The query and the stored name must be prefix related in either direction. The candidate sharing the most
    /// leading components with the query wins.
    Longest,
}

impl MatchMode {
    /// Stable integer code of the mode.
    pub fn code(self) -> i32 {
        match self {
            MatchMode::Prefix => 0,
            MatchMode::Exact => 1,
            MatchMode::Longest => 2,
        }
    }

    /// How well `candidate` satisfies `query`, or `None` if it does not match at all.
    ///
    /// A higher score is a more specific match.
    pub fn score(self, query: &Name, candidate: &Name) -> Option<usize> {
        match self {
            MatchMode::Exact => (query == candidate).then_some(query.len()),
            MatchMode::Prefix => query.is_prefix_of(candidate).then_some(query.len()),
            MatchMode::Longest => (query.is_prefix_of(candidate) || candidate.is_prefix_of(query))
                .then(|| query.common_prefix_len(candidate)),
        }
    }

    /// Returns `true` if `candidate` satisfies `query`.
    pub fn matches(self, query: &Name, candidate: &Name) -> bool {
        self.score(query, candidate).is_some()
    }

    /// Pick the best candidate for `query`.
    ///
    /// Candidates are `(name, last_used, item)` triples. The highest score wins; equal scores go to the most
    /// recently used candidate.
    pub fn select<'a, T, I>(self, query: &Name, candidates: I) -> Option<T>
    where
        I: IntoIterator<Item = (&'a Name, u64, T)>,
    {
        candidates
            .into_iter()
            .filter_map(|(name, last_used, item)| self.score(query, name).map(|score| ((score, last_used), item)))
            .max_by_key(|(rank, _)| *rank)
            .map(|(_, item)| item)
    }
}

impl Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Prefix => write!(f, "prefix"),
            MatchMode::Exact => write!(f, "exact"),
            MatchMode::Longest => write!(f, "longest"),
        }
    }
}
