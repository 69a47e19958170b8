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

//! In-memory content store for cstore.
//!
//! [`ContentStore`] validates every call and forwards it to a [`Backend`]. Two LRU backends are provided: one over a
//! hash table keyed by name and one over a name ordered tree that answers prefix queries with range scans.

mod backend;
mod config;
mod indexer;
mod record;
mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

mod prelude;
pub use prelude::*;
