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

//! cstore - ICN content store for Rust.
//!
//! A content store caches named data objects at a forwarding node so that later requests for the same name, or a
//! name the cached object extends, are answered locally.
//!
//! ```
//! use std::sync::Arc;
//!
//! use cstore::{Content, ContentStoreBuilder, Interest, Name, Packet, Status, Suite};
//!
//! let mut store = ContentStoreBuilder::new().with_capacity(16).build().unwrap();
//!
//! let name: Name = "/video/seg/0".parse().unwrap();
//! let packet = Arc::new(Packet::new(Suite::Ndn, &b"\x06\x05hello"[..]));
//! let content = Content::new(&b"hello"[..], packet);
//! assert_eq!(store.add(&name, content).unwrap(), Status::Successful);
//!
//! let interest = Interest::new(Suite::Ndn, "/video".parse().unwrap()).with_can_be_prefix(true);
//! let entry = store.match_interest(&interest).unwrap().unwrap();
//! assert_eq!(entry.name(), &name);
//! ```

/// Shared components.
pub use cstore_common as common;
/// In-memory content store.
pub use cstore_memory as memory;

mod prelude;
pub use prelude::*;
