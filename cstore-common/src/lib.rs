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

//! Shared components for cstore.
//!
//! This crate holds the data model every content store backend speaks: names, content objects, request packets,
//! match modes, the status taxonomy and the ports a host environment plugs into the store.

/// Assertion macros.
pub mod assert;
/// Content objects and the packet buffers they are extracted from.
pub mod content;
/// Status taxonomy and error type.
pub mod error;
/// Leave events and the listener trait.
pub mod event;
/// Match modes and candidate selection.
pub mod matching;
/// ICN names.
pub mod name;
/// Request packets.
pub mod packet;
/// Timer scheduling port.
pub mod scheduler;
