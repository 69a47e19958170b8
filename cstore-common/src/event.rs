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

use crate::{content::Content, name::Name};

/// Why an entry left the content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Evicted to make room or to honor a smaller capacity.
    Evict,
    /// Replaced by an insertion under the same name.
    Replace,
    /// Explicitly removed.
    Remove,
    /// Dropped by clear.
    Clear,
    /// Removed by aging after staying idle too long.
    Expire,
}

/// Trait for the customized event listener.
pub trait EventListener: Send + Sync + 'static {
    /// Called when an entry leaves the content store, with the reason.
    #[expect(unused_variables)]
    fn on_leave(&self, reason: Event, name: &Name, content: &Content) {}
}
