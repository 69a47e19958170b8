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

use std::time::Duration;

use crate::name::Name;

/// Opaque handle of a timer armed by a [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Wrap a scheduler specific timer id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The scheduler specific timer id.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Timer port of the host environment.
///
/// The store arms a timer when it caches content that carries a freshness period and disarms it whenever that
/// entry is destroyed or replaced. What happens when a timer fires is up to the host, typically a
/// `remove` of the named entry delivered on the same processing context as every other store call.
pub trait Scheduler: Send + Sync + 'static {
    /// Arm a timer for `name` firing after `timeout`.
    ///
    /// Returns `None` if the host has no timer subsystem.
    fn arm(&self, name: &Name, timeout: Duration) -> Option<TimerHandle>;

    /// Disarm a previously armed timer.
    fn disarm(&self, handle: TimerHandle);
}

/// Scheduler for targets without a timer subsystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopScheduler;

impl Scheduler for NoopScheduler {
    fn arm(&self, _: &Name, _: Duration) -> Option<TimerHandle> {
        None
    }

    fn disarm(&self, _: TimerHandle) {}
}
