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

//! Utilities for testing.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use cstore_common::{
    content::{Content, Packet, Suite},
    event::{Event, EventListener},
    name::Name,
    scheduler::{Scheduler, TimerHandle},
};
use parking_lot::{Mutex, MutexGuard};

/// Parse a name from its URI form.
///
/// # Panics
///
/// Panics if `uri` is not a valid name.
pub fn name(uri: &str) -> Name {
    uri.parse().unwrap()
}

/// An NDN content object whose payload is `payload` and whose packet is the payload behind a two byte header.
pub fn content(payload: &str) -> Content {
    let mut packet = vec![0x06, payload.len() as u8];
    packet.extend_from_slice(payload.as_bytes());
    Content::new(payload.as_bytes().to_vec(), Arc::new(Packet::new(Suite::Ndn, packet)))
}

/// Scheduler action recorded by [`RecordingScheduler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerOp {
    /// A timer was armed.
    Arm(Name, Duration, TimerHandle),
    /// A timer was disarmed.
    Disarm(TimerHandle),
}

/// A scheduler that hands out sequential handles and records every call.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    next: AtomicU64,
    ops: Mutex<Vec<TimerOp>>,
}

impl Scheduler for RecordingScheduler {
    fn arm(&self, name: &Name, timeout: Duration) -> Option<TimerHandle> {
        let handle = TimerHandle::new(self.next.fetch_add(1, Ordering::Relaxed));
        self.ops.lock().push(TimerOp::Arm(name.clone(), timeout, handle));
        Some(handle)
    }

    fn disarm(&self, handle: TimerHandle) {
        self.ops.lock().push(TimerOp::Disarm(handle));
    }
}

impl RecordingScheduler {
    /// All recorded calls.
    pub fn ops(&self) -> MutexGuard<'_, Vec<TimerOp>> {
        self.ops.lock()
    }

    /// Handles armed and not disarmed yet.
    pub fn armed(&self) -> Vec<TimerHandle> {
        let ops = self.ops.lock();
        ops.iter()
            .filter_map(|op| match op {
                TimerOp::Arm(_, _, handle) => Some(*handle),
                TimerOp::Disarm(_) => None,
            })
            .filter(|handle| !ops.contains(&TimerOp::Disarm(*handle)))
            .collect()
    }
}

/// A listener that records every leave event.
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: Mutex<Vec<(Event, Name)>>,
}

impl EventListener for RecordingListener {
    fn on_leave(&self, reason: Event, name: &Name, _: &Content) {
        self.events.lock().push((reason, name.clone()));
    }
}

impl RecordingListener {
    /// All recorded events.
    pub fn events(&self) -> MutexGuard<'_, Vec<(Event, Name)>> {
        self.events.lock()
    }

    /// Names that left for `reason`, in order.
    pub fn names(&self, reason: Event) -> Vec<Name> {
        self.events
            .lock()
            .iter()
            .filter(|(r, _)| *r == reason)
            .map(|(_, name)| name.clone())
            .collect()
    }
}
