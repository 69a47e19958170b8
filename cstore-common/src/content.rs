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

use std::{fmt::Display, sync::Arc, time::Duration};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Packet format family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suite {
    /// CCNx 1.0 TLV.
    Ccnx,
    /// NDN TLV.
    Ndn,
}

impl Display for Suite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Suite::Ccnx => write!(f, "ccnx2015"),
            Suite::Ndn => write!(f, "ndn2013"),
        }
    }
}

/// An encoded packet as received from a face.
///
/// The store never decodes it. It is shared with the decoding layer and any in-flight operation through an
/// [`Arc`], so the buffer lives as long as its longest holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    suite: Suite,
    bytes: Bytes,
}

impl Packet {
    /// Wrap an encoded packet.
    pub fn new(suite: Suite, bytes: impl Into<Bytes>) -> Self {
        Self {
            suite,
            bytes: bytes.into(),
        }
    }

    /// Packet format family.
    pub fn suite(&self) -> Suite {
        self.suite
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Encoded length.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A content object: the payload extracted from a data packet plus a back-reference to that packet.
///
/// Cloning is cheap: both the payload and the packet are reference counted.
#[derive(Debug, Clone)]
pub struct Content {
    payload: Bytes,
    packet: Arc<Packet>,
    freshness: Option<Duration>,
    is_static: bool,
}

impl Content {
    /// Create a content object from its payload and originating packet.
    pub fn new(payload: impl Into<Bytes>, packet: Arc<Packet>) -> Self {
        Self {
            payload: payload.into(),
            packet,
            freshness: None,
            is_static: false,
        }
    }

    /// Set the freshness period carried by the data packet.
    ///
    /// Stores arm a timer for it through their scheduler on insertion.
    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = Some(freshness);
        self
    }

    /// Mark the content as static. Static content is never evicted nor expired by aging.
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Payload bytes.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// The packet the payload was extracted from.
    pub fn packet(&self) -> &Arc<Packet> {
        &self.packet
    }

    /// Freshness period, if any.
    pub fn freshness(&self) -> Option<Duration> {
        self.freshness
    }

    /// Returns `true` if the content is static.
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// A payload is always a part of the packet it was extracted from, and a content object without a packet
    /// cannot be served.
    pub fn is_valid(&self) -> bool {
        !self.packet.is_empty() && self.payload.len() <= self.packet.len()
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload
            && self.packet == other.packet
            && self.freshness == other.freshness
            && self.is_static == other.is_static
    }
}

impl Eq for Content {}
