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

use crate::{content::Suite, matching::MatchMode, name::Name};

/// A decoded Interest as handed over by the packet layer.
///
/// The packet layer gives no structural guarantee, so the store checks [`Interest::is_valid`] before use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interest {
    name: Name,
    suite: Suite,
    can_be_prefix: bool,
    must_be_fresh: bool,
}

impl Interest {
    /// Create an Interest for `name` without selectors.
    pub fn new(suite: Suite, name: Name) -> Self {
        Self {
            name,
            suite,
            can_be_prefix: false,
            must_be_fresh: false,
        }
    }

    /// Set the `CanBePrefix` selector. Only meaningful for [`Suite::Ndn`].
    pub fn with_can_be_prefix(mut self, can_be_prefix: bool) -> Self {
        self.can_be_prefix = can_be_prefix;
        self
    }

    /// Set the `MustBeFresh` selector.
    pub fn with_must_be_fresh(mut self, must_be_fresh: bool) -> Self {
        self.must_be_fresh = must_be_fresh;
        self
    }

    /// Requested name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Packet format family.
    pub fn suite(&self) -> Suite {
        self.suite
    }

    /// `CanBePrefix` selector.
    pub fn can_be_prefix(&self) -> bool {
        self.can_be_prefix
    }

    /// `MustBeFresh` selector.
    pub fn must_be_fresh(&self) -> bool {
        self.must_be_fresh
    }

    /// The match mode this request asks for.
    ///
    /// CCNx always matches exactly. NDN matches by prefix only when `CanBePrefix` is set.
    pub fn match_mode(&self) -> MatchMode {
        match self.suite {
            Suite::Ccnx => MatchMode::Exact,
            Suite::Ndn if self.can_be_prefix => MatchMode::Prefix,
            Suite::Ndn => MatchMode::Exact,
        }
    }

    /// An Interest must name something.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }
}
