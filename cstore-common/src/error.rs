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

/// Content store error.
///
/// Every variant is a precondition or contract failure reported by the store facade. Absence of an entry on a
/// valid call is not an error, see [`Status::Unsuccessful`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No backend is bound to the store.
    #[error("options are null: no backend is bound to the content store")]
    OptionsNull,
    /// The name argument is malformed.
    #[error("name is invalid")]
    NameInvalid,
    /// The content argument is malformed.
    #[error("content is invalid")]
    ContentInvalid,
    /// An explicit removal missed.
    #[error("name could not be found")]
    NameNotFound,
    /// The request packet is malformed.
    #[error("packet is invalid")]
    PacketInvalid,
    /// Config error.
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// The status code reported for this error.
    ///
    /// Configuration errors happen before a store exists and map to [`Status::OptionsNull`].
    pub fn status(&self) -> Status {
        match self {
            Error::OptionsNull | Error::Config(_) => Status::OptionsNull,
            Error::NameInvalid => Status::NameInvalid,
            Error::ContentInvalid => Status::ContentInvalid,
            Error::NameNotFound => Status::NameNotFound,
            Error::PacketInvalid => Status::PacketInvalid,
        }
    }
}

/// Content store result.
pub type Result<T> = std::result::Result<T, Error>;

/// Status code of a content store operation.
///
/// The integer codes are stable and match what the forwarding engine expects on its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Operation completed, the entity is absent.
    Unsuccessful,
    /// Operation completed, the entity is present (found, added or removed).
    Successful,
    /// No backend is bound.
    OptionsNull,
    /// The name argument is malformed.
    NameInvalid,
    /// The content argument is malformed.
    ContentInvalid,
    /// An explicit removal missed.
    NameNotFound,
    /// The request packet is malformed.
    PacketInvalid,
}

impl Status {
    /// Stable integer code.
    pub fn code(self) -> i32 {
        match self {
            Status::Unsuccessful => 0,
            Status::Successful => 1,
            Status::OptionsNull => -1,
            Status::NameInvalid => -2,
            Status::ContentInvalid => -3,
            Status::NameNotFound => -4,
            Status::PacketInvalid => -5,
        }
    }

    /// Returns `true` for [`Status::Successful`].
    pub fn is_successful(self) -> bool {
        self == Status::Successful
    }

    /// Returns `true` for every code that reports a rejected call.
    pub fn is_error(self) -> bool {
        self.code() < 0
    }
}

impl From<bool> for Status {
    fn from(found: bool) -> Self {
        if found {
            Status::Successful
        } else {
            Status::Unsuccessful
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Unsuccessful => "unsuccessful",
            Status::Successful => "successful",
            Status::OptionsNull => "options are null",
            Status::NameInvalid => "name is invalid",
            Status::ContentInvalid => "content is invalid",
            Status::NameNotFound => "name could not be found",
            Status::PacketInvalid => "packet is invalid",
        };
        write!(f, "{s}")
    }
}

/// Folds a facade result into a single [`Status`], for callers that branch on codes.
pub trait IntoStatus {
    /// The status code of the result.
    fn status(&self) -> Status;
}

impl IntoStatus for Result<Status> {
    fn status(&self) -> Status {
        match self {
            Ok(status) => *status,
            Err(e) => e.status(),
        }
    }
}

impl<T> IntoStatus for Result<Option<T>> {
    fn status(&self) -> Status {
        match self {
            Ok(found) => Status::from(found.is_some()),
            Err(e) => e.status(),
        }
    }
}
