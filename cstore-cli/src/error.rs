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

use std::path::PathBuf;

/// Command error type.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O error on a file the command reads or writes.
    #[error("io error on {path}: {source}")]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Chunk size out of range.
    #[error("chunk size must be within 1..={max}, got {size}")]
    ChunkSize {
        /// Requested size.
        size: usize,
        /// Largest accepted size.
        max: usize,
    },
    /// A store operation failed.
    #[error("content store error: {0}")]
    Store(#[from] cstore::Error),
    /// Other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Command result type.
pub type Result<T> = core::result::Result<T, Error>;
