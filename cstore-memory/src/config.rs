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

use cstore_common::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Maximum entry count of a store built without an explicit capacity.
pub const DEFAULT_CAPACITY: usize = 32;

/// Aging thresholds, counted in [`age`](crate::ContentStore::age) ticks since an entry was last used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingConfig {
    /// Idle ticks after which an entry is marked stale.
    ///
    /// Stale entries are still served, except to Interests carrying `MustBeFresh`.
    pub stale_after: u32,
    /// Idle ticks after which an entry is removed, if set.
    ///
    /// Must not be smaller than `stale_after`.
    pub expire_after: Option<u32>,
}

impl Default for AgingConfig {
    fn default() -> Self {
        Self {
            stale_after: 8,
            expire_after: None,
        }
    }
}

impl AgingConfig {
    /// Check the thresholds.
    pub fn validate(&self) -> Result<()> {
        if self.stale_after == 0 {
            return Err(Error::Config("aging stale_after must be at least 1".to_string()));
        }
        if let Some(expire_after) = self.expire_after {
            if expire_after < self.stale_after {
                return Err(Error::Config(format!(
                    "aging expire_after ({expire_after}) must not be smaller than stale_after ({})",
                    self.stale_after
                )));
            }
        }
        Ok(())
    }
}

/// Per-store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Maximum entry count.
    pub capacity: usize,
    /// Aging thresholds.
    pub aging: AgingConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            aging: AgingConfig::default(),
        }
    }
}

/// Config of the hash table backed LRU store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashConfig {
    /// Initial table capacity.
    pub initial_capacity: usize,
}

/// Config of the name ordered LRU store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedConfig {}

/// Backend selection for [`ContentStoreBuilder`](crate::ContentStoreBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendConfig {
    /// LRU over a hash table keyed by name. Prefix queries scan every entry.
    Hash(HashConfig),
    /// LRU over a tree ordered by name. Prefix queries are range scans.
    Ordered(OrderedConfig),
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Hash(HashConfig::default())
    }
}

impl From<HashConfig> for BackendConfig {
    fn from(value: HashConfig) -> BackendConfig {
        BackendConfig::Hash(value)
    }
}

impl From<OrderedConfig> for BackendConfig {
    fn from(value: OrderedConfig) -> BackendConfig {
        BackendConfig::Ordered(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aging_validation() {
        assert!(AgingConfig::default().validate().is_ok());
        assert!(AgingConfig {
            stale_after: 0,
            expire_after: None
        }
        .validate()
        .is_err());
        assert!(AgingConfig {
            stale_after: 4,
            expire_after: Some(3)
        }
        .validate()
        .is_err());
        assert!(AgingConfig {
            stale_after: 4,
            expire_after: Some(4)
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn test_config_serde() {
        let config = StoreConfig {
            capacity: 2,
            aging: AgingConfig {
                stale_after: 1,
                expire_after: Some(5),
            },
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<StoreConfig>(&json).unwrap(), config);

        let backend: BackendConfig = serde_json::from_str(r#"{"Ordered":{}}"#).unwrap();
        assert_eq!(backend, BackendConfig::Ordered(OrderedConfig::default()));
    }
}
