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

use std::{fmt::Display, str::FromStr};

use bytes::Bytes;

/// Error returned when parsing a [`Name`] from its URI form fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseNameError {
    /// The URI does not start with `/`.
    #[error("name uri must start with '/': {0:?}")]
    MissingLeadingSlash(String),
    /// A `%` escape is truncated or not hexadecimal.
    #[error("invalid percent escape at byte {offset} of component {component}")]
    InvalidEscape {
        /// Index of the offending component.
        component: usize,
        /// Byte offset of the `%` inside the component.
        offset: usize,
    },
    /// A segment is empty, `.` or `..`. The empty component is written `...`.
    #[error("invalid component {component}: empty, '.' and '..' are reserved")]
    InvalidComponent {
        /// Index of the offending component.
        component: usize,
    },
}

/// An ICN name: an ordered sequence of opaque, length-delimited components.
///
/// Components may hold arbitrary bytes, zero bytes included. The component order defines prefix relationships:
/// `/a/b` is a prefix of `/a/b/c` but not of `/a/c/b`.
///
/// The derived ordering is component-wise lexicographic, so a name sorts immediately before every name it is a
/// prefix of and all names sharing a prefix are contiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    components: Vec<Bytes>,
}

impl Name {
    /// Create a name without components.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a name from its components.
    pub fn from_components<I, C>(components: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Bytes>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a component.
    pub fn push(&mut self, component: impl Into<Bytes>) {
        self.components.push(component.into());
    }

    /// Builder flavor of [`Name::push`].
    pub fn with_component(mut self, component: impl Into<Bytes>) -> Self {
        self.push(component);
        self
    }

    /// Component count.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if the name has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// All components in order.
    pub fn components(&self) -> &[Bytes] {
        &self.components
    }

    /// The component at `index`.
    pub fn component(&self, index: usize) -> Option<&Bytes> {
        self.components.get(index)
    }

    /// Total byte length of all components.
    pub fn size(&self) -> usize {
        self.components.iter().map(Bytes::len).sum()
    }

    /// Returns `true` if every component of `self` equals the corresponding leading component of `other`.
    ///
    /// A name is a prefix of itself.
    pub fn is_prefix_of(&self, other: &Name) -> bool {
        self.len() <= other.len() && self.components.iter().zip(other.components.iter()).all(|(a, b)| a == b)
    }

    /// The number of leading components `self` and `other` share.
    pub fn common_prefix_len(&self, other: &Name) -> usize {
        self.components
            .iter()
            .zip(other.components.iter())
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// The first `len` components as a new name.
    pub fn prefix(&self, len: usize) -> Name {
        Self {
            components: self.components.iter().take(len).cloned().collect(),
        }
    }
}

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

/// Components made of periods only are written with three extra periods, so that the empty component is `...`.
fn is_periods(component: &[u8]) -> bool {
    component.iter().all(|&b| b == b'.')
}

impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.components.is_empty() {
            return write!(f, "/");
        }
        for component in self.components.iter() {
            write!(f, "/")?;
            if is_periods(component) {
                write!(f, "...")?;
            }
            for &b in component.iter() {
                if is_unreserved(b) {
                    write!(f, "{}", b as char)?;
                } else {
                    write!(f, "%{b:02X}")?;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Name {
    type Err = ParseNameError;

    /// Parse the URI form produced by [`Display`], e.g. `/a/b%00c`.
    ///
    /// A single trailing `/` is ignored. A segment of periods only stands for the component with three periods
    /// less: `...` is the empty component.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix('/')
            .ok_or_else(|| ParseNameError::MissingLeadingSlash(s.to_string()))?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        if rest.is_empty() {
            return Ok(Name::new());
        }

        let mut name = Name::new();
        for (index, segment) in rest.split('/').enumerate() {
            name.push(decode_component(index, segment.as_bytes())?);
        }
        Ok(name)
    }
}

fn decode_component(component: usize, raw: &[u8]) -> Result<Vec<u8>, ParseNameError> {
    if is_periods(raw) {
        return match raw.len() {
            0..=2 => Err(ParseNameError::InvalidComponent { component }),
            len => Ok(vec![b'.'; len - 3]),
        };
    }

    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] != b'%' {
            out.push(raw[i]);
            i += 1;
            continue;
        }
        let byte = raw
            .get(i + 1..i + 3)
            .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
            .and_then(|hex| std::str::from_utf8(hex).ok())
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .ok_or(ParseNameError::InvalidEscape { component, offset: i })?;
        out.push(byte);
        i += 3;
    }
    Ok(out)
}
