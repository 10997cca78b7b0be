//! Field selection for fetch results
//!
//! A [`Fields`] mask tells the client which optional parts of a [`crate::Link`]
//! to populate. Membership tests are a single bitwise AND, so masks can be
//! passed around and checked in hot paths without allocating.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

/// Bitmask over the optional output fields of a fetch
///
/// # Examples
///
/// ```rust
/// use metagrab::Fields;
///
/// let mask = Fields::TITLE | Fields::META;
/// assert!(mask.has(Fields::TITLE));
/// assert!(!mask.has(Fields::CONTENT));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(u8);

impl Fields {
    pub const TITLE: Fields = Fields(1);
    pub const URL: Fields = Fields(1 << 1);
    pub const META: Fields = Fields(1 << 2);
    pub const DESCRIPTION: Fields = Fields(1 << 3);
    pub const CONTENT: Fields = Fields(1 << 4);
    pub const ALL: Fields = Fields(
        Self::TITLE.0 | Self::URL.0 | Self::META.0 | Self::DESCRIPTION.0 | Self::CONTENT.0,
    );

    const NAMED: [(&'static str, Fields); 5] = [
        ("title", Fields::TITLE),
        ("url", Fields::URL),
        ("meta", Fields::META),
        ("description", Fields::DESCRIPTION),
        ("content", Fields::CONTENT),
    ];

    pub const fn empty() -> Self {
        Fields(0)
    }

    /// Any bit pattern is a legal mask; unknown bits are simply never queried.
    pub const fn from_bits(bits: u8) -> Self {
        Fields(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True iff any bit of `other` is set in `self`.
    #[inline]
    pub const fn has(self, other: Fields) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Fields {
    type Output = Fields;

    fn bitor(self, rhs: Fields) -> Fields {
        Fields(self.0 | rhs.0)
    }
}

impl BitOrAssign for Fields {
    fn bitor_assign(&mut self, rhs: Fields) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Fields {
    type Output = Fields;

    fn bitand(self, rhs: Fields) -> Fields {
        Fields(self.0 & rhs.0)
    }
}

impl From<u8> for Fields {
    fn from(bits: u8) -> Self {
        Fields(bits)
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }

        let names: Vec<&str> = Self::NAMED
            .iter()
            .filter(|(_, field)| self.has(*field))
            .map(|(name, _)| *name)
            .collect();

        f.write_str(&names.join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}' (expected title, url, meta, description, content or all)")]
pub struct ParseFieldsError(pub String);

impl FromStr for Fields {
    type Err = ParseFieldsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mask = Fields::empty();

        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let lower = token.to_ascii_lowercase();
            if lower == "all" {
                mask |= Fields::ALL;
                continue;
            }

            match Self::NAMED.iter().find(|(name, _)| *name == lower) {
                Some((_, field)) => mask |= *field,
                None => return Err(ParseFieldsError(token.to_string())),
            }
        }

        Ok(mask)
    }
}
