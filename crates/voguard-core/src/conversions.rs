//! The closed set of conversions a value object can opt into.
//!
//! Bit values are stable; configuration written as an integer keeps its
//! meaning across releases.

use crate::model::RawConversions;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tracing::debug;

bitflags! {
    /// A set of conversions, stored as flag bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Conversions: u32 {
        /// `Display` implementation.
        const DISPLAY = 1;
        /// `FromStr` implementation.
        const FROM_STR = 1 << 1;
        /// `serde` `Serialize`/`Deserialize`.
        const SERDE = 1 << 2;
        /// `sqlx` `Type`/`Encode`/`Decode`.
        const SQLX = 1 << 3;
        /// `diesel` `ToSql`/`FromSql`.
        const DIESEL = 1 << 4;
        /// `schemars` `JsonSchema`.
        const SCHEMARS = 1 << 5;
        /// What a value object gets when nothing is configured.
        const DEFAULT = Self::DISPLAY.bits() | Self::SERDE.bits();
    }
}

impl Conversions {
    const NAMES: [(&'static str, Self); 8] = [
        ("none", Self::empty()),
        ("default", Self::DEFAULT),
        ("display", Self::DISPLAY),
        ("fromstr", Self::FROM_STR),
        ("serde", Self::SERDE),
        ("sqlx", Self::SQLX),
        ("diesel", Self::DIESEL),
        ("schemars", Self::SCHEMARS),
    ];

    /// Interprets a conversions value as written; `None` if any part is
    /// unknown or the value is not a literal.
    #[must_use]
    pub fn resolve(raw: &RawConversions) -> Option<Self> {
        match raw {
            RawConversions::Names(names) => Self::from_names(names.iter().map(String::as_str)),
            RawConversions::Bits(bits) => u32::try_from(*bits).ok().and_then(Self::from_bits),
            RawConversions::Unparsed(text) => {
                debug!("Conversions value `{text}` is not a literal");
                None
            }
        }
    }

    /// Looks up a single conversion name.
    ///
    /// Case and underscores are ignored, so `from_str`, `FromStr` and
    /// `FROMSTR` are the same name.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::NAMES
            .iter()
            .find(|(n, _)| *n == normalized)
            .map(|(_, c)| *c)
    }

    /// Combines names into one set; `None` if any name is unknown or the
    /// list is empty.
    #[must_use]
    pub fn from_names<'a, I>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = false;
        let mut set = Self::empty();
        for name in names {
            seen = true;
            set |= Self::lookup(name.trim())?;
        }
        seen.then_some(set)
    }

    /// Parses a `|`-separated list such as `"serde | display"`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::from_names(value.split('|'))
    }
}

impl std::fmt::Display for Conversions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = Self::NAMES[2..]
            .iter()
            .filter(|(_, c)| self.contains(*c))
            .map(|(n, _)| *n)
            .collect();
        f.write_str(&names.join(" | "))
    }
}
