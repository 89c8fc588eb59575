//! OID (Object Identifier) representation.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// A numeric OID as reported by the MIB engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oid {
    arcs: Vec<u32>,
}

impl Oid {
    /// Create a new OID from a vector of arcs.
    #[must_use]
    pub fn new(arcs: Vec<u32>) -> Self {
        Self { arcs }
    }

    /// Parse an OID from dotted notation (e.g., "1.3.6.1.2.1").
    ///
    /// The empty string parses to the empty OID. A leading dot is accepted.
    #[must_use]
    pub fn from_dotted(s: &str) -> Option<Self> {
        let s = s.strip_prefix('.').unwrap_or(s);
        if s.is_empty() {
            return Some(Self::default());
        }
        s.split('.')
            .map(str::parse)
            .collect::<Result<Vec<u32>, _>>()
            .ok()
            .map(Self::new)
    }

    /// Get the arcs as a slice.
    #[must_use]
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Check if the OID is empty (not assigned).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut arcs = self.arcs.iter();
        if let Some(first) = arcs.next() {
            write!(f, "{first}")?;
            for arc in arcs {
                write!(f, ".{arc}")?;
            }
        }
        Ok(())
    }
}

/// Error returned when a dotted OID string contains a non-numeric arc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OidParseError;

impl fmt::Display for OidParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid dotted OID")
    }
}

impl FromStr for Oid {
    type Err = OidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_dotted(s).ok_or(OidParseError)
    }
}
