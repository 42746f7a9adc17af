//! # Record Identifiers
//!
//! A `Rid` names a record by `(cluster_id, position)`. RIDs are plain value
//! types: structural equality, hashable, orderable. The text form used by
//! client-facing surfaces is `#<cluster>:<position>`, e.g. `#12:0`.
//!
//! On the wire a free-standing link is two ZigZag varints; RIDs inside a
//! link bag use fixed-width big-endian fields instead. Both encodings live
//! in the record codec; this type carries no wire logic.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a stored record: cluster plus position within the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rid {
    pub cluster_id: u16,
    pub position: u64,
}

impl Rid {
    pub fn new(cluster_id: u16, position: u64) -> Self {
        Self {
            cluster_id,
            position,
        }
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}:{}", self.cluster_id, self.position)
    }
}

/// Error parsing the `#cluster:position` text form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid record id literal: {literal:?}")]
pub struct ParseRidError {
    literal: String,
}

impl FromStr for Rid {
    type Err = ParseRidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRidError {
            literal: s.to_owned(),
        };
        let rest = s.strip_prefix('#').ok_or_else(err)?;
        let (cluster, position) = rest.split_once(':').ok_or_else(err)?;
        Ok(Rid {
            cluster_id: cluster.parse().map_err(|_| err())?,
            position: position.parse().map_err(|_| err())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_hash_form() {
        assert_eq!(Rid::new(12, 0).to_string(), "#12:0");
        assert_eq!(Rid::new(0, 42).to_string(), "#0:42");
    }

    #[test]
    fn parse_roundtrips_display() {
        let rid = Rid::new(9, 14);
        assert_eq!(rid.to_string().parse::<Rid>().unwrap(), rid);
    }

    #[test]
    fn parse_rejects_malformed_literals() {
        assert!("12:0".parse::<Rid>().is_err());
        assert!("#12".parse::<Rid>().is_err());
        assert!("#a:b".parse::<Rid>().is_err());
        assert!("#-1:0".parse::<Rid>().is_err());
        assert!("".parse::<Rid>().is_err());
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(Rid::new(1, 22), Rid::new(1, 22));
        assert_ne!(Rid::new(1, 22), Rid::new(1, 23));
        assert_ne!(Rid::new(1, 22), Rid::new(2, 22));
    }
}
