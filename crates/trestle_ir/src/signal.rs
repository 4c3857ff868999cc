//! Signal definitions.
//!
//! A [`Signal`] is a single named, fixed-width wire. Signals are the leaves
//! of the member tree: a module either exposes them directly or nests them
//! inside records, endpoints, and pin records.

use crate::ids::SignalId;
use serde::{Deserialize, Serialize};
use trestle_common::Ident;

/// A named, fixed-width wire.
///
/// The [`SignalId`] is assigned once at creation by the construction context
/// and never changes. The declared `name` is not required to be unique
/// across the whole member tree; uniqueness is provided by the ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// The globally unique identifier of this signal.
    pub duid: SignalId,
    /// The declared name.
    pub name: Ident,
    /// The bit width.
    pub width: u32,
    /// An optional reset value.
    pub reset: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_construction() {
        let sig = Signal {
            duid: SignalId::from_raw(0),
            name: Ident::from_raw(1),
            width: 8,
            reset: None,
        };
        assert_eq!(sig.width, 8);
        assert!(sig.reset.is_none());
    }

    #[test]
    fn signal_with_reset() {
        let sig = Signal {
            duid: SignalId::from_raw(3),
            name: Ident::from_raw(1),
            width: 24,
            reset: Some(1),
        };
        assert_eq!(sig.reset, Some(1));
    }

    #[test]
    fn serde_roundtrip() {
        let sig = Signal {
            duid: SignalId::from_raw(7),
            name: Ident::from_raw(2),
            width: 1,
            reset: None,
        };
        let json = serde_json::to_string(&sig).unwrap();
        let back: Signal = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, back);
    }
}
