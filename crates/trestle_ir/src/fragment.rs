//! The boundary to the external lowering step.
//!
//! Lowering turns a module plus an explicit port list into low-level HDL
//! text and a [`Fragment`] reporting the inferred direction of every port.
//! Trestle does not implement this translation; it consumes the result
//! through the [`Lowering`] trait.

use crate::module::Module;
use crate::signal::Signal;
use crate::SignalId;
use serde::{Deserialize, Serialize};
use std::fmt;
use trestle_common::{Ident, Interner};

/// The direction of a lowered port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Data flows into the lowered block.
    In,
    /// Data flows out of the lowered block.
    Out,
    /// Bidirectional. Reported by some lowering implementations but not
    /// supported by parameter resolution.
    InOut,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "i"),
            Self::Out => write!(f, "o"),
            Self::InOut => write!(f, "io"),
        }
    }
}

/// One port of the lowered block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentPort {
    /// The unique identifier of the signal backing this port.
    pub duid: SignalId,
    /// The name the lowering step assigned to the port.
    pub name: Ident,
    /// The inferred direction.
    pub direction: Direction,
}

/// The result of lowering: HDL text plus the flat, ordered port list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Ports in the order the lowering step emitted them.
    pub ports: Vec<FragmentPort>,
    /// The low-level hardware description text.
    pub hdl: String,
}

impl Fragment {
    /// Looks up the direction of a port by signal identifier.
    pub fn direction_of(&self, duid: SignalId) -> Option<Direction> {
        self.ports
            .iter()
            .find(|port| port.duid == duid)
            .map(|port| port.direction)
    }
}

/// An error reported by a lowering implementation.
#[derive(Debug, thiserror::Error)]
#[error("lowering failed: {reason}")]
pub struct LowerError {
    /// Description of the failure.
    pub reason: String,
}

impl LowerError {
    /// Creates a new lowering error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The external lowering service.
///
/// Implementations receive the module, the explicit list of ports to export
/// (every externally reachable leaf signal, in extraction order), and the
/// requested block name. They return the HDL text and the port/direction
/// fragment. Implementations may add ports that are not in the export list
/// (implicit clocks and resets); parameter resolution handles those by
/// naming convention.
pub trait Lowering {
    /// Lowers `module` to HDL text and a port fragment.
    fn lower(
        &self,
        module: &Module,
        ports: &[Signal],
        name: &str,
        interner: &Interner,
    ) -> Result<Fragment, LowerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_display_matches_parameter_prefixes() {
        assert_eq!(Direction::In.to_string(), "i");
        assert_eq!(Direction::Out.to_string(), "o");
        assert_eq!(Direction::InOut.to_string(), "io");
    }

    #[test]
    fn direction_lookup() {
        let frag = Fragment {
            ports: vec![FragmentPort {
                duid: SignalId::from_raw(3),
                name: Ident::from_raw(0),
                direction: Direction::Out,
            }],
            hdl: String::new(),
        };
        assert_eq!(frag.direction_of(SignalId::from_raw(3)), Some(Direction::Out));
        assert_eq!(frag.direction_of(SignalId::from_raw(4)), None);
    }

    #[test]
    fn lower_error_display() {
        let err = LowerError::new("unsupported construct");
        assert_eq!(err.to_string(), "lowering failed: unsupported construct");
    }
}
