//! Error types for wrapper synthesis.

use trestle_ir::Direction;

/// Errors that can occur while synthesizing a wrapper.
///
/// All variants are fatal: generation runs to completion or fails outright,
/// and no partial wrapper is ever produced.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// A lowered port is neither in the extraction path map nor named like
    /// a clock or reset. The instantiation parameter for it cannot be bound.
    #[error("unresolved port `{name}`: not a known member signal and not a clock/reset")]
    UnresolvedPort {
        /// The port name assigned by the lowering step.
        name: String,
    },

    /// A port direction the generator cannot express. Bidirectional
    /// instantiation ports are not supported; bidirectional pads must go
    /// through an `i`/`o`/`oe` pin record instead.
    #[error("unsupported direction `{direction}` on port `{name}`")]
    UnsupportedDirection {
        /// The port name.
        name: String,
        /// The offending direction.
        direction: Direction,
    },

    /// A pin field matches none of the recognized shapes: neither a plain
    /// signal nor a sub-record exposing `i`, `o`, or `oe`.
    #[error("pin field `{pin}.{field}` has no recognized shape (expected a signal or i/o/oe sub-signals)")]
    AmbiguousPinField {
        /// The pin record member name.
        pin: String,
        /// The field name.
        field: String,
    },

    /// Required metadata was absent at assemble or render time. This is an
    /// internal contract violation between extraction and generation.
    #[error("template contract violation: {reason}")]
    Template {
        /// Description of the missing piece.
        reason: String,
    },
}
