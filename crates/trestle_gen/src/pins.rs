//! Pin/pad wiring synthesis.
//!
//! For every pin record extracted from the module, this pass emits the
//! tristate buffer declarations and directed connection statements that tie
//! the wrapper's pin members to the platform pads passed into the generated
//! `autoconnect_pads` entry point. Iteration order is pin declaration order,
//! then field declaration order, so the output is deterministic.

use crate::error::GenError;
use serde::{Deserialize, Serialize};
use tracing::debug;
use trestle_common::Interner;
use trestle_extract::Metadata;
use trestle_ir::{Direction, FieldValue, Fragment, Signal};

/// A tristate buffer declaration: one buffer multiplexing `i`/`o`/`oe`
/// sub-signals onto a single bidirectional pad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tristate {
    /// The buffer name, derived from the pin field name.
    pub name: String,
    /// The pad expression the buffer is attached to.
    pub pad: String,
}

/// A directed connection statement: `dest` receives the value of `src`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// The receiving expression.
    pub dest: String,
    /// The driving expression.
    pub src: String,
}

/// The synthesized pin wiring: tristate declarations plus connections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinWiring {
    /// Tristate buffers, one per bidirectional pin field.
    pub tristates: Vec<Tristate>,
    /// Connection statements, in pin/field declaration order.
    pub connects: Vec<Connection>,
}

/// Synthesizes tristate declarations and connection statements for every
/// pin record in the metadata.
///
/// Each pin field is classified by shape:
/// - a plain signal wires directly to its pad;
/// - a sub-record with all of `i`, `o`, `oe` goes through a tristate buffer
///   (no direct pad connection);
/// - a sub-record with only `i` or only `o` wires that one sub-signal;
/// - anything else fails with [`GenError::AmbiguousPinField`].
pub fn synthesize_pin_wiring(
    metadata: &Metadata,
    fragment: &Fragment,
    interner: &Interner,
) -> Result<PinWiring, GenError> {
    let mut wiring = PinWiring::default();

    let i = interner.get_or_intern("i");
    let o = interner.get_or_intern("o");
    let oe = interner.get_or_intern("oe");

    for (key, pin) in &metadata.pins {
        for entry in &pin.record.fields {
            let field = interner.resolve(entry.name);
            let pad = format!("{key}.{field}");
            debug!(pin = %key, field = %field, "wiring pin field");

            match &entry.value {
                FieldValue::Signal(sig) => {
                    wiring
                        .connects
                        .push(connect(metadata, fragment, &pad, sig, interner)?);
                }
                FieldValue::Record(sub) => {
                    match (sub.signal(i), sub.signal(o), sub.signal(oe)) {
                        (Some(sig_i), Some(sig_o), Some(sig_oe)) => {
                            let ts = format!("t_{field}");
                            wiring.connects.push(connect(
                                metadata,
                                fragment,
                                &format!("{ts}.i"),
                                sig_i,
                                interner,
                            )?);
                            wiring.connects.push(connect(
                                metadata,
                                fragment,
                                &format!("{ts}.o"),
                                sig_o,
                                interner,
                            )?);
                            wiring.connects.push(connect(
                                metadata,
                                fragment,
                                &format!("{ts}.oe"),
                                sig_oe,
                                interner,
                            )?);
                            wiring.tristates.push(Tristate { name: ts, pad });
                        }
                        (Some(sig_i), None, _) => {
                            wiring
                                .connects
                                .push(connect(metadata, fragment, &pad, sig_i, interner)?);
                        }
                        (None, Some(sig_o), _) => {
                            wiring
                                .connects
                                .push(connect(metadata, fragment, &pad, sig_o, interner)?);
                        }
                        _ => {
                            return Err(GenError::AmbiguousPinField {
                                pin: key.clone(),
                                field: field.to_string(),
                            });
                        }
                    }
                }
            }
        }
    }

    Ok(wiring)
}

/// Builds one directed connection between a pin signal and a pad-side
/// expression, oriented by the signal's lowered direction.
fn connect(
    metadata: &Metadata,
    fragment: &Fragment,
    pad: &str,
    sig: &Signal,
    interner: &Interner,
) -> Result<Connection, GenError> {
    let path = metadata.path(sig.duid).ok_or_else(|| GenError::Template {
        reason: format!(
            "pin signal `{}` has no extraction path",
            interner.resolve(sig.name)
        ),
    })?;
    let member = format!("self.{path}");

    match fragment.direction_of(sig.duid) {
        Some(Direction::In) => Ok(Connection {
            dest: member,
            src: pad.to_string(),
        }),
        Some(Direction::Out) => Ok(Connection {
            dest: pad.to_string(),
            src: member,
        }),
        Some(direction @ Direction::InOut) => Err(GenError::UnsupportedDirection {
            name: interner.resolve(sig.name).to_string(),
            direction,
        }),
        None => Err(GenError::Template {
            reason: format!(
                "pin signal `{}` is missing from the lowered port list",
                interner.resolve(sig.name)
            ),
        }),
    }
}
