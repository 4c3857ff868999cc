//! Instantiation parameter resolution.
//!
//! Every port of the lowered block must be bound to an expression in the
//! generated wrapper. Ports backed by a known member signal bind to
//! `self.<dotted path>`; ports the extraction never saw are assumed to be
//! implicit clocks or resets and bind to a symbolic clock-domain reference,
//! recognized purely by naming convention.

use crate::error::GenError;
use serde::{Deserialize, Serialize};
use tracing::debug;
use trestle_common::Interner;
use trestle_extract::Metadata;
use trestle_ir::{Direction, Fragment};

/// One resolved instantiation parameter: `key = value` in the generated
/// instantiation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceParam {
    /// The parameter key, `<direction>_<port name>`. Must match the port
    /// name the lowering step emitted, since the target framework binds by
    /// this key.
    pub key: String,
    /// The bound expression.
    pub value: String,
}

/// Resolves one instantiation parameter per lowered port, in port order.
///
/// Fails with [`GenError::UnresolvedPort`] when a port has no known origin
/// and does not match the clock/reset naming convention, and with
/// [`GenError::UnsupportedDirection`] for bidirectional ports.
pub fn resolve_params(
    fragment: &Fragment,
    metadata: &Metadata,
    interner: &Interner,
) -> Result<Vec<InstanceParam>, GenError> {
    let mut params = Vec::with_capacity(fragment.ports.len());

    for port in &fragment.ports {
        let name = interner.resolve(port.name);

        let value = match metadata.path(port.duid) {
            Some(path) => format!("self.{path}"),
            None => {
                // Ports absent from the metadata are implicit clock/reset
                // signals: "*clk"/"*rst", with the bare names belonging to
                // the default "sys" domain.
                if let Some(prefix) = name.strip_suffix("clk") {
                    format!("ClockSignal(\"{}\")", clock_domain(prefix))
                } else if let Some(prefix) = name.strip_suffix("rst") {
                    format!("ResetSignal(\"{}\")", clock_domain(prefix))
                } else {
                    return Err(GenError::UnresolvedPort { name: name.into() });
                }
            }
        };

        let prefix = match port.direction {
            Direction::In => "i",
            Direction::Out => "o",
            Direction::InOut => {
                return Err(GenError::UnsupportedDirection {
                    name: name.into(),
                    direction: port.direction,
                });
            }
        };

        debug!(port = %name, direction = %port.direction, value = %value, "resolved port");
        params.push(InstanceParam {
            key: format!("{prefix}_{name}"),
            value,
        });
    }

    Ok(params)
}

/// Derives a clock-domain name from the part of a port name preceding its
/// `clk`/`rst` suffix. A trailing underscore is dropped; an empty remainder
/// is the default `sys` domain.
fn clock_domain(prefix: &str) -> &str {
    let domain = prefix.strip_suffix('_').unwrap_or(prefix);
    if domain.is_empty() {
        "sys"
    } else {
        domain
    }
}
