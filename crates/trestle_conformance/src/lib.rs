//! Conformance test helpers for the Trestle wrapper generator.
//!
//! Provides a deterministic, table-driven stand-in for the external
//! lowering collaborator plus small builders shared by the integration
//! tests under `tests/`.

#![warn(missing_docs)]

use std::collections::HashMap;

use trestle_common::Interner;
use trestle_ir::{
    DesignContext, Direction, Fragment, FragmentPort, LowerError, Lowering, Module, Signal,
    SignalId,
};

/// A lowering double that assigns port directions from a table.
///
/// Exported ports keep their extraction order; ports missing from the table
/// get `default`. The `implicit` ports model clock/reset signals the real
/// lowering step invents — their identifiers are deliberately absent from
/// the extraction metadata.
pub struct TableLowering {
    /// Direction per exported port, keyed by signal identifier.
    pub directions: HashMap<SignalId, Direction>,
    /// Direction for ports not listed in `directions`.
    pub default: Direction,
    /// Implicit ports prepended to the fragment, in order.
    pub implicit: Vec<FragmentPort>,
}

impl TableLowering {
    /// Creates a table lowering with the given default direction.
    pub fn new(default: Direction) -> Self {
        Self {
            directions: HashMap::new(),
            default,
            implicit: Vec::new(),
        }
    }

    /// Sets the direction of one port.
    pub fn direct(mut self, duid: SignalId, direction: Direction) -> Self {
        self.directions.insert(duid, direction);
        self
    }

    /// Appends an implicit port.
    pub fn with_implicit(mut self, port: FragmentPort) -> Self {
        self.implicit.push(port);
        self
    }
}

impl Lowering for TableLowering {
    fn lower(
        &self,
        _module: &Module,
        ports: &[Signal],
        name: &str,
        _interner: &Interner,
    ) -> Result<Fragment, LowerError> {
        let mut out = self.implicit.clone();
        out.extend(ports.iter().map(|sig| FragmentPort {
            duid: sig.duid,
            name: sig.name,
            direction: *self.directions.get(&sig.duid).unwrap_or(&self.default),
        }));
        Ok(Fragment {
            ports: out,
            hdl: format!("module {name}();\nendmodule\n"),
        })
    }
}

/// Creates an implicit clock/reset port with a fresh, unextracted duid.
pub fn implicit_port(ctx: &mut DesignContext, name: &str, direction: Direction) -> FragmentPort {
    FragmentPort {
        duid: ctx.alloc_duid(),
        name: ctx.intern(name),
        direction,
    }
}

/// Installs a tracing subscriber reading `RUST_LOG`, if none is installed.
///
/// Lets `cargo test -- --nocapture` show the pipeline's classification and
/// wiring decisions.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();
}
