//! Wrapper document assembly and rendering.
//!
//! The wrapper is built in two phases. [`WrapperDoc::assemble`] turns
//! metadata, resolved parameters, and pin wiring into a structured,
//! serializable description of the wrapper module; [`WrapperDoc::render`]
//! emits the actual target-framework source text. Keeping the phases apart
//! makes the generator testable without ever executing generated code.

use crate::direction::InstanceParam;
use crate::error::GenError;
use crate::pins::PinWiring;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use trestle_common::Interner;
use trestle_extract::{describe_endpoint, describe_record, Metadata};

/// A bare signal declaration in the wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalDecl {
    /// The member name.
    pub name: String,
    /// The bit width.
    pub width: u32,
    /// Optional reset value, rendered as a constructor argument.
    pub reset: Option<u64>,
}

/// A record-like declaration (record, pin record, or endpoint) in the
/// wrapper, carrying its layout descriptor verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDecl {
    /// The member name.
    pub name: String,
    /// The layout descriptor embedded into the declaration.
    pub descriptor: String,
}

/// The structured description of a generated wrapper module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperDoc {
    /// The generated class name.
    pub class_name: String,
    /// The instantiated block name; must match the lowered HDL module name.
    pub instance_name: String,
    /// The directory the HDL artifact is registered from.
    pub output_dir: String,
    /// Bare signal members, in metadata order.
    pub signals: Vec<SignalDecl>,
    /// Pin record members, in metadata order.
    pub pins: Vec<MemberDecl>,
    /// Plain record members, in metadata order.
    pub records: Vec<MemberDecl>,
    /// Endpoint members, in metadata order.
    pub endpoints: Vec<MemberDecl>,
    /// Instantiation parameters, in lowered port order.
    pub params: Vec<InstanceParam>,
    /// Pin/pad wiring applied by the secondary entry point.
    pub wiring: PinWiring,
}

impl WrapperDoc {
    /// Assembles a wrapper description from the extraction metadata, the
    /// resolved instantiation parameters, and the synthesized pin wiring.
    pub fn assemble(
        name: &str,
        output_dir: &str,
        metadata: &Metadata,
        interner: &Interner,
        params: Vec<InstanceParam>,
        wiring: PinWiring,
    ) -> Self {
        let signals = metadata
            .signals
            .iter()
            .map(|(key, sig)| SignalDecl {
                name: key.clone(),
                width: sig.width,
                reset: sig.reset,
            })
            .collect();
        let pins = metadata
            .pins
            .iter()
            .map(|(key, pin)| MemberDecl {
                name: key.clone(),
                descriptor: describe_record(interner, &pin.record),
            })
            .collect();
        let records = metadata
            .records
            .iter()
            .map(|(key, rec)| MemberDecl {
                name: key.clone(),
                descriptor: describe_record(interner, rec),
            })
            .collect();
        let endpoints = metadata
            .endpoints
            .iter()
            .map(|(key, ep)| MemberDecl {
                name: key.clone(),
                descriptor: describe_endpoint(interner, ep),
            })
            .collect();

        Self {
            class_name: name.to_string(),
            instance_name: name.to_string(),
            output_dir: output_dir.to_string(),
            signals,
            pins,
            records,
            endpoints,
            params,
            wiring,
        }
    }

    /// Checks internal consistency before rendering.
    ///
    /// Every tristate pad must root in a declared pin argument, and every
    /// connection side must root in a declared member (`self.*`), a pin
    /// argument, or a tristate buffer. A violation means the classifier and
    /// the wiring pass disagreed about the module.
    fn validate(&self) -> Result<(), GenError> {
        if self.class_name.is_empty() {
            return Err(GenError::Template {
                reason: "wrapper has no class name".into(),
            });
        }

        let members: HashSet<&str> = self
            .signals
            .iter()
            .map(|s| s.name.as_str())
            .chain(self.pins.iter().map(|m| m.name.as_str()))
            .chain(self.records.iter().map(|m| m.name.as_str()))
            .chain(self.endpoints.iter().map(|m| m.name.as_str()))
            .collect();
        let pin_args: HashSet<&str> = self.pins.iter().map(|m| m.name.as_str()).collect();
        let tristates: HashSet<&str> =
            self.wiring.tristates.iter().map(|t| t.name.as_str()).collect();

        for tristate in &self.wiring.tristates {
            let root = root_of(&tristate.pad);
            if !pin_args.contains(root) {
                return Err(GenError::Template {
                    reason: format!("tristate `{}` pads an undeclared pin `{root}`", tristate.name),
                });
            }
        }
        for connection in &self.wiring.connects {
            for expr in [&connection.dest, &connection.src] {
                if let Some(member_path) = expr.strip_prefix("self.") {
                    let root = root_of(member_path);
                    if !members.contains(root) {
                        return Err(GenError::Template {
                            reason: format!("connection references undeclared member `{root}`"),
                        });
                    }
                } else {
                    let root = root_of(expr);
                    if !pin_args.contains(root) && !tristates.contains(root) {
                        return Err(GenError::Template {
                            reason: format!("connection references unknown expression `{expr}`"),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Renders the wrapper source text.
    ///
    /// The output is a deterministic function of the document: rendering the
    /// same document twice yields byte-identical text.
    pub fn render(&self) -> Result<String, GenError> {
        self.validate()?;

        let mut out = String::new();
        out.push_str("# Automatically generated by trestle. Do not edit.\n");
        out.push('\n');
        out.push_str("import os\n");
        out.push('\n');
        out.push_str("from migen import *\n");
        out.push('\n');
        out.push_str("from litex.soc.interconnect import stream\n");
        out.push('\n');
        out.push('\n');
        out.push_str(&format!("class {}(Module):\n", self.class_name));
        out.push_str("    def __init__(self, platform):\n");

        if !self.signals.is_empty() {
            out.push_str("\n        # Signals\n\n");
            for sig in &self.signals {
                match sig.reset {
                    Some(reset) => out.push_str(&format!(
                        "        self.{} = Signal({}, reset={})\n",
                        sig.name, sig.width, reset
                    )),
                    None => out.push_str(&format!(
                        "        self.{} = Signal({})\n",
                        sig.name, sig.width
                    )),
                }
            }
        }
        if !self.pins.is_empty() {
            out.push_str("\n        # Pins\n\n");
            for pin in &self.pins {
                out.push_str(&format!(
                    "        self.{} = Record({})\n",
                    pin.name, pin.descriptor
                ));
            }
        }
        if !self.records.is_empty() {
            out.push_str("\n        # Records\n\n");
            for rec in &self.records {
                out.push_str(&format!(
                    "        self.{} = Record({})\n",
                    rec.name, rec.descriptor
                ));
            }
        }
        if !self.endpoints.is_empty() {
            out.push_str("\n        # Endpoints\n\n");
            for ep in &self.endpoints {
                out.push_str(&format!(
                    "        self.{} = stream.Endpoint({})\n",
                    ep.name, ep.descriptor
                ));
            }
        }

        out.push_str("\n        # # #\n\n");
        out.push_str("        params = dict(\n");
        for param in &self.params {
            out.push_str(&format!("            {} = {},\n", param.key, param.value));
        }
        out.push_str("        )\n");
        out.push_str(&format!(
            "        self.specials += Instance(\"{}\", **params)\n",
            self.instance_name
        ));
        out.push('\n');
        out.push_str("        if platform is not None:\n");
        out.push_str(&format!(
            "            platform.add_source(os.path.join(\"{}\", \"{}.v\"), \"verilog\")\n",
            self.output_dir, self.instance_name
        ));

        let has_wiring =
            !self.wiring.tristates.is_empty() || !self.wiring.connects.is_empty();
        if !self.pins.is_empty() && has_wiring {
            let args: Vec<&str> = self.pins.iter().map(|m| m.name.as_str()).collect();
            out.push('\n');
            out.push_str(&format!(
                "    def autoconnect_pads(self, {}):\n",
                args.join(", ")
            ));

            if !self.wiring.tristates.is_empty() {
                out.push_str("\n        # Tristates\n\n");
                for tristate in &self.wiring.tristates {
                    out.push_str(&format!(
                        "        {} = TSTriple(len({}))\n",
                        tristate.name, tristate.pad
                    ));
                    out.push_str(&format!(
                        "        self.specials += {}.get_tristate({})\n",
                        tristate.name, tristate.pad
                    ));
                }
            }

            out.push_str("\n        # Connect\n\n");
            out.push_str("        self.comb += [\n");
            for connection in &self.wiring.connects {
                out.push_str(&format!(
                    "            {}.eq({}),\n",
                    connection.dest, connection.src
                ));
            }
            out.push_str("        ]\n");
        }

        Ok(out)
    }
}

/// Returns the first dotted segment of an expression.
fn root_of(expr: &str) -> &str {
    expr.split('.').next().unwrap_or(expr)
}
