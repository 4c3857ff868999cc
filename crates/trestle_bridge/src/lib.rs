//! The bridge orchestrator.
//!
//! [`bridge`] runs the full generation pipeline for one module: interface
//! extraction, external lowering, instantiation parameter resolution, pin
//! wiring synthesis, and wrapper rendering. The result is a
//! [`GeneratedWrapper`] holding the lowered HDL text and the rendered
//! wrapper source; the separate [`GeneratedWrapper::materialize`] step
//! writes both artifacts to disk. Nothing in the pipeline executes
//! generated code.
//!
//! Each request is stateless and runs to completion or fails outright.
//! Artifacts are overwritten unconditionally; concurrent requests targeting
//! the same output directory are a caller-level hazard.

#![warn(missing_docs)]

mod config;
mod error;

pub use config::{BridgeConfig, ConfigError};
pub use error::BridgeError;

use std::fs;
use std::path::PathBuf;
use tracing::debug;
use trestle_common::Interner;
use trestle_extract::{extract, Metadata};
use trestle_gen::{resolve_params, synthesize_pin_wiring, PinWiring, WrapperDoc};
use trestle_ir::{Fragment, Lowering, Module};

/// The outcome of a successful generation request.
///
/// Holds everything a caller needs to inspect or materialize the wrapper:
/// the structured [`WrapperDoc`], the rendered source text, the lowered
/// fragment, and the extraction metadata (useful for caller-side pin/pad
/// matching).
#[derive(Debug)]
pub struct GeneratedWrapper {
    /// The wrapper and instance name.
    pub name: String,
    /// The rendered wrapper source text.
    pub source: String,
    /// The structured wrapper description the source was rendered from.
    pub doc: WrapperDoc,
    /// The extraction metadata for this request.
    pub metadata: Metadata,
    /// The lowered fragment, HDL text included.
    pub fragment: Fragment,
    output_dir: PathBuf,
}

/// Paths of the artifacts written by [`GeneratedWrapper::materialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperArtifacts {
    /// The low-level HDL file (`<output_dir>/<name>.v`).
    pub hdl_path: PathBuf,
    /// The wrapper source file (`<output_dir>/<name>.py`).
    pub source_path: PathBuf,
}

impl GeneratedWrapper {
    /// The lowered HDL text.
    pub fn hdl(&self) -> &str {
        &self.fragment.hdl
    }

    /// Writes both artifacts into the configured output directory.
    ///
    /// The HDL file is written before the wrapper source, and both are
    /// overwritten unconditionally. A failed write aborts the request with
    /// [`BridgeError::Io`]; there is no retry.
    pub fn materialize(&self) -> Result<WrapperArtifacts, BridgeError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| BridgeError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let hdl_path = self.output_dir.join(format!("{}.v", self.name));
        fs::write(&hdl_path, &self.fragment.hdl).map_err(|source| BridgeError::Io {
            path: hdl_path.clone(),
            source,
        })?;

        let source_path = self.output_dir.join(format!("{}.py", self.name));
        fs::write(&source_path, &self.source).map_err(|source| BridgeError::Io {
            path: source_path.clone(),
            source,
        })?;

        Ok(WrapperArtifacts {
            hdl_path,
            source_path,
        })
    }
}

/// Runs the full generation pipeline for one module.
///
/// The wrapper name defaults to the module's own name; the external
/// `lowering` collaborator receives the module together with the explicit
/// port list produced by extraction. Any failure aborts the whole request.
pub fn bridge(
    module: &Module,
    lowering: &dyn Lowering,
    interner: &Interner,
    config: &BridgeConfig,
) -> Result<GeneratedWrapper, BridgeError> {
    let name = config
        .name
        .clone()
        .unwrap_or_else(|| interner.resolve(module.name).to_string());

    debug!(module = %name, "extracting interface");
    let extraction = extract(module, interner);

    debug!(ports = extraction.ports.len(), "lowering");
    let fragment = lowering.lower(module, &extraction.ports, &name, interner)?;

    let params = resolve_params(&fragment, &extraction.metadata, interner)?;
    let wiring = if config.autoconnect_pads {
        synthesize_pin_wiring(&extraction.metadata, &fragment, interner)?
    } else {
        PinWiring::default()
    };

    let output_dir = config.output_dir.to_string_lossy().into_owned();
    let doc = WrapperDoc::assemble(
        &name,
        &output_dir,
        &extraction.metadata,
        interner,
        params,
        wiring,
    );
    let source = doc.render()?;

    Ok(GeneratedWrapper {
        name,
        source,
        doc,
        metadata: extraction.metadata,
        fragment,
        output_dir: config.output_dir.clone(),
    })
}
