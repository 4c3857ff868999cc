//! Wrapper synthesis for the Trestle bridge.
//!
//! Consumes the [`Metadata`](trestle_extract::Metadata) produced by
//! extraction and the [`Fragment`](trestle_ir::Fragment) produced by the
//! external lowering step, and synthesizes the target-framework wrapper:
//! instantiation parameter bindings, pin/pad wiring with tristate buffers,
//! and finally the rendered wrapper source text.

#![warn(missing_docs)]

mod direction;
mod error;
mod pins;
mod wrapper;

pub use direction::{resolve_params, InstanceParam};
pub use error::GenError;
pub use pins::{synthesize_pin_wiring, Connection, PinWiring, Tristate};
pub use wrapper::{MemberDecl, SignalDecl, WrapperDoc};
