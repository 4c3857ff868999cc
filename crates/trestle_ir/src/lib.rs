//! The source-framework object model bridged by Trestle.
//!
//! This crate defines the member tree of an elaborated hardware module —
//! [`Signal`], [`Layout`], [`Record`], [`Endpoint`], [`PinRecord`], and
//! [`Module`] — together with the [`DesignContext`] that allocates unique
//! signal identifiers, and the [`Fragment`]/[`Lowering`] boundary to the
//! external lowering step.

#![warn(missing_docs)]

pub mod arena;
mod context;
mod fragment;
mod ids;
mod layout;
mod module;
mod pads;
mod record;
mod signal;
mod stream;

pub use context::DesignContext;
pub use fragment::{Direction, Fragment, FragmentPort, LowerError, Lowering};
pub use ids::{PadId, SignalId};
pub use layout::{FieldHint, FieldShape, Layout, LayoutError, LayoutField};
pub use module::{ConstValue, Member, MemberKind, Module, ModuleError};
pub use pads::{PadBundle, PadDir, PinRecord};
pub use record::{FieldValue, Record, RecordEntry};
pub use signal::Signal;
pub use stream::{Endpoint, RESERVED_ENDPOINT_FIELDS};
