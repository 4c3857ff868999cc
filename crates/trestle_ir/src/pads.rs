//! Platform pad bundles and the pin records derived from them.
//!
//! A [`PadBundle`] is the platform's view of a group of physical pads: a
//! name and a flat layout, owned by the platform and registered with the
//! construction context. A [`PinRecord`] is the source-framework mirror of
//! such a bundle: its layout is cast through per-field direction hints so
//! that bidirectional pads expand into `i`/`o`/`oe` sub-records, and it
//! carries the originating [`PadId`] as an explicit provenance field.

use crate::context::DesignContext;
use crate::layout::{FieldShape, Layout, LayoutField};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use trestle_common::Ident;

use crate::ids::PadId;

/// A platform pad bundle: the external, platform-owned side of a pin record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadBundle {
    /// The bundle name.
    pub name: Ident,
    /// The flat pad layout (one leaf per pad group).
    pub layout: Layout,
}

/// The direction hint for one pad field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PadDir {
    /// Input-only pad: expands to an `i` sub-signal.
    In,
    /// Output-only pad: expands to an `o` sub-signal.
    Out,
    /// Output with enable: expands to `o` and `oe` sub-signals.
    OutEnable,
    /// Bidirectional pad: expands to `i`, `o`, and `oe` sub-signals.
    InOut,
}

/// A record derived from a platform pad bundle.
///
/// The `pads` field is the provenance relation back to the originating
/// bundle; the bundle itself stays owned by the platform side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinRecord {
    /// The materialized record.
    pub record: Record,
    /// The originating pad bundle.
    pub pads: PadId,
}

impl PinRecord {
    /// Builds a pin record from a registered pad bundle.
    ///
    /// Each pad field listed in `dirs` is cast into a sub-record according
    /// to its direction: `In` → `[i]`, `Out` → `[o]`, `OutEnable` →
    /// `[o, oe(1)]`, `InOut` → `[i, o, oe(1)]`, where `i`/`o` keep the pad
    /// width and `oe` is a single enable wire. Unhinted fields keep their
    /// pad shape.
    pub fn from_pads(
        ctx: &mut DesignContext,
        pads: PadId,
        dirs: &HashMap<Ident, PadDir>,
    ) -> Self {
        let bundle = ctx.pads(pads).clone();
        let cast = cast_layout(ctx, &bundle.layout, dirs);
        let record = Record::build(ctx, bundle.name, &cast);
        Self { record, pads }
    }
}

/// Casts a pad layout through direction hints.
fn cast_layout(ctx: &DesignContext, layout: &Layout, dirs: &HashMap<Ident, PadDir>) -> Layout {
    let fields = layout
        .fields()
        .map(|field| match (&field.shape, dirs.get(&field.name)) {
            (FieldShape::Width(width), Some(dir)) => {
                let mut subs = Vec::new();
                if matches!(dir, PadDir::In | PadDir::InOut) {
                    subs.push(LayoutField::leaf(ctx.intern("i"), *width));
                }
                if matches!(dir, PadDir::Out | PadDir::OutEnable | PadDir::InOut) {
                    subs.push(LayoutField::leaf(ctx.intern("o"), *width));
                }
                if matches!(dir, PadDir::OutEnable | PadDir::InOut) {
                    subs.push(LayoutField::leaf(ctx.intern("oe"), 1));
                }
                LayoutField::nested(field.name, Layout::from_fields(subs))
            }
            _ => field.clone(),
        })
        .collect();
    Layout::from_fields(fields)
}
