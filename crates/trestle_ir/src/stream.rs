//! Flow-controlled stream endpoints.
//!
//! An [`Endpoint`] is a record with the standard stream handshake fields
//! (`valid`, `ready`, `first`, `last`) and a nested `payload` record built
//! from a caller-supplied payload layout. Payload fields must not collide
//! with the handshake field names.

use crate::context::DesignContext;
use crate::layout::{FieldHint, FieldShape, Layout, LayoutError, LayoutField};
use crate::record::{FieldValue, Record};
use crate::signal::Signal;
use serde::{Deserialize, Serialize};
use trestle_common::Ident;

/// Field names an endpoint claims for itself; payload layouts may not use them.
pub const RESERVED_ENDPOINT_FIELDS: [&str; 5] = ["valid", "ready", "first", "last", "payload"];

/// A record modeling one side of a flow-controlled data stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    record: Record,
    payload_layout: Layout,
}

impl Endpoint {
    /// Builds an endpoint from a payload layout.
    ///
    /// The full record layout is `valid`(1), `ready`(1), `first`(1),
    /// `last`(1), plus a nested `payload` with fan-out hints applied to the
    /// payload fields. Fails with [`LayoutError::ReservedField`] if the
    /// payload layout uses a handshake field name.
    pub fn new(
        ctx: &mut DesignContext,
        name: Ident,
        payload_layout: Layout,
    ) -> Result<Self, LayoutError> {
        for field in payload_layout.fields() {
            let field_name = ctx.resolve(field.name);
            if RESERVED_ENDPOINT_FIELDS.contains(&field_name) {
                return Err(LayoutError::ReservedField {
                    name: field_name.to_string(),
                });
            }
        }

        let full = Layout::from_fields(vec![
            LayoutField::leaf(ctx.intern("valid"), 1).with_hint(FieldHint::FanOut),
            LayoutField::leaf(ctx.intern("ready"), 1).with_hint(FieldHint::FanIn),
            LayoutField::leaf(ctx.intern("first"), 1).with_hint(FieldHint::FanOut),
            LayoutField::leaf(ctx.intern("last"), 1).with_hint(FieldHint::FanOut),
            LayoutField::nested(ctx.intern("payload"), make_fanout(&payload_layout)),
        ]);
        let record = Record::build(ctx, name, &full);
        Ok(Self {
            record,
            payload_layout,
        })
    }

    /// The full record, handshake fields included.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// The payload layout this endpoint was built from.
    pub fn payload_layout(&self) -> &Layout {
        &self.payload_layout
    }

    /// The nested payload record.
    pub fn payload(&self) -> Option<&Record> {
        self.record.fields.iter().find_map(|entry| {
            if let FieldValue::Record(rec) = &entry.value {
                Some(rec)
            } else {
                None
            }
        })
    }

    /// Convenience accessor for a handshake signal (`valid`, `ready`, ...).
    pub fn handshake(&self, name: Ident) -> Option<&Signal> {
        self.record.signal(name)
    }
}

/// Applies fan-out hints to every leaf of a payload layout, recursing into
/// nested layouts.
fn make_fanout(layout: &Layout) -> Layout {
    let fields = layout
        .fields()
        .map(|field| match &field.shape {
            FieldShape::Width(width) => {
                LayoutField::leaf(field.name, *width).with_hint(FieldHint::FanOut)
            }
            FieldShape::Sub(sub) => LayoutField::nested(field.name, make_fanout(sub)),
        })
        .collect();
    Layout::from_fields(fields)
}
