//! Records — named bundles instantiated from a layout.
//!
//! A [`Record`] materializes a [`Layout`]: every leaf field becomes a fresh
//! [`Signal`] and every nested layout becomes a nested `Record`. The record
//! keeps the layout it was built from so that descriptors can be produced
//! later without re-deriving the shape.

use crate::context::DesignContext;
use crate::layout::{FieldShape, Layout};
use crate::signal::Signal;
use serde::{Deserialize, Serialize};
use trestle_common::Ident;

/// The materialized value of one record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// A leaf field backed by a signal.
    Signal(Signal),
    /// A nested field backed by a sub-record.
    Record(Record),
}

/// One named field of a record, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntry {
    /// The field name, taken from the layout.
    pub name: Ident,
    /// The materialized field value.
    pub value: FieldValue,
}

/// A named bundle of signals and nested records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The record name.
    pub name: Ident,
    /// The layout this record was instantiated from.
    pub layout: Layout,
    /// The materialized fields, in layout order.
    pub fields: Vec<RecordEntry>,
}

impl Record {
    /// Builds a record from a layout, allocating one signal per leaf field.
    ///
    /// Nested layouts become nested records. Signal identifiers come from
    /// the context's allocator, so every leaf of the resulting tree has a
    /// distinct [`SignalId`](crate::SignalId). Declared signal names are
    /// hierarchical (`<record>__<field>[__<sub>]`), matching what the
    /// lowering step will call the corresponding ports.
    pub fn build(ctx: &mut DesignContext, name: Ident, layout: &Layout) -> Self {
        let prefix = ctx.resolve(name).to_string();
        let mut fields = Vec::with_capacity(layout.len());
        for field in layout.fields() {
            let field_name = ctx.resolve(field.name).to_string();
            let scoped = ctx.intern(&format!("{prefix}__{field_name}"));
            let value = match &field.shape {
                FieldShape::Width(width) => FieldValue::Signal(ctx.signal_named(scoped, *width)),
                FieldShape::Sub(sub) => FieldValue::Record(Record::build(ctx, scoped, sub)),
            };
            fields.push(RecordEntry {
                name: field.name,
                value,
            });
        }
        Self {
            name,
            layout: layout.clone(),
            fields,
        }
    }

    /// Looks up a field by name.
    pub fn field(&self, name: Ident) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.value)
    }

    /// Returns the leaf signal of a field, if the field is a leaf.
    pub fn signal(&self, name: Ident) -> Option<&Signal> {
        match self.field(name) {
            Some(FieldValue::Signal(sig)) => Some(sig),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutField;

    #[test]
    fn build_flat_record() {
        let mut ctx = DesignContext::new();
        let layout = Layout::new(
            ctx.interner(),
            vec![
                LayoutField::leaf(ctx.intern("data"), 8),
                LayoutField::leaf(ctx.intern("strobe"), 1),
            ],
        )
        .unwrap();
        let name = ctx.intern("bus");
        let rec = Record::build(&mut ctx, name, &layout);
        assert_eq!(rec.fields.len(), 2);
        let data = rec.signal(ctx.intern("data")).unwrap();
        assert_eq!(data.width, 8);
    }

    #[test]
    fn build_nested_record() {
        let mut ctx = DesignContext::new();
        let inner = Layout::new(
            ctx.interner(),
            vec![
                LayoutField::leaf(ctx.intern("i"), 8),
                LayoutField::leaf(ctx.intern("o"), 8),
            ],
        )
        .unwrap();
        let layout = Layout::new(
            ctx.interner(),
            vec![LayoutField::nested(ctx.intern("data"), inner)],
        )
        .unwrap();
        let name = ctx.intern("pads");
        let rec = Record::build(&mut ctx, name, &layout);
        match rec.field(ctx.intern("data")).unwrap() {
            FieldValue::Record(sub) => {
                assert_eq!(sub.fields.len(), 2);
                assert!(sub.signal(ctx.intern("i")).is_some());
            }
            FieldValue::Signal(_) => panic!("expected nested record"),
        }
    }

    #[test]
    fn leaf_duids_are_distinct() {
        let mut ctx = DesignContext::new();
        let layout = Layout::new(
            ctx.interner(),
            vec![
                LayoutField::leaf(ctx.intern("a"), 1),
                LayoutField::leaf(ctx.intern("b"), 1),
            ],
        )
        .unwrap();
        let name = ctx.intern("r");
        let rec = Record::build(&mut ctx, name, &layout);
        let a = rec.signal(ctx.intern("a")).unwrap();
        let b = rec.signal(ctx.intern("b")).unwrap();
        assert_ne!(a.duid, b.duid);
    }

    #[test]
    fn leaf_names_are_hierarchical() {
        let mut ctx = DesignContext::new();
        let inner = Layout::new(
            ctx.interner(),
            vec![LayoutField::leaf(ctx.intern("i"), 8)],
        )
        .unwrap();
        let layout = Layout::new(
            ctx.interner(),
            vec![LayoutField::nested(ctx.intern("data"), inner)],
        )
        .unwrap();
        let name = ctx.intern("pads");
        let rec = Record::build(&mut ctx, name, &layout);
        let FieldValue::Record(sub) = rec.field(ctx.intern("data")).unwrap() else {
            panic!("expected nested record");
        };
        let sig = sub.signal(ctx.intern("i")).unwrap();
        assert_eq!(ctx.resolve(sig.name), "pads__data__i");
        assert_eq!(ctx.resolve(sub.name), "pads__data");
    }

    #[test]
    fn record_keeps_layout() {
        let mut ctx = DesignContext::new();
        let layout = Layout::new(
            ctx.interner(),
            vec![LayoutField::leaf(ctx.intern("x"), 4)],
        )
        .unwrap();
        let name = ctx.intern("r");
        let rec = Record::build(&mut ctx, name, &layout);
        assert_eq!(rec.layout, layout);
    }
}
