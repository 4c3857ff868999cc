//! Structural layout descriptors.
//!
//! A descriptor is the textual form of a layout embedded verbatim into
//! generated wrapper source, so it must be valid record-construction syntax
//! in the target framework: `[("name", 8), ("nested", [("i", 8), ...])]`.
//! Descriptor generation is a pure function of the layout — equal layouts
//! always produce byte-identical descriptors.

use trestle_common::Interner;
use trestle_ir::{Endpoint, FieldShape, Layout, Record};

/// Renders the descriptor of a layout.
pub fn describe_layout(interner: &Interner, layout: &Layout) -> String {
    let fields: Vec<String> = layout
        .fields()
        .map(|field| {
            let name = interner.resolve(field.name);
            match &field.shape {
                FieldShape::Width(width) => format!("(\"{name}\", {width})"),
                FieldShape::Sub(sub) => {
                    format!("(\"{name}\", {})", describe_layout(interner, sub))
                }
            }
        })
        .collect();
    format!("[{}]", fields.join(", "))
}

/// Renders the descriptor of a record: its full layout.
pub fn describe_record(interner: &Interner, record: &Record) -> String {
    describe_layout(interner, &record.layout)
}

/// Renders the descriptor of an endpoint: the payload layout only. The
/// handshake fields are re-created by the target framework's own endpoint
/// constructor.
pub fn describe_endpoint(interner: &Interner, endpoint: &Endpoint) -> String {
    describe_layout(interner, endpoint.payload_layout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trestle_ir::{DesignContext, LayoutField};

    #[test]
    fn flat_layout_descriptor() {
        let ctx = DesignContext::new();
        let layout = Layout::new(
            ctx.interner(),
            vec![
                LayoutField::leaf(ctx.intern("data"), 8),
                LayoutField::leaf(ctx.intern("clk"), 1),
            ],
        )
        .unwrap();
        assert_eq!(
            describe_layout(ctx.interner(), &layout),
            r#"[("data", 8), ("clk", 1)]"#
        );
    }

    #[test]
    fn nested_layout_descriptor() {
        let ctx = DesignContext::new();
        let inner = Layout::new(
            ctx.interner(),
            vec![
                LayoutField::leaf(ctx.intern("i"), 8),
                LayoutField::leaf(ctx.intern("o"), 8),
                LayoutField::leaf(ctx.intern("oe"), 1),
            ],
        )
        .unwrap();
        let layout = Layout::new(
            ctx.interner(),
            vec![
                LayoutField::nested(ctx.intern("data"), inner),
                LayoutField::leaf(ctx.intern("clk"), 1),
            ],
        )
        .unwrap();
        assert_eq!(
            describe_layout(ctx.interner(), &layout),
            r#"[("data", [("i", 8), ("o", 8), ("oe", 1)]), ("clk", 1)]"#
        );
    }

    #[test]
    fn empty_layout_descriptor() {
        let ctx = DesignContext::new();
        let layout = Layout::new(ctx.interner(), Vec::new()).unwrap();
        assert_eq!(describe_layout(ctx.interner(), &layout), "[]");
    }

    #[test]
    fn descriptor_is_deterministic() {
        let ctx = DesignContext::new();
        let layout = Layout::new(
            ctx.interner(),
            vec![
                LayoutField::leaf(ctx.intern("a"), 3),
                LayoutField::leaf(ctx.intern("b"), 5),
            ],
        )
        .unwrap();
        let first = describe_layout(ctx.interner(), &layout);
        let second = describe_layout(ctx.interner(), &layout.clone());
        assert_eq!(first, second);
    }

    #[test]
    fn endpoint_descriptor_is_payload_only() {
        let mut ctx = DesignContext::new();
        let payload = Layout::new(
            ctx.interner(),
            vec![LayoutField::leaf(ctx.intern("data"), 32)],
        )
        .unwrap();
        let name = ctx.intern("source");
        let ep = Endpoint::new(&mut ctx, name, payload).unwrap();
        assert_eq!(
            describe_endpoint(ctx.interner(), &ep),
            r#"[("data", 32)]"#
        );
    }

    #[test]
    fn record_descriptor_uses_full_layout() {
        let mut ctx = DesignContext::new();
        let layout = Layout::new(
            ctx.interner(),
            vec![LayoutField::leaf(ctx.intern("x"), 4)],
        )
        .unwrap();
        let name = ctx.intern("bus");
        let rec = Record::build(&mut ctx, name, &layout);
        assert_eq!(describe_record(ctx.interner(), &rec), r#"[("x", 4)]"#);
    }
}
