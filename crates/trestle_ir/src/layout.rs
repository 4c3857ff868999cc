//! Named-field layouts — the shape description records are built from.
//!
//! A [`Layout`] is an ordered sequence of named fields. Each field is either
//! a fixed-width leaf or a nested layout, and optionally carries a fan-out/
//! fan-in hint consumed by the streaming framework. The bridging core treats
//! hints as opaque.

use serde::{Deserialize, Serialize};
use trestle_common::{Ident, Interner};

/// The shape of a single layout field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldShape {
    /// A leaf wire of the given bit width.
    Width(u32),
    /// A nested layout.
    Sub(Layout),
}

/// A direction hint attached to a layout field.
///
/// Hints describe how the streaming framework drives the field (fan-out from
/// the producer, fan-in from the consumer). They are carried through record
/// construction but never inspected by extraction or generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldHint {
    /// No hint.
    None,
    /// Driven by the producer side.
    FanOut,
    /// Driven by the consumer side.
    FanIn,
}

/// One named field of a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutField {
    /// The field name. Unique within its layout.
    pub name: Ident,
    /// The field shape: leaf width or nested layout.
    pub shape: FieldShape,
    /// Optional streaming-framework direction hint.
    pub hint: FieldHint,
}

impl LayoutField {
    /// Creates a leaf field of the given width with no hint.
    pub fn leaf(name: Ident, width: u32) -> Self {
        Self {
            name,
            shape: FieldShape::Width(width),
            hint: FieldHint::None,
        }
    }

    /// Creates a nested field with no hint.
    pub fn nested(name: Ident, layout: Layout) -> Self {
        Self {
            name,
            shape: FieldShape::Sub(layout),
            hint: FieldHint::None,
        }
    }

    /// Returns a copy of this field with the given hint.
    pub fn with_hint(mut self, hint: FieldHint) -> Self {
        self.hint = hint;
        self
    }
}

/// Errors detected while constructing a layout.
///
/// Both variants are fatal: a malformed layout is rejected before any
/// extraction or generation work begins.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// Two fields share the same name.
    #[error("field `{name}` already attributed in layout")]
    DuplicateField {
        /// The offending field name.
        name: String,
    },

    /// A payload field collides with a reserved endpoint field name.
    #[error("field `{name}` cannot be used in an endpoint payload layout")]
    ReservedField {
        /// The offending field name.
        name: String,
    },
}

/// An ordered sequence of named fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    fields: Vec<LayoutField>,
}

impl Layout {
    /// Creates a layout from the given fields.
    ///
    /// Fails with [`LayoutError::DuplicateField`] if two fields share a name.
    /// The interner is needed only to report the offending name.
    pub fn new(interner: &Interner, fields: Vec<LayoutField>) -> Result<Self, LayoutError> {
        let mut seen = std::collections::HashSet::new();
        for field in &fields {
            if !seen.insert(field.name) {
                return Err(LayoutError::DuplicateField {
                    name: interner.resolve(field.name).to_string(),
                });
            }
        }
        Ok(Self { fields })
    }

    /// Creates a layout from fields already known to be well-formed,
    /// e.g. derived from a validated layout.
    pub(crate) fn from_fields(fields: Vec<LayoutField>) -> Self {
        Self { fields }
    }

    /// Iterates over the fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &LayoutField> {
        self.fields.iter()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the layout has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up a field by name.
    pub fn field(&self, name: Ident) -> Option<&LayoutField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_layout() {
        let interner = Interner::new();
        let data = interner.get_or_intern("data");
        let clk = interner.get_or_intern("clk");
        let layout = Layout::new(
            &interner,
            vec![LayoutField::leaf(data, 8), LayoutField::leaf(clk, 1)],
        )
        .unwrap();
        assert_eq!(layout.len(), 2);
        assert!(layout.field(data).is_some());
    }

    #[test]
    fn duplicate_field_rejected() {
        let interner = Interner::new();
        let data = interner.get_or_intern("data");
        let err = Layout::new(
            &interner,
            vec![LayoutField::leaf(data, 8), LayoutField::leaf(data, 4)],
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateField { .. }));
        assert!(err.to_string().contains("data"));
    }

    #[test]
    fn nested_layout() {
        let interner = Interner::new();
        let inner = Layout::new(
            &interner,
            vec![
                LayoutField::leaf(interner.get_or_intern("i"), 8),
                LayoutField::leaf(interner.get_or_intern("o"), 8),
            ],
        )
        .unwrap();
        let outer = Layout::new(
            &interner,
            vec![LayoutField::nested(
                interner.get_or_intern("data"),
                inner.clone(),
            )],
        )
        .unwrap();
        let field = outer.field(interner.get_or_intern("data")).unwrap();
        assert_eq!(field.shape, FieldShape::Sub(inner));
    }

    #[test]
    fn duplicate_across_nesting_levels_allowed() {
        // Field names only need to be unique within one layout level.
        let interner = Interner::new();
        let data = interner.get_or_intern("data");
        let inner = Layout::new(&interner, vec![LayoutField::leaf(data, 4)]).unwrap();
        let outer = Layout::new(&interner, vec![LayoutField::nested(data, inner)]);
        assert!(outer.is_ok());
    }

    #[test]
    fn hint_carried() {
        let interner = Interner::new();
        let valid = interner.get_or_intern("valid");
        let field = LayoutField::leaf(valid, 1).with_hint(FieldHint::FanOut);
        assert_eq!(field.hint, FieldHint::FanOut);
    }

    #[test]
    fn serde_roundtrip() {
        let interner = Interner::new();
        let layout = Layout::new(
            &interner,
            vec![LayoutField::leaf(interner.get_or_intern("x"), 3)],
        )
        .unwrap();
        let json = serde_json::to_string(&layout).unwrap();
        let back: Layout = serde_json::from_str(&json).unwrap();
        assert_eq!(layout, back);
    }
}
