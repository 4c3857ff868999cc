//! Shared foundation types for the Trestle wrapper generator.
//!
//! Currently this is the string interner and the [`Ident`] handle used for
//! every declared name (module members, layout fields, pad bundles).

#![warn(missing_docs)]

mod ident;

pub use ident::{Ident, Interner};
