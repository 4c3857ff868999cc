//! The design construction context.
//!
//! [`DesignContext`] owns the string interner, the monotonic allocator for
//! signal unique identifiers, and the arena of registered platform pad
//! bundles. Every signal in a design must be created through the same
//! context so that its [`SignalId`] is unique across the whole member tree.

use crate::arena::Arena;
use crate::ids::{PadId, SignalId};
use crate::layout::Layout;
use crate::pads::PadBundle;
use crate::signal::Signal;
use trestle_common::{Ident, Interner};

/// Mutable state for constructing a design.
///
/// The duid allocator is a plain monotonic counter: identifiers are unique
/// for the lifetime of the context and never reused.
pub struct DesignContext {
    interner: Interner,
    next_duid: u32,
    pads: Arena<PadId, PadBundle>,
}

impl DesignContext {
    /// Creates a fresh context with no signals or pads.
    pub fn new() -> Self {
        Self {
            interner: Interner::new(),
            next_duid: 0,
            pads: Arena::new(),
        }
    }

    /// Returns the context's interner.
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Interns a name.
    pub fn intern(&self, s: &str) -> Ident {
        self.interner.get_or_intern(s)
    }

    /// Resolves an interned name back to its string.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.interner.resolve(ident)
    }

    /// Allocates the next globally unique signal identifier.
    pub fn alloc_duid(&mut self) -> SignalId {
        let id = SignalId::from_raw(self.next_duid);
        self.next_duid += 1;
        id
    }

    /// Creates a signal with a fresh duid and no reset value.
    pub fn signal(&mut self, name: &str, width: u32) -> Signal {
        let ident = self.interner.get_or_intern(name);
        self.signal_named(ident, width)
    }

    /// Creates a signal from an already-interned name.
    pub fn signal_named(&mut self, name: Ident, width: u32) -> Signal {
        Signal {
            duid: self.alloc_duid(),
            name,
            width,
            reset: None,
        }
    }

    /// Creates a signal with a reset value.
    pub fn signal_with_reset(&mut self, name: &str, width: u32, reset: u64) -> Signal {
        let mut sig = self.signal(name, width);
        sig.reset = Some(reset);
        sig
    }

    /// Registers a platform pad bundle and returns its handle.
    pub fn register_pads(&mut self, name: &str, layout: Layout) -> PadId {
        let name = self.interner.get_or_intern(name);
        self.pads.alloc(PadBundle { name, layout })
    }

    /// Returns a registered pad bundle.
    ///
    /// # Panics
    ///
    /// Panics if the ID was not issued by this context.
    pub fn pads(&self, id: PadId) -> &PadBundle {
        self.pads.get(id)
    }
}

impl Default for DesignContext {
    fn default() -> Self {
        Self::new()
    }
}
