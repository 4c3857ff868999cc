//! Module definitions — the elaborated member tree handed to extraction.
//!
//! A [`Module`] exposes an ordered set of named members. The member kind is
//! a closed sum assigned at construction time, so classification never needs
//! to probe a value for attributes: a pin record is a pin record because it
//! was built from pads, an endpoint because it was built as one.

use crate::pads::PinRecord;
use crate::record::Record;
use crate::signal::Signal;
use crate::stream::Endpoint;
use serde::{Deserialize, Serialize};
use trestle_common::{Ident, Interner};

/// A resolved constant attached to a non-port member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstValue {
    /// An integer constant.
    Int(i64),
    /// A string constant.
    Str(String),
}

/// The kind of a module member, fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MemberKind {
    /// A bare signal.
    Signal(Signal),
    /// A plain record.
    Record(Record),
    /// A stream endpoint.
    Endpoint(Endpoint),
    /// A pin record derived from platform pads.
    Pins(PinRecord),
    /// A resolved parameter. Not a port; extraction skips it.
    Param(ConstValue),
}

/// One named member of a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// The member name, unique within the module.
    pub name: Ident,
    /// The member kind and value.
    pub kind: MemberKind,
}

/// Errors detected while assembling a module.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    /// Two members share the same name.
    #[error("duplicate member `{name}` in module")]
    DuplicateMember {
        /// The offending member name.
        name: String,
    },
}

/// An elaborated module: a name plus its ordered members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// The module name.
    pub name: Ident,
    members: Vec<Member>,
}

impl Module {
    /// Creates an empty module.
    pub fn new(name: Ident) -> Self {
        Self {
            name,
            members: Vec::new(),
        }
    }

    /// Adds a member, rejecting duplicate names.
    ///
    /// Member order is declaration order and is preserved by extraction and
    /// generation. The interner is needed only to report the offending name.
    pub fn add(
        &mut self,
        interner: &Interner,
        name: Ident,
        kind: MemberKind,
    ) -> Result<(), ModuleError> {
        if self.members.iter().any(|m| m.name == name) {
            return Err(ModuleError::DuplicateMember {
                name: interner.resolve(name).to_string(),
            });
        }
        self.members.push(Member { name, kind });
        Ok(())
    }

    /// Iterates over the members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    /// Looks up a member by name.
    pub fn member(&self, name: Ident) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Resolves a dotted path (`member.field[.sub[...]]`) to a leaf signal.
    ///
    /// Returns `None` if any segment is missing or the path ends on a
    /// record rather than a signal.
    pub fn signal_at(&self, interner: &Interner, path: &str) -> Option<&Signal> {
        let mut segments = path.split('.');
        let first = interner.get_or_intern(segments.next()?);
        let member = self.member(first)?;

        let mut record = match &member.kind {
            MemberKind::Signal(sig) => {
                return if segments.next().is_none() {
                    Some(sig)
                } else {
                    None
                };
            }
            MemberKind::Record(rec) => rec,
            MemberKind::Endpoint(ep) => ep.record(),
            MemberKind::Pins(pins) => &pins.record,
            MemberKind::Param(_) => return None,
        };

        let mut segments = segments.peekable();
        while let Some(segment) = segments.next() {
            let name = interner.get_or_intern(segment);
            match record.field(name)? {
                crate::record::FieldValue::Signal(sig) => {
                    return if segments.peek().is_none() {
                        Some(sig)
                    } else {
                        None
                    };
                }
                crate::record::FieldValue::Record(sub) => record = sub,
            }
        }
        None
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the module has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
