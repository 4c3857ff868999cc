//! Member classification and path-map construction.
//!
//! [`extract`] walks a module's members in declaration order and produces
//! the ordered port list handed to lowering together with the [`Metadata`]
//! consumed by direction resolution and wrapper generation.

use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::debug;
use trestle_common::Interner;
use trestle_ir::{
    Endpoint, FieldValue, MemberKind, Module, PinRecord, Record, Signal, SignalId,
};

/// The extraction result: four name-keyed member maps plus the path map.
///
/// Map iteration order is member declaration order. Every signal reachable
/// from the module's members, nested record fields included, has exactly one
/// entry in `paths`; the dotted path is unique within one extraction and
/// only meaningful relative to it.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// Bare signal members, keyed by member name.
    pub signals: IndexMap<String, Signal>,
    /// Plain record members, keyed by member name.
    pub records: IndexMap<String, Record>,
    /// Pin record members, keyed by member name.
    pub pins: IndexMap<String, PinRecord>,
    /// Endpoint members, keyed by member name.
    pub endpoints: IndexMap<String, Endpoint>,
    /// Dotted path per reachable leaf signal.
    pub paths: HashMap<SignalId, String>,
}

impl Metadata {
    /// Looks up the dotted path of a signal.
    pub fn path(&self, duid: SignalId) -> Option<&str> {
        self.paths.get(&duid).map(String::as_str)
    }
}

/// The full result of walking a module: the exported port list and metadata.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Every reachable leaf signal, in walk order. This is the explicit
    /// port list handed to the lowering step.
    pub ports: Vec<Signal>,
    /// The extracted metadata.
    pub metadata: Metadata,
}

/// Walks a module's members and classifies them.
///
/// Signals register under their member name; records, endpoints, and pin
/// records register every reachable leaf signal under
/// `member.field[.sub[...]]`. Members that are not ports (resolved
/// parameters) are skipped — anything else is not a port, by policy, not by
/// accident. The module itself is never mutated.
pub fn extract(module: &Module, interner: &Interner) -> Extraction {
    let mut ports = Vec::new();
    let mut metadata = Metadata::default();

    for member in module.members() {
        let key = interner.resolve(member.name).to_string();
        match &member.kind {
            MemberKind::Signal(sig) => {
                debug!(member = %key, "classified as signal");
                ports.push(sig.clone());
                metadata.paths.insert(sig.duid, key.clone());
                metadata.signals.insert(key, sig.clone());
            }
            MemberKind::Record(rec) => {
                debug!(member = %key, "classified as record");
                walk_record(rec, &key, interner, &mut ports, &mut metadata);
                metadata.records.insert(key, rec.clone());
            }
            MemberKind::Endpoint(ep) => {
                debug!(member = %key, "classified as endpoint");
                walk_record(ep.record(), &key, interner, &mut ports, &mut metadata);
                metadata.endpoints.insert(key, ep.clone());
            }
            MemberKind::Pins(pins) => {
                debug!(member = %key, "classified as pins");
                walk_record(&pins.record, &key, interner, &mut ports, &mut metadata);
                metadata.pins.insert(key, pins.clone());
            }
            MemberKind::Param(_) => {
                debug!(member = %key, "skipped: not a port");
            }
        }
    }

    Extraction { ports, metadata }
}

/// Registers every leaf signal of a record under its dotted path.
fn walk_record(
    record: &Record,
    prefix: &str,
    interner: &Interner,
    ports: &mut Vec<Signal>,
    metadata: &mut Metadata,
) {
    for entry in &record.fields {
        let path = format!("{prefix}.{}", interner.resolve(entry.name));
        match &entry.value {
            FieldValue::Signal(sig) => {
                ports.push(sig.clone());
                metadata.paths.insert(sig.duid, path);
            }
            FieldValue::Record(sub) => {
                walk_record(sub, &path, interner, ports, metadata);
            }
        }
    }
}
