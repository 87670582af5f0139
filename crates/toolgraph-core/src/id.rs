//! Tool identifier derivation
//!
//! Identifiers come from the tool name: lowercased, whitespace runs turned
//! into `-`, and anything outside `[a-z0-9-]` removed. Records without a
//! usable name, or whose derived id is already taken, get a fallback built
//! from an [`IdGenerator`] suffix. The generator is the only source of
//! randomness in the engine and never influences similarity or clustering.

use std::collections::HashSet;
use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;
use tracing::{debug, warn};

use crate::record::{Record, Tool};

/// Prefix for records that have no usable name
pub const UNKNOWN_PREFIX: &str = "unknown-tool";

/// Length of random fallback suffixes
pub const SUFFIX_LEN: usize = 7;

/// Attempts at drawing a unique suffix before falling back to a counter
const MAX_SUFFIX_ATTEMPTS: usize = 16;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static ID_PATTERNS: OnceLock<Option<(Regex, Regex)>> = OnceLock::new();

fn id_patterns() -> Option<&'static (Regex, Regex)> {
    ID_PATTERNS
        .get_or_init(|| match (Regex::new(r"\s+"), Regex::new(r"[^a-z0-9-]")) {
            (Ok(whitespace), Ok(disallowed)) => Some((whitespace, disallowed)),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Failed to compile id regex");
                None
            }
        })
        .as_ref()
}

/// Derive the stable identifier for a tool name
///
/// May return an empty string when the name has no `[a-z0-9]` content.
pub fn derive_id(name: &str) -> String {
    let lowered = name.to_lowercase();
    match id_patterns() {
        Some((whitespace, disallowed)) => {
            let hyphenated = whitespace.replace_all(&lowered, "-");
            disallowed.replace_all(&hyphenated, "").into_owned()
        }
        // Empty ids fall through to the unknown-tool fallback
        None => String::new(),
    }
}

/// Source of fallback identifier suffixes
///
/// Implementations should return a fresh suffix on every call. Tests inject
/// deterministic stand-ins; production uses [`RandomIdGenerator`].
pub trait IdGenerator {
    fn next_suffix(&mut self) -> String;
}

/// Random base-36 suffixes drawn from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_suffix(&mut self) -> String {
        let mut rng = rand::thread_rng();
        (0..SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect()
    }
}

/// Pick `<base>-<suffix>` not yet in `taken`
fn fallback_id(base: &str, taken: &HashSet<String>, generator: &mut dyn IdGenerator) -> String {
    for _ in 0..MAX_SUFFIX_ATTEMPTS {
        let candidate = format!("{}-{}", base, generator.next_suffix());
        if !taken.contains(&candidate) {
            return candidate;
        }
    }

    // Generator keeps repeating itself; disambiguate with a counter
    let mut n = 1usize;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Attach identifiers to records, in catalog order
///
/// - Name present and derived id unused: the derived id.
/// - Name missing, blank, or deriving to nothing: `unknown-tool-<suffix>`.
/// - Derived id already used by an earlier record: `<derived>-<suffix>`.
pub fn assign_ids(records: &[Record], generator: &mut dyn IdGenerator) -> Vec<Tool> {
    let mut taken: HashSet<String> = HashSet::with_capacity(records.len());
    let mut tools = Vec::with_capacity(records.len());

    for record in records {
        let derived = record.name().map(derive_id).unwrap_or_default();

        let id = if derived.is_empty() {
            let id = fallback_id(UNKNOWN_PREFIX, &taken, generator);
            debug!(id = %id, "record has no usable name, using fallback id");
            id
        } else if taken.contains(&derived) {
            let id = fallback_id(&derived, &taken, generator);
            debug!(derived = %derived, id = %id, "duplicate tool id, disambiguated");
            id
        } else {
            derived
        };

        taken.insert(id.clone());
        tools.push(Tool::new(id, record.clone()));
    }

    tools
}
