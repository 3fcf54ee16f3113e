//! Alias resolution.
//!
//! Every save assigns the note an alias no other note currently uses. The
//! preferred name is probed first, then `name (1)`, `name (2)`, and so on.
use log::debug;

use crate::Note;

/// Name used when a note has neither alias nor title
pub const UNTITLED: &str = "Untitled";

/// Name the candidate note would like to have before collision suffixing.
fn preferred_name(candidate: &Note) -> String {
    let alias = candidate.alias.trim();
    if !alias.is_empty() {
        return alias.to_string();
    }

    let title = candidate.title.trim();
    if !title.is_empty() {
        return title.to_string();
    }

    UNTITLED.to_string()
}

/// Returns true if some other note already answers to `name`.
///
/// Notes without an alias answer to their title.
fn is_taken(name: &str, candidate_id: &str, universe: &[Note]) -> bool {
    universe.iter().any(|n| {
        n.id != candidate_id && (n.alias == name || (n.alias.is_empty() && n.title == name))
    })
}

/// Computes the alias to store on `candidate`, given every note currently in
/// the repository.
///
/// The universe may include the candidate itself; its own entry never counts as
/// a collision, so re-saving a note keeps its alias.
pub fn resolve_alias(candidate: &Note, universe: &[Note]) -> String {
    let base = preferred_name(candidate);
    let mut resolved = base.clone();
    let mut counter = 1u64;

    while is_taken(&resolved, &candidate.id, universe) {
        resolved = format!("{} ({})", base, counter);
        counter += 1;
    }

    if resolved != base {
        debug!(
            "Alias '{}' taken, note {} resolved to '{}'",
            base, candidate.id, resolved
        );
    }
    resolved
}
