//! Link integrity filtering.
//!
//! Deleting a note leaves links pointing at it in place. Every read path that
//! walks edges goes through `valid_links` so those dangling entries are never
//! followed. Stored notes are not modified.
use std::collections::HashSet;

use log::trace;

use crate::Note;

/// Outgoing links of one note whose targets exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteLinks<'a> {
    pub source: &'a str,
    /// Surviving targets, in stored order, duplicates kept
    pub targets: Vec<&'a str>,
}

/// Set of ids present in the given notes.
pub fn note_ids(notes: &[Note]) -> HashSet<&str> {
    notes.iter().map(|n| n.id.as_str()).collect()
}

/// For each note, in input order, the links whose target is in `notes`.
pub fn valid_links(notes: &[Note]) -> Vec<NoteLinks<'_>> {
    let ids = note_ids(notes);

    notes
        .iter()
        .map(|note| {
            let targets: Vec<&str> = note
                .links
                .iter()
                .map(String::as_str)
                .filter(|target| ids.contains(target))
                .collect();

            let dropped = note.links.len() - targets.len();
            if dropped > 0 {
                trace!("Note {} has {} dangling link(s)", note.id, dropped);
            }

            NoteLinks {
                source: note.id.as_str(),
                targets,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, links: &[&str]) -> Note {
        Note {
            id: id.to_string(),
            links: links.iter().map(|l| l.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn dangling_targets_are_dropped_in_order() {
        let notes = vec![note("a", &["b", "gone", "c", "b"]), note("b", &[]), note("c", &[])];
        let links = valid_links(&notes);

        assert_eq!(links.len(), 3);
        assert_eq!(links[0].source, "a");
        assert_eq!(links[0].targets, vec!["b", "c", "b"]);
        assert!(links[1].targets.is_empty());
    }

    #[test]
    fn self_links_survive() {
        let notes = vec![note("a", &["a"])];
        assert_eq!(valid_links(&notes)[0].targets, vec!["a"]);
    }

    #[test]
    fn stored_links_are_untouched() {
        let notes = vec![note("a", &["missing"])];
        let _ = valid_links(&notes);
        assert_eq!(notes[0].links, vec!["missing"]);
    }
}
