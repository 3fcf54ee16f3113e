//! Display-name disambiguation for note pick lists.
//!
//! Purely cosmetic. Two notes can have distinct aliases and still show the same
//! name (one note's alias equal to another's fallback title), so names that
//! repeat within a list get a short id prefix appended.
use std::collections::HashMap;

use crate::{Note, UNTITLED};

/// Number of id characters used to tell equal names apart
const ID_PREFIX_LEN: usize = 4;

/// A note together with the name it should be shown under
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayName<'a> {
    pub note: &'a Note,
    pub name: String,
}

/// Alias if set, else title if set, else "Untitled".
pub fn base_name(note: &Note) -> &str {
    if !note.alias.is_empty() {
        &note.alias
    } else if !note.title.is_empty() {
        &note.title
    } else {
        UNTITLED
    }
}

/// Names for every note except the one currently open, in input order.
pub fn display_names<'a>(notes: &'a [Note], open_id: Option<&str>) -> Vec<DisplayName<'a>> {
    let shown: Vec<&Note> = notes
        .iter()
        .filter(|n| Some(n.id.as_str()) != open_id)
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for &note in &shown {
        *counts.entry(base_name(note)).or_default() += 1;
    }

    shown
        .into_iter()
        .map(|note| {
            let base = base_name(note);
            let name = if counts.get(base).copied().unwrap_or(0) > 1 {
                let prefix: String = note.id.chars().take(ID_PREFIX_LEN).collect();
                format!("{} ({})", base, prefix)
            } else {
                base.to_string()
            };
            DisplayName { note, name }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, title: &str, alias: &str) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            alias: alias.to_string(),
            ..Default::default()
        }
    }

    fn names(list: &[DisplayName<'_>]) -> Vec<String> {
        list.iter().map(|d| d.name.clone()).collect()
    }

    #[test]
    fn equal_titles_get_id_prefix() {
        let notes = vec![
            note("a1b2-x", "Draft", ""),
            note("c3d4-y", "Draft", ""),
            note("e5f6-z", "Final", ""),
        ];
        assert_eq!(
            names(&display_names(&notes, None)),
            vec!["Draft (a1b2)", "Draft (c3d4)", "Final"]
        );
    }

    #[test]
    fn alias_matching_other_title_is_disambiguated() {
        let notes = vec![note("1111", "Plan", ""), note("2222", "Other", "Plan")];
        assert_eq!(
            names(&display_names(&notes, None)),
            vec!["Plan (1111)", "Plan (2222)"]
        );
    }

    #[test]
    fn open_note_is_excluded_and_not_counted() {
        let notes = vec![
            note("aaaa", "Draft", ""),
            note("bbbb", "Draft", ""),
            note("cccc", "Final", ""),
        ];
        let list = display_names(&notes, Some("aaaa"));
        assert_eq!(names(&list), vec!["Draft", "Final"]);
        assert_eq!(list[0].note.id, "bbbb");
    }

    #[test]
    fn blank_notes_show_as_untitled() {
        let notes = vec![note("ab", "", ""), note("cd", "", "")];
        assert_eq!(
            names(&display_names(&notes, None)),
            vec!["Untitled (ab)", "Untitled (cd)"]
        );
    }
}
