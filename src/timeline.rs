//! Timeline projection.
//!
//! Narrows the note set to one note and its direct neighbours when a focus is
//! set, then orders it by date, title or id. Neighbours are found through the
//! raw stored links, so a focus id that no longer exists still shows the notes
//! that point at it.
use std::cmp::Ordering;

use serde::{Serialize, Serializer};

use crate::{Note, SortDirection, SortKey};

/// What the timeline should show and in which order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineQuery {
    pub focus_id: Option<String>,
    pub sort_key: SortKey,
    pub direction: SortDirection,
}

/// How a listed note relates to the focus note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// The focus note links to this note
    Target,
    /// This note links to the focus note
    Source,
}

impl Relation {
    pub fn label(&self) -> &'static str {
        match self {
            Relation::Target => "links to this",
            Relation::Source => "linked from this",
        }
    }
}

/// Renderers get the human-readable label, not the variant name
impl Serialize for Relation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry<'a> {
    pub note: &'a Note,
    #[serde(rename = "relationLabel", skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
}

/// Relation of `note` to `focus`, or `None` if they are not neighbours.
///
/// A note that is both linked from and linking to the focus reports `Target`.
fn relation_to(note: &Note, focus_id: &str, focus: Option<&Note>) -> Option<Relation> {
    if focus.is_some_and(|f| f.links_to(&note.id)) {
        Some(Relation::Target)
    } else if note.links_to(focus_id) {
        Some(Relation::Source)
    } else {
        None
    }
}

fn compare(a: &Note, b: &Note, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a
            .created_at
            .timestamp_millis()
            .cmp(&b.created_at.timestamp_millis()),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::Id => a.id.to_lowercase().cmp(&b.id.to_lowercase()),
    }
}

/// Filters and sorts `notes` according to `query`.
///
/// Sorting is stable: notes with equal keys keep their input order in both
/// directions.
pub fn timeline<'a>(notes: &'a [Note], query: &TimelineQuery) -> Vec<TimelineEntry<'a>> {
    let mut entries: Vec<TimelineEntry<'a>> = match query.focus_id.as_deref() {
        None => notes
            .iter()
            .map(|note| TimelineEntry {
                note,
                relation: None,
            })
            .collect(),
        Some(focus_id) => {
            let focus = notes.iter().find(|n| n.id == focus_id);
            notes
                .iter()
                .filter_map(|note| {
                    if note.id == focus_id {
                        return Some(TimelineEntry {
                            note,
                            relation: None,
                        });
                    }
                    relation_to(note, focus_id, focus).map(|relation| TimelineEntry {
                        note,
                        relation: Some(relation),
                    })
                })
                .collect()
        }
    };

    entries.sort_by(|a, b| {
        let cmp = compare(a.note, b.note, query.sort_key);
        match query.direction {
            SortDirection::Ascending => cmp,
            SortDirection::Descending => cmp.reverse(),
        }
    });

    entries
}
