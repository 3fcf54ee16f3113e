//! Core data structures for the noteverse application.
//!
//! `Note` is the complete stored shape; `NoteDraft` is whatever the caller has
//! on hand before a save. `normalize` turns the latter into the former.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{NoteError, Result};

/// Color given to notes saved without one
pub const DEFAULT_COLOR: &str = "#ffffff";

/// Represents a single note in our system
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Note {
    /// Unique identifier for the note
    pub id: String,
    /// Note title
    pub title: String,
    /// Unique connection name, assigned on every save
    pub alias: String,
    /// Note content, opaque markup
    pub content: String,
    /// Hex color
    pub color: String,
    /// Tags for organization
    pub tags: Vec<String>,
    /// Outgoing links, by note id
    pub links: Vec<String>,
    /// When the note was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Adds a tag unless it is blank or already present (ignoring case).
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }

        let lowered = tag.to_lowercase();
        if self.tags.iter().any(|t| t.to_lowercase() == lowered) {
            return false;
        }

        self.tags.push(tag.to_string());
        true
    }

    /// Removes a tag by exact match. Returns whether anything was removed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Removes every link to `target` if one exists, otherwise appends it.
    ///
    /// Returns `true` when the link is present afterwards.
    pub fn toggle_link(&mut self, target: &str) -> bool {
        if self.links.iter().any(|l| l == target) {
            self.links.retain(|l| l != target);
            false
        } else {
            self.links.push(target.to_string());
            true
        }
    }

    pub fn links_to(&self, target: &str) -> bool {
        self.links.iter().any(|l| l == target)
    }
}

/// A partial note, as typed by a user or read from an import file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteDraft {
    pub id: Option<String>,
    pub title: Option<String>,
    pub alias: Option<String>,
    pub content: Option<String>,
    pub color: Option<String>,
    pub tags: Option<Vec<String>>,
    pub links: Option<Vec<String>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Note> for NoteDraft {
    fn from(note: Note) -> Self {
        NoteDraft {
            id: Some(note.id),
            title: Some(note.title),
            alias: Some(note.alias),
            content: Some(note.content),
            color: Some(note.color),
            tags: Some(note.tags),
            links: Some(note.links),
            created_at: Some(note.created_at),
            updated_at: Some(note.updated_at),
        }
    }
}

/// Generates a fresh, globally unique note id
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Rejects ids that cannot be stored, because they would escape the notes
/// directory when used as a file name.
pub fn validate_id(note_id: &str) -> Result<()> {
    if note_id.is_empty() || note_id.starts_with('.') || note_id.contains(['/', '\\']) {
        return Err(NoteError::InvalidFormat {
            message: format!("Note id {:?} cannot be used as a file name", note_id),
        });
    }
    Ok(())
}

/// Fills in every missing field of a draft and stamps it with `now`.
///
/// The id and creation time are kept when present. The update time is always
/// `now`, raised to the creation time if that lies in the future.
pub fn normalize(draft: NoteDraft, now: DateTime<Utc>) -> Note {
    let id = draft
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(generate_id);
    let created_at = draft.created_at.unwrap_or(now);
    let color = draft
        .color
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_COLOR.to_string());

    Note {
        id,
        title: draft.title.unwrap_or_default(),
        alias: draft.alias.unwrap_or_default(),
        content: draft.content.unwrap_or_default(),
        color,
        tags: draft.tags.unwrap_or_default(),
        links: draft.links.unwrap_or_default(),
        created_at,
        updated_at: now.max(created_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn normalize_fills_defaults_for_empty_draft() {
        let now = Utc::now();
        let note = normalize(NoteDraft::default(), now);

        assert!(!note.id.is_empty());
        assert_eq!(note.color, DEFAULT_COLOR);
        assert!(note.tags.is_empty());
        assert!(note.links.is_empty());
        assert_eq!(note.created_at, now);
        assert_eq!(note.updated_at, now);
    }

    #[test]
    fn normalize_keeps_id_and_creation_time() {
        let created = Utc::now() - Duration::days(3);
        let now = Utc::now();
        let draft = NoteDraft {
            id: Some("abc".to_string()),
            created_at: Some(created),
            updated_at: Some(created),
            color: Some("#00ccff".to_string()),
            ..Default::default()
        };

        let note = normalize(draft, now);
        assert_eq!(note.id, "abc");
        assert_eq!(note.created_at, created);
        assert_eq!(note.updated_at, now);
        assert_eq!(note.color, "#00ccff");
    }

    #[test]
    fn normalize_never_lets_update_precede_creation() {
        let now = Utc::now();
        let future = now + Duration::hours(1);
        let draft = NoteDraft {
            created_at: Some(future),
            ..Default::default()
        };

        let note = normalize(draft, now);
        assert!(note.created_at <= note.updated_at);
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = normalize(NoteDraft::default(), Utc::now());
        let b = normalize(NoteDraft::default(), Utc::now());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn validate_id_accepts_uuids_and_rejects_paths() {
        assert!(validate_id(&generate_id()).is_ok());
        for id in ["", ".hidden", "../x", "a/b", "a\\b"] {
            assert!(validate_id(id).is_err(), "id {:?} should be rejected", id);
        }
    }

    #[test]
    fn add_tag_rejects_case_insensitive_duplicates() {
        let mut note = Note::default();
        assert!(note.add_tag("Rust"));
        assert!(!note.add_tag("rust"));
        assert!(!note.add_tag("   "));
        assert!(note.add_tag(" graphs "));
        assert_eq!(note.tags, vec!["Rust", "graphs"]);

        assert!(note.remove_tag("Rust"));
        assert!(!note.remove_tag("Rust"));
        assert_eq!(note.tags, vec!["graphs"]);
    }

    #[test]
    fn toggle_link_adds_then_removes_all_occurrences() {
        let mut note = Note {
            links: vec!["b".into(), "c".into(), "b".into()],
            ..Default::default()
        };

        assert!(!note.toggle_link("b"));
        assert_eq!(note.links, vec!["c"]);
        assert!(note.toggle_link("b"));
        assert_eq!(note.links, vec!["c", "b"]);
    }

    #[test]
    fn stored_json_uses_camel_case_and_tolerates_missing_fields() {
        let note: Note = serde_json::from_str(r#"{"id":"x","title":"Only title"}"#).unwrap();
        assert_eq!(note.id, "x");
        assert!(note.alias.is_empty());
        assert_eq!(note.created_at.timestamp(), 0);

        let json = serde_json::to_value(&note).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
