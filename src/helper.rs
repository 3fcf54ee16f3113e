use std::{fs, path::Path};

use log::{debug, error, trace};

use crate::{Note, NoteError, Result};

/// Helper method to load a single note from file
pub fn load_note_from_file(path: &Path) -> Result<Note> {
    debug!("Loading note from file: {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| {
        error!("Failed to open note file {}: {}", path.display(), e);
        NoteError::Io(e)
    })?;

    let note: Note = serde_json::from_str(&content)?;

    // Validate note
    if note.id.is_empty() {
        let error_mgs = format!("Note from {} has an empty ID", path.display());
        error!("{}", error_mgs);
        return Err(NoteError::InvalidFormat { message: error_mgs });
    }

    trace!("Successfully loaded note: {}", note.id);
    Ok(note)
}

// Helper method for parsing comma-separated lists (tags, link ids)
pub fn parse_list(list: Option<String>) -> Vec<String> {
    list.map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// First non-empty line of `content`, cut to `max_chars` characters
pub fn content_preview(content: &str, max_chars: usize) -> String {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    if first_line.chars().count() <= max_chars {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_trims_and_skips_blanks() {
        assert_eq!(
            parse_list(Some(" a, b ,,c ".to_string())),
            vec!["a", "b", "c"]
        );
        assert!(parse_list(None).is_empty());
    }

    #[test]
    fn preview_cuts_on_char_boundary() {
        assert_eq!(content_preview("\n\nhéllo world", 5), "héllo...");
        assert_eq!(content_preview("short", 100), "short");
        assert_eq!(content_preview("", 10), "");
    }

    #[test]
    fn load_rejects_note_without_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"title":"no id"}"#).unwrap();
        assert!(matches!(
            load_note_from_file(&path),
            Err(NoteError::InvalidFormat { .. })
        ));
    }
}
