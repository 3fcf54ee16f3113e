//! Note operations on top of a repository.
//!
//! Every operation that needs collision or relation context reads the full
//! note set from the repository right before it runs. Nothing is cached here,
//! so a projection built after a write always sees that write.
use chrono::Utc;
use log::{debug, error, info, warn};

use crate::{
    normalize, resolve_alias, validate_id, GraphProjection, ImportSummary, Note, NoteDraft,
    NoteError, NoteRepository, Result,
};

pub struct NoteService<R> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Fresh snapshot of every stored note.
    pub fn universe(&self) -> Result<Vec<Note>> {
        self.repo.list()
    }

    /// Loads a note; an unknown id is `Ok(None)`, not an error.
    pub fn load(&self, id: &str) -> Result<Option<Note>> {
        self.repo.get(id)
    }

    /// Loads a note that must exist.
    pub fn require(&self, id: &str) -> Result<Note> {
        self.repo.get(id)?.ok_or_else(|| {
            error!("Note not found: {}", id);
            NoteError::NoteNotFound { id: id.to_string() }
        })
    }

    /// Creates or fully replaces a note.
    ///
    /// Fills defaults, stamps timestamps, gives the note an alias no other
    /// stored note uses, and writes it.
    pub fn save(&mut self, draft: NoteDraft) -> Result<Note> {
        let universe = self.repo.list()?;
        let mut note = normalize(draft, Utc::now());
        note.alias = resolve_alias(&note, &universe);

        self.repo.put(&note)?;
        info!("Saved note {} as '{}'", note.id, note.alias);
        Ok(note)
    }

    /// Deletes a note and returns what was removed.
    ///
    /// Links from other notes to it are left in place and are filtered out when
    /// projections are built.
    pub fn delete(&mut self, id: &str) -> Result<Note> {
        let note = self.require(id)?;
        self.repo.delete(id)?;
        info!("Deleted note {}", id);
        Ok(note)
    }

    /// Imports a JSON array of notes.
    ///
    /// The payload must be an array; anything else is rejected before a single
    /// write. Elements are normalized and stored as-is, without alias
    /// resolution. Elements that are not note objects, or whose id cannot be
    /// stored, are skipped and reported in the summary.
    pub fn import_json(&mut self, payload: &str) -> Result<ImportSummary> {
        let value: serde_json::Value =
            serde_json::from_str(payload).map_err(|e| NoteError::MalformedImport {
                message: format!("invalid JSON: {}", e),
            })?;

        let serde_json::Value::Array(elements) = value else {
            error!("Import payload is not a JSON array");
            return Err(NoteError::MalformedImport {
                message: "expected a JSON array of notes".to_string(),
            });
        };

        let mut summary = ImportSummary {
            total_notes: elements.len(),
            ..Default::default()
        };

        let mut drafts = Vec::with_capacity(elements.len());
        for (index, element) in elements.into_iter().enumerate() {
            let parsed = serde_json::from_value::<NoteDraft>(element)
                .map_err(NoteError::from)
                .and_then(|draft| {
                    // A blank id gets a fresh one on normalize
                    if let Some(id) = draft.id.as_deref().filter(|id| !id.is_empty()) {
                        validate_id(id)?;
                    }
                    Ok(draft)
                });

            match parsed {
                Ok(draft) => drafts.push(draft),
                Err(e) => {
                    warn!("Skipping import element {}: {}", index, e);
                    summary.failed_notes.push((index, e.to_string()));
                }
            }
        }

        let now = Utc::now();
        for draft in drafts {
            let note = normalize(draft, now);
            self.repo.put(&note)?;
            debug!("Imported note {}", note.id);
            summary.imported.push(note.id);
        }

        info!(
            "Imported {} of {} notes",
            summary.imported.len(),
            summary.total_notes
        );
        Ok(summary)
    }

    /// All notes as a pretty-printed JSON array, oldest first.
    pub fn export_json(&self) -> Result<String> {
        let mut notes = self.repo.list()?;
        notes.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(serde_json::to_string_pretty(&notes)?)
    }

    /// Graph projection of the current note set.
    pub fn graph(&self) -> Result<GraphProjection> {
        Ok(GraphProjection::build(&self.repo.list()?))
    }

    /// Writes a small linked welcome set when the repository is empty.
    ///
    /// Returns whether anything was written.
    pub fn seed_if_empty(&mut self) -> Result<bool> {
        if !self.repo.list()?.is_empty() {
            return Ok(false);
        }

        let first = crate::generate_id();
        let second = crate::generate_id();
        let seeds = [
            NoteDraft {
                title: Some("Welcome to Noteverse".to_string()),
                content: Some("This is the start of your journey. **Link me!**".to_string()),
                color: Some("#ff0055".to_string()),
                links: Some(vec![first.clone(), second.clone()]),
                ..Default::default()
            },
            NoteDraft {
                id: Some(first),
                title: Some("Visualization".to_string()),
                content: Some("Run `noteverse graph` to see how notes connect.".to_string()),
                color: Some("#00ccff".to_string()),
                ..Default::default()
            },
            NoteDraft {
                id: Some(second),
                title: Some("Time Travel".to_string()),
                content: Some("Check the timeline view.".to_string()),
                color: Some("#00ffaa".to_string()),
                ..Default::default()
            },
        ];

        for seed in seeds {
            self.save(seed)?;
        }
        info!("Seeded empty repository");
        Ok(true)
    }
}
