use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, error, info, trace, warn};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::{load_note_from_file, validate_id, Note, NoteError, NoteRepository, Result};

/// File-backed note repository.
///
/// Each note lives in its own JSON file at
/// `notes_dir/<first two chars of id>/<id>.json`. All notes are read into an
/// in-memory cache when the storage is opened; writes go to disk first and
/// then to the cache.
pub struct NoteStorage {
    /// Directory where notes are stored
    notes_dir: PathBuf,

    /// In-memory cache of notes, indexed by note ID
    notes_cache: HashMap<String, Note>,
}

impl NoteStorage {
    /// Opens the storage at `notes_dir`, creating the directory if needed and
    /// loading every note found beneath it.
    pub fn open(notes_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut storage = Self {
            notes_dir: notes_dir.into(),
            notes_cache: HashMap::new(),
        };

        info!(
            "Opening NoteStorage at notes_dir={}",
            storage.notes_dir.display()
        );

        if !storage.notes_dir.exists() {
            debug!(
                "Notes directory does not exist, creating: {}",
                storage.notes_dir.display()
            );
            fs::create_dir_all(&storage.notes_dir).map_err(|e| {
                error!("Failed to create notes directory: {}", e);
                NoteError::DirectoryError {
                    path: storage.notes_dir.clone(),
                }
            })?;
        }

        let count = storage.load_notes()?;
        info!("Loaded {} notes", count);
        Ok(storage)
    }

    /// Loads all notes from disk into the in-memory cache
    ///
    /// Files that cannot be read are logged and skipped.
    ///
    /// # Returns
    ///
    /// The number of notes loaded in case of success or an error
    pub fn load_notes(&mut self) -> Result<usize> {
        let mut notes_buffer = HashMap::new();
        let mut load_errors = 0usize;

        // Walk the notes directory and load all notes
        for entry in WalkDir::new(&self.notes_dir)
            .min_depth(1) // Skip the root directory
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            // Only process JSON files
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                match load_note_from_file(path) {
                    Ok(note) => {
                        notes_buffer.insert(note.id.clone(), note);
                    }
                    Err(e) => {
                        warn!("Failed to load note from {}: {}", path.display(), e);
                        load_errors += 1;
                    }
                }
            }
        }

        if load_errors > 0 {
            error!("Encountered {} errors while loading notes", load_errors);
        }

        let notes_count = notes_buffer.len();
        self.notes_cache = notes_buffer;
        Ok(notes_count)
    }

    /// Helper method to get the file path for a note
    fn get_note_path(&self, note_id: &str) -> Result<PathBuf> {
        validate_id(note_id)?;

        // Create path with structure: notes_dir/first_2_chars_of_id/note_id.json
        let id_prefix: String = note_id.chars().take(2).collect();

        Ok(self
            .notes_dir
            .join(id_prefix)
            .join(format!("{}.json", note_id)))
    }

    /// Writes a note to disk using a temp file and rename so a crash never
    /// leaves a half-written note behind.
    fn write_note_file(&self, note: &Note) -> Result<()> {
        let file_path = self.get_note_path(&note.id).map_err(|e| {
            error!("Refusing to save note: {}", e);
            e
        })?;
        debug!("File path for note: {}", file_path.display());

        // Ensure the parent directory exists
        let dir = file_path.parent().unwrap_or_else(|| Path::new("."));
        if !dir.exists() {
            debug!("Creating parent directory: {}", dir.display());
            fs::create_dir_all(dir).map_err(|e| {
                error!("Failed to create directory {}: {}", dir.display(), e);
                NoteError::Io(e)
            })?;
        }

        let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
            error!("Failed to create temporary file: {}", e);
            NoteError::Io(e)
        })?;

        trace!("Serializing note to JSON");
        let json = serde_json::to_string_pretty(note).map_err(|e| {
            error!("Failed to serialize note: {}", e);
            NoteError::Serialization(e)
        })?;

        temp_file.write_all(json.as_bytes()).map_err(|e| {
            error!("Failed to write to temporary file: {}", e);
            NoteError::Io(e)
        })?;

        temp_file.flush().map_err(|e| {
            error!("Failed to flush temporary file: {}", e);
            NoteError::Io(e)
        })?;

        debug!("Performing atomic move of temporary file to final location");
        temp_file.persist(&file_path).map_err(|e| {
            error!(
                "Failed to persist file {}: {}",
                file_path.display(),
                e.error
            );
            NoteError::Io(e.error)
        })?;

        Ok(())
    }

    /// Helper method to recursively clean up empty directories
    ///
    /// Checks if a directory is empty and removes it if it is.
    /// Then checks its parent directory and does the same recursively.
    fn cleanup_empty_directory(&self, dir_path: &Path) {
        // Skip if this is the root notes directory or doesn't exist
        if !dir_path.exists() || dir_path == self.notes_dir {
            return;
        }

        match fs::read_dir(dir_path) {
            Ok(mut entries) => {
                if entries.next().is_none() {
                    debug!("Removing empty directory: {}", dir_path.display());
                    match fs::remove_dir(dir_path) {
                        Ok(_) => {
                            if let Some(parent) = dir_path.parent() {
                                self.cleanup_empty_directory(parent);
                            }
                        }
                        Err(e) => warn!(
                            "Failed to remove empty directory {}: {}",
                            dir_path.display(),
                            e
                        ),
                    }
                }
            }
            Err(e) => warn!("Failed to read directory {}: {}", dir_path.display(), e),
        }
    }
}

impl NoteRepository for NoteStorage {
    /// Retrieves a note by its ID, falling back to disk if the cache misses
    fn get(&self, note_id: &str) -> Result<Option<Note>> {
        debug!("Retrieving note by ID: {}", note_id);

        if let Some(note) = self.notes_cache.get(note_id) {
            trace!("Note found in cache: {}", note_id);
            return Ok(Some(note.clone()));
        }

        // Ids that cannot be file names were never stored
        let Ok(file_path) = self.get_note_path(note_id) else {
            debug!("Note not found: {}", note_id);
            return Ok(None);
        };
        if file_path.exists() {
            debug!("Note file exists at: {}", file_path.display());
            return load_note_from_file(&file_path).map(Some);
        }

        debug!("Note not found: {}", note_id);
        Ok(None)
    }

    fn put(&mut self, note: &Note) -> Result<()> {
        info!("Saving note: {}", note.id);
        self.write_note_file(note)?;
        self.notes_cache.insert(note.id.clone(), note.clone());
        info!("Note saved successfully: {}", note.id);
        Ok(())
    }

    fn delete(&mut self, note_id: &str) -> Result<()> {
        info!("Deleting note: {}", note_id);
        let Ok(file_path) = self.get_note_path(note_id) else {
            debug!("Note id {:?} cannot exist on disk, nothing to delete", note_id);
            return Ok(());
        };

        if file_path.exists() {
            debug!("Deleting note file: {}", file_path.display());
            fs::remove_file(&file_path).map_err(|e| {
                error!("Failed to delete note file {}: {}", file_path.display(), e);
                NoteError::Io(e)
            })?;

            if let Some(parent) = file_path.parent() {
                self.cleanup_empty_directory(parent);
            }
        } else {
            debug!("Note file doesn't exist on disk, only removing from cache");
        }

        self.notes_cache.remove(note_id);
        info!("Note {} successfully deleted", note_id);
        Ok(())
    }

    fn list(&self) -> Result<Vec<Note>> {
        debug!("Listing {} notes from cache", self.notes_cache.len());
        Ok(self.notes_cache.values().cloned().collect())
    }
}
