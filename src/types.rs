//! Shared types for the noteverse application.
//!
//! This module contains the Result alias, the timeline sort settings shared by
//! the library and the config file, and the CLI subcommands.
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::NoteError;

/// A specialized Result type for noteverse operations.
pub type Result<T> = std::result::Result<T, NoteError>;

/// Key used to order the timeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Creation time
    #[default]
    Date,
    /// Case-folded title
    Title,
    /// Case-folded note id
    Id,
}

/// Direction of the timeline ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[value(name = "asc")]
    Ascending,
    #[default]
    #[value(name = "desc")]
    Descending,
}

/// Summary of a bulk JSON import
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    /// Number of elements in the imported array
    pub total_notes: usize,
    /// Ids of the notes written to the repository
    pub imported: Vec<String>,
    /// Elements that could not be read as notes
    pub failed_notes: Vec<(usize, String)>, // (array index, error_message)
}

/// Available subcommands for the noteverse application
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    New {
        /// Title of the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// Unique connection name; falls back to the title
        #[clap(short, long)]
        alias: Option<String>,

        /// Content of the note, can be markdown formatted
        #[clap(short, long)]
        content: Option<String>,

        /// Path to a file containing the note's content
        #[clap(short, long)]
        file: Option<PathBuf>,

        /// Hex color of the note
        #[clap(long)]
        color: Option<String>,

        /// Tags to associate with the note (comma-separated)
        #[clap(short = 't', long)]
        tags: Option<String>,

        /// Ids of notes this note links to (comma-separated)
        #[clap(short, long)]
        links: Option<String>,
    },

    /// Edit an existing note
    Edit {
        /// ID of the note to edit
        id: String,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New alias for the note; pass an empty string to fall back to the title
        #[clap(short, long)]
        alias: Option<String>,

        /// New content for the note
        #[clap(short, long)]
        content: Option<String>,

        /// Path to a file containing the new note content
        #[clap(short, long)]
        file: Option<PathBuf>,

        /// New hex color for the note
        #[clap(long)]
        color: Option<String>,
    },

    /// View a note by ID
    View {
        /// ID of the note to view
        id: String,

        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Add or remove a link from one note to another
    Link {
        /// ID of the note that owns the link
        id: String,

        /// ID of the linked note
        target: String,
    },

    /// Tag operations (add, remove)
    Tag {
        /// ID of the note to modify
        id: String,

        /// Tags to add (comma-separated)
        #[clap(short, long)]
        add: Option<String>,

        /// Tags to remove (comma-separated)
        #[clap(short, long)]
        remove: Option<String>,
    },

    /// Print the note graph as JSON nodes and edges
    Graph,

    /// Show notes as a sorted stream, optionally around one note
    Timeline {
        /// Only show this note and its direct neighbours
        #[clap(short, long)]
        focus: Option<String>,

        /// Sort key (defaults to the configured one)
        #[clap(short, long, value_enum)]
        sort: Option<SortKey>,

        /// Sort direction (defaults to the configured one)
        #[clap(short, long, value_enum)]
        order: Option<SortDirection>,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// List notes that can be linked, with disambiguated names
    Connections {
        /// Note being edited; excluded from the list
        #[clap(short, long)]
        open: Option<String>,
    },

    /// Import notes from a JSON array
    Import {
        /// Path to the JSON file
        source: PathBuf,
    },

    /// Export all notes as a JSON array
    Export {
        /// Path where the JSON file will be written
        output: PathBuf,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Reset configuration to defaults
        #[clap(short, long)]
        reset: bool,
    },
}
