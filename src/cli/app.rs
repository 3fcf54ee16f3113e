//! CLI module for the noteverse application
//!
//! This module handles the command-line interface for interacting with the
//! note service.
use std::{
    fs::{self, read_to_string},
    io::{stdin, stdout, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use console::style;
use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::{
    content_preview, display_names, parse_list, timeline, valid_links, Commands, Config, Note,
    NoteDraft, NoteError, NoteRepository, NoteService, Result, SortDirection, SortKey,
    TimelineEntry, TimelineQuery,
};

/// Service type the CLI works with, independent of the storage backend
pub type SharedService = Arc<Mutex<NoteService<Box<dyn NoteRepository + Send>>>>;

/// CLI Application handler - processes CLI commands and interfaces with the note service
pub struct App {
    /// The note service
    service: SharedService,

    /// Application configuration
    config: Config,

    /// Where the configuration is read from and written to
    config_path: PathBuf,

    /// Whether to display verbose output
    verbose: bool,
}

impl App {
    /// Create a new CLI application with the given service and config
    pub fn new(
        service: SharedService,
        config: Config,
        config_path: PathBuf,
        verbose: bool,
    ) -> Self {
        Self {
            service,
            config,
            config_path,
            verbose,
        }
    }

    /// Run the CLI application with the given command
    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::New {
                title,
                alias,
                content,
                file,
                color,
                tags,
                links,
            } => {
                let content = self.resolve_content(content, file)?;
                self.create_note(title, alias, content, color, tags, links)
                    .await?
            }

            Commands::Edit {
                id,
                title,
                alias,
                content,
                file,
                color,
            } => {
                let content = self.resolve_content(content, file)?;
                self.handle_edit(id, title, alias, content, color).await?
            }

            Commands::View { id, json } => self.view_note(id, json).await?,

            Commands::Delete { id, force } => self.handle_delete(id, force).await?,

            Commands::Link { id, target } => self.handle_link(id, target).await?,

            Commands::Tag { id, add, remove } => self.handle_tag(id, add, remove).await?,

            Commands::Graph => self.print_graph().await?,

            Commands::Timeline {
                focus,
                sort,
                order,
                json,
            } => self.show_timeline(focus, sort, order, json).await?,

            Commands::Connections { open } => self.list_connections(open).await?,

            Commands::Import { source } => self.handle_import(source).await?,

            Commands::Export { output } => self.handle_export(output).await?,

            Commands::Config { show, reset } => self.handle_config(show, reset)?,
        }

        Ok(())
    }

    /// Content given inline wins over content read from a file
    fn resolve_content(
        &self,
        content: Option<String>,
        file: Option<PathBuf>,
    ) -> Result<Option<String>> {
        match (content, file) {
            (Some(c), _) => Ok(Some(c)),
            (None, Some(path)) => self.read_content_from_file(&path).map(Some),
            (None, None) => Ok(None),
        }
    }

    fn read_content_from_file(&self, file_path: &Path) -> Result<String> {
        if !file_path.exists() {
            return Err(NoteError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", file_path.display()),
            )));
        }

        debug!("Reading note content from {}", file_path.display());
        read_to_string(file_path).map_err(NoteError::Io)
    }

    async fn create_note(
        &self,
        title: Option<String>,
        alias: Option<String>,
        content: Option<String>,
        color: Option<String>,
        tags: Option<String>,
        links: Option<String>,
    ) -> Result<()> {
        // Tags are unique regardless of case; later duplicates are dropped
        let mut scratch = Note::default();
        for tag in parse_list(tags) {
            if !scratch.add_tag(&tag) {
                println!("Tag '{}' already exists, skipping", tag);
            }
        }

        let links = parse_list(links);
        let mut service = self.service.lock().await;
        for target in &links {
            if service.load(target)?.is_none() {
                warn!("Link target {} does not exist", target);
            }
        }

        let note = service.save(NoteDraft {
            title,
            alias,
            content,
            color,
            tags: Some(scratch.tags),
            links: Some(links),
            ..Default::default()
        })?;

        println!("Note created successfully!");
        println!("ID:    {}", style(&note.id).bold());
        println!("Alias: {}", note.alias);
        Ok(())
    }

    async fn handle_edit(
        &self,
        id: String,
        title: Option<String>,
        alias: Option<String>,
        content: Option<String>,
        color: Option<String>,
    ) -> Result<()> {
        let mut service = self.service.lock().await;
        let mut note = service.require(&id)?;

        if title.is_none() && alias.is_none() && content.is_none() && color.is_none() {
            println!("No changes specified. Note remains unchanged.");
            return Ok(());
        }

        if let Some(title) = title {
            note.title = title;
        }
        if let Some(alias) = alias {
            note.alias = alias;
        }
        if let Some(content) = content {
            note.content = content;
        }
        if let Some(color) = color {
            note.color = color;
        }

        let saved = service.save(NoteDraft::from(note))?;
        println!("Note '{}' updated ({})", saved.alias, saved.id);
        Ok(())
    }

    async fn view_note(&self, id: String, json: bool) -> Result<()> {
        let service = self.service.lock().await;
        let note = service.require(&id)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&note)?);
            return Ok(());
        }

        let universe = service.universe()?;
        let names = display_names(&universe, Some(note.id.as_str()));
        let name_of = |target: &str| {
            names
                .iter()
                .find(|d| d.note.id == target)
                .map(|d| d.name.clone())
                .unwrap_or_else(|| target.to_string())
        };

        println!("ID:      {}", note.id);
        println!("Title:   {}", style(&note.title).bold());
        println!("Alias:   {}", note.alias);
        println!("Color:   {}", note.color);
        println!("Created: {}", note.created_at.format("%Y-%m-%d %H:%M:%S"));
        println!("Updated: {}", note.updated_at.format("%Y-%m-%d %H:%M:%S"));
        if !note.tags.is_empty() {
            let tags = note
                .tags
                .iter()
                .map(|tag| format!("#{}", tag))
                .collect::<Vec<_>>()
                .join(" ");
            println!("Tags:    {}", style(tags).cyan());
        }

        let links = valid_links(&universe);
        let outgoing: Vec<String> = links
            .iter()
            .find(|l| l.source == note.id)
            .map(|l| l.targets.iter().map(|t| name_of(*t)).collect())
            .unwrap_or_default();
        let incoming: Vec<String> = links
            .iter()
            .filter(|l| l.source != note.id && l.targets.contains(&note.id.as_str()))
            .map(|l| name_of(l.source))
            .collect();

        if !outgoing.is_empty() {
            println!("Links:   {}", outgoing.join(", "));
        }
        if !incoming.is_empty() {
            println!("Backlinks: {}", incoming.join(", "));
        }

        if !note.content.is_empty() {
            println!("\n{}", note.content);
        }
        Ok(())
    }

    async fn handle_delete(&self, id: String, force: bool) -> Result<()> {
        let mut service = self.service.lock().await;
        let note = service.require(&id)?;

        if !force {
            println!("You are about to delete the following note:");
            println!("ID:     {}", note.id);
            println!("Title:  {}", note.title);
            println!("Alias:  {}", note.alias);
            println!("Created: {}", note.created_at.format("%Y-%m-%d %H:%M:%S"));

            println!("\nThis action cannot be undone!");
            print!("Are you sure you want to delete this note? [y/N]: ");
            stdout().flush().map_err(NoteError::Io)?;

            let mut input = String::new();
            stdin().read_line(&mut input).map_err(NoteError::Io)?;

            let input = input.trim().to_lowercase();
            if input != "y" && input != "yes" {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        let deleted = service.delete(&id)?;
        println!(
            "Note '{}' ({}) has been permanently deleted.",
            deleted.title, deleted.id
        );
        Ok(())
    }

    async fn handle_link(&self, id: String, target: String) -> Result<()> {
        let mut service = self.service.lock().await;
        let mut note = service.require(&id)?;

        // Removing a dangling link is allowed, adding one is not
        if !note.links_to(&target) {
            service.require(&target)?;
        }

        let linked = note.toggle_link(&target);
        service.save(NoteDraft::from(note))?;

        if linked {
            println!("Linked {} -> {}", id, target);
        } else {
            println!("Unlinked {} -> {}", id, target);
        }
        Ok(())
    }

    async fn handle_tag(
        &self,
        id: String,
        add: Option<String>,
        remove: Option<String>,
    ) -> Result<()> {
        let mut service = self.service.lock().await;
        let mut note = service.require(&id)?;

        if add.is_none() && remove.is_none() {
            if note.tags.is_empty() {
                println!("Note has no tags.");
            } else {
                println!("{}", note.tags.join(", "));
            }
            return Ok(());
        }

        for tag in parse_list(add) {
            if !note.add_tag(&tag) {
                println!("Tag '{}' already exists!", tag);
            }
        }
        for tag in parse_list(remove) {
            if !note.remove_tag(&tag) {
                println!("Tag '{}' not found on note", tag);
            }
        }

        let saved = service.save(NoteDraft::from(note))?;
        println!("Tags: {}", saved.tags.join(", "));
        Ok(())
    }

    async fn print_graph(&self) -> Result<()> {
        let graph = self.service.lock().await.graph()?;
        if self.verbose {
            info!(
                "Graph has {} nodes and {} edges",
                graph.nodes.len(),
                graph.edges.len()
            );
        }
        println!("{}", serde_json::to_string_pretty(&graph)?);
        Ok(())
    }

    async fn show_timeline(
        &self,
        focus: Option<String>,
        sort: Option<SortKey>,
        order: Option<SortDirection>,
        json: bool,
    ) -> Result<()> {
        let universe = self.service.lock().await.universe()?;
        let query = TimelineQuery {
            focus_id: focus,
            sort_key: sort.unwrap_or(self.config.default_sort_key),
            direction: order.unwrap_or(self.config.default_sort_direction),
        };
        let entries = timeline(&universe, &query);

        if json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }

        if entries.is_empty() {
            println!("No related notes found.");
            return Ok(());
        }

        let heading = if query.focus_id.is_some() {
            "Note Timeline"
        } else {
            "Time Stream"
        };
        println!("{}\n", style(heading).bold());
        self.display_entries(&entries);
        Ok(())
    }

    fn display_entries(&self, entries: &[TimelineEntry<'_>]) {
        // Use terminal width for formatting if available
        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                println!("{}", "-".repeat(term_width.min(50)));
            }

            let note = entry.note;
            let date = if note.created_at.timestamp() == 0 {
                "Unknown Date".to_string()
            } else {
                note.created_at.format("%Y-%m-%d %H:%M").to_string()
            };
            let title = if note.title.is_empty() {
                "Untitled"
            } else {
                note.title.as_str()
            };

            println!("{} | {}", date, note.id);
            if note.alias.is_empty() {
                println!("{}", style(title).bold());
            } else {
                println!("{} ({})", style(title).bold(), note.alias);
            }
            if let Some(relation) = entry.relation {
                println!("{}", style(relation.label()).cyan());
            }

            let preview = content_preview(&note.content, 100);
            if !preview.is_empty() {
                println!("{}", preview);
            }
        }

        println!(
            "\nFound {} note{}",
            entries.len(),
            if entries.len() == 1 { "" } else { "s" }
        );
    }

    async fn list_connections(&self, open: Option<String>) -> Result<()> {
        let universe = self.service.lock().await.universe()?;
        let open_note = match open.as_deref() {
            Some(id) => universe.iter().find(|n| n.id == id),
            None => None,
        };

        let mut names = display_names(&universe, open.as_deref());
        names.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        for entry in names {
            let marker = if open_note.is_some_and(|n| n.links_to(&entry.note.id)) {
                "[x]"
            } else {
                "[ ]"
            };
            println!("{} {}  {}", marker, entry.name, style(&entry.note.id).dim());
        }
        Ok(())
    }

    async fn handle_import(&self, source: PathBuf) -> Result<()> {
        let payload = self.read_content_from_file(&source)?;
        let summary = self.service.lock().await.import_json(&payload)?;

        println!(
            "Imported {} of {} notes from {}",
            summary.imported.len(),
            summary.total_notes,
            source.display()
        );
        for (index, message) in &summary.failed_notes {
            println!("  element {}: {}", index, message);
        }
        Ok(())
    }

    async fn handle_export(&self, output: PathBuf) -> Result<()> {
        let json = self.service.lock().await.export_json()?;
        fs::write(&output, json)?;
        println!("Notes exported to {}", output.display());
        Ok(())
    }

    fn handle_config(&self, show: bool, reset: bool) -> Result<()> {
        if reset {
            Config::default().save(&self.config_path)?;
            println!("Configuration reset to defaults.");
        }

        if show || !reset {
            println!("Config file: {}", self.config_path.display());
            println!("{}", serde_json::to_string_pretty(&self.config)?);
        }
        Ok(())
    }
}
