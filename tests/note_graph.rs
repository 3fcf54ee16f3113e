use std::collections::HashSet;

use noteverse::{
    display_names, timeline, GraphProjection, NoteDraft, NoteRepository, NoteService,
    NoteStorage, Relation, SortDirection, SortKey, TimelineQuery,
};

fn draft(title: &str, links: &[&str]) -> NoteDraft {
    NoteDraft {
        title: Some(title.to_string()),
        links: Some(links.iter().map(|l| l.to_string()).collect()),
        ..Default::default()
    }
}

#[test]
fn aliases_stay_unique_across_sequential_saves() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = NoteService::new(NoteStorage::open(dir.path()).unwrap());

    for title in ["Idea", "Idea", "Idea", "Other", "Idea (1)", ""] {
        service.save(draft(title, &[])).unwrap();
    }

    let notes = service.universe().unwrap();
    let aliases: HashSet<&str> = notes.iter().map(|n| n.alias.as_str()).collect();
    assert_eq!(aliases.len(), notes.len());
    assert!(aliases.contains("Idea (2)"));
    assert!(aliases.contains("Idea (1) (1)"));
    assert!(aliases.contains("Untitled"));
}

#[test]
fn notes_survive_reopening_the_storage() {
    let dir = tempfile::tempdir().unwrap();
    let saved = {
        let mut service = NoteService::new(NoteStorage::open(dir.path()).unwrap());
        let mut note = service.save(draft("Persistent", &[])).unwrap();
        note.add_tag("Keep");
        service.save(NoteDraft::from(note)).unwrap()
    };

    let service = NoteService::new(NoteStorage::open(dir.path()).unwrap());
    let loaded = service.load(&saved.id).unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert!(loaded.created_at <= loaded.updated_at);
}

#[test]
fn deleting_a_note_leaves_other_links_but_drops_edges() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = NoteService::new(NoteStorage::open(dir.path()).unwrap());

    let b = service.save(draft("B", &[])).unwrap();
    let c = service.save(draft("C", &[])).unwrap();
    let a = service.save(draft("A", &[b.id.as_str(), c.id.as_str()])).unwrap();
    assert_eq!(service.graph().unwrap().edges.len(), 2);

    service.delete(&b.id).unwrap();

    let stored_a = service.repository().get(&a.id).unwrap().unwrap();
    assert_eq!(stored_a.links, vec![b.id.clone(), c.id.clone()]);

    let graph = service.graph().unwrap();
    let node_ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].target, c.id);
    for edge in &graph.edges {
        assert!(node_ids.contains(edge.source.as_str()));
        assert!(node_ids.contains(edge.target.as_str()));
    }
}

#[test]
fn timeline_focus_reports_relations_from_stored_notes() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = NoteService::new(NoteStorage::open(dir.path()).unwrap());

    let b = service.save(draft("B", &[])).unwrap();
    let a = service.save(draft("A", &[b.id.as_str()])).unwrap();
    service.save(draft("C", &[])).unwrap();

    let universe = service.universe().unwrap();
    let query = TimelineQuery {
        focus_id: Some(b.id.clone()),
        sort_key: SortKey::Title,
        direction: SortDirection::Ascending,
    };
    let entries = timeline(&universe, &query);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].note.id, a.id);
    assert_eq!(entries[0].relation, Some(Relation::Source));
    assert_eq!(entries[1].note.id, b.id);
    assert_eq!(entries[1].relation, None);

    let query = TimelineQuery {
        focus_id: Some(a.id.clone()),
        ..query
    };
    let entries = timeline(&universe, &query);
    let b_entry = entries.iter().find(|e| e.note.id == b.id).unwrap();
    assert_eq!(b_entry.relation, Some(Relation::Target));
}

#[test]
fn imported_duplicates_show_disambiguated_names() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = NoteService::new(NoteStorage::open(dir.path()).unwrap());

    let payload = r#"[
        {"id":"a1b2-0001","title":"Draft"},
        {"id":"c3d4-0002","title":"Draft"},
        {"id":"e5f6-0003","title":"Final"}
    ]"#;
    service.import_json(payload).unwrap();

    let mut universe = service.universe().unwrap();
    universe.sort_by(|a, b| a.id.cmp(&b.id));
    let names: Vec<String> = display_names(&universe, None)
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["Draft (a1b2)", "Draft (c3d4)", "Final"]);

    let graph = GraphProjection::build(&universe);
    assert!(graph.nodes.iter().all(|n| n.color == "#ffffff"));
}
