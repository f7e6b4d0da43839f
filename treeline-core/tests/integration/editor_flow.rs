//! End-to-end editing scenarios against the editor facade

use treeline_core::{
    ActionOutcome, DropOutcome, EditorCore, EntityId, ItemPatch, ItemStore, Slot, StateUpdate,
    action_ids,
};

fn inserted(outcome: ActionOutcome) -> EntityId {
    match outcome {
        ActionOutcome::Inserted(id) => id,
        ActionOutcome::Unhandled => panic!("expected an insertion"),
    }
}

/// Builds the document used in these scenarios:
///
/// ```text
/// Root
/// ├── Chapter   (node)
/// │   └── Intro (text)
/// └── Notes     (node)
/// ```
fn sample_editor() -> (EditorCore, EntityId, EntityId, EntityId, EntityId) {
    let mut editor = EditorCore::seeded();
    let root = editor.hierarchy().entries()[0].id;

    let notes = inserted(editor.trigger_action(Some(root), action_ids::ADD_NODE).unwrap());
    let chapter = inserted(editor.trigger_action(Some(root), action_ids::ADD_NODE).unwrap());
    let intro = inserted(editor.trigger_action(Some(chapter), action_ids::ADD_TEXT).unwrap());

    assert!(editor.update_item(chapter, ItemPatch::label("Chapter")));
    assert!(editor.update_item(notes, ItemPatch::label("Notes")));
    assert!(editor.update_item(intro, ItemPatch::label("Intro")));

    (editor, root, chapter, intro, notes)
}

fn child_ids(editor: &EditorCore, parent: Option<EntityId>) -> Vec<EntityId> {
    editor
        .hierarchy()
        .children(parent)
        .iter()
        .map(|entry| entry.id)
        .collect()
}

#[test]
fn building_the_sample_document() {
    let (editor, root, chapter, intro, notes) = sample_editor();

    // add-node inserts at position 0, so the last insertion leads.
    assert_eq!(child_ids(&editor, Some(root)), vec![chapter, notes]);
    assert_eq!(child_ids(&editor, Some(chapter)), vec![intro]);

    // Every insertion auto-expanded its parent.
    assert!(editor.state().state(root).is_open);
    assert!(editor.state().state(chapter).is_open);
}

#[test]
fn drag_reorders_siblings() {
    let (mut editor, root, chapter, _, notes) = sample_editor();

    // Drag "Notes" above "Chapter".
    editor.drag(Some(notes));
    let target = *editor.hierarchy().entry(chapter).unwrap();
    let outcome = editor
        .drop(Some(Slot::new(target.parent_id, target.position)))
        .unwrap();

    assert!(matches!(outcome, DropOutcome::Moved { .. }));
    assert_eq!(child_ids(&editor, Some(root)), vec![notes, chapter]);
}

#[test]
fn drag_reparents_across_the_tree() {
    let (mut editor, root, chapter, _, notes) = sample_editor();

    editor.drag(Some(notes));
    assert!(editor.can_target(chapter));
    let child_count = editor.hierarchy().children(Some(chapter)).len() as u32;
    editor
        .drop(Some(Slot::child_of(chapter, child_count)))
        .unwrap();

    assert_eq!(child_ids(&editor, Some(root)), vec![chapter]);
    assert_eq!(editor.hierarchy().parent_of(notes), Some(chapter));
}

#[test]
fn guard_refuses_targets_inside_the_dragged_subtree() {
    let (mut editor, _, chapter, intro, notes) = sample_editor();

    editor.drag(Some(chapter));
    assert!(!editor.can_target(chapter));
    assert!(!editor.can_target(intro), "intro is inside the dragged subtree");
    assert!(editor.can_target(notes));
    editor.drag(None);
    assert!(!editor.drag_coordinator().is_dragging());
}

#[test]
fn cancelled_drag_leaves_the_document_alone() {
    let (mut editor, root, ..) = sample_editor();
    let before = editor.hierarchy().entries().to_vec();

    let first_child = child_ids(&editor, Some(root))[0];
    editor.drag(Some(first_child));
    let outcome = editor.drop(None).unwrap();

    assert_eq!(outcome, DropOutcome::Cancelled);
    assert_eq!(editor.hierarchy().entries(), &before[..]);
}

#[test]
fn selection_follows_mode_switches() {
    let (mut editor, _, chapter, intro, notes) = sample_editor();

    // Plain clicks: single-select.
    editor.update_state(chapter, StateUpdate::selected(true));
    editor.update_state(notes, StateUpdate::selected(true));
    assert_eq!(editor.selection().len(), 1);
    assert_eq!(editor.selection()[0].id, notes);

    // Shift held: selections accumulate.
    editor.set_multi_select(true);
    editor.update_state(intro, StateUpdate::selected(true));
    let selected: Vec<_> = editor.selection().iter().map(|item| item.id).collect();
    assert!(selected.contains(&notes) && selected.contains(&intro));

    // Shift released: the next click collapses the selection again.
    editor.set_multi_select(false);
    editor.update_state(chapter, StateUpdate::selected(true));
    assert_eq!(editor.selection().len(), 1);
    assert_eq!(editor.selection()[0].id, chapter);
}

#[test]
fn removing_a_subtree_cascades_every_store() {
    let (mut editor, root, chapter, intro, notes) = sample_editor();
    editor.update_state(intro, StateUpdate::selected(true));

    let removed = editor.remove(chapter).unwrap();
    let removed_ids: Vec<_> = removed.iter().map(|entity| entity.id).collect();
    assert_eq!(removed_ids, vec![chapter, intro]);

    assert_eq!(child_ids(&editor, Some(root)), vec![notes]);
    assert!(editor.items().get_item(chapter).is_none());
    assert!(editor.items().get_item(intro).is_none());
    assert!(editor.selection().is_empty());
    assert!(editor.hierarchy().validate());
}

#[test]
fn snapshot_restore_preserves_the_document() {
    let (mut editor, root, chapter, intro, _) = sample_editor();
    editor.update_state(intro, StateUpdate::selected(true));

    let restored = EditorCore::from_snapshot(editor.snapshot());

    assert_eq!(
        child_ids(&restored, Some(root)),
        child_ids(&editor, Some(root))
    );
    assert_eq!(
        restored.items().get_item(chapter).unwrap().label,
        "Chapter"
    );
    assert!(restored.state().state(intro).is_selected);
    assert!(restored.hierarchy().validate());
}
