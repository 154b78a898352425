//! Integration tests: drag-and-drop editing through `FormSession`.

use fb_core::catalog::FieldKind;
use fb_core::id::{FieldId, StepId};
use fb_core::model::FormState;
use fb_core::transport;
use fb_editor::input::DropPosition;
use fb_editor::session::{FormMutation, FormSession};
use pretty_assertions::assert_eq;

fn drop_on_canvas(session: &mut FormSession, kind: FieldKind) {
    let item = kind.item(session.locale());
    session.apply_mutation(FormMutation::DropOnCanvas { item });
}

fn drop_beside(session: &mut FormSession, kind: FieldKind, position: DropPosition, index: usize) {
    let item = kind.item(session.locale());
    session.apply_mutation(FormMutation::DropBeside {
        position,
        item,
        index,
    });
}

fn keys(state: &FormState) -> Vec<&'static str> {
    state.schema.keys().map(|k| k.as_str()).collect()
}

fn step_elements(session: &FormSession, step: &str) -> Vec<&'static str> {
    session
        .state()
        .step(StepId::intern(step))
        .map(|s| s.elements.iter().map(|el| el.as_str()).collect())
        .unwrap_or_default()
}

fn span(session: &FormSession, key: &str) -> u8 {
    session
        .state()
        .schema
        .get(FieldId::intern(key))
        .map(|entry| entry.column_span())
        .unwrap_or_default()
}

// ─── Canvas drops ───────────────────────────────────────────────────────

#[test]
fn repeated_canvas_drop_overwrites_in_place() {
    let mut session = FormSession::default();
    drop_on_canvas(&mut session, FieldKind::Text);
    drop_on_canvas(&mut session, FieldKind::Email);

    session.apply_mutation(FormMutation::UpdateEntry {
        id: FieldId::intern("text"),
        entry: Box::new(FieldKind::Textarea.default_entry(FieldId::intern("text"), "text")),
    });
    drop_on_canvas(&mut session, FieldKind::Text);

    assert_eq!(keys(session.state()), vec!["text", "email"]);
    assert_eq!(
        session.state().schema.get(FieldId::intern("text")).map(|e| e.type_name()),
        Some("text")
    );
}

#[test]
fn canvas_drop_joins_current_step() {
    let mut session = FormSession::default();
    session.apply_mutation(FormMutation::StartSteps);
    drop_on_canvas(&mut session, FieldKind::Text);
    drop_on_canvas(&mut session, FieldKind::Text);
    assert_eq!(step_elements(&session, "page0"), vec!["text"]);
}

// ─── Edge drops ─────────────────────────────────────────────────────────

#[test]
fn left_drop_splits_full_width_target() {
    let mut session = FormSession::default();
    drop_on_canvas(&mut session, FieldKind::Text);
    drop_beside(&mut session, FieldKind::Email, DropPosition::Left, 0);

    assert_eq!(keys(session.state()), vec!["email", "text"]);
    assert_eq!(span(&session, "email"), 6);
    assert_eq!(span(&session, "text"), 6);
}

#[test]
fn right_drop_follows_target() {
    let mut session = FormSession::default();
    drop_on_canvas(&mut session, FieldKind::Text);
    drop_beside(&mut session, FieldKind::Email, DropPosition::Right, 0);
    assert_eq!(keys(session.state()), vec!["text", "email"]);
    assert_eq!(span(&session, "text"), 6);
    assert_eq!(span(&session, "email"), 6);
}

#[test]
fn bottom_drop_lands_after_the_row() {
    let mut session = FormSession::default();
    drop_on_canvas(&mut session, FieldKind::Text);
    drop_beside(&mut session, FieldKind::Email, DropPosition::Right, 0);
    drop_on_canvas(&mut session, FieldKind::Textarea);

    // Row 0 is text+email; dropping below text skips past email.
    drop_beside(&mut session, FieldKind::Url, DropPosition::Bottom, 0);
    assert_eq!(keys(session.state()), vec!["text", "email", "url", "textarea"]);
    assert_eq!(span(&session, "url"), 12);
}

#[test]
fn top_drop_allocates_fresh_key() {
    let mut session = FormSession::default();
    drop_on_canvas(&mut session, FieldKind::Text);
    drop_beside(&mut session, FieldKind::Text, DropPosition::Top, 0);
    assert_eq!(keys(session.state()), vec!["text_1", "text"]);
}

#[test]
fn edge_drop_on_missing_index_is_ignored() {
    let mut session = FormSession::default();
    drop_on_canvas(&mut session, FieldKind::Text);
    let before = session.state().clone();
    drop_beside(&mut session, FieldKind::Email, DropPosition::Left, 5);
    assert_eq!(session.state(), &before);
}

#[test]
fn edge_drop_inside_a_step_keeps_step_order() {
    let mut session = FormSession::default();
    drop_on_canvas(&mut session, FieldKind::Text);
    session.apply_mutation(FormMutation::StartSteps);
    drop_beside(&mut session, FieldKind::Email, DropPosition::Left, 0);
    drop_beside(&mut session, FieldKind::Url, DropPosition::Bottom, 1);
    assert_eq!(step_elements(&session, "page0"), vec!["email", "text", "url"]);
}

#[test]
fn top_and_right_drops_sit_next_to_target_in_step() {
    let mut session = FormSession::default();
    drop_on_canvas(&mut session, FieldKind::Text);
    drop_on_canvas(&mut session, FieldKind::Textarea);
    session.apply_mutation(FormMutation::StartSteps);

    drop_beside(&mut session, FieldKind::Email, DropPosition::Top, 1);
    assert_eq!(step_elements(&session, "page0"), vec!["text", "email", "textarea"]);

    drop_beside(&mut session, FieldKind::Url, DropPosition::Right, 0);
    assert_eq!(step_elements(&session, "page0"), vec!["text", "url", "email", "textarea"]);
    assert_eq!(keys(session.state()), vec!["text", "url", "email", "textarea"]);
}

#[test]
fn import_with_deleted_key_then_top_drop() {
    let mut session = FormSession::default();
    session.apply_mutation(FormMutation::Replace {
        candidate: serde_json::json!({
            "schema": { "a": { "type": "text", "name": "a" }, "text": null },
            "steps": { "page0": { "label": "One", "elements": ["a", "text"] } }
        }),
    });
    assert_eq!(step_elements(&session, "page0"), vec!["a"]);

    drop_beside(&mut session, FieldKind::Text, DropPosition::Top, 0);
    assert_eq!(keys(session.state()), vec!["text", "a"]);
    assert_eq!(step_elements(&session, "page0"), vec!["text", "a"]);
}

// ─── Copy / delete ──────────────────────────────────────────────────────

#[test]
fn copy_places_clone_after_original() {
    let mut session = FormSession::default();
    drop_on_canvas(&mut session, FieldKind::Text);
    drop_on_canvas(&mut session, FieldKind::Email);
    session.apply_mutation(FormMutation::StartSteps);

    session.apply_mutation(FormMutation::Copy {
        id: FieldId::intern("text"),
    });
    assert_eq!(keys(session.state()), vec!["text", "text_1", "email"]);
    assert_eq!(step_elements(&session, "page0"), vec!["text", "text_1", "email"]);

    session.apply_mutation(FormMutation::Copy {
        id: FieldId::intern("text_1"),
    });
    assert_eq!(keys(session.state()), vec!["text", "text_1", "text_2", "email"]);
}

#[test]
fn delete_prunes_every_step() {
    let mut session = FormSession::default();
    drop_on_canvas(&mut session, FieldKind::Text);
    session.apply_mutation(FormMutation::StartSteps);
    session.apply_mutation(FormMutation::AddStep);
    session.next_step();
    drop_on_canvas(&mut session, FieldKind::Text);
    assert_eq!(step_elements(&session, "page1"), vec!["text"]);

    session.apply_mutation(FormMutation::Delete {
        id: FieldId::intern("text"),
    });
    assert!(session.state().schema.is_empty());
    assert!(step_elements(&session, "page0").is_empty());
    assert!(step_elements(&session, "page1").is_empty());
    assert_eq!(session.state().step_keys().len(), 2);
}

// ─── Steps ──────────────────────────────────────────────────────────────

#[test]
fn removing_only_step_disables_steps_for_good() {
    let mut session = FormSession::default();
    session.apply_mutation(FormMutation::StartSteps);
    session.apply_mutation(FormMutation::RemoveStep {
        id: StepId::intern("page0"),
    });
    assert!(!session.steps_enabled());
    assert_eq!(session.current_step(), None);
    assert_eq!(session.state().steps, None);

    drop_on_canvas(&mut session, FieldKind::Text);
    assert_eq!(session.state().steps, None);
}

#[test]
fn steps_filter_the_canvas() {
    let mut session = FormSession::default();
    drop_on_canvas(&mut session, FieldKind::Text);
    session.apply_mutation(FormMutation::StartSteps);
    session.apply_mutation(FormMutation::AddStep);
    session.select_step(StepId::intern("page1"));
    drop_on_canvas(&mut session, FieldKind::Email);

    let shown: Vec<&str> = session.displayed_ids().iter().map(|k| k.as_str()).collect();
    assert_eq!(shown, vec!["email"]);
    session.prev_step();
    let shown: Vec<&str> = session.displayed_items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(shown, vec!["text"]);
}

// ─── Import / export ────────────────────────────────────────────────────

#[test]
fn export_then_replace_is_identity() {
    let mut session = FormSession::default();
    drop_on_canvas(&mut session, FieldKind::Text);
    drop_beside(&mut session, FieldKind::Slider, DropPosition::Right, 0);
    drop_beside(&mut session, FieldKind::File, DropPosition::Bottom, 0);
    session.apply_mutation(FormMutation::StartSteps);
    session.apply_mutation(FormMutation::AddStep);
    session.apply_mutation(FormMutation::Copy {
        id: FieldId::intern("text"),
    });

    let exported = transport::to_value(session.state()).unwrap();
    let before = session.state().clone();
    session.apply_mutation(FormMutation::Clear);
    session.apply_mutation(FormMutation::Replace { candidate: exported });

    assert_eq!(session.state(), &before);
    assert!(session.steps_enabled());
    assert_eq!(session.current_step(), Some(StepId::intern("page0")));
}

#[test]
fn empty_import_keeps_the_form() {
    let mut session = FormSession::default();
    drop_on_canvas(&mut session, FieldKind::Text);
    let before = session.state().clone();
    session.apply_mutation(FormMutation::Replace {
        candidate: serde_json::Value::Null,
    });
    assert_eq!(session.state(), &before);
}
