//! Schema mutator: drag-and-drop edits as whole-state replacements.
//!
//! Every operation reads the current `FormState` and returns the next one;
//! the session publishes the result in one assignment. Unknown targets
//! degrade to a no-op (the input state, cloned) or to an append, never to
//! an error.
//!
//! Step membership follows the schema in lockstep: inserts land in the
//! current step next to their target, and deletes prune every step.

use crate::input::DropPosition;
use crate::steps::StepCursor;
use fb_core::catalog::{Item, entry_for_item};
use fb_core::id::{FieldId, StepId, allocate, base_key, drag_base_key};
use fb_core::layout::{GRID_COLUMNS, last_index_of_row, spans};
use fb_core::locale::Localizer;
use fb_core::model::{FormState, SchemaEntry, StepEntry};
use fb_core::transport;
use fb_core::view::displayed_ids;
use serde_json::Value;

const FULL_WIDTH: u8 = GRID_COLUMNS as u8;

/// Drop a palette item on the empty canvas.
///
/// The key is the item's base key, so dropping the same kind twice
/// overwrites the first entry in place.
pub fn insert_on_canvas(
    state: &FormState,
    cursor: &mut StepCursor,
    item: &Item,
    locale: &Localizer,
) -> FormState {
    let key = FieldId::intern(drag_base_key(&item.id));
    let mut next = state.clone();
    if next.schema.insert(key, entry_for_item(item, key)).is_some() {
        log::debug!("drop: overwrote `{key}`");
    }

    cursor.ensure_default_step(&mut next, locale);
    if let Some(step) = cursor.active_step_mut(&mut next)
        && !step.contains(key)
    {
        step.elements.push(key);
    }
    next
}

/// Drop a palette item on one edge of the displayed field at `index`.
pub fn insert_beside(
    state: &FormState,
    cursor: &StepCursor,
    position: DropPosition,
    item: &Item,
    index: usize,
) -> FormState {
    let displayed = displayed_ids(state, cursor.enabled, cursor.current);
    let Some(&target) = displayed.get(index) else {
        return state.clone();
    };

    let new_key = allocate(drag_base_key(&item.id), &state.schema);
    let mut entry = entry_for_item(item, new_key);
    entry.set_name(new_key);

    let mut next = state.clone();
    let Some(target_pos) = state.schema.position(target) else {
        next.schema.insert(new_key, entry);
        return next;
    };

    match position {
        DropPosition::Top => next.schema.insert_at(target_pos, new_key, entry),
        DropPosition::Bottom => {
            let row_end = last_index_of_row(&spans(&state.schema), target_pos);
            entry.set_column_span(FULL_WIDTH);
            next.schema.insert_at(row_end + 1, new_key, entry);
        }
        DropPosition::Left | DropPosition::Right => {
            let width = state.schema.get(target).map_or(FULL_WIDTH, SchemaEntry::column_span);
            let (left, right) = split_width(width);
            let (new_width, target_width, at) = match position {
                DropPosition::Left => (left, right, target_pos),
                _ => (right, left, target_pos + 1),
            };
            if let Some(target_entry) = next.schema.get_mut(target) {
                target_entry.set_column_span(target_width);
            }
            entry.set_column_span(new_width);
            next.schema.insert_at(at, new_key, entry);
        }
    }
    log::debug!("drop {position} of `{target}`: inserted `{new_key}`");

    if let Some(step) = cursor.active_step_mut(&mut next) {
        // An imported step may still list the freshly allocated key.
        step.elements.retain(|el| *el != new_key);
        match step.elements.iter().position(|el| *el == target) {
            Some(i) if position.is_before() => step.elements.insert(i, new_key),
            Some(i) => step.elements.insert(i + 1, new_key),
            None => step.elements.push(new_key),
        }
    }
    next
}

/// Split a column width into (left-hand, right-hand) pieces. The left-hand
/// piece gets the smaller half; neither piece is narrower than 1.
fn split_width(width: u8) -> (u8, u8) {
    let half = width / 2;
    (half.max(1), (width - half).max(1))
}

/// Duplicate a displayed field right after itself.
pub fn copy_entry(state: &FormState, cursor: &StepCursor, id: FieldId) -> FormState {
    if !displayed_ids(state, cursor.enabled, cursor.current).contains(&id) {
        return state.clone();
    }
    let (Some(entry), Some(pos)) = (state.schema.get(id), state.schema.position(id)) else {
        return state.clone();
    };

    let new_key = allocate(base_key(id.as_str()), &state.schema);
    let mut next = state.clone();
    next.schema.insert_at(pos + 1, new_key, entry.clone());
    log::debug!("copy `{id}` as `{new_key}`");

    if let Some(step) = cursor.active_step_mut(&mut next) {
        step.elements.retain(|el| *el != new_key);
        match step.elements.iter().position(|el| *el == id) {
            Some(i) => step.elements.insert(i + 1, new_key),
            None => step.elements.push(new_key),
        }
    }
    next
}

/// Remove a field and every step reference to it. Steps left empty stay.
pub fn delete_entry(state: &FormState, id: FieldId) -> FormState {
    let mut next = state.clone();
    next.schema.remove(id);
    if let Some(steps) = next.steps.as_mut() {
        for step in steps.values_mut() {
            step.elements.retain(|el| *el != id);
        }
    }
    log::debug!("delete `{id}`");
    next
}

pub fn clear() -> FormState {
    FormState::new()
}

/// Bulk import. `None` means the candidate was empty and the current state
/// stays.
pub fn replace(candidate: &Value) -> Option<FormState> {
    transport::coerce(candidate)
}

/// Properties-panel write-back of one entry, kept at its position.
pub fn update_entry(state: &FormState, id: FieldId, entry: SchemaEntry) -> FormState {
    let mut next = state.clone();
    if next.schema.contains(id) {
        next.schema.insert(id, entry);
    }
    next
}

/// Properties-panel write-back of one step. Elements that are not schema
/// keys, and repeats, are dropped.
pub fn update_step(state: &FormState, id: StepId, mut step: StepEntry) -> FormState {
    let mut next = state.clone();
    let mut seen = Vec::with_capacity(step.elements.len());
    step.elements.retain(|el| {
        let keep = state.schema.contains(*el) && !seen.contains(el);
        seen.push(*el);
        keep
    });
    if let Some(slot) = next.step_mut(id) {
        *slot = step;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use fb_core::catalog::FieldKind;
    use fb_core::model::Label;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn item(kind: FieldKind) -> Item {
        kind.item(&Localizer::default())
    }

    fn keys(state: &FormState) -> Vec<&'static str> {
        state.schema.keys().map(|k| k.as_str()).collect()
    }

    fn width(state: &FormState, key: &str) -> u8 {
        state.schema.get(FieldId::intern(key)).unwrap().column_span()
    }

    fn canvas(kinds: &[FieldKind]) -> (FormState, StepCursor) {
        let locale = Localizer::default();
        let mut cursor = StepCursor::default();
        let mut state = FormState::new();
        for &kind in kinds {
            state = insert_on_canvas(&state, &mut cursor, &item(kind), &locale);
        }
        (state, cursor)
    }

    #[test]
    fn split_width_pieces() {
        assert_eq!(split_width(12), (6, 6));
        assert_eq!(split_width(7), (3, 4));
        assert_eq!(split_width(1), (1, 1));
    }

    #[test]
    fn canvas_drop_overwrites_same_kind() {
        let (state, _) = canvas(&[FieldKind::Text, FieldKind::Email]);
        let mut edited = state.clone();
        edited
            .schema
            .get_mut(FieldId::intern("text"))
            .unwrap()
            .set_column_span(4);

        let mut cursor = StepCursor::default();
        let again = insert_on_canvas(&edited, &mut cursor, &item(FieldKind::Text), &Localizer::default());
        assert_eq!(keys(&again), vec!["text", "email"]);
        assert_eq!(width(&again, "text"), 12);
    }

    #[test]
    fn side_drop_out_of_range_is_noop() {
        let (state, cursor) = canvas(&[FieldKind::Text]);
        let next = insert_beside(&state, &cursor, DropPosition::Top, &item(FieldKind::Email), 5);
        assert_eq!(next, state);
    }

    #[test]
    fn top_inserts_before_target() {
        let (state, cursor) = canvas(&[FieldKind::Text, FieldKind::Email]);
        let next = insert_beside(&state, &cursor, DropPosition::Top, &item(FieldKind::Text), 1);
        assert_eq!(keys(&next), vec!["text", "text_1", "email"]);
        let value = serde_json::to_value(next.schema.get(FieldId::intern("text_1")).unwrap()).unwrap();
        assert_eq!(value["name"], json!("text_1"));
    }

    #[test]
    fn bottom_goes_after_the_row() {
        let (mut state, cursor) = canvas(&[FieldKind::Text, FieldKind::Email, FieldKind::Number]);
        state.schema.get_mut(FieldId::intern("text")).unwrap().set_column_span(6);
        state.schema.get_mut(FieldId::intern("email")).unwrap().set_column_span(6);

        let next = insert_beside(&state, &cursor, DropPosition::Bottom, &item(FieldKind::Url), 0);
        assert_eq!(keys(&next), vec!["text", "email", "url", "number"]);
        assert_eq!(width(&next, "url"), 12);
    }

    #[test]
    fn right_split_puts_new_entry_after() {
        let (mut state, cursor) = canvas(&[FieldKind::Text]);
        state.schema.get_mut(FieldId::intern("text")).unwrap().set_column_span(7);

        let next = insert_beside(&state, &cursor, DropPosition::Right, &item(FieldKind::Email), 0);
        assert_eq!(keys(&next), vec!["text", "email"]);
        assert_eq!(width(&next, "text"), 3);
        assert_eq!(width(&next, "email"), 4);
    }

    #[test]
    fn stale_step_listing_is_repositioned() {
        let a = FieldId::intern("a");
        let mut state = transport::coerce(&json!({
            "schema": { "a": { "type": "text", "name": "a" } },
            "steps": { "page0": { "label": "One", "elements": ["a", "text"] } }
        }))
        .unwrap();
        let mut cursor = StepCursor::default();
        cursor.mount(&mut state, &Localizer::default());

        let next = insert_beside(&state, &cursor, DropPosition::Top, &item(FieldKind::Text), 0);
        let text = FieldId::intern("text");
        assert_eq!(keys(&next), vec!["text", "a"]);
        assert_eq!(next.step(StepId::intern("page0")).unwrap().elements, vec![text, a]);
    }

    #[test]
    fn copy_of_hidden_target_is_noop() {
        let locale = Localizer::default();
        let (mut state, mut cursor) = canvas(&[FieldKind::Text]);
        cursor.start_steps(&mut state, &locale);
        let page1 = cursor.add_step(&mut state, &locale).unwrap();
        cursor.select(&state, page1);

        let next = copy_entry(&state, &cursor, FieldId::intern("text"));
        assert_eq!(next, state);
    }

    #[test]
    fn copy_numbered_key_uses_its_base() {
        let (state, cursor) = canvas(&[FieldKind::Text]);
        let state = copy_entry(&state, &cursor, FieldId::intern("text"));
        let state = copy_entry(&state, &cursor, FieldId::intern("text_1"));
        assert_eq!(keys(&state), vec!["text", "text_1", "text_2"]);
    }

    #[test]
    fn delete_prunes_every_step_and_keeps_empty_steps() {
        let locale = Localizer::default();
        let (mut state, mut cursor) = canvas(&[FieldKind::Text, FieldKind::Email]);
        cursor.start_steps(&mut state, &locale);
        let page1 = cursor.add_step(&mut state, &locale).unwrap();
        state.step_mut(page1).unwrap().elements.push(FieldId::intern("text"));

        let next = delete_entry(&state, FieldId::intern("text"));
        assert_eq!(keys(&next), vec!["email"]);
        assert_eq!(next.step(StepId::intern("page0")).unwrap().elements, vec![FieldId::intern("email")]);
        assert!(next.step(page1).unwrap().elements.is_empty());
        assert_eq!(next.step_keys().len(), 2);
    }

    #[test]
    fn replace_ignores_empty_candidate() {
        assert_eq!(replace(&Value::Null), None);
        assert_eq!(replace(&json!({})), Some(FormState::new()));
    }

    #[test]
    fn update_entry_keeps_position_and_ignores_unknown() {
        let (state, _) = canvas(&[FieldKind::Text, FieldKind::Email]);
        let entry = SchemaEntry::from_value(json!({ "type": "textarea", "name": "text" }));

        let next = update_entry(&state, FieldId::intern("text"), entry.clone());
        assert_eq!(keys(&next), vec!["text", "email"]);
        assert_eq!(next.schema.get(FieldId::intern("text")), Some(&entry));

        let same = update_entry(&state, FieldId::intern("ghost"), entry);
        assert_eq!(same, state);
    }

    #[test]
    fn update_step_drops_dangling_and_repeated_elements() {
        let locale = Localizer::default();
        let (mut state, mut cursor) = canvas(&[FieldKind::Text, FieldKind::Email]);
        cursor.start_steps(&mut state, &locale);
        let page0 = StepId::intern("page0");

        let text = FieldId::intern("text");
        let step = StepEntry::new("Intro", vec![text, FieldId::intern("ghost"), text]);
        let next = update_step(&state, page0, step);
        let updated = next.step(page0).unwrap();
        assert_eq!(updated.elements, vec![text]);
        assert_eq!(updated.label, Label::from("Intro"));
    }
}
