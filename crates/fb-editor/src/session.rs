//! The editing session: one form under edit.
//!
//! `FormSession` holds the authoritative `FormState` together with the
//! step cursor, the localizer, the in-flight drag and the properties-panel
//! selection. All edits arrive as a `FormMutation`; each one computes the
//! next state from the current one and publishes it in a single
//! assignment, so readers never see a half-applied edit.

use crate::input::{DragState, DropPosition};
use crate::mutator;
use crate::steps::StepCursor;
use crate::ui::PanelSelection;
use fb_core::catalog::{Item, Palette, palette};
use fb_core::id::{FieldId, StepId};
use fb_core::locale::Localizer;
use fb_core::model::{FormState, SchemaEntry, StepEntry};
use fb_core::view::{DisplayItem, displayed_ids, displayed_items};
use serde_json::Value;

/// An edit that goes through undo history.
#[derive(Debug, Clone)]
pub enum FormMutation {
    DropOnCanvas {
        item: Item,
    },
    DropBeside {
        position: DropPosition,
        item: Item,
        index: usize,
    },
    Copy {
        id: FieldId,
    },
    Delete {
        id: FieldId,
    },
    Clear,
    Replace {
        candidate: Value,
    },
    UpdateEntry {
        id: FieldId,
        entry: Box<SchemaEntry>,
    },
    UpdateStep {
        id: StepId,
        step: Box<StepEntry>,
    },
    StartSteps,
    AddStep,
    RemoveStep {
        id: StepId,
    },
    DeleteSteps,
}

pub struct FormSession {
    state: FormState,
    cursor: StepCursor,
    locale: Localizer,
    /// The current drag, as reported by the host.
    pub drag: DragState,
    selection: PanelSelection,
}

impl FormSession {
    pub fn new(locale: Localizer) -> Self {
        Self::from_state(FormState::new(), locale)
    }

    /// Open an existing form. Step mode is inferred from its step index.
    pub fn from_state(mut state: FormState, locale: Localizer) -> Self {
        let mut cursor = StepCursor::default();
        cursor.mount(&mut state, &locale);
        Self {
            state,
            cursor,
            locale,
            drag: DragState::default(),
            selection: PanelSelection::None,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn cursor(&self) -> StepCursor {
        self.cursor
    }

    pub fn current_step(&self) -> Option<StepId> {
        self.cursor.current
    }

    pub fn steps_enabled(&self) -> bool {
        self.cursor.enabled
    }

    pub fn locale(&self) -> &Localizer {
        &self.locale
    }

    pub fn locale_mut(&mut self) -> &mut Localizer {
        &mut self.locale
    }

    pub fn selection(&self) -> PanelSelection {
        self.selection
    }

    pub fn palette(&self) -> Palette {
        palette(&self.locale)
    }

    pub fn displayed_items(&self) -> Vec<DisplayItem> {
        displayed_items(&self.state, self.cursor.enabled, self.cursor.current, &self.locale)
    }

    pub fn displayed_ids(&self) -> Vec<FieldId> {
        displayed_ids(&self.state, self.cursor.enabled, self.cursor.current)
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Apply one edit and publish the resulting state.
    pub fn apply_mutation(&mut self, mutation: FormMutation) {
        log::debug!("apply {mutation:?}");
        let next = match mutation {
            FormMutation::DropOnCanvas { item } => {
                mutator::insert_on_canvas(&self.state, &mut self.cursor, &item, &self.locale)
            }
            FormMutation::DropBeside {
                position,
                item,
                index,
            } => mutator::insert_beside(&self.state, &self.cursor, position, &item, index),
            FormMutation::Copy { id } => mutator::copy_entry(&self.state, &self.cursor, id),
            FormMutation::Delete { id } => mutator::delete_entry(&self.state, id),
            FormMutation::Clear => {
                self.cursor = StepCursor::default();
                mutator::clear()
            }
            FormMutation::Replace { candidate } => match mutator::replace(&candidate) {
                Some(next) => {
                    self.publish(next);
                    self.cursor.reconcile(&self.state);
                    self.selection.reconcile(&self.state);
                    return;
                }
                None => return,
            },
            FormMutation::UpdateEntry { id, entry } => mutator::update_entry(&self.state, id, *entry),
            FormMutation::UpdateStep { id, step } => mutator::update_step(&self.state, id, *step),
            FormMutation::StartSteps => {
                let mut next = self.state.clone();
                self.cursor.start_steps(&mut next, &self.locale);
                next
            }
            FormMutation::AddStep => {
                let mut next = self.state.clone();
                self.cursor.add_step(&mut next, &self.locale);
                next
            }
            FormMutation::RemoveStep { id } => {
                let mut next = self.state.clone();
                self.cursor.remove_step(&mut next, id);
                next
            }
            FormMutation::DeleteSteps => {
                let mut next = self.state.clone();
                self.cursor.delete_steps(&mut next);
                next
            }
        };
        self.publish(next);
        self.selection.reconcile(&self.state);
    }

    fn publish(&mut self, next: FormState) {
        self.state = next;
    }

    /// Swap in a whole state from history.
    pub fn restore(&mut self, state: FormState) {
        self.publish(state);
        self.cursor.reconcile(&self.state);
        self.selection.reconcile(&self.state);
    }

    // ─── Navigation (not recorded in history) ────────────────────────────

    pub fn prev_step(&mut self) {
        self.cursor.prev(&self.state);
    }

    pub fn next_step(&mut self) {
        self.cursor.next(&self.state);
    }

    pub fn select_step(&mut self, id: StepId) {
        self.cursor.select(&self.state, id);
    }

    // ─── Properties panel ────────────────────────────────────────────────

    /// Open a field in the properties panel; unknown keys clear the panel.
    pub fn select_field(&mut self, id: FieldId) {
        self.selection = PanelSelection::Field(id);
        self.selection.reconcile(&self.state);
    }

    pub fn select_step_properties(&mut self, id: StepId) {
        self.selection = PanelSelection::Step(id);
        self.selection.reconcile(&self.state);
    }

    pub fn clear_selection(&mut self) {
        self.selection = PanelSelection::None;
    }

    /// Finish the current drag by dropping on the canvas, if a drag is in
    /// flight.
    pub fn drop_dragged_on_canvas(&mut self) -> bool {
        match self.drag.take() {
            Some(data) => {
                self.apply_mutation(FormMutation::DropOnCanvas { item: data.item });
                true
            }
            None => false,
        }
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(Localizer::default())
    }
}
