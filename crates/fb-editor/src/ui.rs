//! Builder chrome state: panel toggles and the properties-panel selection.

use fb_core::id::{FieldId, StepId};
use fb_core::model::FormState;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderUi {
    pub preview_mode: bool,
    pub show_export: bool,
    pub settings_open: bool,
    pub elements_open: bool,
}

impl Default for BuilderUi {
    fn default() -> Self {
        Self {
            preview_mode: false,
            show_export: false,
            settings_open: true,
            elements_open: true,
        }
    }
}

impl BuilderUi {
    pub fn toggle_preview(&mut self) {
        self.preview_mode = !self.preview_mode;
    }

    pub fn toggle_export(&mut self) {
        self.show_export = !self.show_export;
    }

    pub fn toggle_settings(&mut self) {
        self.settings_open = !self.settings_open;
    }

    pub fn toggle_elements(&mut self) {
        self.elements_open = !self.elements_open;
    }
}

/// What the properties panel is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum PanelSelection {
    #[default]
    None,
    Field(FieldId),
    Step(StepId),
}

impl PanelSelection {
    /// Drop the selection when its target no longer exists in `state`.
    pub fn reconcile(&mut self, state: &FormState) {
        let alive = match *self {
            PanelSelection::None => true,
            PanelSelection::Field(id) => state.schema.contains(id),
            PanelSelection::Step(id) => state.step(id).is_some(),
        };
        if !alive {
            log::debug!("selection {self:?} no longer exists, clearing");
            *self = PanelSelection::None;
        }
    }

    pub fn field(&self) -> Option<FieldId> {
        match self {
            PanelSelection::Field(id) => Some(*id),
            _ => None,
        }
    }

    pub fn step(&self) -> Option<StepId> {
        match self {
            PanelSelection::Step(id) => Some(*id),
            _ => None,
        }
    }
}
