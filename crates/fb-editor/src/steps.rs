//! Step index manager: wizard pages over the schema.
//!
//! The step index itself lives in `FormState::steps`. `StepCursor` holds
//! the rest of the step state: whether step mode is on and which step is
//! under edit. The current pointer always names an existing step or is
//! `None`.

use fb_core::id::StepId;
use fb_core::locale::Localizer;
use fb_core::model::{FormState, StepEntry, Steps};

/// Key of the step seeded when step mode starts.
pub const DEFAULT_STEP: &str = "page0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    Disabled,
    /// Step mode is on but the index has not been seeded yet.
    EnabledEmpty,
    Enabled,
}

fn step_label(locale: &Localizer, number: usize) -> String {
    format!("{} {number}", locale.t("step"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepCursor {
    pub enabled: bool,
    pub current: Option<StepId>,
}

impl StepCursor {
    pub fn mode(&self, state: &FormState) -> StepMode {
        match (self.enabled, state.has_steps()) {
            (false, _) => StepMode::Disabled,
            (true, false) => StepMode::EnabledEmpty,
            (true, true) => StepMode::Enabled,
        }
    }

    /// The step new fields are added to: the current step, when step mode
    /// is on and the step exists.
    pub fn active_step(&self, state: &FormState) -> Option<StepId> {
        self.current
            .filter(|_| self.enabled)
            .filter(|id| state.step(*id).is_some())
    }

    pub(crate) fn active_step_mut<'a>(&self, state: &'a mut FormState) -> Option<&'a mut StepEntry> {
        let id = self.active_step(state)?;
        state.step_mut(id)
    }

    /// Session load: step mode follows whether the loaded index has steps.
    pub fn mount(&mut self, state: &mut FormState, locale: &Localizer) {
        self.enabled = state.has_steps();
        self.current = None;
        self.ensure_default_step(state, locale);
    }

    /// Seed the default step when step mode is on and the index is empty,
    /// or point a null cursor at the first step.
    pub fn ensure_default_step(&mut self, state: &mut FormState, locale: &Localizer) {
        if !self.enabled {
            return;
        }

        if !state.has_steps() {
            let id = StepId::intern(DEFAULT_STEP);
            let elements = state.schema.keys().collect();
            let mut steps = Steps::new();
            steps.insert(id, StepEntry::new(step_label(locale, 1), elements));
            state.steps = Some(steps);
            self.current = Some(id);
            log::debug!("seeded default step `{id}`");
        } else if self.current.is_none() {
            self.current = state.step_keys().first().copied();
        }
    }

    pub fn start_steps(&mut self, state: &mut FormState, locale: &Localizer) {
        self.enabled = true;
        self.ensure_default_step(state, locale);
    }

    /// Append an empty step. The key is `page<N>`, N starting at the step
    /// count and skipping keys already taken. No-op while step mode is off.
    pub fn add_step(&self, state: &mut FormState, locale: &Localizer) -> Option<StepId> {
        if !self.enabled {
            return None;
        }
        let steps = state.steps.get_or_insert_with(Steps::new);

        let mut index = steps.len();
        let id = loop {
            let candidate = format!("page{index}");
            match StepId::lookup(&candidate) {
                Some(id) if steps.contains_key(&id) => index += 1,
                _ => break StepId::intern(&candidate),
            }
        };

        steps.insert(id, StepEntry::new(step_label(locale, index + 1), Vec::new()));
        log::debug!("added step `{id}`");
        Some(id)
    }

    /// Remove one step and point the cursor at the first remaining step.
    /// Removing the last step turns step mode off.
    pub fn remove_step(&mut self, state: &mut FormState, id: StepId) {
        let Some(steps) = state.steps.as_mut() else {
            return;
        };
        steps.shift_remove(&id);
        self.current = steps.keys().next().copied();

        if steps.is_empty() {
            self.enabled = false;
            state.steps = None;
            log::debug!("removed last step `{id}`, steps disabled");
        }
    }

    /// Drop the whole step index. The schema is untouched.
    pub fn delete_steps(&mut self, state: &mut FormState) {
        self.enabled = false;
        self.current = None;
        state.steps = None;
    }

    pub fn prev(&mut self, state: &FormState) {
        let Some(current) = self.current else {
            return;
        };
        let keys = state.step_keys();
        if let Some(idx) = keys.iter().position(|k| *k == current)
            && idx > 0
        {
            self.current = Some(keys[idx - 1]);
        }
    }

    pub fn next(&mut self, state: &FormState) {
        let Some(current) = self.current else {
            return;
        };
        let keys = state.step_keys();
        if let Some(idx) = keys.iter().position(|k| *k == current)
            && idx + 1 < keys.len()
        {
            self.current = Some(keys[idx + 1]);
        }
    }

    /// Point the cursor at `id`; unknown keys are ignored.
    pub fn select(&mut self, state: &FormState, id: StepId) {
        if state.step(id).is_some() {
            self.current = Some(id);
        }
    }

    /// Re-derive the cursor after the whole state was swapped (import,
    /// undo, redo). Keeps the current step when it still exists.
    pub fn reconcile(&mut self, state: &FormState) {
        self.enabled = state.has_steps();
        if !self.enabled {
            self.current = None;
        } else if self.current.is_none_or(|id| state.step(id).is_none()) {
            self.current = state.step_keys().first().copied();
        }
    }
}
