//! WASM bridge: one form-builder session driven from JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. Structured values cross the
//! boundary as JSON strings; malformed input is reported as `false` (or
//! ignored) rather than thrown.

use fb_core::catalog::Item;
use fb_core::id::{FieldId, StepId};
use fb_core::lint::lint_form;
use fb_core::model::{SchemaEntry, StepEntry};
use fb_core::transport;
use fb_editor::commands::CommandStack;
use fb_editor::config::BuilderConfig;
use fb_editor::input::DropPosition;
use fb_editor::session::{FormMutation, FormSession};
use fb_editor::ui::BuilderUi;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// One form-builder session, driven from the host page.
#[wasm_bindgen]
pub struct FormBuilder {
    session: FormSession,
    commands: CommandStack,
    ui: BuilderUi,
}

#[wasm_bindgen]
impl FormBuilder {
    /// Create a session from a `BuilderConfig` JSON object. An empty or
    /// invalid config falls back to the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Self {
        console_error_panic_hook_setup();

        let config = if config_json.trim().is_empty() {
            BuilderConfig::default()
        } else {
            BuilderConfig::from_json(config_json).unwrap_or_else(|err| {
                log::warn!("{err}; using the default config");
                BuilderConfig::default()
            })
        };

        Self {
            session: FormSession::new(config.localizer()),
            commands: CommandStack::new(config.history_depth),
            ui: BuilderUi::default(),
        }
    }

    // ─── Views ───────────────────────────────────────────────────────────

    /// `{fields, statics}` palette items.
    pub fn palette_json(&self) -> String {
        to_json(&self.session.palette(), "{}")
    }

    pub fn displayed_items_json(&self) -> String {
        to_json(&self.session.displayed_items(), "[]")
    }

    pub fn lint_json(&self) -> String {
        to_json(&lint_form(self.session.state()), "[]")
    }

    pub fn ui_json(&self) -> String {
        to_json(&self.ui, "{}")
    }

    pub fn selection_json(&self) -> String {
        to_json(&self.session.selection(), "null")
    }

    // ─── Import / export ─────────────────────────────────────────────────

    pub fn export_json(&self, pretty: bool) -> String {
        let state = self.session.state();
        let result = if pretty {
            transport::to_json_pretty(state)
        } else {
            transport::to_json(state)
        };
        result.unwrap_or_else(|err| {
            log::warn!("export failed: {err}");
            r#"{"schema":{}}"#.to_string()
        })
    }

    pub fn export_msgpack(&self) -> Vec<u8> {
        transport::to_msgpack(self.session.state()).unwrap_or_else(|err| {
            log::warn!("export failed: {err}");
            Vec::new()
        })
    }

    /// Replace the form with a JSON document. Returns `false` when the text
    /// is not JSON; any decodable document is accepted.
    pub fn import_json(&mut self, json: &str) -> bool {
        match serde_json::from_str(json) {
            Ok(candidate) => self.run(FormMutation::Replace { candidate }, "Import"),
            Err(err) => {
                log::warn!("import rejected: {err}");
                false
            }
        }
    }

    pub fn import_msgpack(&mut self, bytes: &[u8]) -> bool {
        match transport::msgpack_to_value(bytes) {
            Ok(candidate) => self.run(FormMutation::Replace { candidate }, "Import"),
            Err(err) => {
                log::warn!("import rejected: {err}");
                false
            }
        }
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    /// Drop a palette item (`{id, type, name, description, icon}`) on the
    /// canvas.
    pub fn drop_on_canvas(&mut self, item_json: &str) -> bool {
        match parse_item(item_json) {
            Some(item) => self.run(FormMutation::DropOnCanvas { item }, "Add field"),
            None => false,
        }
    }

    /// Drop a palette item on the `position` edge (`top`, `right`, `left`,
    /// `bottom`) of the displayed field at `index`.
    pub fn drop_beside(&mut self, position: &str, item_json: &str, index: usize) -> bool {
        let Ok(position) = position.parse::<DropPosition>() else {
            return false;
        };
        match parse_item(item_json) {
            Some(item) => self.run(
                FormMutation::DropBeside {
                    position,
                    item,
                    index,
                },
                "Add field",
            ),
            None => false,
        }
    }

    pub fn copy_field(&mut self, id: &str) -> bool {
        match FieldId::lookup(id) {
            Some(id) => self.run(FormMutation::Copy { id }, "Copy field"),
            None => false,
        }
    }

    pub fn delete_field(&mut self, id: &str) -> bool {
        match FieldId::lookup(id) {
            Some(id) => self.run(FormMutation::Delete { id }, "Delete field"),
            None => false,
        }
    }

    /// Write back one entry edited in the properties panel.
    pub fn update_field_json(&mut self, id: &str, entry_json: &str) -> bool {
        let (Some(id), Ok(value)) = (FieldId::lookup(id), serde_json::from_str(entry_json)) else {
            return false;
        };
        let entry = Box::new(SchemaEntry::from_value(value));
        self.run(FormMutation::UpdateEntry { id, entry }, "Edit field")
    }

    pub fn update_step_json(&mut self, id: &str, step_json: &str) -> bool {
        let Some(id) = StepId::lookup(id) else {
            return false;
        };
        match serde_json::from_str::<StepEntry>(step_json) {
            Ok(step) => self.run(FormMutation::UpdateStep { id, step: Box::new(step) }, "Edit step"),
            Err(err) => {
                log::warn!("step update rejected: {err}");
                false
            }
        }
    }

    pub fn clear(&mut self) -> bool {
        self.run(FormMutation::Clear, "Clear form")
    }

    // ─── Steps ───────────────────────────────────────────────────────────

    pub fn start_steps(&mut self) -> bool {
        self.run(FormMutation::StartSteps, "Enable steps")
    }

    pub fn add_step(&mut self) -> bool {
        self.run(FormMutation::AddStep, "Add step")
    }

    pub fn remove_step(&mut self, id: &str) -> bool {
        match StepId::lookup(id) {
            Some(id) => self.run(FormMutation::RemoveStep { id }, "Remove step"),
            None => false,
        }
    }

    pub fn delete_steps(&mut self) -> bool {
        self.run(FormMutation::DeleteSteps, "Remove all steps")
    }

    pub fn prev_step(&mut self) {
        self.session.prev_step();
    }

    pub fn next_step(&mut self) {
        self.session.next_step();
    }

    pub fn select_step(&mut self, id: &str) {
        if let Some(id) = StepId::lookup(id) {
            self.session.select_step(id);
        }
    }

    pub fn current_step(&self) -> Option<String> {
        self.session.current_step().map(|id| id.as_str().to_string())
    }

    pub fn steps_enabled(&self) -> bool {
        self.session.steps_enabled()
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Group the edits until `end_batch` into one undo step.
    pub fn begin_batch(&mut self, description: &str) {
        self.commands.begin_batch(&self.session, description);
    }

    pub fn end_batch(&mut self) {
        self.commands.end_batch(&self.session);
    }

    pub fn undo(&mut self) -> bool {
        self.commands.undo(&mut self.session).is_some()
    }

    pub fn redo(&mut self) -> bool {
        self.commands.redo(&mut self.session).is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.commands.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.commands.can_redo()
    }

    // ─── Drag ────────────────────────────────────────────────────────────

    pub fn start_drag(&mut self, x: f64, y: f64, item_json: &str) -> bool {
        match parse_item(item_json) {
            Some(item) => {
                self.session.drag.set(x, y, item);
                true
            }
            None => false,
        }
    }

    pub fn move_drag(&mut self, x: f64, y: f64) {
        self.session.drag.move_to(x, y);
    }

    pub fn cancel_drag(&mut self) {
        self.session.drag.clear();
    }

    /// Drop the dragged item on the canvas.
    pub fn finish_drag(&mut self) -> bool {
        match self.session.drag.take() {
            Some(data) => self.run(FormMutation::DropOnCanvas { item: data.item }, "Add field"),
            None => false,
        }
    }

    // ─── Properties panel ────────────────────────────────────────────────

    pub fn select_field(&mut self, id: &str) {
        match FieldId::lookup(id) {
            Some(id) => self.session.select_field(id),
            None => self.session.clear_selection(),
        }
    }

    pub fn select_step_properties(&mut self, id: &str) {
        match StepId::lookup(id) {
            Some(id) => self.session.select_step_properties(id),
            None => self.session.clear_selection(),
        }
    }

    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    // ─── Locale & chrome ─────────────────────────────────────────────────

    pub fn set_locale(&mut self, locale: &str) {
        self.session.locale_mut().set_locale(locale);
    }

    /// Register a `{key: text}` catalog for `locale`.
    pub fn register_messages(&mut self, locale: &str, messages_json: &str) -> bool {
        match serde_json::from_str::<fb_core::locale::Messages>(messages_json) {
            Ok(messages) => {
                self.session.locale_mut().register_messages(locale, messages);
                true
            }
            Err(err) => {
                log::warn!("messages for `{locale}` rejected: {err}");
                false
            }
        }
    }

    pub fn toggle_preview(&mut self) {
        self.ui.toggle_preview();
    }

    pub fn toggle_export(&mut self) {
        self.ui.toggle_export();
    }

    pub fn toggle_settings(&mut self) {
        self.ui.toggle_settings();
    }

    pub fn toggle_elements(&mut self) {
        self.ui.toggle_elements();
    }
}

impl FormBuilder {
    fn run(&mut self, mutation: FormMutation, description: &str) -> bool {
        self.commands.execute(&mut self.session, mutation, description)
    }
}

fn parse_item(json: &str) -> Option<Item> {
    serde_json::from_str(json)
        .map_err(|err| log::warn!("drag payload rejected: {err}"))
        .ok()
}

fn to_json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| fallback.to_string())
}

/// Install a panic hook that logs to the browser console.
fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("FB WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone functions (no session needed) ────────────────────────────

/// Lint a form document. Returns JSON: `{"ok":true,"diagnostics":[...]}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn lint_document(json: &str) -> String {
    let result = match transport::from_json_str(json) {
        Ok(state) => serde_json::json!({
            "ok": true,
            "diagnostics": lint_form(&state.unwrap_or_default()),
        }),
        Err(err) => serde_json::json!({ "ok": false, "error": err.to_string() }),
    };
    result.to_string()
}
