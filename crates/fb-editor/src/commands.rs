//! Undo/Redo command stack.
//!
//! Every edit is recorded as a snapshot of the whole form before and after
//! it. Form states are small and are replaced wholesale on every mutation
//! anyway, so undo is a state swap rather than an inverse mutation.
//!
//! Drag gestures and other multi-step edits use batching: the state is
//! captured when the batch opens and when it closes, so the whole gesture
//! undoes in a single step.

use crate::session::{FormMutation, FormSession};
use fb_core::model::FormState;

#[derive(Debug, Clone)]
pub struct Command {
    pub before: FormState,
    pub after: FormState,
    pub description: String,
}

/// Manages undo/redo stacks with batch grouping.
pub struct CommandStack {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    /// Maximum undo depth.
    max_depth: usize,
    /// Batch nesting depth (0 = not batching).
    batch_depth: usize,
    /// State captured at the start of a batch.
    batch_snapshot: Option<FormState>,
    batch_description: String,
}

impl CommandStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth.min(64)),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
            batch_depth: 0,
            batch_snapshot: None,
            batch_description: String::new(),
        }
    }

    /// Start a batch group. Mutations until the matching `end_batch()` are
    /// applied live but recorded as one undo step.
    pub fn begin_batch(&mut self, session: &FormSession, description: &str) {
        if self.batch_depth == 0 {
            self.batch_snapshot = Some(session.state().clone());
            self.batch_description = description.to_string();
        }
        self.batch_depth += 1;
    }

    /// End a batch group. Closing the outermost batch pushes one command,
    /// unless the state ended up unchanged.
    pub fn end_batch(&mut self, session: &FormSession) {
        if self.batch_depth == 0 {
            return;
        }
        self.batch_depth -= 1;
        if self.batch_depth == 0
            && let Some(before) = self.batch_snapshot.take()
        {
            let description = std::mem::take(&mut self.batch_description);
            self.record(before, session.state().clone(), description);
        }
    }

    /// Apply a mutation to the session and record it. Returns whether the
    /// form changed.
    pub fn execute(&mut self, session: &mut FormSession, mutation: FormMutation, description: &str) -> bool {
        let before = session.state().clone();
        session.apply_mutation(mutation);
        let changed = before != *session.state();

        // Inside a batch the snapshot at end_batch() covers this edit.
        if self.batch_depth == 0 {
            self.record(before, session.state().clone(), description.to_string());
        }
        changed
    }

    fn record(&mut self, before: FormState, after: FormState, description: String) {
        // No-op edits (unknown targets, empty imports) leave no history.
        if before == after {
            return;
        }
        self.undo_stack.push(Command {
            before,
            after,
            description,
        });
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Undo the last command, returning its description. Refused while a
    /// batch is open.
    pub fn undo(&mut self, session: &mut FormSession) -> Option<String> {
        if self.batch_depth > 0 {
            log::debug!("undo refused: batch `{}` is open", self.batch_description);
            return None;
        }
        let cmd = self.undo_stack.pop()?;
        session.restore(cmd.before.clone());
        let description = cmd.description.clone();
        self.redo_stack.push(cmd);
        Some(description)
    }

    /// Redo the last undone command, returning its description. Refused
    /// while a batch is open.
    pub fn redo(&mut self, session: &mut FormSession) -> Option<String> {
        if self.batch_depth > 0 {
            log::debug!("redo refused: batch `{}` is open", self.batch_description);
            return None;
        }
        let cmd = self.redo_stack.pop()?;
        session.restore(cmd.after.clone());
        let description = cmd.description.clone();
        self.undo_stack.push(cmd);
        Some(description)
    }

    pub fn can_undo(&self) -> bool {
        self.batch_depth == 0 && !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.batch_depth == 0 && !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.batch_depth = 0;
        self.batch_snapshot = None;
    }
}
