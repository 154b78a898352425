//! Drag payloads and drop targets as delivered by the host UI.

use fb_core::catalog::Item;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which edge of an existing field a palette item was dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Top,
    Right,
    Left,
    Bottom,
}

impl DropPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            DropPosition::Top => "top",
            DropPosition::Right => "right",
            DropPosition::Left => "left",
            DropPosition::Bottom => "bottom",
        }
    }

    /// Whether the new entry lands before the target.
    pub fn is_before(self) -> bool {
        matches!(self, DropPosition::Top | DropPosition::Left)
    }
}

impl fmt::Display for DropPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown drop position `{0}` (expected top, right, left or bottom)")]
pub struct ParsePositionError(pub String);

impl FromStr for DropPosition {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(DropPosition::Top),
            "right" => Ok(DropPosition::Right),
            "left" => Ok(DropPosition::Left),
            "bottom" => Ok(DropPosition::Bottom),
            _ => Err(ParsePositionError(s.to_string())),
        }
    }
}

/// An in-flight drag: the pointer position and the item being dragged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragData {
    pub x: f64,
    pub y: f64,
    pub item: Item,
}

/// Holds at most one in-flight drag.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    data: Option<DragData>,
}

impl DragState {
    pub fn set(&mut self, x: f64, y: f64, item: Item) {
        self.data = Some(DragData { x, y, item });
    }

    /// Move the pointer of the current drag; ignored when idle.
    pub fn move_to(&mut self, x: f64, y: f64) {
        if let Some(data) = self.data.as_mut() {
            data.x = x;
            data.y = y;
        }
    }

    /// End the drag, handing back its payload.
    pub fn take(&mut self) -> Option<DragData> {
        self.data.take()
    }

    pub fn clear(&mut self) {
        self.data = None;
    }

    pub fn current(&self) -> Option<&DragData> {
        self.data.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.data.is_some()
    }
}
