pub mod commands;
pub mod config;
pub mod input;
pub mod mutator;
pub mod plugin;
pub mod session;
pub mod steps;
pub mod ui;

pub use commands::CommandStack;
pub use config::{BuilderConfig, ConfigError};
pub use input::{DragState, DropPosition};
pub use session::{FormMutation, FormSession};
pub use steps::{StepCursor, StepMode};
pub use ui::{BuilderUi, PanelSelection};
