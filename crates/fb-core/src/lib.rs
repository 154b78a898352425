pub mod catalog;
pub mod id;
pub mod layout;
pub mod lint;
pub mod locale;
pub mod model;
pub mod transport;
pub mod view;

pub use catalog::{FieldKind, Item, Palette, palette};
pub use id::{FieldId, StepId, allocate};
pub use layout::{GRID_COLUMNS, last_index_of_row};
pub use lint::{LintDiagnostic, LintSeverity, LintTarget, lint_form};
pub use locale::Localizer;
pub use model::*;
pub use transport::TransportError;
pub use view::{DisplayItem, displayed_items};
