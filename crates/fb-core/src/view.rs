//! Displayed-items projection: the schema as the canvas lists it.
//!
//! Pull-based. The UI layer calls these after every mutation; nothing is
//! cached here.

use crate::catalog::FieldKind;
use crate::id::{FieldId, StepId};
use crate::locale::Localizer;
use crate::model::{FormState, Schema, SchemaEntry};
use serde::Serialize;
use std::collections::HashSet;

/// A canvas entry: the schema key plus the catalog display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayItem {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub item_type: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl DisplayItem {
    fn from_entry(id: FieldId, entry: &SchemaEntry, locale: &Localizer) -> Self {
        let kind = entry.builder_kind().and_then(FieldKind::from_base_key);
        let name = entry
            .builder_label(locale.locale(), locale.fallback())
            .filter(|label| !label.is_empty())
            .or_else(|| kind.map(|k| k.display_name(locale)))
            .unwrap_or_else(|| id.as_str().to_string());

        Self {
            id,
            item_type: entry.type_name().to_string(),
            name,
            description: kind.map(|k| k.description(locale)).unwrap_or_default(),
            icon: kind.map(|k| k.icon().to_string()).unwrap_or_default(),
        }
    }
}

/// Every schema entry in document order, ignoring steps.
pub fn container_items(schema: &Schema, locale: &Localizer) -> Vec<DisplayItem> {
    schema
        .iter()
        .map(|(id, entry)| DisplayItem::from_entry(id, entry, locale))
        .collect()
}

/// Keys shown on the canvas, in document order.
///
/// With steps disabled, no current step, or a current step that does not
/// exist, this is the whole schema. Otherwise only the keys the current
/// step lists; step-list order is ignored.
pub fn displayed_ids(state: &FormState, steps_enabled: bool, current: Option<StepId>) -> Vec<FieldId> {
    let step = current
        .filter(|_| steps_enabled)
        .and_then(|id| state.step(id));

    match step {
        None => state.schema.keys().collect(),
        Some(step) => {
            let allowed: HashSet<FieldId> = step.elements.iter().copied().collect();
            state.schema.keys().filter(|id| allowed.contains(id)).collect()
        }
    }
}

pub fn displayed_items(
    state: &FormState,
    steps_enabled: bool,
    current: Option<StepId>,
    locale: &Localizer,
) -> Vec<DisplayItem> {
    displayed_ids(state, steps_enabled, current)
        .into_iter()
        .filter_map(|id| {
            state
                .schema
                .get(id)
                .map(|entry| DisplayItem::from_entry(id, entry, locale))
        })
        .collect()
}
