//! Core data model for FB form documents.
//!
//! A form is a `FormState`: an insertion-ordered `Schema` (key → entry) plus
//! an optional ordered `Steps` index grouping schema keys into wizard pages.
//! Document order of the schema is the visual order of the fields: top to
//! bottom, left to right across rows of the 12-column grid.
//!
//! Entries are a closed tagged union on the renderer's `type` attribute.
//! Imported entries that match no typed variant are kept verbatim as
//! `SchemaEntry::Raw` so import never loses data.

use crate::id::{FieldId, StepId};
use crate::layout::GRID_COLUMNS;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use smallvec::SmallVec;

// ─── Shared attribute types ──────────────────────────────────────────────

/// A display label: plain text, or one string per locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Text(String),
    Localized(IndexMap<String, String>),
}

impl Label {
    /// Resolve for `locale`, falling back to `fallback`, then to any entry.
    pub fn resolve<'a>(&'a self, locale: &str, fallback: &str) -> &'a str {
        match self {
            Label::Text(text) => text,
            Label::Localized(map) => map
                .get(locale)
                .or_else(|| map.get(fallback))
                .or_else(|| map.values().next())
                .map(String::as_str)
                .unwrap_or(""),
        }
    }
}

impl Label {
    pub fn is_empty(&self) -> bool {
        match self {
            Label::Text(text) => text.is_empty(),
            Label::Localized(map) => map.is_empty(),
        }
    }
}

impl Default for Label {
    fn default() -> Self {
        Label::Text(String::new())
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Text(s)
    }
}

/// Width of an entry in the 12-unit row grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Columns {
    pub container: u8,
    /// Other breakpoints (`label`, `wrapper`, …) set outside the builder.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Columns {
    pub fn span(container: u8) -> Self {
        Self {
            container,
            extra: Map::new(),
        }
    }
}

/// Palette/panel metadata carried by every entry and exported unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderMeta {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: Label,
    /// Hidden inputs are pinned to their row width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resize: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BuilderMeta {
    pub fn new(kind: &str, label: impl Into<Label>) -> Self {
        Self {
            kind: kind.to_string(),
            label: label.into(),
            resize: None,
            extra: Map::new(),
        }
    }
}

/// One option of a select, tags, checkbox group or radio group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceItem {
    pub value: Value,
    pub label: Label,
}

impl ChoiceItem {
    pub fn new(value: impl Into<Value>, label: &str) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Text rendered before/after an input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Addons {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

/// A remote endpoint used by file uploads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl Endpoint {
    pub fn url(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            method: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SliderFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thousand: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToggleLabels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off: Option<String>,
}

/// Horizontal alignment of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

// ─── Common attributes ───────────────────────────────────────────────────

/// Attributes every field kind accepts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Common {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<SmallVec<[String; 2]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readonly: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Columns>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<BuilderMeta>,
    /// Renderer attributes set through the properties panel that the typed
    /// model does not name (`attrs`, `decorators`, `conditions`, …).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Common {
    pub fn new(name: FieldId, builder: BuilderMeta) -> Self {
        Self {
            name: Some(name.as_str().to_string()),
            builder: Some(builder),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_rules(mut self, rules: &[&str]) -> Self {
        self.rules = Some(rules.iter().map(|r| r.to_string()).collect());
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }
}

// ─── Field kinds ─────────────────────────────────────────────────────────

/// Headings, quotes, links and dividers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StaticField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(flatten)]
    pub common: Common,
}

/// Single-line input; `input_type` distinguishes email/password/number/url.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_numbers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addons: Option<Addons>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextareaField {
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_incomplete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unmask: Option<bool>,
    #[serde(flatten)]
    pub common: Common,
}

/// WYSIWYG editor; `endpoint`/`method` configure attachment upload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditorField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_value: Option<Value>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CheckboxGroupField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ChoiceItem>>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<ToggleLabels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_value: Option<Value>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ChoiceItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_by: Option<String>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagsField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ChoiceItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_on_select: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SliderField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<SliderFormat>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_temp_endpoint: Option<Endpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_temp_endpoint: Option<Endpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_endpoint: Option<Endpoint>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    /// Dates that cannot be picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disables: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addons: Option<Addons>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HiddenField {
    /// Submitted with the form data but never rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<bool>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radio_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radio_value: Option<Value>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RadioGroupField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ChoiceItem>>,
    #[serde(flatten)]
    pub common: Common,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submits: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resets: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub danger: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(flatten)]
    pub common: Common,
}

/// A typed schema entry, tagged by the renderer's `type` attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Field {
    #[serde(rename = "static")]
    Static(StaticField),
    #[serde(rename = "text")]
    Text(TextField),
    #[serde(rename = "textarea")]
    Textarea(TextareaField),
    #[serde(rename = "phone")]
    Phone(PhoneField),
    #[serde(rename = "editor")]
    Editor(EditorField),
    #[serde(rename = "checkbox")]
    Checkbox(CheckboxField),
    #[serde(rename = "checkboxgroup")]
    CheckboxGroup(CheckboxGroupField),
    #[serde(rename = "toggle")]
    Toggle(ToggleField),
    #[serde(rename = "select")]
    Select(SelectField),
    #[serde(rename = "tags")]
    Tags(TagsField),
    #[serde(rename = "slider")]
    Slider(SliderField),
    #[serde(rename = "file")]
    File(FileField),
    #[serde(rename = "date")]
    Date(DateField),
    #[serde(rename = "hidden")]
    Hidden(HiddenField),
    #[serde(rename = "radio")]
    Radio(RadioField),
    #[serde(rename = "radiogroup")]
    RadioGroup(RadioGroupField),
    #[serde(rename = "button")]
    Button(ButtonField),
}

impl Field {
    /// The renderer's `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Field::Static(_) => "static",
            Field::Text(_) => "text",
            Field::Textarea(_) => "textarea",
            Field::Phone(_) => "phone",
            Field::Editor(_) => "editor",
            Field::Checkbox(_) => "checkbox",
            Field::CheckboxGroup(_) => "checkboxgroup",
            Field::Toggle(_) => "toggle",
            Field::Select(_) => "select",
            Field::Tags(_) => "tags",
            Field::Slider(_) => "slider",
            Field::File(_) => "file",
            Field::Date(_) => "date",
            Field::Hidden(_) => "hidden",
            Field::Radio(_) => "radio",
            Field::RadioGroup(_) => "radiogroup",
            Field::Button(_) => "button",
        }
    }

    pub fn common(&self) -> &Common {
        match self {
            Field::Static(f) => &f.common,
            Field::Text(f) => &f.common,
            Field::Textarea(f) => &f.common,
            Field::Phone(f) => &f.common,
            Field::Editor(f) => &f.common,
            Field::Checkbox(f) => &f.common,
            Field::CheckboxGroup(f) => &f.common,
            Field::Toggle(f) => &f.common,
            Field::Select(f) => &f.common,
            Field::Tags(f) => &f.common,
            Field::Slider(f) => &f.common,
            Field::File(f) => &f.common,
            Field::Date(f) => &f.common,
            Field::Hidden(f) => &f.common,
            Field::Radio(f) => &f.common,
            Field::RadioGroup(f) => &f.common,
            Field::Button(f) => &f.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut Common {
        match self {
            Field::Static(f) => &mut f.common,
            Field::Text(f) => &mut f.common,
            Field::Textarea(f) => &mut f.common,
            Field::Phone(f) => &mut f.common,
            Field::Editor(f) => &mut f.common,
            Field::Checkbox(f) => &mut f.common,
            Field::CheckboxGroup(f) => &mut f.common,
            Field::Toggle(f) => &mut f.common,
            Field::Select(f) => &mut f.common,
            Field::Tags(f) => &mut f.common,
            Field::Slider(f) => &mut f.common,
            Field::File(f) => &mut f.common,
            Field::Date(f) => &mut f.common,
            Field::Hidden(f) => &mut f.common,
            Field::Radio(f) => &mut f.common,
            Field::RadioGroup(f) => &mut f.common,
            Field::Button(f) => &mut f.common,
        }
    }
}

// ─── Schema entries ──────────────────────────────────────────────────────

/// One entry of the schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaEntry {
    /// A well-formed entry of a known kind.
    Field(Field),
    /// An imported entry matching no typed kind, kept byte-for-byte.
    Raw(Value),
}

impl SchemaEntry {
    /// Parse an untrusted value, keeping it raw when no typed kind fits.
    pub fn from_value(value: Value) -> Self {
        match Field::deserialize(&value) {
            Ok(field) => SchemaEntry::Field(field),
            Err(_) => SchemaEntry::Raw(value),
        }
    }

    /// The renderer's `type` tag (empty when a raw entry has none).
    pub fn type_name(&self) -> &str {
        match self {
            SchemaEntry::Field(field) => field.type_name(),
            SchemaEntry::Raw(value) => value.get("type").and_then(Value::as_str).unwrap_or(""),
        }
    }

    /// The builder metadata `type` (catalog base key), if any.
    pub fn builder_kind(&self) -> Option<&str> {
        match self {
            SchemaEntry::Field(field) => field.common().builder.as_ref().map(|b| b.kind.as_str()),
            SchemaEntry::Raw(value) => value.pointer("/builder/type").and_then(Value::as_str),
        }
    }

    /// The builder metadata label resolved for `locale`, if any.
    pub fn builder_label(&self, locale: &str, fallback: &str) -> Option<String> {
        match self {
            SchemaEntry::Field(field) => field
                .common()
                .builder
                .as_ref()
                .map(|b| b.label.resolve(locale, fallback).to_string()),
            SchemaEntry::Raw(value) => {
                let label = value.pointer("/builder/label")?;
                let label: Label = serde_json::from_value(label.clone()).ok()?;
                Some(label.resolve(locale, fallback).to_string())
            }
        }
    }

    /// The entry's width in the row grid; absent means full width.
    pub fn column_span(&self) -> u8 {
        let span = match self {
            SchemaEntry::Field(field) => field.common().columns.as_ref().map(|c| c.container),
            SchemaEntry::Raw(value) => value
                .pointer("/columns/container")
                .and_then(Value::as_u64)
                .map(|n| n.min(u64::from(u8::MAX)) as u8),
        };
        span.unwrap_or(GRID_COLUMNS as u8)
    }

    /// Set the entry's width, keeping any other breakpoint widths.
    pub fn set_column_span(&mut self, span: u8) {
        match self {
            SchemaEntry::Field(field) => {
                let common = field.common_mut();
                match common.columns.as_mut() {
                    Some(columns) => columns.container = span,
                    None => common.columns = Some(Columns::span(span)),
                }
            }
            SchemaEntry::Raw(Value::Object(map)) => match map.get_mut("columns") {
                Some(Value::Object(columns)) => {
                    columns.insert("container".into(), Value::from(span));
                }
                _ => {
                    let mut columns = Map::new();
                    columns.insert("container".into(), Value::from(span));
                    map.insert("columns".into(), Value::Object(columns));
                }
            },
            SchemaEntry::Raw(_) => {}
        }
    }

    /// Set the renderer's `name` attribute.
    pub fn set_name(&mut self, name: FieldId) {
        match self {
            SchemaEntry::Field(field) => field.common_mut().name = Some(name.as_str().to_string()),
            SchemaEntry::Raw(Value::Object(map)) => {
                map.insert("name".into(), Value::from(name.as_str()));
            }
            SchemaEntry::Raw(_) => {}
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, SchemaEntry::Raw(_))
    }
}

impl From<Field> for SchemaEntry {
    fn from(field: Field) -> Self {
        SchemaEntry::Field(field)
    }
}

// ─── Schema document ─────────────────────────────────────────────────────

/// The ordered, keyed set of field definitions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(IndexMap<FieldId, SchemaEntry>);

impl Schema {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: FieldId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn get(&self, id: FieldId) -> Option<&SchemaEntry> {
        self.0.get(&id)
    }

    pub fn get_mut(&mut self, id: FieldId) -> Option<&mut SchemaEntry> {
        self.0.get_mut(&id)
    }

    /// Document position of `id`.
    pub fn position(&self, id: FieldId) -> Option<usize> {
        self.0.get_index_of(&id)
    }

    /// Insert or overwrite. An existing key keeps its position; a new key
    /// is appended.
    pub fn insert(&mut self, id: FieldId, entry: SchemaEntry) -> Option<SchemaEntry> {
        self.0.insert(id, entry)
    }

    /// Insert `id` so that it ends up at document position `index`
    /// (clamped to the end). An existing `id` is moved.
    pub fn insert_at(&mut self, index: usize, id: FieldId, entry: SchemaEntry) {
        self.0.shift_remove(&id);
        let index = index.min(self.0.len());
        let mut pending = Some(entry);
        let mut rebuilt = IndexMap::with_capacity(self.0.len() + 1);
        for (i, (key, value)) in std::mem::take(&mut self.0).into_iter().enumerate() {
            if i == index
                && let Some(entry) = pending.take()
            {
                rebuilt.insert(id, entry);
            }
            rebuilt.insert(key, value);
        }
        if let Some(entry) = pending {
            rebuilt.insert(id, entry);
        }
        self.0 = rebuilt;
    }

    /// Remove `id`, preserving the order of the remaining entries.
    pub fn remove(&mut self, id: FieldId) -> Option<SchemaEntry> {
        self.0.shift_remove(&id)
    }

    pub fn keys(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &SchemaEntry)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    pub fn get_index(&self, index: usize) -> Option<(FieldId, &SchemaEntry)> {
        self.0.get_index(index).map(|(k, v)| (*k, v))
    }
}

impl FromIterator<(FieldId, SchemaEntry)> for Schema {
    fn from_iter<I: IntoIterator<Item = (FieldId, SchemaEntry)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ─── Steps ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepBuilder {
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for StepBuilder {
    fn default() -> Self {
        Self {
            kind: "steps".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StepButtons {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StepLabels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<Label>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of a multi-step form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StepEntry {
    #[serde(default, skip_serializing_if = "Label::is_empty")]
    pub label: Label,
    /// Schema keys shown on this page, without duplicates.
    #[serde(default)]
    pub elements: Vec<FieldId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<StepBuilder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<StepButtons>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<StepLabels>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StepEntry {
    pub fn new(label: impl Into<Label>, elements: Vec<FieldId>) -> Self {
        Self {
            label: label.into(),
            elements,
            builder: Some(StepBuilder::default()),
            ..Self::default()
        }
    }

    pub fn contains(&self, id: FieldId) -> bool {
        self.elements.contains(&id)
    }

    /// Parse an untrusted step. Attributes that do not decode are kept in
    /// `extra` as they came; `elements` keeps its string keys, first
    /// occurrence only. `None` when the value is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        if let Ok(step) = StepEntry::deserialize(&value) {
            return Some(step);
        }
        let Value::Object(mut map) = value else {
            return None;
        };

        let mut step = StepEntry::default();
        if let Some(label) = map.remove("label") {
            match Label::deserialize(&label) {
                Ok(label) => step.label = label,
                Err(_) => {
                    step.extra.insert("label".to_string(), label);
                }
            }
        }
        if let Some(Value::Array(items)) = map.remove("elements") {
            for id in items.iter().filter_map(Value::as_str).map(FieldId::intern) {
                if !step.elements.contains(&id) {
                    step.elements.push(id);
                }
            }
        }
        step.builder = take_lenient(&mut map, "builder", &mut step.extra);
        step.buttons = take_lenient(&mut map, "buttons", &mut step.extra);
        step.labels = take_lenient(&mut map, "labels", &mut step.extra);
        step.extra.extend(map);
        Some(step)
    }
}

/// Remove `key` from `map` and decode it, parking the raw value in `extra`
/// when it does not fit `T`.
fn take_lenient<T: DeserializeOwned>(
    map: &mut Map<String, Value>,
    key: &str,
    extra: &mut Map<String, Value>,
) -> Option<T> {
    let value = map.remove(key)?;
    match T::deserialize(&value) {
        Ok(decoded) => Some(decoded),
        Err(_) => {
            extra.insert(key.to_string(), value);
            None
        }
    }
}

/// The ordered step index.
pub type Steps = IndexMap<StepId, StepEntry>;

// ─── Form state ──────────────────────────────────────────────────────────

/// The observable `{schema, steps?}` value published to the UI layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default)]
    pub schema: Schema,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Steps>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step keys in index order.
    pub fn step_keys(&self) -> Vec<StepId> {
        self.steps
            .as_ref()
            .map(|steps| steps.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn step(&self, id: StepId) -> Option<&StepEntry> {
        self.steps.as_ref().and_then(|steps| steps.get(&id))
    }

    pub fn step_mut(&mut self, id: StepId) -> Option<&mut StepEntry> {
        self.steps.as_mut().and_then(|steps| steps.get_mut(&id))
    }

    pub fn has_steps(&self) -> bool {
        self.steps.as_ref().is_some_and(|steps| !steps.is_empty())
    }
}
