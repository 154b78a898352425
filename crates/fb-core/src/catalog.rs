//! The palette of draggable field kinds and their default schema entries.
//!
//! The factory here is the single source of truth for per-kind defaults;
//! nothing downstream validates or patches what it produces.

use crate::id::FieldId;
use crate::locale::Localizer;
use crate::model::*;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value, json};

/// A palette entry / drag payload: `{id, type, name, description, icon}`.
///
/// `id` encodes the catalog base key before the first underscore
/// (`email_drag`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

/// Every kind the palette offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    // ── Inputs ──
    Textarea,
    Text,
    Password,
    Email,
    Number,
    Phone,
    Url,
    Editor,
    Checkbox,
    CheckboxGroup,
    Toggle,
    Select,
    Tags,
    Slider,
    File,
    Date,
    Hidden,
    Radio,
    RadioTabs,

    // ── Statics & buttons ──
    H1,
    H2,
    H3,
    H4,
    Submit,
    Reset,
    PrimaryButton,
    SecondaryButton,
    DangerButton,
    Quote,
    Link,
    Divider,
}

impl FieldKind {
    /// Input kinds, in palette order.
    pub const INPUTS: [FieldKind; 19] = [
        FieldKind::Textarea,
        FieldKind::Text,
        FieldKind::Password,
        FieldKind::Email,
        FieldKind::Number,
        FieldKind::Phone,
        FieldKind::Url,
        FieldKind::Editor,
        FieldKind::Checkbox,
        FieldKind::CheckboxGroup,
        FieldKind::Toggle,
        FieldKind::Select,
        FieldKind::Tags,
        FieldKind::Slider,
        FieldKind::File,
        FieldKind::Date,
        FieldKind::Hidden,
        FieldKind::Radio,
        FieldKind::RadioTabs,
    ];

    /// Static and button kinds, in palette order.
    pub const STATICS: [FieldKind; 12] = [
        FieldKind::H1,
        FieldKind::H2,
        FieldKind::H3,
        FieldKind::H4,
        FieldKind::Submit,
        FieldKind::Reset,
        FieldKind::PrimaryButton,
        FieldKind::SecondaryButton,
        FieldKind::DangerButton,
        FieldKind::Quote,
        FieldKind::Link,
        FieldKind::Divider,
    ];

    pub fn all() -> impl Iterator<Item = FieldKind> {
        Self::INPUTS.into_iter().chain(Self::STATICS)
    }

    /// Base key used for new schema keys and as `builder.type`.
    pub fn base_key(self) -> &'static str {
        match self {
            FieldKind::Textarea => "textarea",
            FieldKind::Text => "text",
            FieldKind::Password => "password",
            FieldKind::Email => "email",
            FieldKind::Number => "number",
            FieldKind::Phone => "phone",
            FieldKind::Url => "url",
            FieldKind::Editor => "editor",
            FieldKind::Checkbox => "checkbox",
            FieldKind::CheckboxGroup => "checkboxgroup",
            FieldKind::Toggle => "toggle",
            FieldKind::Select => "select",
            FieldKind::Tags => "tags",
            FieldKind::Slider => "slider",
            FieldKind::File => "file",
            FieldKind::Date => "date",
            FieldKind::Hidden => "hidden",
            FieldKind::Radio => "radio",
            FieldKind::RadioTabs => "radioTabs",
            FieldKind::H1 => "h1",
            FieldKind::H2 => "h2",
            FieldKind::H3 => "h3",
            FieldKind::H4 => "h4",
            FieldKind::Submit => "submit",
            FieldKind::Reset => "reset",
            FieldKind::PrimaryButton => "primaryButton",
            FieldKind::SecondaryButton => "secondaryButton",
            FieldKind::DangerButton => "dangerButton",
            FieldKind::Quote => "quote",
            FieldKind::Link => "link",
            FieldKind::Divider => "divider",
        }
    }

    /// Resolve a base key (or `builder.type`) back to its kind.
    pub fn from_base_key(key: &str) -> Option<FieldKind> {
        Self::all().find(|kind| kind.base_key() == key)
    }

    /// The palette item `type`.
    pub fn item_type(self) -> &'static str {
        match self {
            FieldKind::RadioTabs => "radiogroup",
            FieldKind::H1
            | FieldKind::H2
            | FieldKind::H3
            | FieldKind::H4
            | FieldKind::Quote
            | FieldKind::Link
            | FieldKind::Divider => "static",
            FieldKind::Submit
            | FieldKind::Reset
            | FieldKind::PrimaryButton
            | FieldKind::SecondaryButton
            | FieldKind::DangerButton => "button",
            other => other.base_key(),
        }
    }

    /// Message key of the display name; the description key appends
    /// `Description`.
    pub fn message_key(self) -> &'static str {
        match self {
            FieldKind::Textarea => "textarea",
            FieldKind::Text => "textInput",
            FieldKind::Password => "passwordInput",
            FieldKind::Email => "emailInput",
            FieldKind::Number => "numberInput",
            FieldKind::Phone => "phoneInput",
            FieldKind::Url => "urlInput",
            FieldKind::Editor => "editorField",
            FieldKind::Checkbox => "checkboxField",
            FieldKind::CheckboxGroup => "checkboxGroupField",
            FieldKind::Toggle => "toggleField",
            FieldKind::Select => "selectField",
            FieldKind::Tags => "tagsField",
            FieldKind::Slider => "sliderField",
            FieldKind::File => "fileField",
            FieldKind::Date => "dateField",
            FieldKind::Hidden => "hiddenField",
            FieldKind::Radio => "radioInput",
            FieldKind::RadioTabs => "radioTabs",
            FieldKind::H1 => "h1",
            FieldKind::H2 => "h2",
            FieldKind::H3 => "h3",
            FieldKind::H4 => "h4",
            FieldKind::Submit => "submitButton",
            FieldKind::Reset => "resetButton",
            FieldKind::PrimaryButton => "primaryButton",
            FieldKind::SecondaryButton => "secondaryButton",
            FieldKind::DangerButton => "dangerButton",
            FieldKind::Quote => "quote",
            FieldKind::Link => "link",
            FieldKind::Divider => "divider",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            FieldKind::Textarea => "lucide:file-text",
            FieldKind::Text => "lucide:type",
            FieldKind::Password => "lucide:lock",
            FieldKind::Email => "lucide:mail",
            FieldKind::Number => "lucide:hash",
            FieldKind::Phone => "lucide:phone",
            FieldKind::Url => "lucide:link-2",
            FieldKind::Editor => "lucide:pen-square",
            FieldKind::Checkbox => "lucide:square-check",
            FieldKind::CheckboxGroup => "lucide:list-checks",
            FieldKind::Toggle => "lucide:toggle-right",
            FieldKind::Select => "lucide:chevron-down",
            FieldKind::Tags => "lucide:tags",
            FieldKind::Slider => "lucide:sliders-horizontal",
            FieldKind::File => "lucide:file-up",
            FieldKind::Date => "lucide:calendar",
            FieldKind::Hidden => "lucide:eye-off",
            FieldKind::Radio => "lucide:circle",
            FieldKind::RadioTabs => "lucide:layout-grid",
            FieldKind::H1 => "lucide:heading-1",
            FieldKind::H2 => "lucide:heading-2",
            FieldKind::H3 => "lucide:heading-3",
            FieldKind::H4 => "lucide:heading-4",
            FieldKind::Submit => "lucide:check",
            FieldKind::Reset => "lucide:rotate-ccw",
            FieldKind::PrimaryButton => "lucide:square",
            FieldKind::SecondaryButton => "lucide:square-dot",
            FieldKind::DangerButton => "lucide:alert-triangle",
            FieldKind::Quote => "lucide:quote",
            FieldKind::Link => "lucide:link",
            FieldKind::Divider => "lucide:divide",
        }
    }

    pub fn display_name(self, locale: &Localizer) -> String {
        locale.t(self.message_key())
    }

    pub fn description(self, locale: &Localizer) -> String {
        locale.t(&format!("{}Description", self.message_key()))
    }

    /// The palette item (drag payload) for this kind.
    pub fn item(self, locale: &Localizer) -> Item {
        Item {
            id: format!("{}_drag", self.base_key()),
            item_type: self.item_type().to_string(),
            name: self.display_name(locale),
            description: self.description(locale),
            icon: self.icon().to_string(),
        }
    }

    /// Default schema entry stored under `key`. `name` is the localized
    /// palette name, used as label by the kinds that show it.
    pub fn default_entry(self, key: FieldId, name: &str) -> SchemaEntry {
        let base = self.base_key();
        let common = |builder_label: &str| Common::new(key, BuilderMeta::new(base, builder_label));

        let field = match self {
            FieldKind::Textarea => Field::Textarea(TextareaField {
                common: common(name).with_label(name),
            }),
            FieldKind::Text => Field::Text(TextField {
                common: common(name).with_label(name),
                ..TextField::default()
            }),
            FieldKind::Password => Field::Text(TextField {
                input_type: Some("password".into()),
                common: common("Password").with_label("Password"),
                ..TextField::default()
            }),
            FieldKind::Email => Field::Text(TextField {
                input_type: Some("email".into()),
                common: common("Email address")
                    .with_label(name)
                    .with_rules(&["nullable", "email"]),
                ..TextField::default()
            }),
            FieldKind::Number => Field::Text(TextField {
                input_type: Some("number".into()),
                autocomplete: Some("off".into()),
                common: common("Number input")
                    .with_label(name)
                    .with_rules(&["nullable", "numeric"]),
                ..TextField::default()
            }),
            FieldKind::Phone => Field::Phone(PhoneField {
                allow_incomplete: Some(true),
                unmask: Some(true),
                common: common("Phone number").with_label("Phone"),
            }),
            FieldKind::Url => Field::Text(TextField {
                input_type: Some("url".into()),
                floating: Some("a".into()),
                common: common("URL")
                    .with_label("URL")
                    .with_rules(&["nullable", "url"])
                    .with_placeholder("eg. http(s)://domain.com"),
                ..TextField::default()
            }),
            FieldKind::Editor => Field::Editor(EditorField {
                common: common("WYSIWYG editor").with_label("Editor"),
                ..EditorField::default()
            }),
            FieldKind::Checkbox => Field::Checkbox(CheckboxField {
                text: Some("Checkbox".into()),
                common: common("Checkbox"),
                ..CheckboxField::default()
            }),
            FieldKind::CheckboxGroup => Field::CheckboxGroup(CheckboxGroupField {
                items: Some(vec![ChoiceItem::new("0", "Label")]),
                common: common("Checkbox group"),
            }),
            FieldKind::Toggle => Field::Toggle(ToggleField {
                text: Some("Toggle".into()),
                common: common("Toggle"),
                ..ToggleField::default()
            }),
            FieldKind::Select => Field::Select(SelectField {
                items: Some(vec![ChoiceItem::new("0", "Label")]),
                common: common("Select").with_label("Select"),
                ..SelectField::default()
            }),
            FieldKind::Tags => Field::Tags(TagsField {
                items: Some(vec![ChoiceItem::new("0", "Label")]),
                close_on_select: Some(false),
                search: Some(true),
                input_type: Some("search".into()),
                autocomplete: Some("off".into()),
                common: common("Tags").with_label("Tags"),
                ..TagsField::default()
            }),
            FieldKind::Slider => Field::Slider(SliderField {
                min: Some(Number::from(1)),
                max: Some(Number::from(111)),
                step: Some(Number::from(1)),
                format: Some(SliderFormat {
                    prefix: Some("s".into()),
                    suffix: Some("s".into()),
                    thousand: Some("s".into()),
                }),
                common: common("Slider").with_label("Slider").with_default(30),
            }),
            FieldKind::File => Field::File(FileField {
                url: Some("a".into()),
                accept: Some("application/gzip".into()),
                upload_temp_endpoint: Some(Endpoint::url("s")),
                remove_temp_endpoint: Some(Endpoint::url("s")),
                remove_endpoint: Some(Endpoint::url("s")),
                common: common("File upload").with_label("File"),
            }),
            FieldKind::Date => Field::Date(DateField {
                display_format: Some("YYYY-MM-DD".into()),
                value_format: Some("YYYY-MM-DD".into()),
                load_format: Some("YYYY-MM-DD".into()),
                min: Some("2025-10-29".into()),
                max: Some("2025-11-12".into()),
                disables: Some(vec![Value::from("2025-11-06")]),
                addons: Some(Addons {
                    before: Some("a".into()),
                    after: Some("a".into()),
                }),
                common: common("Date")
                    .with_label("Date")
                    .with_placeholder("a")
                    .with_default("2025-11-05"),
            }),
            FieldKind::Hidden => {
                let mut builder = BuilderMeta::new(base, "Hidden input");
                builder.resize = Some(false);
                Field::Hidden(HiddenField {
                    meta: Some(true),
                    common: Common::new(key, builder).with_default("sd"),
                })
            }
            FieldKind::Radio => Field::Radio(RadioField {
                text: Some(name.to_string()),
                common: common("Radio"),
                ..RadioField::default()
            }),
            FieldKind::RadioTabs => Field::RadioGroup(RadioGroupField {
                view: Some("tabs".into()),
                items: Some(Vec::new()),
                common: common("Radio tabs").with_label(name),
            }),
            FieldKind::H1 | FieldKind::H2 | FieldKind::H3 | FieldKind::H4 => {
                Field::Static(StaticField {
                    tag: Some(base.into()),
                    content: Some("Lorem ipsum dolor".into()),
                    common: common(&format!("{} header", base.to_uppercase())),
                    ..StaticField::default()
                })
            }
            FieldKind::Quote => Field::Static(StaticField {
                tag: Some("blockquote".into()),
                content: Some("Lorem ipsum dolor".into()),
                common: common("Quote"),
                ..StaticField::default()
            }),
            FieldKind::Link => Field::Static(StaticField {
                tag: Some("a".into()),
                content: Some("Link".into()),
                target: Some("_blank".into()),
                href: Some(String::new()),
                common: common("Link"),
            }),
            FieldKind::Divider => Field::Static(StaticField {
                tag: Some("hr".into()),
                common: common("Divider"),
                ..StaticField::default()
            }),
            FieldKind::Submit => Field::Button(ButtonField {
                button_label: Some("Submit".into()),
                submits: Some(true),
                common: common("Submit button"),
                ..ButtonField::default()
            }),
            FieldKind::Reset => Field::Button(ButtonField {
                button_label: Some("Reset".into()),
                secondary: Some(true),
                resets: Some(true),
                align: Some(Align::Left),
                common: common("Reset button"),
                ..ButtonField::default()
            }),
            FieldKind::PrimaryButton => Field::Button(ButtonField {
                button_label: Some("Button".into()),
                common: common("Primary button"),
                ..ButtonField::default()
            }),
            FieldKind::SecondaryButton => Field::Button(ButtonField {
                button_label: Some("Button".into()),
                secondary: Some(true),
                common: common("Secondary button"),
                ..ButtonField::default()
            }),
            FieldKind::DangerButton => Field::Button(ButtonField {
                button_label: Some("Button".into()),
                danger: Some(true),
                common: common("Danger button"),
                ..ButtonField::default()
            }),
        };
        SchemaEntry::Field(field)
    }
}

/// Entry for a drag payload whose kind the catalog does not know.
pub fn generic_entry(item_type: &str, key: FieldId, name: &str) -> SchemaEntry {
    SchemaEntry::from_value(json!({
        "type": item_type,
        "label": name,
        "name": key.as_str(),
        "builder": { "type": item_type, "label": name },
    }))
}

/// Resolve a dropped palette item into the entry stored under `key`.
pub fn entry_for_item(item: &Item, key: FieldId) -> SchemaEntry {
    match FieldKind::from_base_key(crate::id::drag_base_key(&item.id)) {
        Some(kind) => kind.default_entry(key, &item.name),
        None => generic_entry(&item.item_type, key, &item.name),
    }
}

/// The two palette sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub fields: Vec<Item>,
    pub statics: Vec<Item>,
}

pub fn palette(locale: &Localizer) -> Palette {
    Palette {
        fields: FieldKind::INPUTS.iter().map(|k| k.item(locale)).collect(),
        statics: FieldKind::STATICS.iter().map(|k| k.item(locale)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn exported(kind: FieldKind) -> Value {
        let key = FieldId::intern(kind.base_key());
        let name = kind.display_name(&Localizer::default());
        serde_json::to_value(kind.default_entry(key, &name)).unwrap()
    }

    #[test]
    fn palette_has_every_kind_once() {
        let p = palette(&Localizer::default());
        assert_eq!(p.fields.len(), 19);
        assert_eq!(p.statics.len(), 12);
        let mut ids: Vec<&str> = p.fields.iter().chain(&p.statics).map(|i| i.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 31);
    }

    #[test]
    fn base_keys_roundtrip() {
        for kind in FieldKind::all() {
            assert_eq!(FieldKind::from_base_key(kind.base_key()), Some(kind));
        }
        assert_eq!(FieldKind::from_base_key("spaceship"), None);
    }

    #[test]
    fn item_uses_localized_text() {
        let item = FieldKind::Email.item(&Localizer::default());
        assert_eq!(item.id, "email_drag");
        assert_eq!(item.item_type, "email");
        assert_eq!(item.name, "Email address");
        assert_eq!(item.icon, "lucide:mail");
        assert_eq!(FieldKind::RadioTabs.item_type(), "radiogroup");
        assert_eq!(FieldKind::DangerButton.item_type(), "button");
        assert_eq!(FieldKind::Divider.item_type(), "static");
    }

    #[test]
    fn email_defaults() {
        assert_eq!(
            exported(FieldKind::Email),
            json!({
                "name": "email",
                "type": "text",
                "inputType": "email",
                "label": "Email address",
                "rules": ["nullable", "email"],
                "builder": { "type": "email", "label": "Email address" }
            })
        );
    }

    #[test]
    fn slider_defaults() {
        assert_eq!(
            exported(FieldKind::Slider),
            json!({
                "name": "slider",
                "type": "slider",
                "label": "Slider",
                "default": 30,
                "min": 1,
                "max": 111,
                "step": 1,
                "format": { "prefix": "s", "suffix": "s", "thousand": "s" },
                "builder": { "type": "slider", "label": "Slider" }
            })
        );
    }

    #[test]
    fn file_and_date_defaults() {
        assert_eq!(
            exported(FieldKind::File),
            json!({
                "name": "file",
                "type": "file",
                "label": "File",
                "url": "a",
                "accept": "application/gzip",
                "removeTempEndpoint": { "url": "s" },
                "uploadTempEndpoint": { "url": "s" },
                "removeEndpoint": { "url": "s" },
                "builder": { "type": "file", "label": "File upload" }
            })
        );
        assert_eq!(
            exported(FieldKind::Date),
            json!({
                "name": "date",
                "type": "date",
                "label": "Date",
                "placeholder": "a",
                "displayFormat": "YYYY-MM-DD",
                "valueFormat": "YYYY-MM-DD",
                "loadFormat": "YYYY-MM-DD",
                "min": "2025-10-29",
                "max": "2025-11-12",
                "disables": ["2025-11-06"],
                "default": "2025-11-05",
                "addons": { "before": "a", "after": "a" },
                "builder": { "type": "date", "label": "Date" }
            })
        );
    }

    #[test]
    fn hidden_pins_resize() {
        assert_eq!(
            exported(FieldKind::Hidden),
            json!({
                "name": "hidden",
                "type": "hidden",
                "default": "sd",
                "meta": true,
                "builder": { "resize": false, "type": "hidden", "label": "Hidden input" }
            })
        );
    }

    #[test]
    fn button_variants() {
        assert_eq!(
            exported(FieldKind::Submit),
            json!({
                "name": "submit",
                "type": "button",
                "buttonLabel": "Submit",
                "submits": true,
                "builder": { "type": "submit", "label": "Submit button" }
            })
        );
        assert_eq!(
            exported(FieldKind::Reset),
            json!({
                "name": "reset",
                "type": "button",
                "buttonLabel": "Reset",
                "secondary": true,
                "resets": true,
                "align": "left",
                "builder": { "type": "reset", "label": "Reset button" }
            })
        );
        assert_eq!(exported(FieldKind::DangerButton)["danger"], json!(true));
        assert_eq!(exported(FieldKind::SecondaryButton)["secondary"], json!(true));
        assert_eq!(exported(FieldKind::PrimaryButton)["buttonLabel"], json!("Button"));
    }

    #[test]
    fn headings_use_their_tag() {
        assert_eq!(
            exported(FieldKind::H2),
            json!({
                "name": "h2",
                "type": "static",
                "tag": "h2",
                "content": "Lorem ipsum dolor",
                "builder": { "type": "h2", "label": "H2 header" }
            })
        );
        assert_eq!(exported(FieldKind::Divider)["tag"], json!("hr"));
        assert_eq!(exported(FieldKind::Link)["target"], json!("_blank"));
    }

    #[test]
    fn every_default_entry_is_typed_and_reparses() {
        for kind in FieldKind::all() {
            let entry = kind.default_entry(FieldId::intern(kind.base_key()), "Name");
            assert!(!entry.is_raw(), "{kind:?} produced a raw entry");
            let value = serde_json::to_value(&entry).unwrap();
            let back: SchemaEntry = serde_json::from_value(value).unwrap();
            assert_eq!(back, entry, "{kind:?} changed after re-parse");
        }
    }

    #[test]
    fn unknown_payload_gets_generic_entry() {
        let item = Item {
            id: "rating_drag".into(),
            item_type: "rating".into(),
            name: "Rating".into(),
            description: String::new(),
            icon: String::new(),
        };
        let entry = entry_for_item(&item, FieldId::intern("rating"));
        assert_eq!(
            serde_json::to_value(entry).unwrap(),
            json!({
                "type": "rating",
                "label": "Rating",
                "name": "rating",
                "builder": { "type": "rating", "label": "Rating" }
            })
        );
    }
}
