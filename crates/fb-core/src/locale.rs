//! Message lookup for palette names, descriptions and step labels.
//!
//! A `Localizer` is an explicit service handed to whatever formats display
//! text; there is no process-wide instance. Lookup order is
//! active locale → fallback locale → the key itself.

use std::collections::HashMap;

pub const DEFAULT_LOCALE: &str = "en";

/// Built-in English catalog.
const EN: &[(&str, &str)] = &[
    ("step", "Step"),
    ("textarea", "Textarea"),
    ("textareaDescription", "Multi-line text input"),
    ("textInput", "Text input"),
    ("textInputDescription", "Single-line text input"),
    ("passwordInput", "Password"),
    ("passwordInputDescription", "Masked text input"),
    ("emailInput", "Email address"),
    ("emailInputDescription", "Text input validating an email address"),
    ("numberInput", "Number"),
    ("numberInputDescription", "Text input accepting numbers only"),
    ("phoneInput", "Phone number"),
    ("phoneInputDescription", "Phone input with country mask"),
    ("urlInput", "URL"),
    ("urlInputDescription", "Text input validating a URL"),
    ("editorField", "WYSIWYG editor"),
    ("editorFieldDescription", "Rich text editor"),
    ("checkboxField", "Checkbox"),
    ("checkboxFieldDescription", "Single checkbox"),
    ("checkboxGroupField", "Checkbox group"),
    ("checkboxGroupFieldDescription", "List of checkboxes"),
    ("toggleField", "Toggle"),
    ("toggleFieldDescription", "On/off switch"),
    ("selectField", "Select"),
    ("selectFieldDescription", "Dropdown with a single choice"),
    ("tagsField", "Tags"),
    ("tagsFieldDescription", "Dropdown with multiple choices"),
    ("sliderField", "Slider"),
    ("sliderFieldDescription", "Number picked on a range"),
    ("fileField", "File upload"),
    ("fileFieldDescription", "Upload a single file"),
    ("dateField", "Date"),
    ("dateFieldDescription", "Date picker"),
    ("hiddenField", "Hidden input"),
    ("hiddenFieldDescription", "Value submitted without being shown"),
    ("radioInput", "Radio"),
    ("radioInputDescription", "Single radio button"),
    ("radioTabs", "Radio tabs"),
    ("radioTabsDescription", "Choice rendered as tabs"),
    ("h1", "H1 header"),
    ("h1Description", "Largest heading"),
    ("h2", "H2 header"),
    ("h2Description", "Second level heading"),
    ("h3", "H3 header"),
    ("h3Description", "Third level heading"),
    ("h4", "H4 header"),
    ("h4Description", "Fourth level heading"),
    ("submitButton", "Submit button"),
    ("submitButtonDescription", "Submits the form"),
    ("resetButton", "Reset button"),
    ("resetButtonDescription", "Resets the form"),
    ("primaryButton", "Primary button"),
    ("primaryButtonDescription", "Button with primary style"),
    ("secondaryButton", "Secondary button"),
    ("secondaryButtonDescription", "Button with secondary style"),
    ("dangerButton", "Danger button"),
    ("dangerButtonDescription", "Button with danger style"),
    ("quote", "Quote"),
    ("quoteDescription", "Block quote"),
    ("link", "Link"),
    ("linkDescription", "Anchor link"),
    ("divider", "Divider"),
    ("dividerDescription", "Horizontal line"),
];

/// Messages of one locale: key → text.
pub type Messages = HashMap<String, String>;

#[derive(Debug, Clone)]
pub struct Localizer {
    locale: String,
    fallback: String,
    catalogs: HashMap<String, Messages>,
}

impl Localizer {
    /// A localizer with the built-in catalogs, `locale` active and
    /// English as fallback.
    pub fn new(locale: &str) -> Self {
        let mut localizer = Self {
            locale: locale.to_string(),
            fallback: DEFAULT_LOCALE.to_string(),
            catalogs: HashMap::new(),
        };
        localizer.load_builtin();
        localizer
    }

    fn load_builtin(&mut self) {
        let en = EN
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.catalogs.insert(DEFAULT_LOCALE.to_string(), en);
    }

    /// Resolve `key` for the active locale.
    pub fn t(&self, key: &str) -> String {
        [self.locale.as_str(), self.fallback.as_str()]
            .iter()
            .find_map(|locale| self.catalogs.get(*locale)?.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn set_locale(&mut self, locale: &str) {
        self.locale = locale.to_string();
    }

    pub fn set_fallback(&mut self, locale: &str) {
        self.fallback = locale.to_string();
    }

    /// Replace the whole catalog of `locale` with `messages`.
    pub fn register_messages<K, V>(&mut self, locale: &str, messages: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let messages = messages
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.catalogs.insert(locale.to_string(), messages);
    }

    /// Drop registered catalogs and return to the built-in English setup.
    pub fn reset(&mut self) {
        self.catalogs.clear();
        self.load_builtin();
        self.locale = DEFAULT_LOCALE.to_string();
        self.fallback = DEFAULT_LOCALE.to_string();
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}
