//! Field substitution for template content and entry names.
//! Placeholders are `{{key}}` (whitespace inside the braces is allowed).
//! There is no logic in templates: a placeholder is either replaced by its
//! field value or left exactly as written.

use indexmap::IndexMap;
use regex::{Captures, Regex};

/// Resolved substitutions, placeholder name to value.
pub type Fields = IndexMap<String, String>;

/// Matches `{{ key }}` and captures `key`.
const PLACEHOLDER_PATTERN: &str = r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}";

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given fields.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `fields` - Values for placeholder substitution
    ///
    /// # Returns
    /// * `String` - Rendered string; unknown placeholders are kept verbatim
    fn render(&self, template: &str, fields: &Fields) -> String;
}

/// Literal placeholder substitution engine.
pub struct FieldRenderer {
    placeholder: Regex,
}

impl FieldRenderer {
    /// Creates a new FieldRenderer with the `{{key}}` placeholder convention.
    pub fn new() -> Self {
        let placeholder = Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid");
        Self { placeholder }
    }
}

impl Default for FieldRenderer {
    fn default() -> Self {
        FieldRenderer::new()
    }
}

impl TemplateRenderer for FieldRenderer {
    fn render(&self, template: &str, fields: &Fields) -> String {
        if fields.is_empty() {
            return template.to_string();
        }
        self.placeholder
            .replace_all(template, |caps: &Captures| match fields.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}
