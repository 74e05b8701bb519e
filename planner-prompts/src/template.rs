//! Fixed-text prompt templates with `{{variable}}` substitution.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PromptError, PromptResult};

/// A natural-language instruction template.
///
/// Placeholders use `{{name}}` syntax. Variables declared required must be
/// present in the map handed to [`PromptTemplate::render`]; any other
/// placeholder whose variable is absent renders as empty text, which is how
/// optional form fields (for example a student profile) drop out of the
/// prompt.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use planner_prompts::PromptTemplate;
///
/// let template = PromptTemplate::new("Advise {{name}} on electives.")
///     .with_required("name");
///
/// let mut vars = HashMap::new();
/// vars.insert("name".to_owned(), "Alex".to_owned());
/// assert_eq!(template.render(&vars).unwrap(), "Advise Alex on electives.");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PromptTemplate {
    text: String,
    required: Vec<String>,
}

impl PromptTemplate {
    /// Creates a template from fixed instruction text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            required: Vec::new(),
        }
    }

    /// Declares a variable that must be supplied at render time.
    #[must_use]
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Returns the raw template text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the names of every placeholder in the template.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        placeholder_names(&self.text)
    }

    /// Substitutes `vars` into the template.
    ///
    /// Substitution is a single left-to-right pass over the template text, so
    /// values containing brace sequences are never re-expanded.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::MissingVariable`] when a required variable is
    /// absent from `vars`, and [`PromptError::Malformed`] when a placeholder
    /// is left unterminated.
    pub fn render(&self, vars: &HashMap<String, String>) -> PromptResult<String> {
        for name in &self.required {
            if !vars.contains_key(name) {
                return Err(PromptError::MissingVariable { name: name.clone() });
            }
        }

        let mut rendered = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();
        while let Some(open) = rest.find("{{") {
            rendered.push_str(&rest[..open]);
            let after_open = &rest[open + 2..];
            let Some(close) = after_open.find("}}") else {
                return Err(PromptError::Malformed {
                    reason: format!("unterminated placeholder near offset {open}"),
                });
            };
            let name = after_open[..close].trim();
            if let Some(value) = vars.get(name) {
                rendered.push_str(value);
            }
            rest = &after_open[close + 2..];
        }
        rendered.push_str(rest);
        Ok(rendered)
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Joins list values into the display form templates embed.
#[must_use]
pub fn display_list(values: &[String]) -> String {
    values.join(", ")
}

fn placeholder_names(text: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            break;
        };
        let name = after_open[..close].trim();
        if !name.is_empty() {
            names.push(name);
        }
        rest = &after_open[close + 2..];
    }
    names
}
