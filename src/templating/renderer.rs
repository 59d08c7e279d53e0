//! Template rendering engine with Tera.
//!
//! Wraps a fresh [`Tera`] instance per render. Templates are registered under
//! their file name, so Tera's autoescaping applies to `.html`, `.htm` and
//! `.xml` templates and is off for everything else.

use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;
use strsim::levenshtein;
use tera::{Context as TeraContext, Tera};

use crate::core::{DepstampError, ErrorContext};
use crate::data::TemplateData;

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Name used for templates rendered without a file name.
const UNNAMED_TEMPLATE: &str = "template";

/// Renders template sources against [`TemplateData`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    /// Create a renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render `source` registered as `name` with `data` as context.
    ///
    /// An empty `name` is registered as `template`, which keeps autoescaping
    /// off.
    ///
    /// # Errors
    ///
    /// Returns [`DepstampError::TemplateRenderFailed`] wrapped in an
    /// [`ErrorContext`]. Undefined variables carry "did you mean"
    /// suggestions drawn from the data's top-level keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use depstamp::templating::TemplateRenderer;
    /// use serde_json::json;
    ///
    /// let data = match json!({"componentVersions": [{"name": "react", "version": "18.2.0"}]}) {
    ///     serde_json::Value::Object(map) => map,
    ///     _ => unreachable!(),
    /// };
    /// let out = TemplateRenderer::new()
    ///     .render(
    ///         "versions.txt",
    ///         "{% for c in componentVersions %}{{ c.name }} {{ c.version }}{% endfor %}",
    ///         &data,
    ///     )
    ///     .unwrap();
    /// assert_eq!(out, "react 18.2.0");
    /// ```
    pub fn render(&self, name: &str, source: &str, data: &TemplateData) -> Result<String> {
        let name = if name.is_empty() { UNNAMED_TEMPLATE } else { name };

        tracing::debug!("Rendering template {} with {} data keys", name, data.len());
        Self::log_data_keys(data);

        let mut tera = Tera::default();
        tera.add_raw_template(name, source).map_err(|e| Self::render_error(name, &e, data))?;

        let context = TeraContext::from_serialize(data).map_err(|e| Self::render_error(name, &e, data))?;

        let rendered = tera.render(name, &context).map_err(|e| Self::render_error(name, &e, data))?;

        tracing::debug!("Template rendering complete ({} bytes)", rendered.len());
        Ok(rendered)
    }

    fn render_error(name: &str, error: &tera::Error, data: &TemplateData) -> anyhow::Error {
        let message = Self::format_tera_error(error, name);
        let mut ctx = ErrorContext::new(DepstampError::TemplateRenderFailed {
            template: name.to_string(),
            message: message.clone(),
        })
        .with_details("Templates use tera syntax; component versions are available as `componentVersions`");

        if let Some(variable) = Self::extract_variable_name(&message) {
            let available: Vec<String> = data.keys().cloned().collect();
            let root = variable.split('.').next().unwrap_or(variable.as_str());
            let suggestions = Self::find_similar_variables(root, &available);
            if !suggestions.is_empty() {
                let list =
                    suggestions.iter().map(|s| format!("`{s}`")).collect::<Vec<_>>().join(", ");
                ctx = ctx.with_suggestion(format!("Did you mean {list}?"));
            } else if !available.is_empty() {
                ctx = ctx.with_suggestion(format!("Available variables: {}", available.join(", ")));
            }
        }

        anyhow::Error::new(ctx)
    }

    /// Extract variable name from "Variable `foo` not found" message
    fn extract_variable_name(error_msg: &str) -> Option<String> {
        static RE: OnceLock<Option<Regex>> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"Variable `([^`]+)` not found").ok()).as_ref()?;
        re.captures(error_msg).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
    }

    /// Find similar variable names using Levenshtein distance
    fn find_similar_variables(target: &str, available: &[String]) -> Vec<String> {
        let mut scored: Vec<_> =
            available.iter().map(|var| (var.clone(), levenshtein(target, var))).collect();

        scored.sort_by_key(|(_, dist)| *dist);

        scored
            .into_iter()
            .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .take(3)
            .map(|(var, _)| var)
            .collect()
    }

    /// Flatten a Tera error chain into one readable message.
    ///
    /// Tera nests the useful message ("Variable `x` not found ...") under
    /// generic wrappers ("Failed to render 'name'"); the wrappers are dropped.
    fn format_tera_error(error: &tera::Error, name: &str) -> String {
        use std::error::Error;

        let mut all_messages = vec![error.to_string()];
        let mut current_error: Option<&dyn Error> = error.source();
        while let Some(err) = current_error {
            all_messages.push(err.to_string());
            current_error = err.source();
        }

        let quoted = format!("'{name}'");
        let messages: Vec<String> = all_messages
            .into_iter()
            .map(|msg| {
                msg.replace(&format!("while rendering {quoted}"), "")
                    .replace(&format!("Failed to render {quoted}"), "")
                    .replace(&format!("Failed to parse {quoted}"), "")
                    .trim()
                    .to_string()
            })
            .filter(|msg| !msg.is_empty())
            .collect();

        if messages.is_empty() {
            "Template syntax error".to_string()
        } else {
            messages.join("\n  → ")
        }
    }

    fn log_data_keys(data: &TemplateData) {
        for (key, value) in data {
            let summary = match value {
                serde_json::Value::Array(items) => format!("[{} items]", items.len()),
                serde_json::Value::Object(map) => format!("{{{} keys}}", map.len()),
                other => other.to_string(),
            };
            tracing::trace!("  {}: {}", key, summary);
        }
    }
}
