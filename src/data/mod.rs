//! Template data assembly.
//!
//! Template data is a JSON object built from up to three layers, each one
//! overriding keys of the previous:
//!
//! 1. inline JSON from `--data`
//! 2. the JSON file given with `--json`
//! 3. `componentVersions`, added by the generate command once versions are
//!    known (see [`with_component_versions`])
//!
//! Merging is shallow: a key present in a later layer replaces the whole
//! value from an earlier one.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

use crate::core::DepstampError;
use crate::utils::fs::path_exists;
use crate::versions::ComponentVersion;

/// Key under which component versions are exposed to templates.
pub const COMPONENT_VERSIONS_KEY: &str = "componentVersions";

/// The mapping handed to the template engine.
pub type TemplateData = Map<String, Value>;

/// Parse `--data` into template data.
///
/// A missing or empty string yields an empty mapping.
///
/// # Errors
///
/// - [`DepstampError::MalformedJson`] naming the input when it is not JSON
/// - [`DepstampError::DataNotObject`] when it is JSON but not an object
pub fn parse_inline_json(input: Option<&str>) -> Result<TemplateData> {
    let Some(input) = input.filter(|s| !s.is_empty()) else {
        return Ok(TemplateData::new());
    };

    let value: Value = match serde_json::from_str(input) {
        Ok(value) => value,
        Err(e) if e.is_syntax() || e.is_eof() => {
            return Err(DepstampError::MalformedJson {
                input: input.to_string(),
            }
            .into());
        }
        Err(e) => {
            tracing::warn!("Error: {}", e);
            return Err(e).context("Failed to parse --data");
        }
    };

    into_object(value, "--data")
}

/// Read and parse a JSON data file.
///
/// An empty file yields an empty mapping, the same as an empty `--data`.
///
/// # Errors
///
/// - I/O errors reading the file
/// - [`DepstampError::MalformedDataFile`] naming the path when it is not JSON
/// - [`DepstampError::DataNotObject`] when it is JSON but not an object
pub async fn read_json_file(path: &Path) -> Result<TemplateData> {
    let source = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read JSON data file: {}", path.display()))?;
    if source.is_empty() {
        return Ok(TemplateData::new());
    }

    let value: Value = match serde_json::from_str(&source) {
        Ok(value) => value,
        Err(e) if e.is_syntax() || e.is_eof() => {
            return Err(DepstampError::MalformedDataFile {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into());
        }
        Err(e) => {
            tracing::warn!("Error: {}", e);
            return Err(e)
                .with_context(|| format!("Failed to parse JSON data file: {}", path.display()));
        }
    };

    into_object(value, &path.display().to_string())
}

/// Merge inline JSON and an optional JSON file into one mapping.
///
/// File keys override inline keys. A file path that doesn't exist is skipped,
/// matching how a missing `--json` file has always been treated. The function
/// returns only after the file has been read and merged.
///
/// # Examples
///
/// ```rust,no_run
/// use depstamp::data::merge_data;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let data = merge_data(Some(r#"{"release": "2.1.0"}"#), Some(Path::new("build.json"))).await?;
/// println!("{}", serde_json::Value::Object(data));
/// # Ok(())
/// # }
/// ```
pub async fn merge_data(inline_json: Option<&str>, file: Option<&Path>) -> Result<TemplateData> {
    let mut data = parse_inline_json(inline_json)?;
    tracing::debug!("Parsed {} inline data keys", data.len());

    if let Some(path) = file {
        let exists = path_exists(path)
            .await
            .with_context(|| format!("Failed to access JSON data file: {}", path.display()))?;
        if exists {
            let file_data = read_json_file(path).await?;
            tracing::debug!("Merging {} keys from {}", file_data.len(), path.display());
            data.extend(file_data);
        } else {
            tracing::debug!("JSON data file {} does not exist, skipping", path.display());
        }
    }

    Ok(data)
}

/// Copy of `data` with [`COMPONENT_VERSIONS_KEY`] set to `versions`.
///
/// Any `componentVersions` supplied by the user is replaced.
pub fn with_component_versions(
    data: &TemplateData,
    versions: &[ComponentVersion],
) -> Result<TemplateData> {
    let mut merged = data.clone();
    let versions = serde_json::to_value(versions).context("Failed to serialize component versions")?;
    merged.insert(COMPONENT_VERSIONS_KEY.to_string(), versions);
    Ok(merged)
}

fn into_object(value: Value, origin: &str) -> Result<TemplateData> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DepstampError::DataNotObject {
            origin: origin.to_string(),
            found: json_type_name(&other).to_string(),
        }
        .into()),
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
