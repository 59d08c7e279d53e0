//! Template rendering to the output file.
//!
//! [`render_to_file`] is the renderer stage of the pipeline:
//!
//! 1. read the template file
//! 2. render it with [`TemplateRenderer`] against the merged data
//! 3. write the result unless the output exists and `force` is off
//!
//! Templates use Tera syntax. A typical version page:
//!
//! ```html
//! <h1>{{ title }}</h1>
//! <table>
//! {% for c in componentVersions %}
//!   <tr><td>{{ c.name }}</td><td>{{ c.version }}</td></tr>
//! {% endfor %}
//! </table>
//! ```

pub mod renderer;

pub use renderer::TemplateRenderer;

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::{DepstampError, Reporter};
use crate::data::TemplateData;
use crate::utils::fs::{atomic_write, ensure_parent_dir, path_exists};

/// Status line after a successful write.
pub const WRITTEN_MESSAGE: &str = "File successfully written.";

/// Status line when an existing output is left alone.
pub const NOT_OVERWRITTEN_MESSAGE: &str = "File exists and will not be overwritten.";

/// What happened to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The rendered text was written (new file or forced overwrite)
    Written,
    /// The output already existed and `force` was off
    Skipped,
}

/// Render `template_path` with `data` and write it to `output_path`.
///
/// The output is written when it does not exist yet, or when `force` is set.
/// Missing parent directories are created first. An existing output without
/// `force` is left byte-for-byte unchanged.
///
/// # Errors
///
/// - [`DepstampError::TemplateReadFailed`] if the template cannot be read
/// - [`DepstampError::TemplateRenderFailed`] if Tera rejects it
/// - [`DepstampError::OutputWriteFailed`] if it cannot be determined whether
///   the output exists
/// - directory or write errors from [`crate::utils::fs`]
///
/// These are returned rather than reported so the caller can show them
/// regardless of `--silent`.
pub async fn render_to_file(
    template_path: &Path,
    data: &TemplateData,
    output_path: &Path,
    force: bool,
    reporter: &Reporter,
) -> Result<RenderOutcome> {
    let source = tokio::fs::read_to_string(template_path).await.with_context(|| {
        DepstampError::TemplateReadFailed {
            path: template_path.display().to_string(),
        }
    })?;

    let name = template_path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let rendered = TemplateRenderer::new().render(&name, &source, data)?;

    let exists = path_exists(output_path).await.with_context(|| DepstampError::OutputWriteFailed {
        path: output_path.display().to_string(),
    })?;
    if exists && !force {
        tracing::debug!("{} exists and --force not set", output_path.display());
        reporter.status(NOT_OVERWRITTEN_MESSAGE);
        return Ok(RenderOutcome::Skipped);
    }

    let created = ensure_parent_dir(output_path).await?;
    for dir in &created {
        reporter.detail(format!("Created directory: {}", dir.display()));
    }

    atomic_write(output_path, rendered.as_bytes()).await?;
    tracing::debug!("Wrote {} bytes to {}", rendered.len(), output_path.display());
    reporter.status(WRITTEN_MESSAGE);

    Ok(RenderOutcome::Written)
}
