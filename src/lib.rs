//! depstamp - stamp installed component versions into a rendered template
//!
//! depstamp asks a Node package manager (yarn or npm) for the project's
//! top-level dependencies, merges them with optional user data, and renders a
//! template into an output file such as a `version.html` page shipped with a
//! web build.
//!
//! # Pipeline
//!
//! ```text
//! --data ──┐
//!          ├─ data::merge_data ─┐
//! --json ──┘                    │
//!                               ├─ data::with_component_versions ─ templating::render_to_file ─ output
//! yarn list --depth=0 ──────────┘
//!   (versions::list_component_versions)
//! ```
//!
//! If the package manager fails, nothing is rendered and the command exits
//! with status 1.
//!
//! # Core Modules
//!
//! - [`cli`] - command-line interface and logging setup
//! - [`config`] - the immutable [`config::GenerateConfig`] for a run
//! - [`core`] - error types and the status [`core::Reporter`]
//! - [`data`] - template data parsing and merging
//! - [`templating`] - tera rendering and the write/skip decision
//! - [`versions`] - package manager invocation and list parsing
//! - [`utils`] - directory creation, atomic writes, platform helpers
//!
//! # Template Example
//!
//! ```html
//! <h1>{{ product }} {{ release }}</h1>
//! <ul>
//! {% for c in componentVersions %}
//!   <li>{{ c.name }}: {{ c.version }}</li>
//! {% endfor %}
//! </ul>
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! depstamp generate-version-file -d '{"product": "Console", "release": "3.1.0"}'
//! depstamp gvf -t templates/version.html -o dist/version.html --force
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod data;
pub mod templating;
pub mod utils;
pub mod versions;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
