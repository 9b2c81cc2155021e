//! Error types for the conversion pipeline.
//!
//! One enum per subsystem:
//! - Document loading (I/O and YAML parse failures)
//! - Process resolution (missing id, wrong process kind)
//! - Rendering (template evaluation, sink writes)

use thiserror::Error;

/// Errors raised while reading and parsing a CWL document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read CWL document '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CWL document '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors raised while resolving a process inside a document.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The requested id is absent. The message enumerates every process id
    /// actually present in the document.
    #[error(
        "process '{requested}' not found in the CWL document; available processes: [{}]",
        .available.join(", ")
    )]
    ProcessNotFound {
        requested: String,
        available: Vec<String>,
    },

    /// The id resolved, but to a process kind that cannot be converted.
    #[error("process '{id}' is of class '{actual}', expected '{expected}'")]
    ProcessKind {
        id: String,
        expected: &'static str,
        actual: String,
    },
}

/// Errors raised while rendering the generated source.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template evaluation failed: {0}")]
    Template(#[from] tera::Error),

    #[error("failed to write generated source: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error for a single conversion: resolve, then render.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
