//! Loading CWL documents from disk.
//!
//! Parsing is delegated to serde_yaml: a document is YAML (or JSON, which
//! YAML subsumes) in one of three surface forms: a single process, a bare
//! sequence of processes, or the packed form carrying a `$graph` list. All
//! three load into [`CwlDocument`].
//!
//! No id synthesis happens here: a process without an `id` stays anonymous
//! and can never be resolved by name.

use crate::cwl::{CwlDocument, Process};
use crate::error::LoadError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The surface forms a document file can take.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Packed(PackedDocument),
    Collection(Vec<Process>),
    Single(Box<Process>),
}

/// The packed form: processes live under a `$graph` key.
#[derive(Deserialize)]
struct PackedDocument {
    #[serde(rename = "$graph")]
    graph: Vec<Process>,
}

/// Parses CWL document source text into the document model.
pub fn parse_document(source: &str) -> Result<CwlDocument, serde_yaml::Error> {
    let raw: RawDocument = serde_yaml::from_str(source)?;
    Ok(match raw {
        RawDocument::Packed(packed) => CwlDocument::Collection(packed.graph),
        RawDocument::Collection(processes) => CwlDocument::Collection(processes),
        RawDocument::Single(process) => CwlDocument::Single(process),
    })
}

/// Reads and parses the CWL document at `path`.
pub fn load_document(path: &Path) -> Result<CwlDocument, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_document(&source).map_err(|source| LoadError::Parse {
        path: path.display().to_string(),
        source,
    })
}
