//! Resolving a process by id inside a parsed document.

use crate::cwl::{CommandLineTool, CwlDocument, Process};
use crate::error::ResolveError;

/// The only process kind accepted for conversion.
const EXPECTED_CLASS: &str = "CommandLineTool";

/// Finds the process with `process_id` and validates it is a concrete
/// command-line tool.
///
/// `process_id` is expected to be a non-empty identifier; an empty string
/// matches nothing and reports the ids that are present. Pure read over the
/// document, no side effects.
pub fn find_and_validate<'a>(
    document: &'a CwlDocument,
    process_id: &str,
) -> Result<&'a CommandLineTool, ResolveError> {
    let process = document
        .processes()
        .find(|process| process.id() == Some(process_id))
        .ok_or_else(|| ResolveError::ProcessNotFound {
            requested: process_id.to_string(),
            available: document
                .processes()
                .filter_map(|process| process.id().map(str::to_string))
                .collect(),
        })?;

    match process {
        Process::CommandLineTool(tool) => Ok(tool),
        other => Err(ResolveError::ProcessKind {
            id: process_id.to_string(),
            expected: EXPECTED_CLASS,
            actual: other.class_name().to_string(),
        }),
    }
}
