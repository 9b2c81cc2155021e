//! cwl2click: generate click command-line interfaces from CWL processes.
//!
//! A single-pass converter: load a CWL document, resolve a named
//! CommandLineTool inside it, map each input's CWL type to a click option
//! type and a Python host type, and render a click script mirroring those
//! inputs.

pub mod cli;
pub mod cwl;
pub mod error;
pub mod loader;
pub mod mapper;
pub mod renderer;
pub mod resolver;

// Re-export commonly used error types
pub use error::{ConvertError, LoadError, RenderError, ResolveError};
pub use renderer::{render, write_click_cli, RenderMeta, TEMPLATE_NAME};
pub use resolver::find_and_validate;
