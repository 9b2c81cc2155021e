//! Rendering a resolved tool into click command-line source.
//!
//! The template is fixed: embedded at compile time and registered under
//! [`TEMPLATE_NAME`]. The engine is constructed fresh for every render, with
//! the mapper functions installed as filters and testers, so no template
//! state outlives an invocation.

use crate::cwl::{CommandLineTool, CwlDocument};
use crate::error::{ConvertError, RenderError};
use crate::{mapper, resolver};
use chrono::Local;
use std::io::Write;
use tera::{Context, Tera};

/// Name the fixed template is registered under.
pub const TEMPLATE_NAME: &str = "cli.py";

const CLI_TEMPLATE: &str = include_str!("templates/cli.py.tera");

/// Generation metadata stamped into the artifact header.
///
/// The timestamp is captured once per invocation and reused for the whole
/// render, so it is the only non-deterministic input.
#[derive(Debug, Clone)]
pub struct RenderMeta {
    pub version: String,
    pub timestamp: String,
}

impl RenderMeta {
    /// Captures the generator version and the current local time with
    /// millisecond precision.
    pub fn capture() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
        }
    }
}

fn engine() -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, CLI_TEMPLATE)?;
    mapper::register(&mut tera);
    Ok(tera)
}

/// Renders the generated source for a validated tool.
///
/// Deterministic given identical tool content and metadata.
pub fn render(tool: &CommandLineTool, meta: &RenderMeta) -> Result<String, RenderError> {
    let mut context = Context::new();
    context.insert("name", tool.id.as_deref().unwrap_or("main"));
    context.insert("doc", &tool.doc);
    context.insert("inputs", &tool.inputs);
    context.insert("version", &meta.version);
    context.insert("timestamp", &meta.timestamp);

    Ok(engine()?.render(TEMPLATE_NAME, &context)?)
}

/// Resolves `process_id` in `document` and writes the rendered click source
/// to `writer`.
///
/// The sink is caller-owned and is not closed here. Rendering is buffered
/// and written in one piece, so the sink only sees a partial write if the
/// underlying writer itself fails mid-stream.
pub fn write_click_cli<W: Write>(
    document: &CwlDocument,
    process_id: &str,
    meta: &RenderMeta,
    writer: &mut W,
) -> Result<(), ConvertError> {
    let tool = resolver::find_and_validate(document, process_id)?;
    let source = render(tool, meta)?;
    writer.write_all(source.as_bytes()).map_err(RenderError::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cwl::{CwlType, Input};
    use crate::loader;

    fn meta() -> RenderMeta {
        RenderMeta {
            version: "0.0.0-test".to_string(),
            timestamp: "2026-01-01T00:00:00.000".to_string(),
        }
    }

    fn tool(id: &str, inputs: Vec<Input>) -> CommandLineTool {
        CommandLineTool {
            id: Some(id.to_string()),
            label: None,
            doc: None,
            inputs,
        }
    }

    fn input(id: &str, input_type: CwlType, doc: Option<&str>) -> Input {
        Input {
            id: id.to_string(),
            input_type,
            doc: doc.map(str::to_string),
            label: None,
        }
    }

    #[test]
    fn required_string_input_renders_a_required_text_option() {
        let tool = tool(
            "argument",
            vec![input("input", CwlType::primitive("string"), Some("this is doc"))],
        );

        let source = render(&tool, &meta()).expect("render should succeed");

        assert!(source.contains("@cli.command(name='argument')"));
        assert!(source.contains("'--input',"));
        assert!(source.contains("required=True,"));
        assert!(source.contains("type=click.STRING,"));
        assert!(source.contains("help='this is doc',"));
        assert!(source.contains("def argument(input: str):"));
    }

    #[test]
    fn nullable_input_renders_as_optional() {
        let tool = tool(
            "argument",
            vec![input(
                "threshold",
                CwlType::union(vec![
                    CwlType::primitive("null"),
                    CwlType::primitive("double"),
                ]),
                None,
            )],
        );

        let source = render(&tool, &meta()).expect("render should succeed");

        assert!(source.contains("required=False,"));
        assert!(source.contains("type=click.FLOAT,"));
        assert!(source.contains("threshold: float"));
        assert!(!source.contains("help="));
    }

    #[test]
    fn enum_input_renders_a_choice_with_stripped_symbols() {
        let tool = tool(
            "grade",
            vec![input(
                "level",
                CwlType::enumeration(vec!["a/b/LOW".to_string(), "a/b/HIGH".to_string()]),
                None,
            )],
        );

        let source = render(&tool, &meta()).expect("render should succeed");

        assert!(source.contains("type=click.Choice(['LOW', 'HIGH']),"));
        assert!(!source.contains("a/b/LOW"));
    }

    #[test]
    fn array_input_renders_as_repeatable() {
        let tool = tool(
            "stack",
            vec![input(
                "layers",
                CwlType::array(CwlType::primitive("string")),
                None,
            )],
        );

        let source = render(&tool, &meta()).expect("render should succeed");

        assert!(source.contains("multiple=True,"));
        assert!(source.contains("type=click.STRING,"));
    }

    #[test]
    fn optional_array_still_renders_as_repeatable() {
        let tool = tool(
            "stack",
            vec![input(
                "layers",
                CwlType::union(vec![
                    CwlType::primitive("null"),
                    CwlType::array(CwlType::primitive("int")),
                ]),
                None,
            )],
        );

        let source = render(&tool, &meta()).expect("render should succeed");

        assert!(source.contains("required=False,"));
        assert!(source.contains("multiple=True,"));
        assert!(source.contains("type=click.INT,"));
    }

    #[test]
    fn camel_case_input_names_become_snake_case_options() {
        let tool = tool(
            "argument",
            vec![input("InputValue", CwlType::primitive("int"), None)],
        );

        let source = render(&tool, &meta()).expect("render should succeed");

        assert!(source.contains("'--input_value',"));
        assert!(source.contains("input_value: int"));
    }

    #[test]
    fn tool_doc_becomes_the_command_docstring() {
        let mut described = tool("argument", Vec::new());
        described.doc = Some("Echoes its input back.".to_string());

        let source = render(&described, &meta()).expect("render should succeed");

        assert!(source.contains("\"\"\"Echoes its input back.\"\"\""));
    }

    #[test]
    fn label_is_used_as_help_when_doc_is_absent() {
        let mut labelled = input("input", CwlType::primitive("string"), None);
        labelled.label = Some("short label".to_string());
        let tool = tool("argument", vec![labelled]);

        let source = render(&tool, &meta()).expect("render should succeed");

        assert!(source.contains("help='short label',"));
    }

    #[test]
    fn zero_input_tool_still_renders_a_runnable_command() {
        let tool = tool("empty", Vec::new());

        let source = render(&tool, &meta()).expect("render should succeed");

        assert!(source.contains("@cli.command(name='empty')"));
        assert!(source.contains("def empty():"));
        assert!(source.contains("no inputs declared"));
        assert!(source.contains("if __name__ == '__main__':"));
        assert!(!source.contains("@click.option"));
    }

    #[test]
    fn header_carries_version_and_timestamp() {
        let tool = tool("argument", Vec::new());

        let source = render(&tool, &meta()).expect("render should succeed");

        assert!(source.contains("cwl2click 0.0.0-test"));
        assert!(source.contains("2026-01-01T00:00:00.000"));
    }

    #[test]
    fn rendering_is_deterministic_for_fixed_metadata() {
        let tool = tool(
            "argument",
            vec![input("input", CwlType::primitive("string"), Some("this is doc"))],
        );

        let first = render(&tool, &meta()).expect("render should succeed");
        let second = render(&tool, &meta()).expect("render should succeed");
        assert_eq!(first, second);
    }

    #[test]
    fn write_click_cli_resolves_then_renders_into_the_sink() {
        let document = loader::parse_document(
            r#"
class: CommandLineTool
id: argument
inputs:
  - id: input
    type: string
    doc: this is doc
"#,
        )
        .expect("document should parse");

        let mut sink = Vec::new();
        write_click_cli(&document, "argument", &meta(), &mut sink)
            .expect("conversion should succeed");

        let source = String::from_utf8(sink).expect("generated source is UTF-8");
        assert!(source.contains("'--input',"));
        assert!(source.contains("help='this is doc',"));
    }

    #[test]
    fn write_click_cli_propagates_resolution_failures() {
        let document = loader::parse_document("{class: Workflow, id: main, inputs: []}")
            .expect("document should parse");

        let mut sink = Vec::new();
        let result = write_click_cli(&document, "missing", &meta(), &mut sink);

        assert!(matches!(result, Err(ConvertError::Resolve(_))));
        assert!(sink.is_empty());
    }
}
