//! Data model for parsed CWL documents.
//!
//! A document is either a single process or an ordered collection of
//! processes (the packed `$graph` form). Processes are tagged by their CWL
//! `class`; only [`CommandLineTool`] is convertible, the other kinds are
//! parsed so that resolution can report what was actually found.
//!
//! Nothing in this module is mutated after parse: the whole conversion
//! pipeline is read-only over its input.

pub mod types;

pub use types::{ArrayTag, CwlType, EnumTag, RecordField, RecordTag};

use serde::de::{self, Deserializer, MapAccess, SeqAccess};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed CWL document: one process, or an ordered list of processes with
/// ids assumed unique within the document.
#[derive(Debug, Clone)]
pub enum CwlDocument {
    Single(Box<Process>),
    Collection(Vec<Process>),
}

impl CwlDocument {
    /// Iterates the document's processes in declaration order.
    pub fn processes(&self) -> std::slice::Iter<'_, Process> {
        match self {
            Self::Single(process) => std::slice::from_ref(process.as_ref()).iter(),
            Self::Collection(processes) => processes.iter(),
        }
    }
}

/// A CWL process, tagged by its `class` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "class")]
pub enum Process {
    CommandLineTool(CommandLineTool),
    Workflow(Workflow),
    ExpressionTool(ExpressionTool),
}

impl Process {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::CommandLineTool(tool) => tool.id.as_deref(),
            Self::Workflow(workflow) => workflow.id.as_deref(),
            Self::ExpressionTool(tool) => tool.id.as_deref(),
        }
    }

    /// The CWL class name, as it appears in the document.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::CommandLineTool(_) => "CommandLineTool",
            Self::Workflow(_) => "Workflow",
            Self::ExpressionTool(_) => "ExpressionTool",
        }
    }
}

/// A concrete command-line tool, the only process kind accepted for
/// conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandLineTool {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default, deserialize_with = "inputs_map_or_seq")]
    pub inputs: Vec<Input>,
}

/// An abstract workflow. Never converted; carried so resolution can name it.
#[derive(Debug, Clone, Deserialize)]
pub struct Workflow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "inputs_map_or_seq")]
    pub inputs: Vec<Input>,
}

/// A javascript expression tool. Never converted; carried so resolution can
/// name it.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpressionTool {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "inputs_map_or_seq")]
    pub inputs: Vec<Input>,
}

/// A single process input: name, type declaration, optional documentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Input {
    pub id: String,
    #[serde(rename = "type")]
    pub input_type: CwlType,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

/// CWL allows `inputs` in two surface forms: a sequence of parameter records
/// carrying their own `id`, or a map keyed by id whose values are either a
/// full parameter record or a bare type declaration (shorthand). Both forms
/// deserialize to the same ordered `Vec<Input>`, preserving document order.
fn inputs_map_or_seq<'de, D>(deserializer: D) -> Result<Vec<Input>, D::Error>
where
    D: Deserializer<'de>,
{
    struct InputsVisitor;

    impl<'de> de::Visitor<'de> for InputsVisitor {
        type Value = Vec<Input>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a sequence or map of input parameters")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut inputs = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(input) = seq.next_element()? {
                inputs.push(input);
            }
            Ok(inputs)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut inputs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((id, entry)) = map.next_entry::<String, MapInput>()? {
                inputs.push(entry.into_input(id));
            }
            Ok(inputs)
        }
    }

    deserializer.deserialize_any(InputsVisitor)
}

/// The value side of a map-form input entry.
///
/// Shorthand is tried first: a bare declaration (scalar, union sequence, or
/// an enum/array/record map) is a type; any other map with a `type` field is
/// a full parameter record.
#[derive(Deserialize)]
#[serde(untagged)]
enum MapInput {
    Shorthand(CwlType),
    Full {
        #[serde(rename = "type")]
        input_type: CwlType,
        #[serde(default)]
        doc: Option<String>,
        #[serde(default)]
        label: Option<String>,
    },
}

impl MapInput {
    fn into_input(self, id: String) -> Input {
        match self {
            Self::Shorthand(input_type) => Input {
                id,
                input_type,
                doc: None,
                label: None,
            },
            Self::Full {
                input_type,
                doc,
                label,
            } => Input {
                id,
                input_type,
                doc,
                label,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_is_tagged_by_class() {
        let tool: Process = serde_yaml::from_str(
            r#"
class: CommandLineTool
id: echo
inputs: []
"#,
        )
        .expect("tool should parse");
        assert_eq!(tool.class_name(), "CommandLineTool");
        assert_eq!(tool.id(), Some("echo"));

        let workflow: Process = serde_yaml::from_str(
            r#"
class: Workflow
id: main
inputs: []
"#,
        )
        .expect("workflow should parse");
        assert_eq!(workflow.class_name(), "Workflow");
    }

    #[test]
    fn list_form_inputs_preserve_order_and_doc() {
        let tool: CommandLineTool = serde_yaml::from_str(
            r#"
id: argument
inputs:
  - id: input
    type: string
    doc: this is doc
  - id: count
    type: int
"#,
        )
        .expect("tool should parse");

        assert_eq!(tool.inputs.len(), 2);
        assert_eq!(tool.inputs[0].id, "input");
        assert_eq!(tool.inputs[0].doc.as_deref(), Some("this is doc"));
        assert_eq!(tool.inputs[1].id, "count");
        assert_eq!(tool.inputs[1].input_type, CwlType::primitive("int"));
    }

    #[test]
    fn map_form_inputs_accept_full_records() {
        let tool: CommandLineTool = serde_yaml::from_str(
            r#"
id: argument
inputs:
  input:
    type: ["null", string]
    doc: optional text
"#,
        )
        .expect("tool should parse");

        assert_eq!(tool.inputs.len(), 1);
        assert_eq!(tool.inputs[0].id, "input");
        assert_eq!(tool.inputs[0].doc.as_deref(), Some("optional text"));
        assert_eq!(
            tool.inputs[0].input_type,
            CwlType::union(vec![
                CwlType::primitive("null"),
                CwlType::primitive("string"),
            ])
        );
    }

    #[test]
    fn map_form_inputs_accept_shorthand_types() {
        let tool: CommandLineTool = serde_yaml::from_str(
            r#"
id: echo
inputs:
  message: string
  color:
    type: enum
    symbols: [RED, GREEN]
"#,
        )
        .expect("tool should parse");

        assert_eq!(tool.inputs.len(), 2);
        assert_eq!(tool.inputs[0].input_type, CwlType::primitive("string"));
        assert_eq!(
            tool.inputs[1].input_type,
            CwlType::enumeration(vec!["RED".to_string(), "GREEN".to_string()])
        );
    }

    #[test]
    fn missing_inputs_default_to_empty() {
        let tool: CommandLineTool =
            serde_yaml::from_str("id: bare").expect("tool should parse");
        assert!(tool.inputs.is_empty());
    }
}
