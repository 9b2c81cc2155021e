//! Type and name mapping from CWL declarations to click option declarations.
//!
//! Everything here is a pure, total function over a [`CwlType`] or an
//! identifier string, so each rule is unit-testable on its own and the whole
//! set can be registered into the template evaluation context as filters and
//! testers (see [`register`]).
//!
//! The mapping table covers the CWL primitives seen in practice; a type with
//! no entry falls back to its own string form. That passthrough is policy,
//! not an error.

use crate::cwl::CwlType;
use std::collections::HashMap;
use tera::{Tera, Value};

/// One row of the static CWL-to-click mapping table.
struct TypeMapping {
    cwl: &'static str,
    click: &'static str,
    python: &'static str,
}

const TYPE_MAPPINGS: &[TypeMapping] = &[
    TypeMapping {
        cwl: "boolean",
        click: "click.BOOL",
        python: "bool",
    },
    TypeMapping {
        cwl: "int",
        click: "click.INT",
        python: "int",
    },
    TypeMapping {
        cwl: "long",
        click: "click.INT",
        python: "int",
    },
    TypeMapping {
        cwl: "float",
        click: "click.FLOAT",
        python: "float",
    },
    TypeMapping {
        cwl: "double",
        click: "click.FLOAT",
        python: "float",
    },
    TypeMapping {
        cwl: "string",
        click: "click.STRING",
        python: "str",
    },
    TypeMapping {
        cwl: "File",
        click: "click.Path(exists=True)",
        python: "str",
    },
    TypeMapping {
        cwl: "Directory",
        click: "click.Path(exists=True, file_okay=False)",
        python: "str",
    },
];

fn mapping_for(name: &str) -> Option<&'static TypeMapping> {
    TYPE_MAPPINGS.iter().find(|mapping| mapping.cwl == name)
}

fn is_null_literal(declaration: &CwlType) -> bool {
    matches!(declaration, CwlType::Primitive(name) if name == "null")
}

/// True iff the declaration is a union containing the literal `"null"`.
pub fn is_nullable(declaration: &CwlType) -> bool {
    match declaration {
        CwlType::Union(alternatives) => alternatives.iter().any(is_null_literal),
        _ => false,
    }
}

/// An input is required exactly when its type is not nullable.
pub fn is_required(declaration: &CwlType) -> bool {
    !is_nullable(declaration)
}

/// For a nullable union, the first non-null alternative; otherwise the
/// declaration itself. Unions with several non-null alternatives are not
/// disambiguated further: first match wins.
pub fn effective_base_type(declaration: &CwlType) -> &CwlType {
    match declaration {
        CwlType::Union(alternatives) if is_nullable(declaration) => alternatives
            .iter()
            .find(|alternative| !is_null_literal(alternative))
            .unwrap_or(declaration),
        _ => declaration,
    }
}

/// The click option type for a declaration.
///
/// Enumerations become a `click.Choice` over their symbol names, stripped of
/// any `/`-delimited namespace prefix. Arrays map through their item type;
/// the repetition itself is expressed by the template as `multiple=True`.
pub fn to_cli_option_type(declaration: &CwlType) -> String {
    match effective_base_type(declaration) {
        CwlType::Primitive(name) => match mapping_for(name) {
            Some(mapping) => mapping.click.to_string(),
            None => name.clone(),
        },
        CwlType::Enum { symbols, .. } => {
            let choices = symbols
                .iter()
                .map(|symbol| py_string_literal(strip_namespace(symbol)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("click.Choice([{choices}])")
        }
        CwlType::Array { items, .. } => to_cli_option_type(items),
        other => other.to_string(),
    }
}

/// The Python type used in the generated function signature.
///
/// Same dispatch as [`to_cli_option_type`], except enumerations map to the
/// plain string host type rather than a choice construct.
pub fn to_host_type(declaration: &CwlType) -> String {
    match effective_base_type(declaration) {
        CwlType::Primitive(name) => match mapping_for(name) {
            Some(mapping) => mapping.python.to_string(),
            None => name.clone(),
        },
        CwlType::Enum { .. } => "str".to_string(),
        CwlType::Array { items, .. } => to_host_type(items),
        other => other.to_string(),
    }
}

/// True iff the declaration is an array. A union is never an array (a YAML
/// sequence denotes alternatives, not items), and neither is a scalar
/// without a kind tag.
pub fn is_array(declaration: &CwlType) -> bool {
    matches!(declaration, CwlType::Array { .. })
}

/// Canonical camelCase/PascalCase to snake_case transform: a separator
/// before every non-initial uppercase letter, then lowercase everything.
/// Idempotent on identifiers already in snake_case.
pub fn to_snake_case(identifier: &str) -> String {
    let mut result = String::with_capacity(identifier.len() + 4);
    for (index, ch) in identifier.chars().enumerate() {
        if ch.is_uppercase() {
            if index > 0 {
                result.push('_');
            }
            for lowered in ch.to_lowercase() {
                result.push(lowered);
            }
        } else {
            result.push(ch);
        }
    }
    result
}

/// A symbol's trailing `/`-delimited path component.
fn strip_namespace(symbol: &str) -> &str {
    symbol.rsplit('/').next().unwrap_or(symbol)
}

/// Quotes `value` as a single-quoted Python string literal.
pub fn py_string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => literal.push_str("\\\\"),
            '\'' => literal.push_str("\\'"),
            '\n' => literal.push_str("\\n"),
            _ => literal.push(ch),
        }
    }
    literal.push('\'');
    literal
}

/// Registers the mapper functions on a template engine instance.
///
/// Filters: `snake_case`, `cli_option_type`, `host_type`, `py_string`.
/// Testers: `required`, `nullable`, `array`. The engine is expected to be
/// constructed fresh per invocation; nothing global is touched here.
pub fn register(tera: &mut Tera) {
    tera.register_filter("snake_case", filters::snake_case);
    tera.register_filter("cli_option_type", filters::cli_option_type);
    tera.register_filter("host_type", filters::host_type);
    tera.register_filter("py_string", filters::py_string);
    tera.register_tester("required", testers::required);
    tera.register_tester("nullable", testers::nullable);
    tera.register_tester("array", testers::array);
}

mod filters {
    use super::*;

    fn declaration_from(value: &Value) -> tera::Result<CwlType> {
        serde_json::from_value(value.clone())
            .map_err(|e| tera::Error::msg(format!("value is not a CWL type declaration: {e}")))
    }

    fn string_from(value: &Value, filter: &str) -> tera::Result<String> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| tera::Error::msg(format!("`{filter}` filter expects a string")))
    }

    pub(super) fn snake_case(
        value: &Value,
        _args: &HashMap<String, Value>,
    ) -> tera::Result<Value> {
        Ok(Value::String(to_snake_case(&string_from(
            value,
            "snake_case",
        )?)))
    }

    pub(super) fn cli_option_type(
        value: &Value,
        _args: &HashMap<String, Value>,
    ) -> tera::Result<Value> {
        Ok(Value::String(to_cli_option_type(&declaration_from(value)?)))
    }

    pub(super) fn host_type(
        value: &Value,
        _args: &HashMap<String, Value>,
    ) -> tera::Result<Value> {
        Ok(Value::String(to_host_type(&declaration_from(value)?)))
    }

    pub(super) fn py_string(
        value: &Value,
        _args: &HashMap<String, Value>,
    ) -> tera::Result<Value> {
        Ok(Value::String(py_string_literal(&string_from(
            value,
            "py_string",
        )?)))
    }
}

mod testers {
    use super::*;

    fn declaration_from(value: Option<&Value>, tester: &str) -> tera::Result<CwlType> {
        let value = value
            .ok_or_else(|| tera::Error::msg(format!("`{tester}` tester got no value")))?;
        serde_json::from_value(value.clone())
            .map_err(|e| tera::Error::msg(format!("value is not a CWL type declaration: {e}")))
    }

    pub(super) fn required(value: Option<&Value>, _args: &[Value]) -> tera::Result<bool> {
        Ok(is_required(&declaration_from(value, "required")?))
    }

    pub(super) fn nullable(value: Option<&Value>, _args: &[Value]) -> tera::Result<bool> {
        Ok(is_nullable(&declaration_from(value, "nullable")?))
    }

    /// Looks through nullability so an optional array still renders as a
    /// repeatable option.
    pub(super) fn array(value: Option<&Value>, _args: &[Value]) -> tera::Result<bool> {
        let declaration = declaration_from(value, "array")?;
        Ok(is_array(effective_base_type(&declaration)))
    }
}
