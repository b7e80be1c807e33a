//! Parameter schemas: typed argument contracts for each tool.
//!
//! Every tool's arguments are a plain Rust struct deriving `Deserialize`,
//! `Serialize` and `JsonSchema`. [`ParamSchema`] erases that type into the
//! two things the rest of the crate needs: the JSON Schema declared to agent
//! frameworks, and a validator that turns loose JSON into the canonical
//! argument object sent to the remote client. Both come from the same type,
//! so an adapter can never declare one contract and enforce another.

use crate::types::{Error, Result};
use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::{Arc, OnceLock};

// =============================================================================
// Parameter types
// =============================================================================

/// Argument struct for one tool.
///
/// `check` runs after structural validation for constraints a JSON Schema
/// cannot express (either-or fields, timestamp formats).
pub trait ToolParams: DeserializeOwned + Serialize + JsonSchema {
    fn check(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// Type-erased handle on a [`ToolParams`] implementation.
///
/// The generated schema and its compiled validator are built on first use
/// and shared by every clone.
#[derive(Clone)]
pub struct ParamSchema {
    type_name: &'static str,
    schema_fn: fn() -> Value,
    parse_fn: fn(Value) -> std::result::Result<Value, String>,
    compiled: Arc<OnceLock<std::result::Result<Compiled, String>>>,
}

struct Compiled {
    schema: Value,
    validator: jsonschema::Validator,
}

impl fmt::Debug for ParamSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSchema")
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl ParamSchema {
    pub fn of<T: ToolParams>() -> Self {
        Self {
            type_name: short_type_name::<T>(),
            schema_fn: schema_for::<T>,
            parse_fn: parse_as::<T>,
            compiled: Arc::new(OnceLock::new()),
        }
    }

    fn compiled(&self) -> Result<&Compiled> {
        self.compiled
            .get_or_init(|| {
                let schema = (self.schema_fn)();
                let validator = jsonschema::validator_for(&schema)
                    .map_err(|e| format!("{}: schema does not compile: {}", self.type_name, e))?;
                Ok(Compiled { schema, validator })
            })
            .as_ref()
            .map_err(|e| Error::internal(e.clone()))
    }

    #[cfg(test)]
    fn is_compiled(&self) -> bool {
        self.compiled.get().is_some()
    }

    /// Name of the bound argument struct, e.g. `SendMessage`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// JSON Schema (object) describing the accepted arguments.
    pub fn json_schema(&self) -> Value {
        match self.compiled() {
            Ok(compiled) => compiled.schema.clone(),
            Err(_) => (self.schema_fn)(),
        }
    }

    /// Field summaries, sorted by name.
    pub fn fields(&self) -> Vec<FieldInfo> {
        let schema = self.json_schema();
        let required: Vec<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|arr| arr.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(name, prop)| FieldInfo {
                        name: name.clone(),
                        type_name: display_type(prop),
                        required: required.contains(&name.as_str()),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate raw arguments and return the canonical argument object.
    ///
    /// `null` is treated as "no arguments". All structural errors are
    /// collected into one `Error::Validation`; defaults are filled in and
    /// absent optional fields are omitted from the result.
    pub fn validate(&self, args: Value) -> Result<Value> {
        let args = match args {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        if !args.is_object() {
            return Err(Error::validation(format!(
                "{}: arguments must be a JSON object, got {}",
                self.type_name,
                value_type_name(&args)
            )));
        }

        let compiled = self.compiled()?;
        let errors: Vec<String> = compiled
            .validator
            .iter_errors(&args)
            .map(|e| e.to_string())
            .collect();
        if !errors.is_empty() {
            return Err(Error::validation(format!(
                "{}: {}",
                self.type_name,
                errors.join("; ")
            )));
        }

        (self.parse_fn)(args)
            .map_err(|e| Error::validation(format!("{}: {}", self.type_name, e)))
    }
}

/// One declared argument, for prompt rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub type_name: String,
    pub required: bool,
}

// =============================================================================
// Generic glue
// =============================================================================

fn schema_for<T: JsonSchema>() -> Value {
    let root = SchemaSettings::draft07()
        .with(|s| s.inline_subschemas = true)
        .into_generator()
        .into_root_schema_for::<T>();

    let mut value = serde_json::to_value(root).unwrap_or_else(|_| serde_json::json!({}));
    if let Some(obj) = value.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
        obj.entry("type").or_insert_with(|| Value::String("object".into()));
    }
    value
}

fn parse_as<T: ToolParams>(args: Value) -> std::result::Result<Value, String> {
    let params: T = serde_json::from_value(args).map_err(|e| e.to_string())?;
    params.check()?;
    serde_json::to_value(&params).map_err(|e| e.to_string())
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Human-readable type of a property schema.
fn display_type(prop: &Value) -> String {
    // Documented enum/struct fields arrive wrapped as `allOf: [<schema>]`.
    if let Some([inner]) = prop.get("allOf").and_then(Value::as_array).map(Vec::as_slice) {
        return display_type(inner);
    }
    if let Some(variants) = prop.get("enum").and_then(Value::as_array) {
        let names: Vec<&str> = variants.iter().filter_map(Value::as_str).collect();
        return format!("enum({})", names.join("|"));
    }

    let base = match prop.get("type") {
        Some(Value::String(t)) => t.clone(),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null")
            .unwrap_or("any")
            .to_string(),
        _ => "any".to_string(),
    };

    match base.as_str() {
        "array" => {
            let item = prop.get("items").map(display_type).unwrap_or_else(|| "any".into());
            format!("{}[]", item)
        }
        _ => base,
    }
}

fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, JsonSchema)]
    #[serde(deny_unknown_fields)]
    struct SearchArgs {
        /// Search query
        query: String,
        /// Maximum results
        #[serde(default = "default_max")]
        max_results: u32,
        /// Tags to match
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tags: Option<Vec<String>>,
    }

    fn default_max() -> u32 {
        10
    }

    impl ToolParams for SearchArgs {
        fn check(&self) -> std::result::Result<(), String> {
            if self.query.trim().is_empty() {
                return Err("query cannot be blank".to_string());
            }
            Ok(())
        }
    }

    fn schema() -> ParamSchema {
        ParamSchema::of::<SearchArgs>()
    }

    #[test]
    fn test_json_schema_shape() {
        let schema = schema().json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["required"], json!(["query"]));
        assert_eq!(schema["properties"]["query"]["description"], "Search query");
        assert!(schema.get("$schema").is_none());
    }

    #[test]
    fn test_validate_fills_defaults_and_drops_absent() {
        let args = schema().validate(json!({"query": "rust"})).unwrap();
        assert_eq!(args, json!({"query": "rust", "max_results": 10}));
    }

    #[test]
    fn test_validate_missing_required() {
        let err = schema().validate(json!({})).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("query"));
    }

    #[test]
    fn test_validate_wrong_type() {
        let err = schema().validate(json!({"query": 42})).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_validate_unknown_field() {
        let err = schema()
            .validate(json!({"query": "rust", "bogus": true}))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let err = schema()
            .validate(json!({"max_results": "ten", "bogus": 1}))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("query"), "{}", msg);
        assert!(msg.matches(';').count() >= 2, "{}", msg);
    }

    #[test]
    fn test_validate_runs_check() {
        let err = schema().validate(json!({"query": "  "})).unwrap_err();
        assert!(err.to_string().contains("query cannot be blank"));
    }

    #[test]
    fn test_validate_null_and_non_object() {
        assert!(schema().validate(Value::Null).is_err());
        let err = schema().validate(json!(["query"])).unwrap_err();
        assert!(err.to_string().contains("must be a JSON object, got array"));
    }

    #[test]
    fn test_fields() {
        let fields = schema().fields();
        let query = fields.iter().find(|f| f.name == "query").unwrap();
        assert!(query.required);
        assert_eq!(query.type_name, "string");

        let tags = fields.iter().find(|f| f.name == "tags").unwrap();
        assert!(!tags.required);
        assert_eq!(tags.type_name, "string[]");
    }

    #[test]
    fn test_validator_compiled_once_and_shared() {
        let schema = schema();
        let copy = schema.clone();
        assert!(!schema.is_compiled());

        schema.validate(json!({"query": "rust"})).unwrap();
        assert!(copy.is_compiled());
        assert!(copy.validate(json!({"query": 1})).is_err());
        assert_eq!(copy.json_schema(), schema_for::<SearchArgs>());
    }

    #[test]
    fn test_type_name() {
        assert_eq!(schema().type_name(), "SearchArgs");
    }
}
