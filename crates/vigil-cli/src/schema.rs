//! JSON Schema validation for documents that declare a `$schema` path.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde_json::{Map, Value};
use vigil_assert::Asserter;
use vigil_core::{ContextRef, Violation};
use vigil_validate::ValidatorRegistry;

/// Keys describing structure rather than document content.
const STRUCTURAL_KEYS: [&str; 2] = ["$schema", "children"];

pub enum CompiledSchema {
    Ready(jsonschema::Validator),
    /// The schema file could not be read or compiled.
    Unavailable(String),
}

/// A document bound to the schema it declared.
pub struct SchemaBound {
    pub schema_ref: String,
    pub schema: Rc<CompiledSchema>,
    pub document: Value,
}

/// Compiles each referenced schema once per run.
pub struct SchemaCache {
    root: PathBuf,
    compiled: HashMap<String, Rc<CompiledSchema>>,
}

impl SchemaCache {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            compiled: HashMap::new(),
        }
    }

    /// Bind `fields` to its declared schema.
    ///
    /// Returns `None` when no project-relative `$schema` is declared. URI
    /// references (meta-schema declarations) are not bound.
    pub fn bind(&mut self, fields: &Map<String, Value>) -> Option<SchemaBound> {
        let schema_ref = fields.get("$schema")?.as_str()?;
        if schema_ref.contains("://") {
            return None;
        }

        let document = fields
            .iter()
            .filter(|(key, _)| !STRUCTURAL_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect::<Map<_, _>>();

        Some(SchemaBound {
            schema_ref: schema_ref.to_string(),
            schema: self.compile(schema_ref),
            document: Value::Object(document),
        })
    }

    fn compile(&mut self, schema_ref: &str) -> Rc<CompiledSchema> {
        if let Some(schema) = self.compiled.get(schema_ref) {
            return Rc::clone(schema);
        }

        let path = self.root.join(schema_ref);
        let compiled = match read_schema(&path) {
            Ok(schema) => match jsonschema::validator_for(&schema) {
                Ok(validator) => CompiledSchema::Ready(validator),
                Err(error) => CompiledSchema::Unavailable(format!("invalid schema: {error}")),
            },
            Err(reason) => CompiledSchema::Unavailable(reason),
        };
        if let CompiledSchema::Unavailable(reason) = &compiled {
            tracing::warn!(schema = schema_ref, %reason, "schema unavailable");
        }

        let compiled = Rc::new(compiled);
        self.compiled
            .insert(schema_ref.to_string(), Rc::clone(&compiled));
        compiled
    }
}

fn read_schema(path: &Path) -> Result<Value, String> {
    let text = fs::read_to_string(path).map_err(|error| format!("cannot read: {error}"))?;
    serde_json::from_str(&text).map_err(|error| format!("invalid JSON: {error}"))
}

/// Register schema validation with `registry`.
pub fn register(registry: &mut ValidatorRegistry) {
    registry.register::<SchemaBound, _>(validate_bound);
}

fn validate_bound(
    bound: &SchemaBound,
    asserter: &Asserter<'_>,
    context: &ContextRef,
) -> Result<(), Violation> {
    let validator = match bound.schema.as_ref() {
        CompiledSchema::Ready(validator) => validator,
        CompiledSchema::Unavailable(reason) => {
            return asserter.assert_true(
                false,
                context,
                &format!("schema '{}' unavailable: {reason}", bound.schema_ref),
            );
        }
    };

    let errors = validator
        .iter_errors(&bound.document)
        .map(|error| format!("{} at '{}'", error, error.instance_path))
        .collect::<Vec<_>>();
    if errors.is_empty() {
        return Ok(());
    }
    asserter.assert_empty(
        &errors,
        context,
        &format!(
            "document does not match schema '{}': {}",
            bound.schema_ref,
            errors.join("; ")
        ),
    )
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use vigil_assert::headless::RecordingPresenter;
    use vigil_assert::{FeedbackOverlay, MemoryLogSink, Session};
    use vigil_core::Object;

    use super::*;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn project_with_schema() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("schemas")).expect("schemas dir");
        fs::write(
            dir.path().join("schemas/speed.json"),
            json!({
                "type": "object",
                "required": ["speed"],
                "properties": { "speed": { "type": "number", "minimum": 0 } }
            })
            .to_string(),
        )
        .expect("write schema");
        dir
    }

    fn validate(object: &Object) -> Result<usize, Violation> {
        let mut registry = ValidatorRegistry::new();
        register(&mut registry);
        let overlay = FeedbackOverlay::new(Rc::new(RecordingPresenter::default()));
        let sink = MemoryLogSink::new();
        let session = Session::authoring();
        let asserter = Asserter::new(&overlay, &sink, &session);
        registry.validate_object(object, &asserter, &ContextRef::asset("configs/car"))
    }

    #[test]
    fn documents_without_schema_are_not_bound() {
        let dir = project_with_schema();
        let mut cache = SchemaCache::new(dir.path());
        assert!(cache.bind(&fields(json!({ "speed": 1 }))).is_none());
        assert!(
            cache
                .bind(&fields(json!({ "$schema": "https://json-schema.org/draft/2020-12/schema" })))
                .is_none()
        );
    }

    #[test]
    fn bound_document_drops_structural_keys() {
        let dir = project_with_schema();
        let mut cache = SchemaCache::new(dir.path());
        let bound = cache
            .bind(&fields(json!({
                "$schema": "schemas/speed.json",
                "speed": 3,
                "children": [{ "name": "wheel" }]
            })))
            .expect("bound");
        assert_eq!(bound.document, json!({ "speed": 3 }));
    }

    #[test]
    fn schema_is_compiled_once() {
        let dir = project_with_schema();
        let mut cache = SchemaCache::new(dir.path());
        let a = cache
            .bind(&fields(json!({ "$schema": "schemas/speed.json" })))
            .expect("bound");
        let b = cache
            .bind(&fields(json!({ "$schema": "schemas/speed.json" })))
            .expect("bound");
        assert!(Rc::ptr_eq(&a.schema, &b.schema));
    }

    #[test]
    fn conforming_document_passes() {
        let dir = project_with_schema();
        let mut cache = SchemaCache::new(dir.path());
        let bound = cache
            .bind(&fields(json!({ "$schema": "schemas/speed.json", "speed": 4 })))
            .expect("bound");
        let object = Object::new("car", "Car").with_part(bound);
        assert_eq!(validate(&object).expect("valid"), 1);
    }

    #[test]
    fn violating_document_names_the_schema() {
        let dir = project_with_schema();
        let mut cache = SchemaCache::new(dir.path());
        let bound = cache
            .bind(&fields(json!({ "$schema": "schemas/speed.json", "speed": -2 })))
            .expect("bound");
        let object = Object::new("car", "Car").with_part(bound);

        let violation = validate(&object).expect_err("negative speed");
        assert!(
            violation
                .message()
                .starts_with("document does not match schema 'schemas/speed.json'")
        );
        assert_eq!(violation.context(), &ContextRef::asset("configs/car"));
    }

    #[test]
    fn missing_schema_file_is_a_violation() {
        let dir = project_with_schema();
        let mut cache = SchemaCache::new(dir.path());
        let bound = cache
            .bind(&fields(json!({ "$schema": "schemas/absent.json" })))
            .expect("bound");
        let object = Object::new("car", "Car").with_part(bound);

        let violation = validate(&object).expect_err("schema is missing");
        assert!(violation.message().contains("schemas/absent.json"));
        assert!(violation.message().contains("unavailable"));
    }
}
