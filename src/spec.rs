//! OpenAPI document describing every registered schema.

use serde_json::{Map, Value, json};

use crate::drivers::schemas;
use crate::traits::{FieldKind, FieldSpec, VendorSchema};

/// Build the OpenAPI document, one component per vendor schema.
pub fn build_spec() -> Value {
    let components: Map<String, Value> = schemas()
        .into_iter()
        .map(|schema| {
            (
                schema.component_name().to_string(),
                schema_component(schema),
            )
        })
        .collect();

    json!({
        "openapi": "3.0.2",
        "info": {
            "title": "Engine builder",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": {},
        "components": {
            "schemas": components,
        },
    })
}

fn schema_component(schema: &dyn VendorSchema) -> Value {
    let properties: Map<String, Value> = schema
        .fields()
        .iter()
        .map(|field| (field.name.to_string(), field_property(field)))
        .collect();

    let mut required: Vec<&str> = schema
        .fields()
        .iter()
        .filter(|field| field.required)
        .map(|field| field.name)
        .collect();
    required.sort_unstable();

    let mut component = json!({
        "type": "object",
        "title": schema.name(),
        "properties": properties,
    });
    if !required.is_empty() {
        component["required"] = json!(required);
    }
    component
}

fn field_property(field: &FieldSpec) -> Value {
    let mut property = Map::new();
    property.insert("type".into(), json!(field.kind.type_name()));
    property.insert("description".into(), json!(field.description));

    match field.kind {
        FieldKind::Integer { min, max } => {
            property.insert("minimum".into(), json!(min));
            property.insert("maximum".into(), json!(max));
        }
        FieldKind::Enum(choices) => {
            property.insert("enum".into(), json!(choices));
        }
        FieldKind::Constant(_) => {
            property.insert("x-ui-schema".into(), json!({"ui:readonly": true}));
        }
        FieldKind::String | FieldKind::Boolean => {}
    }

    if let Some(default) = field.default {
        property.insert("default".into(), default.to_json());
    }
    if field.nullable {
        property.insert("nullable".into(), json!(true));
    }
    if field.secret {
        property.insert("x-ui-schema".into(), json!({"ui:widget": "password"}));
    }

    Value::Object(property)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_spec_header() {
        let spec = build_spec();
        assert_eq!(spec["openapi"], "3.0.2");
        assert_eq!(spec["info"]["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(spec["paths"], json!({}));
    }

    #[test]
    fn test_build_spec_lists_every_schema() {
        let spec = build_spec();
        let components = spec["components"]["schemas"].as_object().unwrap();
        assert_eq!(components.len(), schemas().len());
        assert!(components.contains_key("PostgresSchema"));
        assert!(components.contains_key("MySqlSchema"));
        assert!(components.contains_key("SqliteSchema"));
    }

    #[test]
    fn test_postgres_component() {
        let spec = build_spec();
        let postgres = &spec["components"]["schemas"]["PostgresSchema"];

        assert_eq!(postgres["required"], json!(["host"]));
        assert_eq!(
            postgres["properties"]["engine"],
            json!({
                "type": "string",
                "description": "Engine name",
                "default": "postgresql",
                "x-ui-schema": {"ui:readonly": true},
            })
        );
        assert_eq!(
            postgres["properties"]["driver"]["enum"],
            json!(["psycopg2", "psycopg", "pg8000", "asyncpg", "psycopg2cffi"])
        );
        assert_eq!(
            postgres["properties"]["port"],
            json!({
                "type": "integer",
                "description": "Port number",
                "minimum": 0,
                "maximum": 65535,
                "default": 5432,
            })
        );
        assert_eq!(postgres["properties"]["catalog"]["nullable"], json!(true));
        assert_eq!(
            postgres["properties"]["password"]["x-ui-schema"],
            json!({"ui:widget": "password"})
        );
    }
}
