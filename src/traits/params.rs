//! Validated connection parameters and the generic loader that builds them.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::types::{FieldSpec, Vendor};
use crate::error::ValidationError;

/// A validated, normalized parameter set for one vendor.
///
/// Every declared field is present (defaults filled in), every value has the
/// canonical JSON type for its kind, and the set cannot be changed once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    vendor: Vendor,
    values: BTreeMap<String, Value>,
}

impl Params {
    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// String value, `None` when absent or null.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(Value::as_i64)
    }

    /// Boolean value, `false` when absent.
    pub fn flag(&self, name: &str) -> bool {
        self.values
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn engine(&self) -> &str {
        self.str("engine").unwrap_or(self.vendor.engine_name())
    }

    pub fn driver(&self) -> Option<&str> {
        self.str("driver")
    }

    /// Catalog override or native catalog name, if any.
    pub fn catalog(&self) -> Option<&str> {
        self.str("catalog").filter(|s| !s.is_empty())
    }

    /// Namespace override or native namespace name, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.str("namespace").filter(|s| !s.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Validate a raw payload against a field table.
///
/// Native hierarchy names are renamed to their standard names first, then the
/// explicit overrides are applied so they always win. `check` sees the
/// coerced values and records cross-field problems alongside the per-field
/// ones, so every offending field is reported, not only the first one.
pub(crate) fn load(
    vendor: Vendor,
    fields: &[FieldSpec],
    aliases: &[(&'static str, &'static str)],
    data: &Map<String, Value>,
    catalog: Option<&str>,
    namespace: Option<&str>,
    check: impl FnOnce(&Params, &mut ValidationError),
) -> Result<Params, ValidationError> {
    let mut data = data.clone();

    for (native, standard) in aliases {
        if let Some(value) = data.remove(*native) {
            tracing::debug!(%vendor, native, standard, "Resolved native field name");
            data.insert((*standard).to_string(), value);
        }
    }

    if let Some(catalog) = catalog {
        data.insert("catalog".to_string(), Value::String(catalog.to_string()));
    }
    if let Some(namespace) = namespace {
        data.insert("namespace".to_string(), Value::String(namespace.to_string()));
    }

    let mut errors = ValidationError::new();
    let mut values = BTreeMap::new();

    for key in data.keys() {
        if !fields.iter().any(|field| field.name == key) {
            errors.add(key.clone(), "Unknown field.");
        }
    }

    for field in fields {
        match data.get(field.name) {
            None => {
                if field.required {
                    errors.add(field.name, "Missing data for required field.");
                } else if let Some(default) = field.default {
                    values.insert(field.name.to_string(), default.to_json());
                }
            }
            Some(Value::Null) if field.nullable => {
                values.insert(field.name.to_string(), Value::Null);
            }
            Some(Value::Null) => errors.add(field.name, "Field may not be null."),
            Some(raw) => match field.kind.coerce(raw) {
                Ok(value) => {
                    values.insert(field.name.to_string(), value);
                }
                Err(message) => errors.add(field.name, message),
            },
        }
    }

    let params = Params { vendor, values };
    check(&params, &mut errors);
    errors.into_result()?;
    Ok(params)
}
