//! Per-vendor connection schemas.
//!
//! A schema declares the fields a vendor needs, how native hierarchy names
//! map onto `catalog` / `namespace`, and how a validated parameter set becomes
//! an [`EngineTarget`].

use serde_json::{Map, Value};

use super::engine::{BoxedEngine, PoolSettings};
use super::params::{self, Params};
use super::target::EngineTarget;
use super::types::{FieldSpec, Vendor};
use crate::error::{Error, Result, ValidationError};

/// Native names of the hierarchy levels a vendor supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hierarchy {
    /// Native term for the catalog level, `None` when the vendor has none
    pub catalog: Option<&'static str>,
    /// Native term for the namespace level, `None` when the vendor has none
    pub namespace: Option<&'static str>,
}

impl Hierarchy {
    /// Read the hierarchy off a `(native, standard)` alias table.
    pub fn from_aliases(aliases: &[(&'static str, &'static str)]) -> Self {
        let native = |standard: &str| {
            aliases
                .iter()
                .find(|(_, name)| *name == standard)
                .map(|(native, _)| *native)
        };
        Self {
            catalog: native("catalog"),
            namespace: native("namespace"),
        }
    }
}

/// Connection schema for one vendor.
pub trait VendorSchema: Send + Sync {
    /// Human-readable schema name
    fn name(&self) -> &'static str;

    fn vendor(&self) -> Vendor;

    /// Component name used in the generated spec document
    fn component_name(&self) -> &'static str;

    /// Supported drivers, default first
    fn drivers(&self) -> &'static [&'static str];

    /// Declared fields, including the base `engine`, `driver`, `catalog` and
    /// `namespace` fields
    fn fields(&self) -> &'static [FieldSpec];

    /// `(native, standard)` field renames applied before validation.
    ///
    /// A level is supported exactly when it has a native name here.
    fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    fn hierarchy(&self) -> Hierarchy {
        Hierarchy::from_aliases(self.aliases())
    }

    /// Cross-field checks run during `load`, reported with the field errors.
    fn validate(&self, _params: &Params, _errors: &mut ValidationError) {}

    /// Build the target from parameters already checked against the hierarchy.
    fn build_target(&self, params: &Params) -> Result<EngineTarget>;

    /// Construct a lazily-connecting engine for a target.
    fn create_engine(&self, target: EngineTarget, settings: &PoolSettings) -> Result<BoxedEngine>;

    /// Does the schema handle a given `engine[+driver]`?
    fn matches(&self, engine: &str, driver: Option<&str>) -> bool {
        engine == self.vendor().engine_name()
            && driver.is_none_or(|driver| self.drivers().iter().any(|d| *d == driver))
    }

    /// Validate a raw payload.
    fn load(&self, data: &Map<String, Value>) -> std::result::Result<Params, ValidationError> {
        self.load_with(data, None, None)
    }

    /// Validate a raw payload with optional catalog and namespace overrides.
    fn load_with(
        &self,
        data: &Map<String, Value>,
        catalog: Option<&str>,
        namespace: Option<&str>,
    ) -> std::result::Result<Params, ValidationError> {
        params::load(
            self.vendor(),
            self.fields(),
            self.aliases(),
            data,
            catalog,
            namespace,
            |params, errors| self.validate(params, errors),
        )
    }

    /// Build the target for validated parameters.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` when the parameters carry a catalog or
    /// namespace the vendor has no concept for.
    fn make_target(&self, params: &Params) -> Result<EngineTarget> {
        let hierarchy = self.hierarchy();
        if hierarchy.catalog.is_none() && params.catalog().is_some() {
            return Err(Error::unsupported(self.vendor(), "catalogs"));
        }
        if hierarchy.namespace.is_none() && params.namespace().is_some() {
            return Err(Error::unsupported(self.vendor(), "namespaces"));
        }

        let target = self.build_target(params)?;
        tracing::debug!(
            vendor = %self.vendor(),
            url = %target.url.to_masked_string(),
            "Built engine target"
        );
        Ok(target)
    }

    /// Validate a payload and build its target in one step.
    fn get_target(
        &self,
        data: &Map<String, Value>,
        catalog: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<EngineTarget> {
        let params = self.load_with(data, catalog, namespace)?;
        self.make_target(&params)
    }

    /// Return an engine optionally configured for a given catalog and namespace.
    fn get_engine(
        &self,
        data: &Map<String, Value>,
        catalog: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<BoxedEngine> {
        let target = self.get_target(data, catalog, namespace)?;
        self.create_engine(target, &PoolSettings::default())
    }
}
