//! Runtime catalog: which runtimes the current test process may use.
//!
//! The catalog is resolved once from a [`CatalogConfig`] into an immutable
//! [`RuntimeEnvironment`] which is then passed by reference to every
//! [`crate::ParametersBuilder::build`] call. Ordering is part of the contract:
//! the none runtime first, then the checked-in runtimes in configured order,
//! then the system runtime if it was not already listed.

use std::collections::BTreeSet;
use std::env::VarError;
use std::sync::OnceLock;

use rtmatrix_error::{MatrixError, Result};
use rtmatrix_types::{CfVm, DexVersion, Ordinal, Runtime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Allow-list of runtime names, separated by `:` or `,`.
pub const RUNTIMES_ENV: &str = "RTMATRIX_RUNTIMES";
/// When set (to any value) the master DEX VM is eligible for DEX filters.
pub const ART_MASTER_ENV: &str = "RTMATRIX_ART_MASTER";
/// Name of the runtime the test process itself runs on.
pub const SYSTEM_RUNTIME_ENV: &str = "RTMATRIX_SYSTEM_RUNTIME";

const LOG_TARGET: &str = "rtmatrix.catalog";

/// Inputs for resolving the runtime catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Checked-in host JDKs, in catalog order.
    pub checked_in_cf: Vec<CfVm>,
    /// Checked-in DEX VMs (host kind), in catalog order.
    pub checked_in_dex: Vec<DexVersion>,
    /// Runtime executing the test process.
    pub system_runtime: Runtime,
    pub default_cf_vm: CfVm,
    pub default_dex_version: DexVersion,
    /// When present, only runtimes whose name is listed are available.
    pub runtime_allow_list: Option<Vec<String>>,
    /// Whether DEX filters may select [`DexVersion::Master`].
    pub allow_master: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            checked_in_cf: CfVm::ALL.to_vec(),
            checked_in_dex: DexVersion::ALL.to_vec(),
            system_runtime: Runtime::Cf(CfVm::Jdk11),
            default_cf_vm: CfVm::Jdk11,
            default_dex_version: DexVersion::last(),
            runtime_allow_list: None,
            allow_master: false,
        }
    }
}

impl CatalogConfig {
    /// Defaults overlaid with the `RTMATRIX_*` process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::UnknownRuntime`] when [`SYSTEM_RUNTIME_ENV`] names
    /// no known runtime, and [`MatrixError::InvalidConfig`] when any of the
    /// variables is not valid unicode.
    pub fn from_env() -> Result<Self> {
        let mut vars = Vec::new();
        for key in [RUNTIMES_ENV, ART_MASTER_ENV, SYSTEM_RUNTIME_ENV] {
            if let Some(value) = env_value(key, std::env::var(key))? {
                vars.push((key, value));
            }
        }
        Self::from_vars(vars)
    }

    /// Defaults overlaid with the given `(name, value)` pairs.
    ///
    /// Unrelated names are ignored.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogConfig::from_env`].
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            match key.as_ref() {
                RUNTIMES_ENV => {
                    config.runtime_allow_list = Some(parse_runtime_list(value.as_ref()));
                }
                ART_MASTER_ENV => config.allow_master = true,
                SYSTEM_RUNTIME_ENV => {
                    let name = value.as_ref().trim();
                    if name.is_empty() {
                        return Err(MatrixError::invalid_config(
                            SYSTEM_RUNTIME_ENV,
                            "empty runtime name",
                        ));
                    }
                    config.system_runtime = name.parse()?;
                }
                _ => {}
            }
        }
        Ok(config)
    }
}

/// An unset variable is absent; a non-unicode value is an error, never absent.
fn env_value(
    key: &str,
    value: std::result::Result<String, VarError>,
) -> Result<Option<String>> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => {
            Err(MatrixError::invalid_config(key, "not valid unicode"))
        }
    }
}

/// Split an allow-list value on `:` and `,`, trimming and dropping empty names.
#[must_use]
pub fn parse_runtime_list(raw: &str) -> Vec<String> {
    raw.split([':', ','])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

/// The resolved, immutable runtime catalog for a test process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEnvironment {
    config: CatalogConfig,
    unfiltered: Vec<Runtime>,
    available: Vec<Runtime>,
}

impl RuntimeEnvironment {
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        let unfiltered = resolve_unfiltered(&config);
        let available = match &config.runtime_allow_list {
            Some(names) => apply_allow_list(&unfiltered, names),
            None => unfiltered.clone(),
        };
        debug!(
            target: LOG_TARGET,
            unfiltered = unfiltered.len(),
            available = available.len(),
            allow_list = config.runtime_allow_list.is_some(),
            allow_master = config.allow_master,
            "resolved runtime catalog"
        );
        Self {
            config,
            unfiltered,
            available,
        }
    }

    /// Resolve from the process environment.
    ///
    /// # Errors
    ///
    /// Propagates [`CatalogConfig::from_env`] errors.
    pub fn from_env() -> Result<Self> {
        CatalogConfig::from_env().map(Self::new)
    }

    /// Process-wide environment, resolved from the environment on first use.
    ///
    /// # Errors
    ///
    /// Returns the (memoized) configuration error if resolution failed.
    pub fn process() -> Result<&'static Self> {
        static PROCESS: OnceLock<Result<RuntimeEnvironment>> = OnceLock::new();
        PROCESS
            .get_or_init(Self::from_env)
            .as_ref()
            .map_err(Clone::clone)
    }

    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Catalog runtimes before the allow-list is applied.
    #[must_use]
    pub fn unfiltered_runtimes(&self) -> &[Runtime] {
        &self.unfiltered
    }

    /// Catalog runtimes available to this process, in catalog order.
    #[must_use]
    pub fn available_runtimes(&self) -> &[Runtime] {
        &self.available
    }

    #[must_use]
    pub fn available_cf_vms(&self) -> Vec<CfVm> {
        self.available.iter().filter_map(Runtime::cf_vm).collect()
    }

    #[must_use]
    pub fn available_dex_versions(&self) -> Vec<DexVersion> {
        self.available
            .iter()
            .filter_map(Runtime::dex_vm)
            .map(|vm| vm.version)
            .collect()
    }

    #[must_use]
    pub fn system_runtime(&self) -> Runtime {
        self.config.system_runtime
    }

    #[must_use]
    pub fn default_cf_vm(&self) -> CfVm {
        self.config.default_cf_vm
    }

    #[must_use]
    pub fn default_dex_version(&self) -> DexVersion {
        self.config.default_dex_version
    }

    /// Whether the test process itself runs on `vm`.
    #[must_use]
    pub fn is_system_jdk(&self, vm: CfVm) -> bool {
        self.config.system_runtime == Runtime::Cf(vm)
    }

    #[must_use]
    pub fn allows_master(&self) -> bool {
        self.config.allow_master
    }

    /// Whether `runtime` is part of the catalog, ignoring the allow-list.
    #[must_use]
    pub fn is_catalog_runtime(&self, runtime: Runtime) -> bool {
        self.unfiltered.contains(&runtime)
    }
}

impl Default for RuntimeEnvironment {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

fn resolve_unfiltered(config: &CatalogConfig) -> Vec<Runtime> {
    let ordered = std::iter::once(Runtime::None)
        .chain(config.checked_in_cf.iter().copied().map(Runtime::Cf))
        .chain(config.checked_in_dex.iter().copied().map(Runtime::dex))
        .chain(std::iter::once(config.system_runtime));

    let mut seen = BTreeSet::new();
    ordered.filter(|runtime| seen.insert(*runtime)).collect()
}

fn apply_allow_list(runtimes: &[Runtime], names: &[String]) -> Vec<Runtime> {
    for name in names {
        if !runtimes.iter().any(|runtime| runtime.name() == *name) {
            warn!(target: LOG_TARGET, name = %name, "allow-list entry matches no runtime");
        }
    }
    runtimes
        .iter()
        .copied()
        .filter(|runtime| {
            let runtime_name = runtime.name();
            names.iter().any(|name| *name == runtime_name)
        })
        .collect()
}
