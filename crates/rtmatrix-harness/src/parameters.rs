//! Generated test parameters and the immutable collection that holds them.

use std::collections::BTreeSet;
use std::fmt;

use rtmatrix_error::{MatrixError, Result};
use rtmatrix_types::{ApiLevel, CfVm, DexVersion, Runtime};
use serde::Serialize;

/// One test configuration: a runtime and, when API levels are enabled for it,
/// the API level to compile for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TestParameters {
    runtime: Runtime,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_level: Option<ApiLevel>,
}

impl TestParameters {
    #[must_use]
    pub const fn new(runtime: Runtime) -> Self {
        Self {
            runtime,
            api_level: None,
        }
    }

    #[must_use]
    pub const fn with_api_level(runtime: Runtime, api_level: ApiLevel) -> Self {
        Self {
            runtime,
            api_level: Some(api_level),
        }
    }

    #[must_use]
    pub const fn runtime(&self) -> Runtime {
        self.runtime
    }

    #[must_use]
    pub const fn has_api_level(&self) -> bool {
        self.api_level.is_some()
    }

    /// The API level to compile for.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::MissingApiLevel`] when the parameters were built
    /// without one. There is no fallback level.
    pub fn api_level(&self) -> Result<ApiLevel> {
        self.api_level
            .ok_or_else(|| MatrixError::missing_api_level(self.runtime.name()))
    }

    #[must_use]
    pub const fn is_none_runtime(&self) -> bool {
        self.runtime.is_none()
    }

    #[must_use]
    pub const fn is_cf_runtime(&self) -> bool {
        self.runtime.is_cf()
    }

    #[must_use]
    pub const fn is_dex_runtime(&self) -> bool {
        self.runtime.is_dex()
    }

    #[must_use]
    pub fn is_cf_runtime_vm(&self, vm: CfVm) -> bool {
        self.runtime == Runtime::Cf(vm)
    }

    /// # Errors
    ///
    /// Returns [`MatrixError::NotCfRuntime`] for non-CF runtimes.
    pub fn cf_vm(&self) -> Result<CfVm> {
        self.runtime
            .cf_vm()
            .ok_or_else(|| MatrixError::NotCfRuntime {
                runtime: self.runtime.name(),
            })
    }

    /// # Errors
    ///
    /// Returns [`MatrixError::NotDexRuntime`] for non-DEX runtimes.
    pub fn dex_version(&self) -> Result<DexVersion> {
        self.runtime
            .dex_vm()
            .map(|vm| vm.version)
            .ok_or_else(|| MatrixError::NotDexRuntime {
                runtime: self.runtime.name(),
            })
    }

    /// Guard for tests that only make sense without a runtime.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotNoneRuntime`] for any other runtime.
    pub fn assert_none_runtime(&self) -> Result<()> {
        if self.is_none_runtime() {
            Ok(())
        } else {
            Err(MatrixError::NotNoneRuntime {
                runtime: self.runtime.name(),
            })
        }
    }

    /// Whether compiled code may keep default and static interface methods.
    ///
    /// # Errors
    ///
    /// DEX runtimes without an API level yield [`MatrixError::MissingApiLevel`].
    pub fn can_use_default_and_static_interface_methods(&self) -> Result<bool> {
        if self.is_cf_runtime() {
            return Ok(true);
        }
        Ok(self.api_level()?.has_default_interface_methods())
    }

    /// Whether compiled code may rely on native multidex.
    ///
    /// # Errors
    ///
    /// Same as [`TestParameters::api_level`] for non-CF runtimes.
    pub fn can_use_native_multidex(&self) -> Result<bool> {
        if self.is_cf_runtime() {
            return Ok(true);
        }
        Ok(self.api_level()?.has_native_multidex())
    }
}

impl fmt::Display for TestParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.runtime)?;
        if let Some(api_level) = self.api_level {
            write!(f, ", api:{api_level}")?;
        }
        Ok(())
    }
}

/// Ordered, duplicate-free, immutable set of [`TestParameters`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParametersCollection {
    parameters: Vec<TestParameters>,
}

impl ParametersCollection {
    /// Keep the first occurrence of every parameter, preserving order.
    pub(crate) fn from_ordered(parameters: impl IntoIterator<Item = TestParameters>) -> Self {
        let mut seen = BTreeSet::new();
        let parameters = parameters
            .into_iter()
            .filter(|parameter| seen.insert(*parameter))
            .collect();
        Self { parameters }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestParameters> {
        self.parameters.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[TestParameters] {
        &self.parameters
    }

    #[must_use]
    pub fn contains(&self, parameters: &TestParameters) -> bool {
        self.parameters.contains(parameters)
    }

    /// Display names, one per test instance.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.parameters.iter().map(ToString::to_string).collect()
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns `Err` if serialization fails.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl IntoIterator for ParametersCollection {
    type Item = TestParameters;
    type IntoIter = std::vec::IntoIter<TestParameters>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParametersCollection {
    type Item = &'a TestParameters;
    type IntoIter = std::slice::Iter<'a, TestParameters>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}
