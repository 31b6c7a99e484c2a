//! Parameters builder.
//!
//! Every `with_*` call adds a filter descriptor to a union: a runtime or API
//! level is selected when *any* accumulated filter accepts it. A later call can
//! only broaden the selection, never narrow it. Narrowing is done explicitly
//! with [`ParametersBuilder::excluding`].

use rtmatrix_error::{MatrixError, Result};
use rtmatrix_types::{ApiLevel, CfVm, DexVersion, OrdinalRange, Runtime};
use tracing::debug;

use crate::api_levels::{candidate_levels, select_api_levels};
use crate::catalog::RuntimeEnvironment;
use crate::parameters::{ParametersCollection, TestParameters};

const LOG_TARGET: &str = "rtmatrix.params";

/// A runtime filter descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeFilter {
    /// The none runtime.
    None,
    /// CF runtimes whose VM is in range.
    Cf(OrdinalRange<CfVm>),
    /// The CF runtime the test process runs on.
    SystemCf,
    /// The environment's default CF VM.
    DefaultCf,
    /// DEX runtimes whose version is in range. Master additionally requires
    /// master to be allowed.
    Dex(OrdinalRange<DexVersion>),
    /// The environment's default DEX VM.
    DefaultDex,
}

impl RuntimeFilter {
    /// Whether this filter accepts `runtime` in `env`.
    #[must_use]
    pub fn accepts(&self, runtime: Runtime, env: &RuntimeEnvironment, allow_master: bool) -> bool {
        match (self, runtime) {
            (Self::None, Runtime::None) => true,
            (Self::Cf(range), Runtime::Cf(vm)) => range.contains(vm),
            (Self::SystemCf, Runtime::Cf(vm)) => env.is_system_jdk(vm),
            (Self::DefaultCf, Runtime::Cf(vm)) => vm == env.default_cf_vm(),
            (Self::Dex(range), Runtime::Dex(vm)) => {
                (allow_master || !vm.version.is_master()) && range.contains(vm.version)
            }
            (Self::DefaultDex, Runtime::Dex(vm)) => {
                (allow_master || !vm.version.is_master()) && vm.version == env.default_dex_version()
            }
            _ => false,
        }
    }

    const fn is_dex(&self) -> bool {
        matches!(self, Self::Dex(_) | Self::DefaultDex)
    }
}

/// Removes generated parameters after selection.
///
/// Without an API level constraint the exclusion matches every parameter of
/// the accepted runtimes; with one it only matches parameters carrying a level
/// in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exclusion {
    runtimes: RuntimeFilter,
    api_levels: Option<OrdinalRange<ApiLevel>>,
}

impl Exclusion {
    #[must_use]
    pub const fn runtimes(runtimes: RuntimeFilter) -> Self {
        Self {
            runtimes,
            api_levels: None,
        }
    }

    #[must_use]
    pub const fn at_api_levels(mut self, api_levels: OrdinalRange<ApiLevel>) -> Self {
        self.api_levels = Some(api_levels);
        self
    }

    fn matches(&self, parameters: &TestParameters, env: &RuntimeEnvironment) -> bool {
        // Exclusions name runtimes explicitly, so master never needs unlocking here.
        if !self.runtimes.accepts(parameters.runtime(), env, true) {
            return false;
        }
        match self.api_levels {
            None => true,
            Some(range) => parameters
                .api_level()
                .is_ok_and(|api_level| range.contains(api_level)),
        }
    }
}

/// Accumulates filters and produces a [`ParametersCollection`].
///
/// Defaults to selecting nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParametersBuilder {
    runtime_filters: Vec<RuntimeFilter>,
    api_level_filters: Vec<OrdinalRange<ApiLevel>>,
    pinned_api_levels: Vec<ApiLevel>,
    exclusions: Vec<Exclusion>,
    custom_runtimes: Vec<Runtime>,
    enable_api_levels: bool,
    enable_api_levels_for_cf: bool,
    only_dex_runtime_api_level: bool,
    allow_master: bool,
}

impl ParametersBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an arbitrary runtime filter.
    #[must_use]
    pub fn with_runtime_filter(mut self, filter: RuntimeFilter) -> Self {
        self.runtime_filters.push(filter);
        self
    }

    /// Add an arbitrary API level filter; enables API levels.
    #[must_use]
    pub fn with_api_level_filter(mut self, filter: OrdinalRange<ApiLevel>) -> Self {
        self.enable_api_levels = true;
        self.api_level_filters.push(filter);
        self
    }

    #[must_use]
    pub fn with_none_runtime(self) -> Self {
        self.with_runtime_filter(RuntimeFilter::None)
    }

    #[must_use]
    pub fn with_all_runtimes(self) -> Self {
        self.with_cf_runtimes().with_dex_runtimes()
    }

    #[must_use]
    pub fn with_all_runtimes_and_api_levels(self) -> Self {
        self.with_all_runtimes().with_all_api_levels()
    }

    // ─── CF runtimes ────────────────────────────────────────────────────

    /// Add a specific CF runtime if it is available.
    #[must_use]
    pub fn with_cf_runtime(self, vm: CfVm) -> Self {
        self.with_runtime_filter(RuntimeFilter::Cf(OrdinalRange::exactly(vm)))
    }

    /// Add the CF runtime the test process itself runs on.
    ///
    /// Only for tests that depend on host and test runtime being the same,
    /// e.g. to fork a subprocess with the same JDK.
    #[must_use]
    pub fn with_system_runtime(self) -> Self {
        self.with_runtime_filter(RuntimeFilter::SystemCf)
    }

    #[must_use]
    pub fn with_default_cf_runtime(self) -> Self {
        self.with_runtime_filter(RuntimeFilter::DefaultCf)
    }

    #[must_use]
    pub fn with_default_dex_runtime(self) -> Self {
        self.with_runtime_filter(RuntimeFilter::DefaultDex)
    }

    #[must_use]
    pub fn with_default_runtimes(self) -> Self {
        self.with_default_dex_runtime().with_default_cf_runtime()
    }

    #[must_use]
    pub fn with_cf_runtimes(self) -> Self {
        self.with_runtime_filter(RuntimeFilter::Cf(OrdinalRange::all()))
    }

    #[must_use]
    pub fn with_cf_runtimes_between(self, start_inclusive: CfVm, end_inclusive: CfVm) -> Self {
        self.with_runtime_filter(RuntimeFilter::Cf(OrdinalRange::between(
            start_inclusive,
            end_inclusive,
        )))
    }

    #[must_use]
    pub fn with_cf_runtimes_starting_from_including(self, start: CfVm) -> Self {
        self.with_runtime_filter(RuntimeFilter::Cf(OrdinalRange::at_least(start)))
    }

    #[must_use]
    pub fn with_cf_runtimes_starting_from_excluding(self, start: CfVm) -> Self {
        self.with_runtime_filter(RuntimeFilter::Cf(OrdinalRange::above(start)))
    }

    #[must_use]
    pub fn with_cf_runtimes_ending_at_including(self, end: CfVm) -> Self {
        self.with_runtime_filter(RuntimeFilter::Cf(OrdinalRange::at_most(end)))
    }

    #[must_use]
    pub fn with_cf_runtimes_ending_at_excluding(self, end: CfVm) -> Self {
        self.with_runtime_filter(RuntimeFilter::Cf(OrdinalRange::below(end)))
    }

    // ─── DEX runtimes ───────────────────────────────────────────────────

    /// Add all available DEX runtimes except master.
    #[must_use]
    pub fn with_dex_runtimes(self) -> Self {
        self.with_runtime_filter(RuntimeFilter::Dex(OrdinalRange::all()))
    }

    /// Add all available DEX runtimes, master included.
    #[must_use]
    pub fn with_dex_runtimes_including_master(mut self) -> Self {
        self.allow_master = true;
        self.with_dex_runtimes()
    }

    #[must_use]
    pub fn with_dex_runtimes_and_all_api_levels(self) -> Self {
        self.with_dex_runtimes().with_all_api_levels()
    }

    /// Add a specific DEX runtime if it is available.
    #[must_use]
    pub fn with_dex_runtime(self, version: DexVersion) -> Self {
        self.with_runtime_filter(RuntimeFilter::Dex(OrdinalRange::exactly(version)))
    }

    #[must_use]
    pub fn with_dex_runtimes_between(
        self,
        start_inclusive: DexVersion,
        end_inclusive: DexVersion,
    ) -> Self {
        self.with_runtime_filter(RuntimeFilter::Dex(OrdinalRange::between(
            start_inclusive,
            end_inclusive,
        )))
    }

    /// DEX runtimes that load secondary dex files natively.
    #[must_use]
    pub fn with_native_multidex_dex_runtimes(self) -> Self {
        self.with_dex_runtimes_starting_from_including(DexVersion::NATIVE_MULTIDEX)
    }

    /// DEX runtimes that need a main dex list.
    #[must_use]
    pub fn with_main_dex_runtimes(self) -> Self {
        self.with_dex_runtimes_ending_at_excluding(DexVersion::NATIVE_MULTIDEX)
    }

    #[must_use]
    pub fn with_dex_runtimes_starting_from_including(self, start: DexVersion) -> Self {
        self.with_runtime_filter(RuntimeFilter::Dex(OrdinalRange::at_least(start)))
    }

    #[must_use]
    pub fn with_dex_runtimes_starting_from_excluding(self, start: DexVersion) -> Self {
        self.with_runtime_filter(RuntimeFilter::Dex(OrdinalRange::above(start)))
    }

    #[must_use]
    pub fn with_dex_runtimes_ending_at_including(self, end: DexVersion) -> Self {
        self.with_runtime_filter(RuntimeFilter::Dex(OrdinalRange::at_most(end)))
    }

    #[must_use]
    pub fn with_dex_runtimes_ending_at_excluding(self, end: DexVersion) -> Self {
        self.with_runtime_filter(RuntimeFilter::Dex(OrdinalRange::below(end)))
    }

    // ─── API levels ─────────────────────────────────────────────────────
    //
    // With API levels enabled each DEX VM is configured twice by default: at
    // the lowest requested level and at the highest requested level the VM
    // supports.

    #[must_use]
    pub fn with_all_api_levels(self) -> Self {
        self.with_api_level_filter(OrdinalRange::all())
    }

    /// Test each DEX VM only at the highest level it supports.
    #[must_use]
    pub fn with_only_dex_runtime_api_level(mut self) -> Self {
        self.enable_api_levels = true;
        self.only_dex_runtime_api_level = true;
        self
    }

    /// Also attach API levels to CF runtimes.
    #[must_use]
    pub fn enable_api_levels_for_cf(mut self) -> Self {
        self.enable_api_levels_for_cf = true;
        self
    }

    #[must_use]
    pub fn with_all_api_levels_also_for_cf(self) -> Self {
        self.with_all_api_levels().enable_api_levels_for_cf()
    }

    /// Request `api` and pin it: it is tested on every VM that supports it, in
    /// addition to the boundary levels.
    #[must_use]
    pub fn with_api_level(mut self, api: ApiLevel) -> Self {
        self.pinned_api_levels.push(api);
        self.with_api_level_filter(OrdinalRange::exactly(api))
    }

    #[must_use]
    pub fn with_api_levels_starting_at_including(self, start: ApiLevel) -> Self {
        self.with_api_level_filter(OrdinalRange::at_least(start))
    }

    #[must_use]
    pub fn with_api_levels_starting_at_excluding(self, start: ApiLevel) -> Self {
        self.with_api_level_filter(OrdinalRange::above(start))
    }

    #[must_use]
    pub fn with_api_levels_ending_at_including(self, end: ApiLevel) -> Self {
        self.with_api_level_filter(OrdinalRange::at_most(end))
    }

    #[must_use]
    pub fn with_api_levels_ending_at_excluding(self, end: ApiLevel) -> Self {
        self.with_api_level_filter(OrdinalRange::below(end))
    }

    #[must_use]
    pub fn with_api_levels_without_native_multidex(self) -> Self {
        self.with_api_levels_ending_at_excluding(ApiLevel::NATIVE_MULTIDEX)
    }

    #[must_use]
    pub fn with_api_levels_with_default_methods(self) -> Self {
        self.with_api_levels_starting_at_including(ApiLevel::DEFAULT_INTERFACE_METHODS)
    }

    // ─── Other ──────────────────────────────────────────────────────────

    /// Add a runtime that is not part of the catalog. Its parameters bypass
    /// runtime filters and exclusions and are appended last.
    #[must_use]
    pub fn with_custom_runtime(mut self, runtime: Runtime) -> Self {
        self.custom_runtimes.push(runtime);
        self
    }

    /// Drop generated parameters matching `exclusion`.
    #[must_use]
    pub fn excluding(mut self, exclusion: Exclusion) -> Self {
        self.exclusions.push(exclusion);
        self
    }

    fn has_dex_runtime_filter(&self) -> bool {
        self.runtime_filters.iter().any(RuntimeFilter::is_dex)
    }

    fn accepts_runtime(&self, runtime: Runtime, env: &RuntimeEnvironment, allow_master: bool) -> bool {
        self.runtime_filters
            .iter()
            .any(|filter| filter.accepts(runtime, env, allow_master))
    }

    fn is_excluded(&self, parameters: &TestParameters, env: &RuntimeEnvironment) -> bool {
        self.exclusions
            .iter()
            .any(|exclusion| exclusion.matches(parameters, env))
    }

    fn parameters_for(&self, runtime: Runtime, candidates: &[ApiLevel]) -> Vec<TestParameters> {
        if !self.enable_api_levels {
            return vec![TestParameters::new(runtime)];
        }
        let vm_max = match runtime {
            Runtime::None => return vec![TestParameters::new(runtime)],
            Runtime::Cf(_) if !self.enable_api_levels_for_cf => {
                return vec![TestParameters::new(runtime)];
            }
            Runtime::Cf(_) => ApiLevel::LATEST,
            Runtime::Dex(vm) => vm.version.max_supported_api_level(),
        };
        if self.only_dex_runtime_api_level {
            return vec![TestParameters::with_api_level(runtime, vm_max)];
        }
        select_api_levels(candidates, vm_max, &self.pinned_api_levels)
            .into_iter()
            .map(|api| TestParameters::with_api_level(runtime, api))
            .collect()
    }

    /// Compute the parameters for `env`.
    ///
    /// The builder is left untouched; building twice yields identical,
    /// identically ordered collections.
    ///
    /// # Errors
    ///
    /// - [`MatrixError::ApiLevelsWithoutDexRuntimes`] when API levels are
    ///   enabled but neither a DEX runtime filter nor CF API levels exist.
    /// - [`MatrixError::DuplicateCustomRuntime`] when a custom runtime is part
    ///   of the catalog.
    pub fn build(&self, env: &RuntimeEnvironment) -> Result<ParametersCollection> {
        if self.enable_api_levels && !self.enable_api_levels_for_cf && !self.has_dex_runtime_filter()
        {
            return Err(MatrixError::ApiLevelsWithoutDexRuntimes);
        }
        if let Some(runtime) = self
            .custom_runtimes
            .iter()
            .find(|runtime| env.is_catalog_runtime(**runtime))
        {
            return Err(MatrixError::DuplicateCustomRuntime {
                runtime: runtime.name(),
            });
        }

        let allow_master = self.allow_master || env.allows_master();
        let candidates = candidate_levels(&self.api_level_filters);

        let mut selected_runtimes = 0_usize;
        let mut parameters = Vec::new();
        for runtime in env.available_runtimes() {
            if !self.accepts_runtime(*runtime, env, allow_master) {
                continue;
            }
            selected_runtimes += 1;
            parameters.extend(
                self.parameters_for(*runtime, &candidates)
                    .into_iter()
                    .filter(|parameter| !self.is_excluded(parameter, env)),
            );
        }
        for runtime in &self.custom_runtimes {
            parameters.extend(self.parameters_for(*runtime, &candidates));
        }

        let collection = ParametersCollection::from_ordered(parameters);
        debug!(
            target: LOG_TARGET,
            runtimes = selected_runtimes,
            custom_runtimes = self.custom_runtimes.len(),
            candidate_api_levels = candidates.len(),
            parameters = collection.len(),
            api_levels = self.enable_api_levels,
            "built test parameters"
        );
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogConfig;
    use rtmatrix_types::Ordinal;

    fn env_with(cf: &[CfVm], dex: &[DexVersion]) -> RuntimeEnvironment {
        RuntimeEnvironment::new(CatalogConfig {
            checked_in_cf: cf.to_vec(),
            checked_in_dex: dex.to_vec(),
            system_runtime: Runtime::Cf(cf.first().copied().unwrap_or(CfVm::Jdk11)),
            ..CatalogConfig::default()
        })
    }

    fn names(collection: &ParametersCollection) -> Vec<String> {
        collection.names()
    }

    #[test]
    fn empty_builder_selects_nothing() {
        let env = RuntimeEnvironment::default();
        let params = ParametersBuilder::new().build(&env).expect("build");
        assert!(params.is_empty());
    }

    #[test]
    fn none_runtime_only() {
        let env = RuntimeEnvironment::default();
        let params = ParametersBuilder::new()
            .with_none_runtime()
            .build(&env)
            .expect("build");
        assert_eq!(names(&params), vec!["none"]);
    }

    #[test]
    fn dex_runtimes_skip_master_unless_requested() {
        let env = env_with(&[], &[DexVersion::V14_0_0, DexVersion::Master]);
        let params = ParametersBuilder::new()
            .with_dex_runtimes()
            .build(&env)
            .expect("build");
        assert_eq!(names(&params), vec!["dex-14.0.0"]);

        let params = ParametersBuilder::new()
            .with_dex_runtimes_including_master()
            .build(&env)
            .expect("build");
        assert_eq!(names(&params), vec!["dex-14.0.0", "dex-master"]);
    }

    #[test]
    fn environment_can_allow_master() {
        let env = RuntimeEnvironment::new(CatalogConfig {
            checked_in_cf: Vec::new(),
            checked_in_dex: vec![DexVersion::Master],
            allow_master: true,
            ..CatalogConfig::default()
        });
        let params = ParametersBuilder::new()
            .with_dex_runtimes()
            .build(&env)
            .expect("build");
        assert_eq!(names(&params), vec!["dex-master"]);
    }

    #[test]
    fn master_api_level_reaches_master_vm_only() {
        let env = RuntimeEnvironment::new(CatalogConfig {
            checked_in_cf: Vec::new(),
            checked_in_dex: vec![DexVersion::V14_0_0, DexVersion::Master],
            allow_master: true,
            ..CatalogConfig::default()
        });
        let params = ParametersBuilder::new()
            .with_dex_runtimes()
            .with_api_level(ApiLevel::Master)
            .build(&env)
            .expect("build");
        assert_eq!(names(&params), vec!["dex-master, api:35"]);

        let params = ParametersBuilder::new()
            .with_dex_runtimes()
            .with_all_api_levels()
            .build(&env)
            .expect("build");
        assert_eq!(
            names(&params),
            vec![
                "dex-14.0.0, api:1",
                "dex-14.0.0, api:34",
                "dex-master, api:1",
                "dex-master, api:35",
            ]
        );
    }

    #[test]
    fn cf_range_filters() {
        let env = env_with(CfVm::ALL, &[]);
        let params = ParametersBuilder::new()
            .with_cf_runtimes_between(CfVm::Jdk9, CfVm::Jdk11)
            .build(&env)
            .expect("build");
        assert_eq!(names(&params), vec!["jdk9", "jdk10", "jdk11"]);

        let params = ParametersBuilder::new()
            .with_cf_runtimes_starting_from_excluding(CfVm::Jdk11)
            .build(&env)
            .expect("build");
        assert_eq!(names(&params), vec!["jdk17", "jdk20"]);

        let params = ParametersBuilder::new()
            .with_cf_runtimes_ending_at_excluding(CfVm::Jdk9)
            .build(&env)
            .expect("build");
        assert_eq!(names(&params), vec!["jdk8"]);
    }

    #[test]
    fn multidex_partition_of_dex_runtimes() {
        let env = env_with(&[], DexVersion::ALL);
        let main_dex = ParametersBuilder::new()
            .with_main_dex_runtimes()
            .build(&env)
            .expect("build");
        assert_eq!(names(&main_dex), vec!["dex-4.0.4", "dex-4.4.4"]);

        let native = ParametersBuilder::new()
            .with_native_multidex_dex_runtimes()
            .build(&env)
            .expect("build");
        assert_eq!(native.len(), DexVersion::ALL.len() - 3, "minus two dalvik and master");
    }

    #[test]
    fn system_and_default_runtimes() {
        let env = RuntimeEnvironment::new(CatalogConfig {
            system_runtime: Runtime::Cf(CfVm::Jdk17),
            default_cf_vm: CfVm::Jdk8,
            default_dex_version: DexVersion::V12_0_0,
            ..CatalogConfig::default()
        });
        let params = ParametersBuilder::new()
            .with_system_runtime()
            .build(&env)
            .expect("build");
        assert_eq!(names(&params), vec!["jdk17"]);

        let params = ParametersBuilder::new()
            .with_default_runtimes()
            .build(&env)
            .expect("build");
        assert_eq!(names(&params), vec!["jdk8", "dex-12.0.0"]);
    }

    #[test]
    fn api_levels_attach_to_dex_only() {
        let env = env_with(&[CfVm::Jdk11], &[DexVersion::V7_0_0, DexVersion::V14_0_0]);
        let params = ParametersBuilder::new()
            .with_none_runtime()
            .with_all_runtimes_and_api_levels()
            .build(&env)
            .expect("build");
        assert_eq!(
            names(&params),
            vec![
                "none",
                "jdk11",
                "dex-7.0.0, api:1",
                "dex-7.0.0, api:24",
                "dex-14.0.0, api:1",
                "dex-14.0.0, api:34",
            ]
        );
    }

    #[test]
    fn cf_api_levels_use_global_floor_and_ceiling() {
        let env = env_with(&[CfVm::Jdk11], &[]);
        let params = ParametersBuilder::new()
            .with_cf_runtimes()
            .with_all_api_levels_also_for_cf()
            .build(&env)
            .expect("build");
        assert_eq!(names(&params), vec!["jdk11, api:1", "jdk11, api:34"]);
    }

    #[test]
    fn only_dex_runtime_api_level() {
        let env = env_with(&[], &[DexVersion::V5_1_1, DexVersion::V9_0_0]);
        let params = ParametersBuilder::new()
            .with_dex_runtimes()
            .with_only_dex_runtime_api_level()
            .build(&env)
            .expect("build");
        assert_eq!(names(&params), vec!["dex-5.1.1, api:22", "dex-9.0.0, api:28"]);
    }

    #[test]
    fn pinned_level_is_added_to_boundaries() {
        let env = env_with(&[], &[DexVersion::V14_0_0, DexVersion::V4_4_4]);
        let params = ParametersBuilder::new()
            .with_dex_runtimes()
            .with_api_levels_starting_at_including(ApiLevel::L)
            .with_api_level(ApiLevel::K)
            .with_api_level(ApiLevel::O)
            .build(&env)
            .expect("build");
        assert_eq!(
            names(&params),
            vec![
                "dex-14.0.0, api:19",
                "dex-14.0.0, api:26",
                "dex-14.0.0, api:34",
                "dex-4.4.4, api:19",
            ]
        );
    }

    #[test]
    fn vm_below_all_candidates_produces_nothing() {
        let env = env_with(&[], &[DexVersion::V4_4_4]);
        let params = ParametersBuilder::new()
            .with_dex_runtimes()
            .with_api_levels_with_default_methods()
            .build(&env)
            .expect("build");
        assert!(params.is_empty());
    }

    #[test]
    fn api_levels_without_dex_filter_is_a_usage_error() {
        let env = RuntimeEnvironment::default();
        let err = ParametersBuilder::new()
            .with_cf_runtimes()
            .with_all_api_levels()
            .build(&env)
            .unwrap_err();
        assert_eq!(err, MatrixError::ApiLevelsWithoutDexRuntimes);
    }

    #[test]
    fn exclusions_drop_specific_tuples() {
        let env = env_with(&[CfVm::Jdk8], &[DexVersion::V9_0_0, DexVersion::V14_0_0]);
        let params = ParametersBuilder::new()
            .with_all_runtimes_and_api_levels()
            .excluding(
                Exclusion::runtimes(RuntimeFilter::Dex(OrdinalRange::exactly(
                    DexVersion::V14_0_0,
                )))
                .at_api_levels(OrdinalRange::exactly(ApiLevel::B)),
            )
            .excluding(Exclusion::runtimes(RuntimeFilter::Cf(OrdinalRange::all())))
            .build(&env)
            .expect("build");
        assert_eq!(
            names(&params),
            vec!["dex-9.0.0, api:1", "dex-9.0.0, api:28", "dex-14.0.0, api:34"]
        );
    }

    #[test]
    fn custom_runtimes_are_appended() {
        let env = env_with(&[CfVm::Jdk11], &[DexVersion::V14_0_0]);
        let target = Runtime::Dex(rtmatrix_types::DexVm::target(DexVersion::V14_0_0));
        let params = ParametersBuilder::new()
            .with_cf_runtimes()
            .with_custom_runtime(target)
            .build(&env)
            .expect("build");
        assert_eq!(names(&params), vec!["jdk11", "dex-14.0.0-target"]);

        let err = ParametersBuilder::new()
            .with_custom_runtime(Runtime::Cf(CfVm::Jdk11))
            .build(&env)
            .unwrap_err();
        assert!(matches!(err, MatrixError::DuplicateCustomRuntime { .. }));
    }

    #[test]
    fn overlapping_filters_do_not_duplicate() {
        let env = env_with(&[CfVm::Jdk8, CfVm::Jdk11], &[DexVersion::V9_0_0]);
        let params = ParametersBuilder::new()
            .with_cf_runtimes()
            .with_cf_runtime(CfVm::Jdk8)
            .with_default_cf_runtime()
            .with_dex_runtimes()
            .with_dex_runtime(DexVersion::V9_0_0)
            .build(&env)
            .expect("build");
        assert_eq!(names(&params), vec!["jdk8", "jdk11", "dex-9.0.0"]);
    }
}
