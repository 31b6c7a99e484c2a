//! Test matrix selection for compiler test suites.
//!
//! A test declares which runtimes and API levels it is meaningful for through a
//! [`ParametersBuilder`]; [`ParametersBuilder::build`] resolves that request
//! against the [`RuntimeEnvironment`] of the current process and yields the
//! concrete [`TestParameters`] to instantiate. The [`condition`] and
//! [`registry`] modules describe executions that are known to behave
//! differently (expected failures, skips) so suites can look them up by name.

pub mod api_levels;
pub mod builder;
pub mod catalog;
pub mod condition;
pub mod parameters;
pub mod registry;

pub use builder::{Exclusion, ParametersBuilder, RuntimeFilter};
pub use catalog::{CatalogConfig, RuntimeEnvironment};
pub use condition::{
    CompilationMode, CompilerSet, CompilerUnderTest, ConditionRuntime, DexTool, Execution,
    ModeSet, RuntimeSet, TestCondition, ToolSet,
};
pub use parameters::{ParametersCollection, TestParameters};
pub use registry::ConditionRegistry;

pub use rtmatrix_error::{ErrorKind, MatrixError, Result};
pub use rtmatrix_types::{
    ApiLevel, CfVm, DexKind, DexVersion, DexVm, Ordinal, OrdinalRange, Runtime,
};

/// Start an empty parameters request. Nothing is selected until a `with_*`
/// method adds a filter.
#[must_use]
pub fn test_parameters() -> ParametersBuilder {
    ParametersBuilder::new()
}
