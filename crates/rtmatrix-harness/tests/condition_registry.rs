//! Known-condition tables looked up from generated test parameters.
//!
//!   1. Compiler dimension: R8 rules do not leak onto plain D8
//!   2. Rules for one name are a union
//!   3. Driving the registry from a built parameters collection

use rtmatrix_harness::condition::{
    D8_AFTER_R8CF_COMPILER, DEBUG_MODE, R8_COMPILER, R8DEX_COMPILER, art_runtimes_from_and_java,
    runtimes_between, runtimes_up_to,
};
use rtmatrix_harness::{
    CompilationMode, CompilerUnderTest, ConditionRegistry, ConditionRuntime, DexTool, DexVersion,
    Execution, RuntimeEnvironment, TestCondition, test_parameters,
};

fn known_failures() -> ConditionRegistry {
    [
        (
            "invoke-custom",
            TestCondition::match_compilers(R8_COMPILER)
                .with_runtimes(runtimes_up_to(DexVersion::V7_0_0)),
        ),
        (
            "string-switch",
            TestCondition::match_compilers(R8DEX_COMPILER).with_modes(DEBUG_MODE),
        ),
        (
            "string-switch",
            TestCondition::match_compilers(D8_AFTER_R8CF_COMPILER),
        ),
        (
            "nest-access",
            TestCondition::match_runtimes(art_runtimes_from_and_java(DexVersion::V13_0_0)),
        ),
    ]
    .into_iter()
    .collect()
}

// ---------------------------------------------------------------------------
// Test 1: Compiler dimension
// ---------------------------------------------------------------------------

#[test]
fn test_r8_rule_does_not_match_d8() {
    let registry = known_failures();
    let on = |compiler| {
        Execution::new(
            DexTool::None,
            compiler,
            ConditionRuntime::Art(DexVersion::V5_1_1),
            CompilationMode::Release,
        )
    };
    assert!(registry.matches("invoke-custom", &on(CompilerUnderTest::R8)));
    assert!(registry.matches("invoke-custom", &on(CompilerUnderTest::R8AfterD8)));
    assert!(registry.matches("invoke-custom", &on(CompilerUnderTest::D8AfterR8Cf)));
    assert!(!registry.matches("invoke-custom", &on(CompilerUnderTest::D8)));
}

// ---------------------------------------------------------------------------
// Test 2: Union of rules
// ---------------------------------------------------------------------------

#[test]
fn test_rules_for_one_name_are_a_union() {
    let registry = known_failures();
    let execution = |compiler, mode| {
        Execution::new(
            DexTool::None,
            compiler,
            ConditionRuntime::Art(DexVersion::V14_0_0),
            mode,
        )
    };

    assert!(registry.matches(
        "string-switch",
        &execution(CompilerUnderTest::R8, CompilationMode::Debug)
    ));
    assert!(registry.matches(
        "string-switch",
        &execution(CompilerUnderTest::D8AfterR8Cf, CompilationMode::Release)
    ));
    assert!(!registry.matches(
        "string-switch",
        &execution(CompilerUnderTest::R8, CompilationMode::Release)
    ));
    assert!(!registry.matches(
        "string-switch",
        &execution(CompilerUnderTest::D8, CompilationMode::Debug)
    ));
}

#[test]
fn test_runtime_ranges_include_java_only_when_asked() {
    let registry = known_failures();
    let jvm = Execution::new(
        DexTool::None,
        CompilerUnderTest::R8,
        ConditionRuntime::Java,
        CompilationMode::Release,
    );
    assert!(registry.matches("nest-access", &jvm));
    assert!(!registry.matches("invoke-custom", &jvm));
    assert_eq!(registry.matching_names(&jvm).collect::<Vec<_>>(), vec!["nest-access"]);

    let window = TestCondition::match_runtimes(runtimes_between(
        DexVersion::V8_1_0,
        DexVersion::V10_0_0,
    ));
    assert!(window.test(
        DexTool::Jack,
        CompilerUnderTest::D8,
        ConditionRuntime::Art(DexVersion::V9_0_0),
        CompilationMode::Debug,
    ));
    assert!(!window.test(
        DexTool::Jack,
        CompilerUnderTest::D8,
        ConditionRuntime::Art(DexVersion::V12_0_0),
        CompilationMode::Debug,
    ));
}

// ---------------------------------------------------------------------------
// Test 3: Parameters to executions
// ---------------------------------------------------------------------------

#[test]
fn test_lookup_from_built_parameters() {
    let env = RuntimeEnvironment::default();
    let params = test_parameters()
        .with_none_runtime()
        .with_cf_runtime(rtmatrix_harness::CfVm::Jdk11)
        .with_dex_runtimes_between(DexVersion::V6_0_1, DexVersion::V8_1_0)
        .build(&env)
        .expect("build");
    let registry = known_failures();

    let failing: Vec<String> = params
        .iter()
        .filter_map(|p| {
            let runtime = ConditionRuntime::from_runtime(p.runtime())?;
            let execution = Execution::new(
                DexTool::None,
                CompilerUnderTest::R8,
                runtime,
                CompilationMode::Release,
            );
            registry
                .matches("invoke-custom", &execution)
                .then(|| p.to_string())
        })
        .collect();
    assert_eq!(failing, vec!["dex-6.0.1", "dex-7.0.0"]);
}
