//! Named collections of known conditions.
//!
//! Test suites keep tables of tests that are known to fail (or to be skipped)
//! under certain executions. A test name may carry several rules; it matches
//! an execution when any of its rules does.

use std::collections::BTreeMap;

use crate::condition::{Execution, TestCondition};

/// Ordered map from test name to its condition rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionRegistry {
    rules: BTreeMap<String, Vec<TestCondition>>,
}

impl ConditionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule for `name`. Rules accumulate.
    pub fn register(&mut self, name: impl Into<String>, condition: TestCondition) {
        self.rules.entry(name.into()).or_default().push(condition);
    }

    /// Builder-style [`ConditionRegistry::register`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, condition: TestCondition) -> Self {
        self.register(name, condition);
        self
    }

    /// Rules registered for `name`; empty when unknown.
    pub fn conditions_for(&self, name: &str) -> &[TestCondition] {
        self.rules.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any rule for `name` matches `execution`. Unknown names never
    /// match.
    pub fn matches(&self, name: &str, execution: &Execution) -> bool {
        self.conditions_for(name)
            .iter()
            .any(|condition| condition.matches(execution))
    }

    /// Names with at least one rule matching `execution`, in name order.
    pub fn matching_names<'a>(&'a self, execution: &'a Execution) -> impl Iterator<Item = &'a str> {
        self.rules
            .iter()
            .filter(|(_, conditions)| conditions.iter().any(|c| c.matches(execution)))
            .map(|(name, _)| name.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, TestCondition)> for ConditionRegistry {
    fn from_iter<I: IntoIterator<Item = (N, TestCondition)>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

impl<N: Into<String>> Extend<(N, TestCondition)> for ConditionRegistry {
    fn extend<I: IntoIterator<Item = (N, TestCondition)>>(&mut self, iter: I) {
        for (name, condition) in iter {
            self.register(name, condition);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{
        CompilationMode, CompilerUnderTest, ConditionRuntime, D8_COMPILER, DexTool, R8_COMPILER,
        RELEASE_MODE, runtimes_up_to,
    };
    use rtmatrix_types::DexVersion;

    fn execution(compiler: CompilerUnderTest, version: DexVersion) -> Execution {
        Execution::new(
            DexTool::None,
            compiler,
            ConditionRuntime::Art(version),
            CompilationMode::Release,
        )
    }

    fn registry() -> ConditionRegistry {
        ConditionRegistry::new()
            .with("001-hello", TestCondition::match_compilers(R8_COMPILER))
            .with(
                "002-dalvik",
                TestCondition::match_runtimes(runtimes_up_to(DexVersion::V4_4_4)),
            )
            .with(
                "002-dalvik",
                TestCondition::match_compilers(D8_COMPILER).with_modes(RELEASE_MODE),
            )
    }

    #[test]
    fn rules_accumulate_per_name() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.conditions_for("002-dalvik").len(), 2);
        assert!(registry.conditions_for("999-unknown").is_empty());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["001-hello", "002-dalvik"]);
    }

    #[test]
    fn matches_any_rule() {
        let registry = registry();
        let r8_art = execution(CompilerUnderTest::R8, DexVersion::V9_0_0);
        assert!(registry.matches("001-hello", &r8_art));
        assert!(!registry.matches("002-dalvik", &r8_art));

        let d8_art = execution(CompilerUnderTest::D8, DexVersion::V9_0_0);
        assert!(!registry.matches("001-hello", &d8_art));
        assert!(registry.matches("002-dalvik", &d8_art));

        let r8_dalvik = execution(CompilerUnderTest::R8, DexVersion::V4_0_4);
        assert_eq!(
            registry.matching_names(&r8_dalvik).collect::<Vec<_>>(),
            vec!["001-hello", "002-dalvik"]
        );
    }

    #[test]
    fn unknown_names_never_match() {
        let execution = execution(CompilerUnderTest::D8, DexVersion::V4_0_4);
        assert!(!registry().matches("nope", &execution));
        assert!(!ConditionRegistry::new().matches("nope", &execution));
        assert_eq!(ConditionRegistry::new().matching_names(&execution).count(), 0);
    }

    #[test]
    fn collects_from_pairs() {
        let registry: ConditionRegistry = [
            ("b", TestCondition::any()),
            ("a", TestCondition::any()),
            ("b", TestCondition::match_compilers(D8_COMPILER)),
        ]
        .into_iter()
        .collect();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.conditions_for("b").len(), 2);
        assert!(!registry.is_empty());
    }
}
