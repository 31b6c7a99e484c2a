//! Known-condition matching.
//!
//! A [`TestCondition`] describes a set of executions along four dimensions:
//! front-end tool, compiler under test, runtime, and compilation mode. Each
//! dimension is a bitset and an execution matches when it is a member of all
//! four. The matcher is total: it answers `true` or `false` and never fails.

use bitflags::bitflags;
use rtmatrix_types::{DexVersion, Runtime};

/// Tool that produced the input of the compiler under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DexTool {
    Jack,
    Dx,
    /// Input is plain class files.
    None,
}

impl DexTool {
    pub const ALL: [Self; 3] = [Self::Jack, Self::Dx, Self::None];

    #[must_use]
    pub const fn flag(self) -> ToolSet {
        match self {
            Self::Jack => ToolSet::JACK,
            Self::Dx => ToolSet::DX,
            Self::None => ToolSet::NONE,
        }
    }
}

/// Compiler pipeline being exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CompilerUnderTest {
    D8,
    R8,
    /// R8 on the output of D8.
    R8AfterD8,
    /// D8 on the class file output of R8.
    D8AfterR8Cf,
}

impl CompilerUnderTest {
    pub const ALL: [Self; 4] = [Self::D8, Self::R8, Self::R8AfterD8, Self::D8AfterR8Cf];

    #[must_use]
    pub const fn flag(self) -> CompilerSet {
        match self {
            Self::D8 => CompilerSet::D8,
            Self::R8 => CompilerSet::R8,
            Self::R8AfterD8 => CompilerSet::R8_AFTER_D8,
            Self::D8AfterR8Cf => CompilerSet::D8_AFTER_R8_CF,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CompilationMode {
    Debug,
    Release,
}

impl CompilationMode {
    pub const ALL: [Self; 2] = [Self::Debug, Self::Release];

    #[must_use]
    pub const fn flag(self) -> ModeSet {
        match self {
            Self::Debug => ModeSet::DEBUG,
            Self::Release => ModeSet::RELEASE,
        }
    }
}

/// Runtime dimension of a condition: an ART/Dalvik VM or the JVM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConditionRuntime {
    Art(DexVersion),
    Java,
}

impl ConditionRuntime {
    /// The condition runtime executing `runtime`; `None` for the none runtime.
    #[must_use]
    pub const fn from_runtime(runtime: Runtime) -> Option<Self> {
        match runtime {
            Runtime::None => None,
            Runtime::Cf(_) => Some(Self::Java),
            Runtime::Dex(vm) => Some(Self::Art(vm.version)),
        }
    }

    #[must_use]
    pub const fn flag(self) -> RuntimeSet {
        match self {
            Self::Art(version) => RuntimeSet::art(version),
            Self::Java => RuntimeSet::JAVA,
        }
    }
}

impl From<DexVersion> for ConditionRuntime {
    fn from(version: DexVersion) -> Self {
        Self::Art(version)
    }
}

bitflags! {
    /// Set of [`DexTool`]s.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolSet: u8 {
        const JACK = 1;
        const DX = 1 << 1;
        const NONE = 1 << 2;
    }
}

bitflags! {
    /// Set of [`CompilerUnderTest`]s.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CompilerSet: u8 {
        const D8 = 1;
        const R8 = 1 << 1;
        const R8_AFTER_D8 = 1 << 2;
        const D8_AFTER_R8_CF = 1 << 3;
    }
}

bitflags! {
    /// Set of [`CompilationMode`]s.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModeSet: u8 {
        const DEBUG = 1;
        const RELEASE = 1 << 1;
    }
}

bitflags! {
    /// Set of [`ConditionRuntime`]s.
    ///
    /// ART bit `n` is the `n`-th [`DexVersion`] in ascending order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RuntimeSet: u32 {
        const ART_4_0_4 = 1;
        const ART_4_4_4 = 1 << 1;
        const ART_5_1_1 = 1 << 2;
        const ART_6_0_1 = 1 << 3;
        const ART_7_0_0 = 1 << 4;
        const ART_8_1_0 = 1 << 5;
        const ART_9_0_0 = 1 << 6;
        const ART_10_0_0 = 1 << 7;
        const ART_12_0_0 = 1 << 8;
        const ART_13_0_0 = 1 << 9;
        const ART_14_0_0 = 1 << 10;
        const ART_MASTER = 1 << 11;
        const JAVA = 1 << 31;
    }
}

impl RuntimeSet {
    /// Every ART/Dalvik VM, master included.
    pub const ANY_ART: Self = Self::all().difference(Self::JAVA);

    #[must_use]
    pub const fn art(version: DexVersion) -> Self {
        Self::from_bits_retain(1 << version as u32)
    }

    const fn art_below(version: DexVersion) -> Self {
        Self::from_bits_retain((1 << version as u32) - 1)
    }
}

// Named compiler sets. D8_AFTER_R8_CF counts as both D8 and R8 because its
// input was shrunk by R8.
pub const D8_COMPILER: CompilerSet = CompilerSet::D8.union(CompilerSet::D8_AFTER_R8_CF);
pub const D8_NOT_AFTER_R8CF_COMPILER: CompilerSet = CompilerSet::D8;
pub const D8_AFTER_R8CF_COMPILER: CompilerSet = CompilerSet::D8_AFTER_R8_CF;
pub const R8_COMPILER: CompilerSet = CompilerSet::R8
    .union(CompilerSet::R8_AFTER_D8)
    .union(CompilerSet::D8_AFTER_R8_CF);
pub const R8DEX_COMPILER: CompilerSet = CompilerSet::R8.union(CompilerSet::R8_AFTER_D8);
pub const R8_NOT_AFTER_D8_COMPILER: CompilerSet = CompilerSet::R8;
pub const R8_AFTER_D8_COMPILER: CompilerSet = CompilerSet::R8_AFTER_D8;

pub const DEBUG_MODE: ModeSet = ModeSet::DEBUG;
pub const RELEASE_MODE: ModeSet = ModeSet::RELEASE;

pub const JAVA_RUNTIME: RuntimeSet = RuntimeSet::JAVA;

/// Exactly the listed ART/Dalvik VMs.
#[must_use]
pub const fn runtimes(versions: &[DexVersion]) -> RuntimeSet {
    let mut set = RuntimeSet::empty();
    let mut i = 0;
    while i < versions.len() {
        set = set.union(RuntimeSet::art(versions[i]));
        i += 1;
    }
    set
}

/// ART/Dalvik VMs up to and including `end`.
#[must_use]
pub const fn runtimes_up_to(end: DexVersion) -> RuntimeSet {
    RuntimeSet::art_below(end).union(RuntimeSet::art(end))
}

/// ART/Dalvik VMs from `start` on, master included.
#[must_use]
pub const fn runtimes_from(start: DexVersion) -> RuntimeSet {
    RuntimeSet::ANY_ART.difference(RuntimeSet::art_below(start))
}

/// ART/Dalvik VMs in `start..=end`.
#[must_use]
pub const fn runtimes_between(start: DexVersion, end: DexVersion) -> RuntimeSet {
    runtimes_from(start).intersection(runtimes_up_to(end))
}

#[must_use]
pub const fn any_dex_vm() -> RuntimeSet {
    RuntimeSet::ANY_ART
}

#[must_use]
pub const fn art_runtimes_up_to_and_java(end: DexVersion) -> RuntimeSet {
    runtimes_up_to(end).union(RuntimeSet::JAVA)
}

#[must_use]
pub const fn art_runtimes_from_and_java(start: DexVersion) -> RuntimeSet {
    runtimes_from(start).union(RuntimeSet::JAVA)
}

#[must_use]
pub const fn java() -> RuntimeSet {
    RuntimeSet::JAVA
}

/// One concrete execution to test conditions against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Execution {
    pub tool: DexTool,
    pub compiler: CompilerUnderTest,
    pub runtime: ConditionRuntime,
    pub mode: CompilationMode,
}

impl Execution {
    #[must_use]
    pub const fn new(
        tool: DexTool,
        compiler: CompilerUnderTest,
        runtime: ConditionRuntime,
        mode: CompilationMode,
    ) -> Self {
        Self {
            tool,
            compiler,
            runtime,
            mode,
        }
    }
}

/// Conjunction of four dimension sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TestCondition {
    tools: ToolSet,
    compilers: CompilerSet,
    runtimes: RuntimeSet,
    modes: ModeSet,
}

impl TestCondition {
    /// Matches every execution.
    #[must_use]
    pub const fn any() -> Self {
        Self::new(
            ToolSet::all(),
            CompilerSet::all(),
            RuntimeSet::all(),
            ModeSet::all(),
        )
    }

    #[must_use]
    pub const fn new(
        tools: ToolSet,
        compilers: CompilerSet,
        runtimes: RuntimeSet,
        modes: ModeSet,
    ) -> Self {
        Self {
            tools,
            compilers,
            runtimes,
            modes,
        }
    }

    #[must_use]
    pub const fn match_tools(tools: ToolSet) -> Self {
        Self::any().with_tools(tools)
    }

    #[must_use]
    pub const fn match_compilers(compilers: CompilerSet) -> Self {
        Self::any().with_compilers(compilers)
    }

    #[must_use]
    pub const fn match_runtimes(runtimes: RuntimeSet) -> Self {
        Self::any().with_runtimes(runtimes)
    }

    #[must_use]
    pub const fn match_modes(modes: ModeSet) -> Self {
        Self::any().with_modes(modes)
    }

    #[must_use]
    pub const fn with_tools(mut self, tools: ToolSet) -> Self {
        self.tools = tools;
        self
    }

    #[must_use]
    pub const fn with_compilers(mut self, compilers: CompilerSet) -> Self {
        self.compilers = compilers;
        self
    }

    #[must_use]
    pub const fn with_runtimes(mut self, runtimes: RuntimeSet) -> Self {
        self.runtimes = runtimes;
        self
    }

    #[must_use]
    pub const fn with_modes(mut self, modes: ModeSet) -> Self {
        self.modes = modes;
        self
    }

    pub const fn tools(&self) -> ToolSet {
        self.tools
    }

    pub const fn compilers(&self) -> CompilerSet {
        self.compilers
    }

    pub const fn runtimes(&self) -> RuntimeSet {
        self.runtimes
    }

    pub const fn modes(&self) -> ModeSet {
        self.modes
    }

    /// Whether the execution described by the four values is covered.
    pub const fn test(
        &self,
        tool: DexTool,
        compiler: CompilerUnderTest,
        runtime: ConditionRuntime,
        mode: CompilationMode,
    ) -> bool {
        self.tools.contains(tool.flag())
            && self.compilers.contains(compiler.flag())
            && self.runtimes.contains(runtime.flag())
            && self.modes.contains(mode.flag())
    }

    pub const fn matches(&self, execution: &Execution) -> bool {
        self.test(
            execution.tool,
            execution.compiler,
            execution.runtime,
            execution.mode,
        )
    }
}

impl Default for TestCondition {
    fn default() -> Self {
        Self::any()
    }
}
