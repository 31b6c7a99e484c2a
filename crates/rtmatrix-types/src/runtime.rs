//! Runtimes a compiled artifact can be executed on.
//!
//! A [`Runtime`] is either nothing at all (compile-only tests), a CF runtime
//! (a host JDK running class files) or a DEX runtime (an ART/Dalvik VM running
//! dex files). Only DEX runtimes are inherently tied to a platform API level.

use std::fmt;
use std::str::FromStr;

use rtmatrix_error::{MatrixError, Result};
use serde::{Deserialize, Serialize};

use crate::{ApiLevel, Ordinal};

/// Host JDK versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CfVm {
    Jdk8,
    Jdk9,
    Jdk10,
    Jdk11,
    Jdk17,
    Jdk20,
}

impl Ordinal for CfVm {
    const ALL: &'static [Self] = &[
        Self::Jdk8,
        Self::Jdk9,
        Self::Jdk10,
        Self::Jdk11,
        Self::Jdk17,
        Self::Jdk20,
    ];

    fn rank(self) -> usize {
        self as usize
    }
}

impl CfVm {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jdk8 => "jdk8",
            Self::Jdk9 => "jdk9",
            Self::Jdk10 => "jdk10",
            Self::Jdk11 => "jdk11",
            Self::Jdk17 => "jdk17",
            Self::Jdk20 => "jdk20",
        }
    }
}

impl fmt::Display for CfVm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CfVm {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|vm| vm.as_str() == s)
            .ok_or_else(|| MatrixError::unknown_runtime(s))
    }
}

/// ART/Dalvik VM versions, oldest first. [`DexVersion::Master`] is the
/// unreleased tip and sorts after every released version.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DexVersion {
    V4_0_4,
    V4_4_4,
    V5_1_1,
    V6_0_1,
    V7_0_0,
    V8_1_0,
    V9_0_0,
    V10_0_0,
    V12_0_0,
    V13_0_0,
    V14_0_0,
    Master,
}

impl Ordinal for DexVersion {
    const ALL: &'static [Self] = &[
        Self::V4_0_4,
        Self::V4_4_4,
        Self::V5_1_1,
        Self::V6_0_1,
        Self::V7_0_0,
        Self::V8_1_0,
        Self::V9_0_0,
        Self::V10_0_0,
        Self::V12_0_0,
        Self::V13_0_0,
        Self::V14_0_0,
        Self::Master,
    ];

    fn rank(self) -> usize {
        self as usize
    }
}

impl DexVersion {
    /// First version with native multidex support.
    pub const NATIVE_MULTIDEX: Self = Self::V5_1_1;

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V4_0_4 => "4.0.4",
            Self::V4_4_4 => "4.4.4",
            Self::V5_1_1 => "5.1.1",
            Self::V6_0_1 => "6.0.1",
            Self::V7_0_0 => "7.0.0",
            Self::V8_1_0 => "8.1.0",
            Self::V9_0_0 => "9.0.0",
            Self::V10_0_0 => "10.0.0",
            Self::V12_0_0 => "12.0.0",
            Self::V13_0_0 => "13.0.0",
            Self::V14_0_0 => "14.0.0",
            Self::Master => "master",
        }
    }

    /// Newest released version.
    #[must_use]
    pub const fn last() -> Self {
        Self::V14_0_0
    }

    #[must_use]
    pub const fn is_master(self) -> bool {
        matches!(self, Self::Master)
    }

    #[must_use]
    pub fn is_dalvik(self) -> bool {
        self <= Self::V4_4_4
    }

    /// Highest API level this VM implements.
    #[must_use]
    pub const fn max_supported_api_level(self) -> ApiLevel {
        match self {
            Self::V4_0_4 => ApiLevel::I_MR1,
            Self::V4_4_4 => ApiLevel::K,
            Self::V5_1_1 => ApiLevel::L_MR1,
            Self::V6_0_1 => ApiLevel::M,
            Self::V7_0_0 => ApiLevel::N,
            Self::V8_1_0 => ApiLevel::O_MR1,
            Self::V9_0_0 => ApiLevel::P,
            Self::V10_0_0 => ApiLevel::Q,
            Self::V12_0_0 => ApiLevel::S,
            Self::V13_0_0 => ApiLevel::T,
            Self::V14_0_0 => ApiLevel::U,
            Self::Master => ApiLevel::Master,
        }
    }

    /// The VM to run when targeting `api`, if one exists for that level.
    #[must_use]
    pub const fn for_api_level(api: ApiLevel) -> Option<Self> {
        match api {
            ApiLevel::Master => Some(Self::Master),
            ApiLevel::U => Some(Self::V14_0_0),
            ApiLevel::T => Some(Self::V13_0_0),
            ApiLevel::Sv2 | ApiLevel::S => Some(Self::V12_0_0),
            ApiLevel::Q => Some(Self::V10_0_0),
            ApiLevel::P => Some(Self::V9_0_0),
            // No 8.0 VM is checked in; 8.1 stands in for both.
            ApiLevel::O_MR1 | ApiLevel::O => Some(Self::V8_1_0),
            ApiLevel::N => Some(Self::V7_0_0),
            ApiLevel::M => Some(Self::V6_0_1),
            ApiLevel::L_MR1 => Some(Self::V5_1_1),
            ApiLevel::K => Some(Self::V4_4_4),
            ApiLevel::I_MR1 => Some(Self::V4_0_4),
            _ => None,
        }
    }
}

impl fmt::Display for DexVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DexVersion {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|version| version.as_str() == s)
            .ok_or_else(|| MatrixError::unknown_runtime(s))
    }
}

/// Where a DEX VM executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DexKind {
    Host,
    Target,
}

/// A concrete DEX VM: a version plus where it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DexVm {
    pub version: DexVersion,
    pub kind: DexKind,
}

impl DexVm {
    #[must_use]
    pub const fn host(version: DexVersion) -> Self {
        Self {
            version,
            kind: DexKind::Host,
        }
    }

    #[must_use]
    pub const fn target(version: DexVersion) -> Self {
        Self {
            version,
            kind: DexKind::Target,
        }
    }
}

/// An execution environment for a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Runtime {
    /// No execution; the test only compiles.
    None,
    /// A host JDK.
    Cf(CfVm),
    /// An ART/Dalvik VM.
    Dex(DexVm),
}

impl Runtime {
    /// Host-kind DEX runtime for `version`.
    #[must_use]
    pub const fn dex(version: DexVersion) -> Self {
        Self::Dex(DexVm::host(version))
    }

    /// Stable name used for allow-lists and display.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::None => "none".to_owned(),
            Self::Cf(vm) => vm.as_str().to_owned(),
            Self::Dex(DexVm {
                version,
                kind: DexKind::Host,
            }) => format!("dex-{version}"),
            Self::Dex(DexVm {
                version,
                kind: DexKind::Target,
            }) => format!("dex-{version}-target"),
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    #[must_use]
    pub const fn is_cf(&self) -> bool {
        matches!(self, Self::Cf(_))
    }

    #[must_use]
    pub const fn is_dex(&self) -> bool {
        matches!(self, Self::Dex(_))
    }

    #[must_use]
    pub const fn cf_vm(&self) -> Option<CfVm> {
        match self {
            Self::Cf(vm) => Some(*vm),
            _ => None,
        }
    }

    #[must_use]
    pub const fn dex_vm(&self) -> Option<DexVm> {
        match self {
            Self::Dex(vm) => Some(*vm),
            _ => None,
        }
    }

    /// Highest API level code running on this runtime may target.
    ///
    /// CF runtimes accept any released level; the none runtime has no level.
    #[must_use]
    pub const fn max_supported_api_level(&self) -> Option<ApiLevel> {
        match self {
            Self::None => None,
            Self::Cf(_) => Some(ApiLevel::LATEST),
            Self::Dex(vm) => Some(vm.version.max_supported_api_level()),
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Runtime {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "none" {
            return Ok(Self::None);
        }
        if let Some(rest) = s.strip_prefix("dex-") {
            let (version, kind) = match rest.strip_suffix("-target") {
                Some(version) => (version, DexKind::Target),
                None => (rest, DexKind::Host),
            };
            let version = version
                .parse::<DexVersion>()
                .map_err(|_| MatrixError::unknown_runtime(s))?;
            return Ok(Self::Dex(DexVm { version, kind }));
        }
        s.parse::<CfVm>().map(Self::Cf)
    }
}

impl From<Runtime> for String {
    fn from(runtime: Runtime) -> Self {
        runtime.name()
    }
}

impl TryFrom<String> for Runtime {
    type Error = MatrixError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}
