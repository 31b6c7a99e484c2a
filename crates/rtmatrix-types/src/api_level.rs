//! Android platform API levels.

use std::fmt;

use rtmatrix_error::{MatrixError, Result};
use serde::{Deserialize, Serialize};

use crate::Ordinal;

/// A target platform API level.
///
/// Discriminants are the numeric platform levels, so declaration order is
/// numeric order.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ApiLevel {
    B = 1,
    B_1_1 = 2,
    C = 3,
    D = 4,
    E = 5,
    E_0_1 = 6,
    E_MR1 = 7,
    F = 8,
    G = 9,
    G_MR1 = 10,
    H = 11,
    H_MR1 = 12,
    H_MR2 = 13,
    I = 14,
    I_MR1 = 15,
    J = 16,
    J_MR1 = 17,
    J_MR2 = 18,
    K = 19,
    K_WATCH = 20,
    L = 21,
    L_MR1 = 22,
    M = 23,
    N = 24,
    N_MR1 = 25,
    O = 26,
    O_MR1 = 27,
    P = 28,
    Q = 29,
    R = 30,
    S = 31,
    Sv2 = 32,
    T = 33,
    U = 34,
    Master = 35,
}

impl Ordinal for ApiLevel {
    const ALL: &'static [Self] = &[
        Self::B,
        Self::B_1_1,
        Self::C,
        Self::D,
        Self::E,
        Self::E_0_1,
        Self::E_MR1,
        Self::F,
        Self::G,
        Self::G_MR1,
        Self::H,
        Self::H_MR1,
        Self::H_MR2,
        Self::I,
        Self::I_MR1,
        Self::J,
        Self::J_MR1,
        Self::J_MR2,
        Self::K,
        Self::K_WATCH,
        Self::L,
        Self::L_MR1,
        Self::M,
        Self::N,
        Self::N_MR1,
        Self::O,
        Self::O_MR1,
        Self::P,
        Self::Q,
        Self::R,
        Self::S,
        Self::Sv2,
        Self::T,
        Self::U,
        Self::Master,
    ];

    fn rank(self) -> usize {
        usize::from(self as u8) - 1
    }
}

impl ApiLevel {
    /// Lowest level the compiler under test supports.
    pub const LOWEST_COMPILER_SUPPORTED: Self = Self::B;
    /// Newest released level.
    pub const LATEST: Self = Self::U;
    /// First level with native multidex.
    pub const NATIVE_MULTIDEX: Self = Self::L;
    /// First level with default and static interface methods.
    pub const DEFAULT_INTERFACE_METHODS: Self = Self::N;

    /// Numeric platform level.
    #[must_use]
    pub const fn level(self) -> u32 {
        self as u32
    }

    /// Platform codename.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::B => "B",
            Self::B_1_1 => "B_1_1",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::E_0_1 => "E_0_1",
            Self::E_MR1 => "E_MR1",
            Self::F => "F",
            Self::G => "G",
            Self::G_MR1 => "G_MR1",
            Self::H => "H",
            Self::H_MR1 => "H_MR1",
            Self::H_MR2 => "H_MR2",
            Self::I => "I",
            Self::I_MR1 => "I_MR1",
            Self::J => "J",
            Self::J_MR1 => "J_MR1",
            Self::J_MR2 => "J_MR2",
            Self::K => "K",
            Self::K_WATCH => "K_WATCH",
            Self::L => "L",
            Self::L_MR1 => "L_MR1",
            Self::M => "M",
            Self::N => "N",
            Self::N_MR1 => "N_MR1",
            Self::O => "O",
            Self::O_MR1 => "O_MR1",
            Self::P => "P",
            Self::Q => "Q",
            Self::R => "R",
            Self::S => "S",
            Self::Sv2 => "Sv2",
            Self::T => "T",
            Self::U => "U",
            Self::Master => "MASTER",
        }
    }

    /// Look up a level by its numeric value.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::UnknownApiLevel`] for values outside the catalog.
    pub fn from_level(level: u32) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|api| api.level() == level)
            .ok_or(MatrixError::UnknownApiLevel { level })
    }

    /// Released levels from the compiler floor up to [`ApiLevel::LATEST`], ascending.
    ///
    /// This is the catalog that API level filters select candidates from;
    /// [`ApiLevel::Master`] is not part of it.
    pub fn sorted() -> impl Iterator<Item = Self> {
        Self::ALL
            .iter()
            .copied()
            .filter(|api| api.is_in_range_inclusive(Self::LOWEST_COMPILER_SUPPORTED, Self::LATEST))
    }

    #[must_use]
    pub fn has_native_multidex(self) -> bool {
        self >= Self::NATIVE_MULTIDEX
    }

    #[must_use]
    pub fn has_default_interface_methods(self) -> bool {
        self >= Self::DEFAULT_INTERFACE_METHODS
    }
}

impl fmt::Display for ApiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}
