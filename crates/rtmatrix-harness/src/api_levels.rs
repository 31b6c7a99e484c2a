//! Per-VM API level selection.
//!
//! Testing every requested API level on every VM grows the matrix with the
//! product of both axes. Instead each VM is tested at the lowest requested
//! level and at the highest requested level it can run, plus any level that
//! was pinned explicitly. Levels strictly between the two boundaries are never
//! emitted unless pinned.

use std::collections::BTreeSet;

use rtmatrix_types::{ApiLevel, OrdinalRange};

/// Levels of [`ApiLevel::sorted`], followed by [`ApiLevel::Master`], that are
/// accepted by any of `filters`, ascending.
///
/// Master sorts above every released level, so only a VM whose own maximum is
/// master can reach it as its upper boundary.
#[must_use]
pub fn candidate_levels(filters: &[OrdinalRange<ApiLevel>]) -> Vec<ApiLevel> {
    ApiLevel::sorted()
        .chain(std::iter::once(ApiLevel::Master))
        .filter(|api| filters.iter().any(|filter| filter.contains(*api)))
        .collect()
}

/// Select the API levels a VM supporting up to `vm_max` is tested at.
///
/// `candidates` must be sorted ascending. `pinned` levels are added on top of
/// the two boundaries when they are candidates the VM can run.
#[must_use]
pub fn select_api_levels(
    candidates: &[ApiLevel],
    vm_max: ApiLevel,
    pinned: &[ApiLevel],
) -> Vec<ApiLevel> {
    debug_assert!(
        candidates.windows(2).all(|pair| pair[0] < pair[1]),
        "candidate levels must be strictly ascending"
    );
    let Some(&lowest) = candidates.first() else {
        return Vec::new();
    };
    if vm_max < lowest {
        return Vec::new();
    }
    if candidates.len() == 1 {
        return vec![lowest];
    }

    let highest_applicable = candidates
        .iter()
        .rev()
        .copied()
        .find(|api| *api <= vm_max)
        .unwrap_or(lowest);
    if highest_applicable == lowest {
        return vec![lowest];
    }

    let mut selected = BTreeSet::from([lowest, highest_applicable]);
    selected.extend(
        pinned
            .iter()
            .copied()
            .filter(|api| *api <= vm_max && candidates.contains(api)),
    );
    selected.into_iter().collect()
}
