#![allow(dead_code)]
use step_series::{DebugInvariants, Series};

/// A set of breakpoints plus ascending query keys to probe them with.
pub struct Case {
    pub points: &'static [(i64, i64)],
    pub probes: &'static [i64],
}

pub const CASE_EMPTY: Case = Case {
    points: &[],
    probes: &[],
};

pub const CASE_ONE: Case = Case {
    points: &[(1, 25)],
    probes: &[-10, -1, 0, 1, 2, 3, 24, 25, 26],
};

pub const CASE_TWO: Case = Case {
    points: &[(32, -7), (-5, 20)],
    probes: &[-6, -5, -4, 0, 31, 32, 33],
};

pub const CASE_THREE: Case = Case {
    points: &[(100, 10), (101, 0), (102, -50)],
    probes: &[99, 100, 101, 102, 130],
};

pub const CASE_MANY: Case = Case {
    points: &[(-100, 12345678), (0, 1), (1, 5), (3, 77), (5, 0), (8, 1)],
    probes: &[0, 1, 2, 3, 4, 5],
};

pub const CASE_REDUNDANT: Case = Case {
    points: &[
        (0, 0),
        (2, 10),
        (4, 10),
        (5, 9),
        (10, 8),
        (20, 8),
        (22, 8),
        (30, 0),
    ],
    probes: &[-1, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 20, 22, 30, 100],
};

pub const CASE_REDUNDANT_COMPACTED: Case = Case {
    points: &[(0, 0), (2, 10), (5, 9), (10, 8), (30, 0)],
    probes: &[],
};

pub const CASES: [&Case; 6] = [
    &CASE_EMPTY,
    &CASE_ONE,
    &CASE_TWO,
    &CASE_THREE,
    &CASE_MANY,
    &CASE_REDUNDANT,
];

pub fn series(points: &[(i64, i64)]) -> Series {
    Series::from_points(points.iter().copied())
}

pub fn stored(points: &[(i64, i64)], x: i64) -> Option<i64> {
    points.iter().find(|&&(k, _)| k == x).map(|&(_, y)| y)
}

/// Panic with the violated invariant if `s` is internally inconsistent.
pub fn assert_consistent(s: &Series) {
    if let Err(e) = s.validate_invariants() {
        panic!("inconsistent series {s:?}: {e}");
    }
}
