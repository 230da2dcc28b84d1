// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Extraction of a `MAJOR.MINOR` release number from free-form firmware version strings.

#[cfg(not(feature = "std"))]
use alloc::fmt;
#[cfg(feature = "std")]
use std::fmt;

/// Release number reported in the firmware and embedded controller fields
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Revision {
    pub major: u8,
    pub minor: u8,
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl Revision {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Looks for the first `MAJOR.MINOR` number in a version string. See [`scan_version`].
    pub fn scan(s: &str) -> Option<Self> {
        scan_version(s).map(|(major, minor)| Self::new(major, minor))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Searching,
    Major,
    Boundary,
    Minor,
    Complete,
}

/// Finds the first `<digits>.<digits>` pattern in `s` and returns its two components.
///
/// The scan is a heuristic, not a parser: any text may surround the number, and a digit run
/// whose value exceeds 255 is skipped entirely before the search resumes. This keeps build or
/// part numbers from being picked up as the major component, e.g. `"Firmware X83737.1 v1.23"`
/// yields `(1, 23)`. A dot must be followed by a digit to be accepted, so `"9."` yields `None`.
pub fn scan_version(s: &str) -> Option<(u8, u8)> {
    let bytes = s.as_bytes();
    let is_digit = |index: usize| bytes.get(index).is_some_and(u8::is_ascii_digit);

    let mut state = ScanState::Searching;
    let mut value = [0u32; 2];
    let mut index = 0;

    while index < bytes.len() && state != ScanState::Complete {
        let c = bytes[index];

        if state == ScanState::Searching {
            if !c.is_ascii_digit() {
                index += 1;
                continue;
            }
            value = [0, 0];
            state = ScanState::Major;
        }

        if matches!(state, ScanState::Major | ScanState::Minor) {
            let slot = usize::from(state == ScanState::Minor);
            if c.is_ascii_digit() {
                value[slot] = value[slot] * 10 + u32::from(c - b'0');
                if value[slot] > u32::from(u8::MAX) {
                    while is_digit(index + 1) {
                        index += 1;
                    }
                    state = ScanState::Searching;
                }
            } else if state == ScanState::Major {
                state = ScanState::Boundary;
            } else {
                state = ScanState::Complete;
            }

            if state != ScanState::Boundary {
                index += 1;
                continue;
            }
        }

        // Boundary: the character that ended the major run
        state = if c == b'.' && is_digit(index + 1) {
            ScanState::Minor
        } else {
            ScanState::Searching
        };
        index += 1;
    }

    match state {
        ScanState::Minor | ScanState::Complete => Some((value[0] as u8, value[1] as u8)),
        _ => None,
    }
}
