// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

#[cfg(not(feature = "std"))]
use alloc::fmt;
#[cfg(feature = "std")]
use std::fmt;

pub const HEADER_SIZE: usize = 4;

/// Identifier assigned by the registry to a structure.
///
/// Structures reference each other by storing the handle of the target structure in one of their
/// fields. The handle is a plain value: it does not keep the target alive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(pub u16);

impl Handle {
    /// Lets the registry pick the handle. Also used by fields meaning "information not provided".
    pub const RESERVED: Handle = Handle(0xFFFE);
    /// Reference to a structure that is unknown or has not been registered.
    pub const UNKNOWN: Handle = Handle(0xFFFF);

    pub fn to_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

impl From<u16> for Handle {
    fn from(value: u16) -> Self {
        Handle(value)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// SMBIOS 3.7 6.1.2 Structure header
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub record_type: u8,
    /// Length of the formatted area, header included
    pub length: u8,
    pub handle: Handle,
}

impl Header {
    pub fn new(record_type: u8, length: u8) -> Self {
        Self {
            record_type,
            length,
            handle: Handle(0),
        }
    }

    /// Parses the structure header stored in a byte slice.
    pub fn from_slice(s: &[u8]) -> Option<Self> {
        Some(Self {
            record_type: *s.first()?,
            length: *s.get(1)?,
            handle: Handle(u16::from_le_bytes(s.get(2..4)?.try_into().ok()?)),
        })
    }

    /// Serializes the structure header
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let [low, high] = self.handle.to_bytes();
        [self.record_type, self.length, low, high]
    }
}
