// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! SMBIOS 3.7 7.33 System Boot Information (Type 32)

use crate::Error;
use crate::header::Handle;
use crate::record::{Body, build_and_register};
use crate::registry::Registry;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// SMBIOS 3.7 7.33.2 System boot status
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootStatus {
    NoError = 0,
    NoBootableMedia = 1,
    OsFailedToLoad = 2,
    FirmwareDetectedHardwareFailure = 3,
    OsDetectedHardwareFailure = 4,
    UserRequestedBoot = 5,
    SecurityViolation = 6,
    PreviouslyRequestedImage = 7,
    WatchdogExpired = 8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootInformation {
    pub status: BootStatus,
}

impl Body for BootInformation {
    const TYPE: u8 = 32;
    const LENGTH: usize = 11;

    fn write_fields(&self, bytes: &mut Vec<u8>) {
        bytes.extend_from_slice(&[0; 6]);
        bytes.push(self.status as u8);
    }
}

pub fn publish<R: Registry + ?Sized>(registry: &mut R) -> Result<Handle, Error> {
    let body = BootInformation {
        status: BootStatus::NoError,
    };
    build_and_register(registry, &body, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MemoryRegistry;

    #[test]
    fn no_error() {
        let mut registry = MemoryRegistry::new();
        let handle = publish(&mut registry).unwrap();
        assert_eq!(
            registry.get(handle).unwrap(),
            &[32, 11, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }
}
