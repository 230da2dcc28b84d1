// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Builders of the individual SMBIOS structures.
//!
//! Each module owns the layout of one structure type and a `publish` function gathering the
//! platform information, applying the defaults and handing the structure to the registry.

pub mod boot;
pub mod board;
pub mod cache;
pub mod chassis;
pub mod firmware;
pub mod memory;
pub mod oem;
pub mod processor;
pub mod slot;
pub mod system;

use crate::record::Body;
#[cfg(not(feature = "std"))]
use alloc::fmt;
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::fmt;

/// Value of the strings the platform did not provide
pub const NOT_SPECIFIED: &str = "Not Specified";

/// Structures installed on the platform, in installation order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    Firmware,
    System,
    Chassis,
    Board,
    L1InstructionCache,
    L1DataCache,
    L2Cache,
    Processor,
    Slot,
    OemStrings,
    MemoryArray,
    MemoryDevice,
    MappedAddress,
    BootStatus,
}

impl Topic {
    pub const ALL: [Topic; 14] = [
        Topic::Firmware,
        Topic::System,
        Topic::Chassis,
        Topic::Board,
        Topic::L1InstructionCache,
        Topic::L1DataCache,
        Topic::L2Cache,
        Topic::Processor,
        Topic::Slot,
        Topic::OemStrings,
        Topic::MemoryArray,
        Topic::MemoryDevice,
        Topic::MappedAddress,
        Topic::BootStatus,
    ];

    /// Returns the SMBIOS structure type used by the topic.
    pub fn record_type(self) -> u8 {
        match self {
            Topic::Firmware => firmware::FirmwareInformation::TYPE,
            Topic::System => system::SystemInformation::TYPE,
            Topic::Chassis => chassis::ChassisInformation::TYPE,
            Topic::Board => board::BoardInformation::TYPE,
            Topic::L1InstructionCache | Topic::L1DataCache | Topic::L2Cache => {
                cache::CacheInformation::TYPE
            }
            Topic::Processor => processor::ProcessorInformation::TYPE,
            Topic::Slot => slot::SlotInformation::TYPE,
            Topic::OemStrings => oem::OemStrings::TYPE,
            Topic::MemoryArray => memory::MemoryArray::TYPE,
            Topic::MemoryDevice => memory::MemoryDevice::TYPE,
            Topic::MappedAddress => memory::MappedAddress::TYPE,
            Topic::BootStatus => boot::BootInformation::TYPE,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Topic::Firmware => "firmware information",
            Topic::System => "system information",
            Topic::Chassis => "chassis information",
            Topic::Board => "baseboard information",
            Topic::L1InstructionCache => "L1 instruction cache",
            Topic::L1DataCache => "L1 data cache",
            Topic::L2Cache => "L2 cache",
            Topic::Processor => "processor information",
            Topic::Slot => "system slot",
            Topic::OemStrings => "OEM strings",
            Topic::MemoryArray => "physical memory array",
            Topic::MemoryDevice => "memory device",
            Topic::MappedAddress => "memory array mapped address",
            Topic::BootStatus => "system boot information",
        };
        write!(f, "{name}")
    }
}

/// Returns the string provided by the platform, or `default` when none is available.
///
/// The string is cut at its first NUL byte, if any.
pub(crate) fn text_or(value: Option<String>, default: &str, what: &str) -> String {
    let value = value.map(|mut value| {
        if let Some(end) = value.find('\0') {
            value.truncate(end);
        }
        value
    });

    match value {
        Some(value) if !value.is_empty() => value,
        _ => {
            log::warn!("No {what} available, using \"{default}\"");
            String::from(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_fallback() {
        assert_eq!(text_or(Some("RK3566".into()), "x", "name"), "RK3566");
        assert_eq!(text_or(None, NOT_SPECIFIED, "name"), NOT_SPECIFIED);
        assert_eq!(text_or(Some(String::new()), "x", "name"), "x");
        assert_eq!(text_or(Some("ab\0cd".into()), "x", "name"), "ab");
        assert_eq!(text_or(Some("\0cd".into()), "x", "name"), "x");
    }

    #[test]
    fn record_types() {
        let types: Vec<u8> = Topic::ALL.iter().map(|topic| topic.record_type()).collect();
        assert_eq!(types, [0, 1, 3, 2, 7, 7, 7, 4, 9, 11, 16, 17, 19, 32]);
    }
}
