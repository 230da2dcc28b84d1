// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Sources of the platform information gathered at boot.

#[cfg(not(feature = "std"))]
use alloc::fmt;
#[cfg(all(feature = "serialize", not(feature = "std")))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::fmt;

#[cfg(feature = "serialize")]
use crate::{Error, config::Config};

/// Size of the fuse area holding the raw serial number
pub const OTP_SIZE: usize = 16;

/// Firmware build date
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialize",
    derive(serde::Serialize, serde::Deserialize),
    serde(deny_unknown_fields)
)]
pub struct BuildDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

const fn parse_decimal(s: &str) -> u16 {
    let bytes = s.as_bytes();
    let mut value = 0u16;
    let mut index = 0;
    while index < bytes.len() {
        value = value * 10 + (bytes[index] - b'0') as u16;
        index += 1;
    }
    value
}

impl BuildDate {
    /// Date at which this crate was compiled
    pub const COMPILED: BuildDate = BuildDate {
        year: parse_decimal(env!("PLATFORM_SMBIOS_BUILD_YEAR")),
        month: parse_decimal(env!("PLATFORM_SMBIOS_BUILD_MONTH")) as u8,
        day: parse_decimal(env!("PLATFORM_SMBIOS_BUILD_DAY")) as u8,
    };

    pub fn is_valid(&self) -> bool {
        self.year <= 9999 && (1..=12).contains(&self.month) && (1..=31).contains(&self.day)
    }
}

impl fmt::Display for BuildDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.month, self.day, self.year)
    }
}

/// Queries answered by the platform.
///
/// Every query may be left unanswered, in which case the structure falls back to a default
/// value. Queries are made once per installation.
pub trait Platform {
    fn firmware_vendor(&self) -> Option<String> {
        None
    }

    fn firmware_version(&self) -> Option<String> {
        None
    }

    fn build_date(&self) -> Option<BuildDate> {
        Some(BuildDate::COMPILED)
    }

    fn vendor_name(&self) -> Option<String> {
        None
    }

    fn platform_name(&self) -> Option<String> {
        None
    }

    fn family_name(&self) -> Option<String> {
        None
    }

    fn board_revision(&self) -> Option<u32> {
        None
    }

    fn asset_tag(&self) -> Option<String> {
        None
    }

    /// Display name of the processor
    fn cpu_name(&self) -> Option<String> {
        None
    }

    fn product_url(&self) -> Option<String> {
        None
    }

    fn memory_vendor(&self) -> Option<String> {
        None
    }

    /// Total DRAM size in bytes
    fn memory_size(&self) -> Option<u64> {
        None
    }

    /// Physical address of the first byte of DRAM
    fn memory_base(&self) -> Option<u64> {
        None
    }

    /// Core clock rate in Hz, as reported by the clock controller firmware
    fn clock_rate(&self) -> Option<u64> {
        None
    }

    /// Core clock rate in Hz, read from the clock registers when [`Platform::clock_rate`] is
    /// not available
    fn fallback_clock_rate(&self) -> Option<u64> {
        None
    }

    /// Raw content of the serial number fuses
    fn otp(&self) -> Option<[u8; OTP_SIZE]> {
        None
    }

    /// Main ID register of the boot processor
    fn processor_id(&self) -> Option<u64> {
        None
    }
}

/// Platform answers loaded from a description file
#[cfg(feature = "serialize")]
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlatformDescription {
    pub firmware_vendor: Option<String>,
    pub firmware_version: Option<String>,
    pub build_date: Option<BuildDate>,
    pub vendor_name: Option<String>,
    pub platform_name: Option<String>,
    pub family_name: Option<String>,
    pub board_revision: Option<u32>,
    pub asset_tag: Option<String>,
    pub cpu_name: Option<String>,
    pub product_url: Option<String>,
    pub memory_vendor: Option<String>,
    pub memory_size: Option<u64>,
    pub memory_base: Option<u64>,
    pub clock_rate: Option<u64>,
    pub fallback_clock_rate: Option<u64>,
    pub otp: Option<[u8; OTP_SIZE]>,
    pub processor_id: Option<u64>,
    pub config: Config,
}

#[cfg(feature = "serialize")]
impl PlatformDescription {
    /// Parses a description stored as JSON.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|err| Error::InvalidDescription(format!("{err}")))
    }
}

#[cfg(feature = "serialize")]
impl Platform for PlatformDescription {
    fn firmware_vendor(&self) -> Option<String> {
        self.firmware_vendor.clone()
    }

    fn firmware_version(&self) -> Option<String> {
        self.firmware_version.clone()
    }

    fn build_date(&self) -> Option<BuildDate> {
        self.build_date.or(Some(BuildDate::COMPILED))
    }

    fn vendor_name(&self) -> Option<String> {
        self.vendor_name.clone()
    }

    fn platform_name(&self) -> Option<String> {
        self.platform_name.clone()
    }

    fn family_name(&self) -> Option<String> {
        self.family_name.clone()
    }

    fn board_revision(&self) -> Option<u32> {
        self.board_revision
    }

    fn asset_tag(&self) -> Option<String> {
        self.asset_tag.clone()
    }

    fn cpu_name(&self) -> Option<String> {
        self.cpu_name.clone()
    }

    fn product_url(&self) -> Option<String> {
        self.product_url.clone()
    }

    fn memory_vendor(&self) -> Option<String> {
        self.memory_vendor.clone()
    }

    fn memory_size(&self) -> Option<u64> {
        self.memory_size
    }

    fn memory_base(&self) -> Option<u64> {
        self.memory_base
    }

    fn clock_rate(&self) -> Option<u64> {
        self.clock_rate
    }

    fn fallback_clock_rate(&self) -> Option<u64> {
        self.fallback_clock_rate
    }

    fn otp(&self) -> Option<[u8; OTP_SIZE]> {
        self.otp
    }

    fn processor_id(&self) -> Option<u64> {
        self.processor_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_date() {
        let date = BuildDate {
            year: 2025,
            month: 3,
            day: 7,
        };
        assert!(date.is_valid());
        assert_eq!(format!("{date}"), "03/07/2025");

        assert!(!BuildDate { month: 13, ..date }.is_valid());
        assert!(!BuildDate { day: 0, ..date }.is_valid());
        assert!(BuildDate::COMPILED.is_valid());
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn description() {
        let description = PlatformDescription::from_json(
            r#"{
                "platform_name": "Quartz64 Model A",
                "memory_size": 8589934592,
                "otp": [7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22],
                "config": { "cpu_count": 2 }
            }"#,
        )
        .unwrap();

        assert_eq!(description.platform_name().as_deref(), Some("Quartz64 Model A"));
        assert_eq!(description.memory_size(), Some(8 << 30));
        assert_eq!(description.otp().unwrap()[0], 7);
        assert_eq!(description.build_date(), Some(BuildDate::COMPILED));
        assert_eq!(description.config.cpu_count, 2);
        assert_eq!(description.config.processor_manufacturer, "Rockchip");
        assert!(description.cpu_name().is_none());
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn invalid_description() {
        let err = PlatformDescription::from_json(r#"{ "platform": "typo" }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidDescription(_)));
    }
}
