// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! SMBIOS 3.7 7.1 Firmware Information (Type 0)

use crate::Error;
use crate::config::Config;
use crate::header::Handle;
use crate::platform::Platform;
use crate::record::{Body, build_and_register};
use crate::registry::Registry;
use crate::topic::text_or;
use crate::version::Revision;
#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec::Vec};
use bitflags::bitflags;

pub const DEFAULT_VENDOR: &str = "EDK2";
pub const DEFAULT_VERSION: &str = "EDK2-DEV";
/// Release date used when the build date is not known
pub const UNKNOWN_DATE: &str = "00/00/0000";

bitflags! {
    /// SMBIOS 3.7 7.1.1 Firmware Characteristics
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Characteristics: u64 {
        const UNKNOWN = 1 << 2;
        const NOT_SUPPORTED = 1 << 3;
        const ISA = 1 << 4;
        const MCA = 1 << 5;
        const EISA = 1 << 6;
        const PCI = 1 << 7;
        const PCMCIA = 1 << 8;
        const PLUG_AND_PLAY = 1 << 9;
        const APM = 1 << 10;
        const UPGRADEABLE = 1 << 11;
        const SHADOWING = 1 << 12;
        const VL_VESA = 1 << 13;
        const ESCD = 1 << 14;
        const BOOT_FROM_CD = 1 << 15;
        const SELECTABLE_BOOT = 1 << 16;
        const SOCKETED_ROM = 1 << 17;
        const BOOT_FROM_PCMCIA = 1 << 18;
        const EDD = 1 << 19;
        const NEC_FLOPPY = 1 << 20;
        const TOSHIBA_FLOPPY = 1 << 21;
        const FLOPPY_525_360K = 1 << 22;
        const FLOPPY_525_1_2M = 1 << 23;
        const FLOPPY_35_720K = 1 << 24;
        const FLOPPY_35_2_88M = 1 << 25;
        const PRINT_SCREEN = 1 << 26;
        const KEYBOARD_8042 = 1 << 27;
        const SERIAL = 1 << 28;
        const PRINTER = 1 << 29;
        const CGA_MONO_VIDEO = 1 << 30;
        const NEC_PC98 = 1 << 31;
    }
}

bitflags! {
    /// SMBIOS 3.7 7.1.2 Firmware Characteristics Extension Bytes, both bytes in
    /// little-endian order
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ExtCharacteristics: u16 {
        const ACPI = 1 << 0;
        const USB_LEGACY = 1 << 1;
        const AGP = 1 << 2;
        const I2O_BOOT = 1 << 3;
        const LS120_BOOT = 1 << 4;
        const ATAPI_ZIP_BOOT = 1 << 5;
        const BOOT_1394 = 1 << 6;
        const SMART_BATTERY = 1 << 7;
        const BOOT_SPEC = 1 << 8;
        const NETWORK_BOOT_KEY = 1 << 9;
        const TARGETED_CONTENT = 1 << 10;
        const UEFI = 1 << 11;
        const VIRTUAL_MACHINE = 1 << 12;
        const MANUFACTURING_MODE = 1 << 13;
        const MANUFACTURING_MODE_ENABLED = 1 << 14;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirmwareInformation {
    pub vendor: u8,
    pub version: u8,
    /// Segment of the firmware start address, in 64 KiB units
    pub starting_segment: u16,
    pub release_date: u8,
    /// Firmware size in 64 KiB units. `0xFF` means see `extended_rom_size`.
    pub rom_size: u8,
    pub characteristics: Characteristics,
    pub ext_characteristics: ExtCharacteristics,
    pub release: Revision,
    pub ec_release: Revision,
    /// Firmware size in MiB (bits 15:14 = 00b)
    pub extended_rom_size: u16,
}

impl FirmwareInformation {
    pub fn new(config: &Config) -> Self {
        let segment = config.firmware_base / 0x10000;
        let rom_size = config.firmware_size / 0x10000;
        Self {
            vendor: 1,
            version: 2,
            starting_segment: u16::try_from(segment).unwrap_or(u16::MAX),
            release_date: 3,
            rom_size: u8::try_from(rom_size).unwrap_or(u8::MAX),
            characteristics: Characteristics::UPGRADEABLE | Characteristics::SELECTABLE_BOOT,
            ext_characteristics: ExtCharacteristics::ACPI
                | ExtCharacteristics::TARGETED_CONTENT
                | ExtCharacteristics::UEFI,
            release: Revision::default(),
            ec_release: Revision::default(),
            extended_rom_size: (config.firmware_size / 0x100000).min(0x3FFF) as u16,
        }
    }
}

impl Body for FirmwareInformation {
    const TYPE: u8 = 0;
    const LENGTH: usize = 26;

    fn write_fields(&self, bytes: &mut Vec<u8>) {
        bytes.push(self.vendor);
        bytes.push(self.version);
        bytes.extend_from_slice(&self.starting_segment.to_le_bytes());
        bytes.push(self.release_date);
        bytes.push(self.rom_size);
        bytes.extend_from_slice(&self.characteristics.bits().to_le_bytes());
        bytes.extend_from_slice(&self.ext_characteristics.bits().to_le_bytes());
        bytes.push(self.release.major);
        bytes.push(self.release.minor);
        bytes.push(self.ec_release.major);
        bytes.push(self.ec_release.minor);
        bytes.extend_from_slice(&self.extended_rom_size.to_le_bytes());
    }
}

fn release_date<P: Platform + ?Sized>(platform: &P) -> String {
    match platform.build_date() {
        Some(date) if date.is_valid() => format!("{date}"),
        Some(date) => {
            log::warn!("Invalid build date {date:?}, using {UNKNOWN_DATE}");
            String::from(UNKNOWN_DATE)
        }
        None => String::from(UNKNOWN_DATE),
    }
}

/// Publishes the firmware information. The release number is extracted from the version string.
pub fn publish<R, P>(registry: &mut R, platform: &P, config: &Config) -> Result<Handle, Error>
where
    R: Registry + ?Sized,
    P: Platform + ?Sized,
{
    let vendor = text_or(platform.firmware_vendor(), DEFAULT_VENDOR, "firmware vendor");
    let version = text_or(platform.firmware_version(), DEFAULT_VERSION, "firmware version");
    let date = release_date(platform);

    let mut body = FirmwareInformation::new(config);
    match Revision::scan(&version) {
        Some(release) => body.release = release,
        None => log::debug!("No release number in firmware version \"{version}\""),
    }

    build_and_register(
        registry,
        &body,
        &[vendor.as_str(), version.as_str(), date.as_str()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::BuildDate;
    use crate::record::RecordView;
    use crate::registry::MemoryRegistry;

    struct Firmware {
        version: &'static str,
        date: Option<BuildDate>,
    }

    impl Platform for Firmware {
        fn firmware_vendor(&self) -> Option<String> {
            Some("Pine64".into())
        }

        fn firmware_version(&self) -> Option<String> {
            Some(self.version.into())
        }

        fn build_date(&self) -> Option<BuildDate> {
            self.date
        }
    }

    #[test]
    fn layout() {
        let config = Config {
            firmware_base: 0x20_0000,
            firmware_size: 0x40_0000,
            ..Config::default()
        };
        let bytes = FirmwareInformation::new(&config).to_bytes();

        assert_eq!(bytes.len(), 26);
        assert_eq!(&bytes[..4], &[0, 26, 0, 0]);
        // Segment and ROM size in 64 KiB units
        assert_eq!(&bytes[6..8], &[0x20, 0]);
        assert_eq!(bytes[9], 0x40);
        assert_eq!(&bytes[10..18], &0x0001_0800u64.to_le_bytes());
        assert_eq!(&bytes[18..20], &[0x01, 0x0C]);
        assert_eq!(&bytes[24..26], &[4, 0]);
    }

    #[test]
    fn large_rom() {
        let config = Config {
            firmware_size: 32 << 20,
            ..Config::default()
        };
        let body = FirmwareInformation::new(&config);
        assert_eq!(body.rom_size, 0xFF);
        assert_eq!(body.extended_rom_size, 32);
    }

    #[test]
    fn high_base() {
        let config = Config {
            firmware_base: 0x1_0000_0000,
            ..Config::default()
        };
        assert_eq!(FirmwareInformation::new(&config).starting_segment, u16::MAX);

        let config = Config {
            firmware_base: 0xFFFF_0000,
            ..Config::default()
        };
        assert_eq!(FirmwareInformation::new(&config).starting_segment, 0xFFFF);

        let config = Config {
            firmware_base: 0x80_0000,
            ..Config::default()
        };
        assert_eq!(FirmwareInformation::new(&config).starting_segment, 0x80);
    }

    #[test]
    fn release_number() {
        let mut registry = MemoryRegistry::new();
        let platform = Firmware {
            version: "Firmware X83737.1 v1.23",
            date: Some(BuildDate {
                year: 2024,
                month: 11,
                day: 2,
            }),
        };
        let handle = publish(&mut registry, &platform, &Config::default()).unwrap();

        let view = RecordView::from_slice(registry.get(handle).unwrap()).unwrap();
        assert_eq!(&view.formatted[20..22], &[1, 23]);
        assert_eq!(view.string(1), Some(&b"Pine64"[..]));
        assert_eq!(view.string(2), Some(&b"Firmware X83737.1 v1.23"[..]));
        assert_eq!(view.string(3), Some(&b"11/02/2024"[..]));
    }

    #[test]
    fn defaults() {
        let mut registry = MemoryRegistry::new();
        let platform = Firmware {
            version: "EDK2-DEV",
            date: Some(BuildDate {
                year: 2024,
                month: 0,
                day: 2,
            }),
        };
        let handle = publish(&mut registry, &platform, &Config::default()).unwrap();

        let view = RecordView::from_slice(registry.get(handle).unwrap()).unwrap();
        assert_eq!(&view.formatted[20..22], &[0, 0]);
        assert_eq!(view.string(3), Some(UNKNOWN_DATE.as_bytes()));
    }
}
