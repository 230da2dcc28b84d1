// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! SMBIOS 3.7 7.2 System Information (Type 1) and the board identity shared with the chassis and
//! baseboard structures.

use crate::Error;
use crate::crc::crc32_update;
use crate::header::Handle;
use crate::platform::{OTP_SIZE, Platform};
use crate::record::{Body, build_and_register};
use crate::registry::Registry;
use crate::topic::{NOT_SPECIFIED, text_or};
#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec::Vec};
use uguid::Guid;

/// Asset tag used when none is set. Referenced strings cannot be empty.
pub const DEFAULT_ASSET_TAG: &str = " ";

/// SMBIOS 3.7 7.2.2 System: Wake-up Type
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WakeupType {
    Reserved = 0,
    Other = 1,
    Unknown = 2,
    ApmTimer = 3,
    ModemRing = 4,
    LanRemote = 5,
    PowerSwitch = 6,
    PciPme = 7,
    AcPowerRestored = 8,
}

/// Derives the board serial number from the content of the serial number fuses.
///
/// The odd bytes are checksummed first, then the even bytes are checksummed starting from the
/// first checksum. The first checksum forms the low half of the serial number and the second one
/// the high half.
pub fn serial_number(otp: &[u8; OTP_SIZE]) -> u64 {
    let mut lo = [0u8; OTP_SIZE / 2];
    let mut hi = [0u8; OTP_SIZE / 2];
    for (index, pair) in otp.chunks_exact(2).enumerate() {
        hi[index] = pair[0];
        lo[index] = pair[1];
    }

    let low = crc32_update(0, &lo);
    let high = crc32_update(low, &hi);
    u64::from(low) | (u64::from(high) << 32)
}

/// Builds the system UUID: the board revision in the first field and the serial number in the
/// last 8 bytes, most significant byte first.
pub fn system_uuid(revision: u32, serial_number: u64) -> Guid {
    let mut bytes = [0u8; 16];
    bytes[..4].copy_from_slice(&revision.to_le_bytes());
    bytes[8..].copy_from_slice(&serial_number.to_be_bytes());
    Guid::from_bytes(bytes)
}

/// Identity of the board, gathered once and shared by the system, chassis and baseboard
/// structures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub manufacturer: String,
    pub product_name: String,
    pub family: String,
    pub asset_tag: String,
    pub revision: u32,
    pub serial_number: u64,
}

impl Identity {
    pub fn query<P: Platform + ?Sized>(platform: &P) -> Self {
        let otp = platform.otp().unwrap_or_else(|| {
            log::warn!("Serial number fuses not available");
            [0; OTP_SIZE]
        });
        let serial_number = serial_number(&otp);
        log::info!("Board serial number: {serial_number:016X}");

        Self {
            manufacturer: text_or(platform.vendor_name(), NOT_SPECIFIED, "vendor name"),
            product_name: text_or(platform.platform_name(), NOT_SPECIFIED, "platform name"),
            family: text_or(platform.family_name(), NOT_SPECIFIED, "family name"),
            asset_tag: text_or(platform.asset_tag(), DEFAULT_ASSET_TAG, "asset tag"),
            revision: platform.board_revision().unwrap_or(0),
            serial_number,
        }
    }

    /// Serial number as 16 uppercase hexadecimal digits
    pub fn serial(&self) -> String {
        format!("{:016X}", self.serial_number)
    }

    pub fn version(&self) -> String {
        format!("{:X}", self.revision)
    }

    pub fn sku(&self) -> String {
        format!("{:016X}", self.revision)
    }

    pub fn uuid(&self) -> Guid {
        system_uuid(self.revision, self.serial_number)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemInformation {
    pub manufacturer: u8,
    pub product_name: u8,
    pub version: u8,
    pub serial_number: u8,
    pub uuid: Guid,
    pub wakeup_type: WakeupType,
    pub sku_number: u8,
    pub family: u8,
}

impl SystemInformation {
    pub fn new(uuid: Guid) -> Self {
        Self {
            manufacturer: 1,
            product_name: 2,
            version: 3,
            serial_number: 4,
            uuid,
            wakeup_type: WakeupType::PowerSwitch,
            sku_number: 5,
            family: 6,
        }
    }
}

impl Body for SystemInformation {
    const TYPE: u8 = 1;
    const LENGTH: usize = 27;

    fn write_fields(&self, bytes: &mut Vec<u8>) {
        bytes.push(self.manufacturer);
        bytes.push(self.product_name);
        bytes.push(self.version);
        bytes.push(self.serial_number);
        bytes.extend_from_slice(&self.uuid.to_bytes());
        bytes.push(self.wakeup_type as u8);
        bytes.push(self.sku_number);
        bytes.push(self.family);
    }
}

pub fn publish<R: Registry + ?Sized>(registry: &mut R, identity: &Identity) -> Result<Handle, Error> {
    let version = identity.version();
    let serial = identity.serial();
    let sku = identity.sku();

    build_and_register(
        registry,
        &SystemInformation::new(identity.uuid()),
        &[
            identity.manufacturer.as_str(),
            identity.product_name.as_str(),
            version.as_str(),
            serial.as_str(),
            sku.as_str(),
            identity.family.as_str(),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordView;
    use crate::registry::MemoryRegistry;

    fn otp() -> [u8; OTP_SIZE] {
        core::array::from_fn(|index| index as u8 + 7)
    }

    #[test]
    fn serial() {
        assert_eq!(serial_number(&otp()), 0x8BAD_F18B_2AA6_7864);
        assert_eq!(serial_number(&[0; OTP_SIZE]), 0);
    }

    #[test]
    fn uuid() {
        let uuid = system_uuid(0, 0x8BAD_F18B_2AA6_7864);
        assert_eq!(
            uuid.to_bytes(),
            [0, 0, 0, 0, 0, 0, 0, 0, 0x8B, 0xAD, 0xF1, 0x8B, 0x2A, 0xA6, 0x78, 0x64]
        );
        assert_eq!(format!("{uuid}"), "00000000-0000-0000-8bad-f18b2aa67864");

        let uuid = system_uuid(0x12, 1);
        assert_eq!(&uuid.to_bytes()[..4], &[0x12, 0, 0, 0]);
    }

    struct Board;

    impl Platform for Board {
        fn vendor_name(&self) -> Option<String> {
            Some("Pine64".into())
        }

        fn platform_name(&self) -> Option<String> {
            Some("Quartz64 Model A".into())
        }

        fn board_revision(&self) -> Option<u32> {
            Some(0x2B)
        }

        fn otp(&self) -> Option<[u8; OTP_SIZE]> {
            Some(otp())
        }
    }

    #[test]
    fn identity() {
        let identity = Identity::query(&Board);
        assert_eq!(identity.serial(), "8BADF18B2AA67864");
        assert_eq!(identity.version(), "2B");
        assert_eq!(identity.sku(), "000000000000002B");
        assert_eq!(identity.family, NOT_SPECIFIED);
        assert_eq!(identity.asset_tag, DEFAULT_ASSET_TAG);
    }

    #[test]
    fn record() {
        let mut registry = MemoryRegistry::new();
        let identity = Identity::query(&Board);
        let handle = publish(&mut registry, &identity).unwrap();

        let view = RecordView::from_slice(registry.get(handle).unwrap()).unwrap();
        assert_eq!(view.header.length, 27);
        assert_eq!(view.formatted[24], WakeupType::PowerSwitch as u8);
        assert_eq!(&view.formatted[8..24], &identity.uuid().to_bytes());
        assert_eq!(view.string(view.formatted[7]), Some(&b"8BADF18B2AA67864"[..]));
        assert_eq!(view.string(view.formatted[25]), Some(&b"000000000000002B"[..]));
        assert_eq!(view.string(view.formatted[26]), Some(NOT_SPECIFIED.as_bytes()));
    }

    #[test]
    fn zero_serial() {
        struct Empty;
        impl Platform for Empty {}

        let identity = Identity::query(&Empty);
        assert_eq!(identity.serial(), "0000000000000000");
        assert_eq!(identity.version(), "0");
        assert_eq!(identity.uuid().to_bytes(), [0; 16]);
    }
}
