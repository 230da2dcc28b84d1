// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! SMBIOS 3.7 7.8 Cache Information (Type 7)

use crate::Error;
use crate::header::Handle;
use crate::record::{Body, build_and_register};
use crate::registry::Registry;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use bitflags::bitflags;

/// Location of the cache relative to the processor
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Internal = 0,
    External = 1,
    Reserved = 2,
    Unknown = 3,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationalMode {
    WriteThrough = 0,
    WriteBack = 1,
    VariesWithAddress = 2,
    Unknown = 3,
}

/// Cache Configuration word
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Configuration {
    /// Cache level, from 1 to 8
    pub level: u8,
    pub socketed: bool,
    pub location: Location,
    pub enabled: bool,
    pub mode: OperationalMode,
}

impl Configuration {
    pub fn bits(&self) -> u16 {
        u16::from(self.level.saturating_sub(1) & 0x7)
            | u16::from(self.socketed) << 3
            | (self.location as u16) << 5
            | u16::from(self.enabled) << 7
            | (self.mode as u16) << 8
    }
}

bitflags! {
    /// SMBIOS 3.7 7.8.2 Cache Information: SRAM Type
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SramType: u16 {
        const OTHER = 1 << 0;
        const UNKNOWN = 1 << 1;
        const NON_BURST = 1 << 2;
        const BURST = 1 << 3;
        const PIPELINE_BURST = 1 << 4;
        const SYNCHRONOUS = 1 << 5;
        const ASYNCHRONOUS = 1 << 6;
    }
}

/// SMBIOS 3.7 7.8.3 Cache Information: Error Correction Type
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCorrection {
    Other = 0x01,
    Unknown = 0x02,
    None = 0x03,
    Parity = 0x04,
    SingleBitEcc = 0x05,
    MultiBitEcc = 0x06,
}

/// SMBIOS 3.7 7.8.4 Cache Information: System Cache Type
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheType {
    Other = 0x01,
    Unknown = 0x02,
    Instruction = 0x03,
    Data = 0x04,
    Unified = 0x05,
}

/// SMBIOS 3.7 7.8.5 Cache Information: Associativity
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
    Other = 0x01,
    Unknown = 0x02,
    DirectMapped = 0x03,
    TwoWay = 0x04,
    FourWay = 0x05,
    FullyAssociative = 0x06,
    EightWay = 0x07,
    SixteenWay = 0x08,
    TwelveWay = 0x09,
    TwentyFourWay = 0x0A,
    ThirtyTwoWay = 0x0B,
    FortyEightWay = 0x0C,
    SixtyFourWay = 0x0D,
    TwentyWay = 0x0E,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheInformation {
    pub socket_designation: u8,
    pub configuration: Configuration,
    /// Size in KiB (granularity bit 15 cleared)
    pub maximum_size: u16,
    pub installed_size: u16,
    pub supported_sram_type: SramType,
    pub current_sram_type: SramType,
    pub speed: u8,
    pub error_correction: ErrorCorrection,
    pub cache_type: CacheType,
    pub associativity: Associativity,
    pub maximum_size2: u32,
    pub installed_size2: u32,
}

impl CacheInformation {
    fn new(
        configuration: Configuration,
        size_kib: u16,
        error_correction: ErrorCorrection,
        cache_type: CacheType,
        associativity: Associativity,
    ) -> Self {
        Self {
            socket_designation: 1,
            configuration,
            maximum_size: size_kib,
            installed_size: size_kib,
            supported_sram_type: SramType::BURST | SramType::SYNCHRONOUS,
            current_sram_type: SramType::BURST | SramType::SYNCHRONOUS,
            speed: 0,
            error_correction,
            cache_type,
            associativity,
            maximum_size2: u32::from(size_kib),
            installed_size2: u32::from(size_kib),
        }
    }
}

impl Body for CacheInformation {
    const TYPE: u8 = 7;
    const LENGTH: usize = 27;

    fn write_fields(&self, bytes: &mut Vec<u8>) {
        bytes.push(self.socket_designation);
        bytes.extend_from_slice(&self.configuration.bits().to_le_bytes());
        bytes.extend_from_slice(&self.maximum_size.to_le_bytes());
        bytes.extend_from_slice(&self.installed_size.to_le_bytes());
        bytes.extend_from_slice(&self.supported_sram_type.bits().to_le_bytes());
        bytes.extend_from_slice(&self.current_sram_type.bits().to_le_bytes());
        bytes.push(self.speed);
        bytes.push(self.error_correction as u8);
        bytes.push(self.cache_type as u8);
        bytes.push(self.associativity as u8);
        bytes.extend_from_slice(&self.maximum_size2.to_le_bytes());
        bytes.extend_from_slice(&self.installed_size2.to_le_bytes());
    }
}

/// One of the caches of the processor, with its designation string
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cache {
    pub designation: &'static str,
    pub information: CacheInformation,
}

impl Cache {
    /// 32 KiB level 1 instruction cache
    pub fn l1_instruction() -> Self {
        Self {
            designation: "L1 Instruction",
            information: CacheInformation::new(
                Configuration {
                    level: 1,
                    socketed: false,
                    location: Location::Internal,
                    enabled: true,
                    mode: OperationalMode::Unknown,
                },
                32,
                ErrorCorrection::Parity,
                CacheType::Instruction,
                Associativity::TwoWay,
            ),
        }
    }

    /// 32 KiB level 1 data cache
    pub fn l1_data() -> Self {
        Self {
            designation: "L1 Data",
            information: CacheInformation::new(
                Configuration {
                    level: 1,
                    socketed: false,
                    location: Location::Internal,
                    enabled: true,
                    mode: OperationalMode::WriteBack,
                },
                32,
                ErrorCorrection::SingleBitEcc,
                CacheType::Data,
                Associativity::FourWay,
            ),
        }
    }

    /// 512 KiB unified level 2 cache
    pub fn l2() -> Self {
        Self {
            designation: "L2",
            information: CacheInformation::new(
                Configuration {
                    level: 2,
                    socketed: false,
                    location: Location::Internal,
                    enabled: true,
                    mode: OperationalMode::WriteBack,
                },
                512,
                ErrorCorrection::SingleBitEcc,
                CacheType::Unified,
                Associativity::SixteenWay,
            ),
        }
    }
}

pub fn publish<R: Registry + ?Sized>(registry: &mut R, cache: &Cache) -> Result<Handle, Error> {
    build_and_register(registry, &cache.information, &[cache.designation])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration() {
        assert_eq!(Cache::l1_instruction().information.configuration.bits(), 0x380);
        assert_eq!(Cache::l1_data().information.configuration.bits(), 0x180);
        assert_eq!(Cache::l2().information.configuration.bits(), 0x181);
    }

    #[test]
    fn layout() {
        let bytes = Cache::l2().information.to_bytes();
        assert_eq!(bytes.len(), 27);
        assert_eq!(&bytes[4..7], &[1, 0x81, 0x01]);
        assert_eq!(&bytes[7..11], &[0x00, 0x02, 0x00, 0x02]);
        assert_eq!(&bytes[11..15], &[0x28, 0, 0x28, 0]);
        assert_eq!(&bytes[15..19], &[0, 0x05, 0x05, 0x08]);
        assert_eq!(&bytes[19..23], &512u32.to_le_bytes());

        let bytes = Cache::l1_instruction().information.to_bytes();
        assert_eq!(&bytes[15..19], &[0, 0x04, 0x03, 0x04]);
    }
}
