// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! SMBIOS 3.7 7.5 Processor Information (Type 4)

use crate::Error;
use crate::config::Config;
use crate::header::Handle;
use crate::platform::Platform;
use crate::record::{Body, build_and_register};
use crate::registry::Registry;
use crate::topic::{NOT_SPECIFIED, text_or};
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use bitflags::bitflags;

pub const SOCKET_DESIGNATION: &str = "Socket";
pub const DEFAULT_CPU_NAME: &str = "Unknown ARM CPU";

/// SMBIOS 3.7 7.5.1 Processor Information: Processor Type
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessorType {
    Other = 0x01,
    Unknown = 0x02,
    CentralProcessor = 0x03,
    MathProcessor = 0x04,
    DspProcessor = 0x05,
    VideoProcessor = 0x06,
}

/// Processor family stored in the one-byte field
pub const FAMILY_SEE_FAMILY2: u8 = 0xFE;
/// Processor family stored in the two-byte field
pub const FAMILY2_ARM: u16 = 0x0118;

bitflags! {
    /// SMBIOS 3.7 7.5.4 Processor Information: Voltage
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Voltage: u8 {
        const V5 = 1 << 0;
        const V3_3 = 1 << 1;
        const V2_9 = 1 << 2;
        const LEGACY = 1 << 7;
    }
}

/// Socket populated, CPU enabled
pub const STATUS_POPULATED_ENABLED: u8 = 0x41;

/// SMBIOS 3.7 7.5.5 Processor Information: Processor Upgrade
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upgrade {
    Other = 0x01,
    Unknown = 0x02,
    None = 0x06,
}

bitflags! {
    /// SMBIOS 3.7 7.5.9 Processor Characteristics
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Characteristics: u16 {
        const UNKNOWN = 1 << 1;
        const CAPABLE_64BIT = 1 << 2;
        const MULTI_CORE = 1 << 3;
        const HARDWARE_THREAD = 1 << 4;
        const EXECUTE_PROTECTION = 1 << 5;
        const ENHANCED_VIRTUALIZATION = 1 << 6;
        const POWER_PERFORMANCE_CONTROL = 1 << 7;
        const CAPABLE_128BIT = 1 << 8;
        const ARM64_SOC_ID = 1 << 9;
    }
}

/// Handles of the cache structures referenced by the processor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheHandles {
    pub l1: Handle,
    pub l2: Handle,
    pub l3: Handle,
}

impl Default for CacheHandles {
    fn default() -> Self {
        Self {
            l1: Handle::UNKNOWN,
            l2: Handle::UNKNOWN,
            l3: Handle::UNKNOWN,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessorInformation {
    pub socket_designation: u8,
    pub processor_type: ProcessorType,
    pub family: u8,
    pub manufacturer: u8,
    /// Main ID register of the processor
    pub processor_id: u64,
    pub version: u8,
    pub voltage: Voltage,
    /// External clock in MHz, 0 when unknown
    pub external_clock: u16,
    pub max_speed: u16,
    pub current_speed: u16,
    pub status: u8,
    pub upgrade: Upgrade,
    pub caches: CacheHandles,
    pub serial_number: u8,
    pub asset_tag: u8,
    pub part_number: u8,
    pub core_count: u8,
    pub enabled_core_count: u8,
    pub thread_count: u8,
    pub characteristics: Characteristics,
    pub family2: u16,
    pub core_count2: u16,
    pub enabled_core_count2: u16,
    pub thread_count2: u16,
}

impl ProcessorInformation {
    pub fn new(cpu_count: u8, caches: CacheHandles) -> Self {
        Self {
            socket_designation: 1,
            processor_type: ProcessorType::CentralProcessor,
            family: FAMILY_SEE_FAMILY2,
            manufacturer: 2,
            processor_id: 0,
            version: 3,
            voltage: Voltage::V5 | Voltage::V3_3 | Voltage::V2_9,
            external_clock: 0,
            max_speed: 0,
            current_speed: 0,
            status: STATUS_POPULATED_ENABLED,
            upgrade: Upgrade::None,
            caches,
            serial_number: 0,
            asset_tag: 0,
            part_number: 0,
            core_count: cpu_count,
            enabled_core_count: cpu_count,
            thread_count: cpu_count,
            characteristics: Characteristics::CAPABLE_64BIT
                | Characteristics::MULTI_CORE
                | Characteristics::EXECUTE_PROTECTION
                | Characteristics::ENHANCED_VIRTUALIZATION,
            family2: FAMILY2_ARM,
            core_count2: u16::from(cpu_count),
            enabled_core_count2: u16::from(cpu_count),
            thread_count2: u16::from(cpu_count),
        }
    }
}

impl Body for ProcessorInformation {
    const TYPE: u8 = 4;
    const LENGTH: usize = 48;

    fn write_fields(&self, bytes: &mut Vec<u8>) {
        bytes.push(self.socket_designation);
        bytes.push(self.processor_type as u8);
        bytes.push(self.family);
        bytes.push(self.manufacturer);
        bytes.extend_from_slice(&self.processor_id.to_le_bytes());
        bytes.push(self.version);
        bytes.push(self.voltage.bits());
        bytes.extend_from_slice(&self.external_clock.to_le_bytes());
        bytes.extend_from_slice(&self.max_speed.to_le_bytes());
        bytes.extend_from_slice(&self.current_speed.to_le_bytes());
        bytes.push(self.status);
        bytes.push(self.upgrade as u8);
        bytes.extend_from_slice(&self.caches.l1.to_bytes());
        bytes.extend_from_slice(&self.caches.l2.to_bytes());
        bytes.extend_from_slice(&self.caches.l3.to_bytes());
        bytes.push(self.serial_number);
        bytes.push(self.asset_tag);
        bytes.push(self.part_number);
        bytes.push(self.core_count);
        bytes.push(self.enabled_core_count);
        bytes.push(self.thread_count);
        bytes.extend_from_slice(&self.characteristics.bits().to_le_bytes());
        bytes.extend_from_slice(&self.family2.to_le_bytes());
        bytes.extend_from_slice(&self.core_count2.to_le_bytes());
        bytes.extend_from_slice(&self.enabled_core_count2.to_le_bytes());
        bytes.extend_from_slice(&self.thread_count2.to_le_bytes());
    }
}

/// Returns the core clock speed in MHz, 0 when no clock source answers.
pub fn clock_mhz<P: Platform + ?Sized>(platform: &P) -> u16 {
    let rate = platform
        .clock_rate()
        .inspect(|rate| log::debug!("Core clock rate reported by firmware: {rate} Hz"))
        .or_else(|| platform.fallback_clock_rate());

    match rate {
        Some(rate) => u16::try_from(rate / 1_000_000).unwrap_or(u16::MAX),
        None => {
            log::warn!("Core clock rate not available");
            0
        }
    }
}

/// Publishes the processor structure, referencing the caches published before it.
pub fn publish<R, P>(
    registry: &mut R,
    platform: &P,
    config: &Config,
    caches: CacheHandles,
) -> Result<Handle, Error>
where
    R: Registry + ?Sized,
    P: Platform + ?Sized,
{
    let mut body = ProcessorInformation::new(config.cpu_count, caches);
    let speed = clock_mhz(platform);
    body.max_speed = speed;
    body.current_speed = speed;
    body.processor_id = platform.processor_id().unwrap_or(0);

    let manufacturer = text_or(
        Some(config.processor_manufacturer.clone()),
        NOT_SPECIFIED,
        "processor manufacturer",
    );
    let name = text_or(platform.cpu_name(), DEFAULT_CPU_NAME, "CPU name");

    build_and_register(
        registry,
        &body,
        &[SOCKET_DESIGNATION, manufacturer.as_str(), name.as_str()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordView;
    use crate::registry::MemoryRegistry;
    #[cfg(not(feature = "std"))]
    use alloc::string::String;

    struct Cpu {
        rate: Option<u64>,
        fallback: Option<u64>,
    }

    impl Platform for Cpu {
        fn clock_rate(&self) -> Option<u64> {
            self.rate
        }

        fn fallback_clock_rate(&self) -> Option<u64> {
            self.fallback
        }

        fn processor_id(&self) -> Option<u64> {
            Some(0x412F_D050)
        }

        fn cpu_name(&self) -> Option<String> {
            Some("Rockchip RK3566".into())
        }
    }

    #[test]
    fn clock() {
        let cpu = Cpu {
            rate: Some(1_800_000_000),
            fallback: Some(1_416_000_000),
        };
        assert_eq!(clock_mhz(&cpu), 1800);

        let cpu = Cpu {
            rate: None,
            fallback: Some(1_416_000_000),
        };
        assert_eq!(clock_mhz(&cpu), 1416);

        let cpu = Cpu {
            rate: None,
            fallback: None,
        };
        assert_eq!(clock_mhz(&cpu), 0);

        let cpu = Cpu {
            rate: Some(u64::MAX),
            fallback: None,
        };
        assert_eq!(clock_mhz(&cpu), u16::MAX);
    }

    #[test]
    fn layout() {
        let caches = CacheHandles {
            l1: Handle(5),
            l2: Handle(6),
            ..CacheHandles::default()
        };
        let bytes = ProcessorInformation::new(4, caches).to_bytes();
        assert_eq!(bytes.len(), 48);
        assert_eq!(&bytes[4..8], &[1, 0x03, 0xFE, 2]);
        assert_eq!(&bytes[16..18], &[3, 0x07]);
        assert_eq!(&bytes[24..26], &[0x41, 0x06]);
        assert_eq!(&bytes[26..32], &[5, 0, 6, 0, 0xFF, 0xFF]);
        assert_eq!(&bytes[35..38], &[4, 4, 4]);
        assert_eq!(&bytes[38..40], &[0x6C, 0]);
        assert_eq!(&bytes[40..42], &[0x18, 0x01]);
        assert_eq!(&bytes[42..48], &[4, 0, 4, 0, 4, 0]);
    }

    #[test]
    fn record() {
        let mut registry = MemoryRegistry::new();
        let cpu = Cpu {
            rate: Some(1_800_000_000),
            fallback: None,
        };
        let handle = publish(&mut registry, &cpu, &Config::default(), CacheHandles::default()).unwrap();

        let view = RecordView::from_slice(registry.get(handle).unwrap()).unwrap();
        assert_eq!(view.qword(8), Some(0x412F_D050));
        assert_eq!(view.word(20), Some(1800));
        assert_eq!(view.word(22), Some(1800));
        assert_eq!(view.string(1), Some(&b"Socket"[..]));
        assert_eq!(view.string(2), Some(&b"Rockchip"[..]));
        assert_eq!(view.string(3), Some(&b"Rockchip RK3566"[..]));
    }
}
