// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Memory structures:
//!
//! - SMBIOS 3.7 7.17 Physical Memory Array (Type 16)
//! - SMBIOS 3.7 7.18 Memory Device (Type 17)
//! - SMBIOS 3.7 7.20 Memory Array Mapped Address (Type 19)
//!
//! The memory device and the mapped address reference the array through its handle.

use crate::Error;
use crate::header::Handle;
use crate::platform::Platform;
use crate::record::{Body, build_and_register};
use crate::registry::Registry;
use crate::topic::{NOT_SPECIFIED, text_or};
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use bitflags::bitflags;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

pub const DEVICE_LOCATOR: &str = "SDRAM";

/// DRAM layout, queried once and shared by the three memory structures
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryLayout {
    /// Physical address of the first byte of DRAM
    pub base: u64,
    /// Size of the DRAM in bytes, `None` when unknown
    pub size: Option<u64>,
}

impl MemoryLayout {
    pub fn query<P: Platform + ?Sized>(platform: &P) -> Self {
        let size = platform.memory_size();
        match size {
            Some(size) => log::info!("DRAM size: {} MiB", size / MIB),
            None => log::warn!("DRAM size not available"),
        }

        Self {
            base: platform.memory_base().unwrap_or(0),
            size,
        }
    }

    /// Size in whole MiB. Every size field is derived from this value.
    pub fn size_mib(&self) -> Option<u64> {
        self.size.map(|size| size / MIB)
    }
}

/// SMBIOS 3.7 7.17.1 Memory Array: Location
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayLocation {
    Other = 0x01,
    Unknown = 0x02,
    SystemBoard = 0x03,
}

/// SMBIOS 3.7 7.17.2 Memory Array: Use
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayUse {
    Other = 0x01,
    Unknown = 0x02,
    SystemMemory = 0x03,
    VideoMemory = 0x04,
    FlashMemory = 0x05,
    NonVolatileRam = 0x06,
    CacheMemory = 0x07,
}

/// SMBIOS 3.7 7.17.3 Memory Array: Error Correction Types
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayErrorCorrection {
    Other = 0x01,
    Unknown = 0x02,
    None = 0x03,
    Parity = 0x04,
    SingleBitEcc = 0x05,
    MultiBitEcc = 0x06,
    Crc = 0x07,
}

/// Largest capacity that fits in the 32-bit capacity field, in KiB
const MAX_CAPACITY_KIB: u64 = 0x8000_0000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryArray {
    pub location: ArrayLocation,
    pub array_use: ArrayUse,
    pub error_correction: ArrayErrorCorrection,
    /// Capacity in KiB. `0x8000_0000` means see `extended_maximum_capacity`.
    pub maximum_capacity: u32,
    pub error_information: Handle,
    pub device_count: u16,
    /// Capacity in bytes
    pub extended_maximum_capacity: u64,
}

impl MemoryArray {
    pub fn new(layout: &MemoryLayout) -> Self {
        let mut array = Self {
            location: ArrayLocation::SystemBoard,
            array_use: ArrayUse::SystemMemory,
            error_correction: ArrayErrorCorrection::Unknown,
            maximum_capacity: 0,
            error_information: Handle::RESERVED,
            device_count: 1,
            extended_maximum_capacity: 0,
        };

        if let Some(mib) = layout.size_mib() {
            let kib = mib * 1024;
            if kib < MAX_CAPACITY_KIB {
                array.maximum_capacity = kib as u32;
            } else {
                array.maximum_capacity = MAX_CAPACITY_KIB as u32;
                array.extended_maximum_capacity = mib * MIB;
            }
        }
        array
    }
}

impl Body for MemoryArray {
    const TYPE: u8 = 16;
    const LENGTH: usize = 23;

    fn write_fields(&self, bytes: &mut Vec<u8>) {
        bytes.push(self.location as u8);
        bytes.push(self.array_use as u8);
        bytes.push(self.error_correction as u8);
        bytes.extend_from_slice(&self.maximum_capacity.to_le_bytes());
        bytes.extend_from_slice(&self.error_information.to_bytes());
        bytes.extend_from_slice(&self.device_count.to_le_bytes());
        bytes.extend_from_slice(&self.extended_maximum_capacity.to_le_bytes());
    }
}

/// SMBIOS 3.7 7.18.1 Memory Device: Form Factor
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormFactor {
    Other = 0x01,
    Unknown = 0x02,
    Simm = 0x03,
    Sip = 0x04,
    Chip = 0x05,
    Dip = 0x06,
    Dimm = 0x09,
    SoDimm = 0x0D,
}

/// SMBIOS 3.7 7.18.2 Memory Device: Type
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryType {
    Other = 0x01,
    Unknown = 0x02,
    Ddr3 = 0x18,
    Ddr4 = 0x1A,
    Lpddr = 0x1B,
    Lpddr2 = 0x1C,
    Lpddr3 = 0x1D,
    Lpddr4 = 0x1E,
    Ddr5 = 0x22,
    Lpddr5 = 0x23,
}

bitflags! {
    /// SMBIOS 3.7 7.18.3 Memory Device: Type Detail
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct TypeDetail: u16 {
        const OTHER = 1 << 1;
        const UNKNOWN = 1 << 2;
        const FAST_PAGED = 1 << 3;
        const STATIC_COLUMN = 1 << 4;
        const PSEUDO_STATIC = 1 << 5;
        const RAMBUS = 1 << 6;
        const SYNCHRONOUS = 1 << 7;
        const CMOS = 1 << 8;
        const EDO = 1 << 9;
        const WINDOW_DRAM = 1 << 10;
        const CACHE_DRAM = 1 << 11;
        const NON_VOLATILE = 1 << 12;
        const REGISTERED = 1 << 13;
        const UNBUFFERED = 1 << 14;
        const LRDIMM = 1 << 15;
    }
}

/// SMBIOS 3.7 7.18.6 Memory Device: Memory Technology
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryTechnology {
    Other = 0x01,
    Unknown = 0x02,
    Dram = 0x03,
    NvdimmN = 0x04,
    NvdimmF = 0x05,
    NvdimmP = 0x06,
}

bitflags! {
    /// SMBIOS 3.7 7.18.7 Memory Device: Memory Operating Mode Capability
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct OperatingModes: u16 {
        const OTHER = 1 << 1;
        const UNKNOWN = 1 << 2;
        const VOLATILE = 1 << 3;
        const BYTE_ACCESSIBLE_PERSISTENT = 1 << 4;
        const BLOCK_ACCESSIBLE_PERSISTENT = 1 << 5;
    }
}

/// Largest size that fits in the 16-bit size field, in MiB
const MAX_DEVICE_SIZE_MIB: u64 = 0x7FFF;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryDevice {
    pub array: Handle,
    pub error_information: Handle,
    pub total_width: u16,
    pub data_width: u16,
    /// Size in MiB. `0x7FFF` means see `extended_size`, `0xFFFF` means unknown.
    pub size: u16,
    pub form_factor: FormFactor,
    pub device_set: u8,
    pub device_locator: u8,
    pub bank_locator: u8,
    pub memory_type: MemoryType,
    pub type_detail: TypeDetail,
    pub speed: u16,
    pub manufacturer: u8,
    pub serial_number: u8,
    pub asset_tag: u8,
    pub part_number: u8,
    pub attributes: u8,
    /// Size in MiB, bits 30:0
    pub extended_size: u32,
    pub configured_speed: u16,
    pub minimum_voltage: u16,
    pub maximum_voltage: u16,
    pub configured_voltage: u16,
    pub technology: MemoryTechnology,
    pub operating_modes: OperatingModes,
    pub firmware_version: u8,
    pub module_manufacturer_id: u16,
    pub module_product_id: u16,
    pub subsystem_controller_manufacturer_id: u16,
    pub subsystem_controller_product_id: u16,
    pub non_volatile_size: u64,
    /// Size in bytes, all ones when unknown
    pub volatile_size: u64,
    pub cache_size: u64,
    pub logical_size: u64,
    pub extended_speed: u32,
    pub extended_configured_speed: u32,
}

impl MemoryDevice {
    pub fn new(layout: &MemoryLayout, array: Handle) -> Self {
        let mut device = Self {
            array,
            error_information: Handle::RESERVED,
            total_width: 0xFFFF,
            data_width: 0xFFFF,
            size: 0xFFFF,
            form_factor: FormFactor::Chip,
            device_set: 0,
            device_locator: 1,
            bank_locator: 0,
            memory_type: MemoryType::Lpddr4,
            type_detail: TypeDetail::UNKNOWN,
            speed: 0,
            manufacturer: 2,
            serial_number: 0,
            asset_tag: 0,
            part_number: 0,
            attributes: 0,
            extended_size: 0,
            configured_speed: 0,
            minimum_voltage: 0,
            maximum_voltage: 0,
            configured_voltage: 0,
            technology: MemoryTechnology::Dram,
            operating_modes: OperatingModes::VOLATILE,
            firmware_version: 0,
            module_manufacturer_id: 0,
            module_product_id: 0,
            subsystem_controller_manufacturer_id: 0,
            subsystem_controller_product_id: 0,
            non_volatile_size: 0,
            volatile_size: u64::MAX,
            cache_size: 0,
            logical_size: 0,
            extended_speed: 0,
            extended_configured_speed: 0,
        };

        if let Some(mib) = layout.size_mib() {
            if mib < MAX_DEVICE_SIZE_MIB {
                device.size = mib as u16;
            } else {
                device.size = MAX_DEVICE_SIZE_MIB as u16;
                device.extended_size = mib.min(0x7FFF_FFFF) as u32;
            }
            device.volatile_size = mib * MIB;
        }
        device
    }
}

impl Body for MemoryDevice {
    const TYPE: u8 = 17;
    const LENGTH: usize = 92;

    fn write_fields(&self, bytes: &mut Vec<u8>) {
        bytes.extend_from_slice(&self.array.to_bytes());
        bytes.extend_from_slice(&self.error_information.to_bytes());
        bytes.extend_from_slice(&self.total_width.to_le_bytes());
        bytes.extend_from_slice(&self.data_width.to_le_bytes());
        bytes.extend_from_slice(&self.size.to_le_bytes());
        bytes.push(self.form_factor as u8);
        bytes.push(self.device_set);
        bytes.push(self.device_locator);
        bytes.push(self.bank_locator);
        bytes.push(self.memory_type as u8);
        bytes.extend_from_slice(&self.type_detail.bits().to_le_bytes());
        bytes.extend_from_slice(&self.speed.to_le_bytes());
        bytes.push(self.manufacturer);
        bytes.push(self.serial_number);
        bytes.push(self.asset_tag);
        bytes.push(self.part_number);
        bytes.push(self.attributes);
        bytes.extend_from_slice(&self.extended_size.to_le_bytes());
        bytes.extend_from_slice(&self.configured_speed.to_le_bytes());
        bytes.extend_from_slice(&self.minimum_voltage.to_le_bytes());
        bytes.extend_from_slice(&self.maximum_voltage.to_le_bytes());
        bytes.extend_from_slice(&self.configured_voltage.to_le_bytes());
        bytes.push(self.technology as u8);
        bytes.extend_from_slice(&self.operating_modes.bits().to_le_bytes());
        bytes.push(self.firmware_version);
        bytes.extend_from_slice(&self.module_manufacturer_id.to_le_bytes());
        bytes.extend_from_slice(&self.module_product_id.to_le_bytes());
        bytes.extend_from_slice(&self.subsystem_controller_manufacturer_id.to_le_bytes());
        bytes.extend_from_slice(&self.subsystem_controller_product_id.to_le_bytes());
        bytes.extend_from_slice(&self.non_volatile_size.to_le_bytes());
        bytes.extend_from_slice(&self.volatile_size.to_le_bytes());
        bytes.extend_from_slice(&self.cache_size.to_le_bytes());
        bytes.extend_from_slice(&self.logical_size.to_le_bytes());
        bytes.extend_from_slice(&self.extended_speed.to_le_bytes());
        bytes.extend_from_slice(&self.extended_configured_speed.to_le_bytes());
    }
}

/// Value of the 32-bit address fields redirecting to the extended ones
const EXTENDED_ADDRESS: u32 = 0xFFFF_FFFF;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappedAddress {
    /// Start address in KiB
    pub starting_address: u32,
    /// Address of the last KiB
    pub ending_address: u32,
    pub array: Handle,
    pub partition_width: u8,
    /// Start address in bytes
    pub extended_starting_address: u64,
    /// Address of the last byte
    pub extended_ending_address: u64,
}

impl MappedAddress {
    /// An unknown or empty memory range maps to a single KiB at the base address.
    pub fn new(layout: &MemoryLayout, array: Handle) -> Self {
        let size_kib = layout.size.map_or(0, |size| size / KIB);
        let start_kib = layout.base / KIB;
        let end_kib = start_kib.saturating_add(size_kib.saturating_sub(1));

        match (u32::try_from(start_kib), u32::try_from(end_kib)) {
            (Ok(start), Ok(end)) if end != EXTENDED_ADDRESS => Self {
                starting_address: start,
                ending_address: end,
                array,
                partition_width: 1,
                extended_starting_address: 0,
                extended_ending_address: 0,
            },
            _ => Self {
                starting_address: EXTENDED_ADDRESS,
                ending_address: EXTENDED_ADDRESS,
                array,
                partition_width: 1,
                extended_starting_address: start_kib * KIB,
                extended_ending_address: end_kib.saturating_mul(KIB).saturating_add(KIB - 1),
            },
        }
    }
}

impl Body for MappedAddress {
    const TYPE: u8 = 19;
    const LENGTH: usize = 31;

    fn write_fields(&self, bytes: &mut Vec<u8>) {
        bytes.extend_from_slice(&self.starting_address.to_le_bytes());
        bytes.extend_from_slice(&self.ending_address.to_le_bytes());
        bytes.extend_from_slice(&self.array.to_bytes());
        bytes.push(self.partition_width);
        bytes.extend_from_slice(&self.extended_starting_address.to_le_bytes());
        bytes.extend_from_slice(&self.extended_ending_address.to_le_bytes());
    }
}

pub fn publish_array<R: Registry + ?Sized>(
    registry: &mut R,
    layout: &MemoryLayout,
) -> Result<Handle, Error> {
    build_and_register(registry, &MemoryArray::new(layout), &[])
}

/// Publishes the memory device contained in `array`.
pub fn publish_device<R, P>(
    registry: &mut R,
    platform: &P,
    layout: &MemoryLayout,
    array: Handle,
) -> Result<Handle, Error>
where
    R: Registry + ?Sized,
    P: Platform + ?Sized,
{
    let vendor = text_or(platform.memory_vendor(), NOT_SPECIFIED, "memory vendor");
    build_and_register(
        registry,
        &MemoryDevice::new(layout, array),
        &[DEVICE_LOCATOR, vendor.as_str()],
    )
}

/// Publishes the address range covered by `array`.
pub fn publish_mapped_address<R: Registry + ?Sized>(
    registry: &mut R,
    layout: &MemoryLayout,
    array: Handle,
) -> Result<Handle, Error> {
    build_and_register(registry, &MappedAddress::new(layout, array), &[])
}
