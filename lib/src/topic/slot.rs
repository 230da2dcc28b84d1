// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! SMBIOS 3.7 7.10 System Slots (Type 9)

use crate::Error;
use crate::header::Handle;
use crate::record::{Body, build_and_register};
use crate::registry::Registry;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use bitflags::bitflags;

pub const SD_CARD: &str = "SD Card";

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotType {
    Other = 0x01,
    Unknown = 0x02,
    Pci = 0x06,
    PciExpress = 0xA5,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataBusWidth {
    Other = 0x01,
    Unknown = 0x02,
    X1 = 0x08,
    X4 = 0x0A,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurrentUsage {
    Other = 0x01,
    Unknown = 0x02,
    Available = 0x03,
    InUse = 0x04,
    Unavailable = 0x05,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotLength {
    Other = 0x01,
    Unknown = 0x02,
    Short = 0x03,
    Long = 0x04,
}

bitflags! {
    /// SMBIOS 3.7 7.10.6 Slot Characteristics 1
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Characteristics1: u8 {
        const UNKNOWN = 1 << 0;
        const PROVIDES_5V = 1 << 1;
        const PROVIDES_3_3V = 1 << 2;
        const SHARED = 1 << 3;
        const PC_CARD_16 = 1 << 4;
        const CARDBUS = 1 << 5;
        const ZOOM_VIDEO = 1 << 6;
        const MODEM_RING_RESUME = 1 << 7;
    }
}

bitflags! {
    /// SMBIOS 3.7 7.10.7 Slot Characteristics 2
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Characteristics2: u8 {
        const PME = 1 << 0;
        const HOT_PLUG = 1 << 1;
        const SMBUS = 1 << 2;
        const BIFURCATION = 1 << 3;
        const ASYNC_SURPRISE_REMOVAL = 1 << 4;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotInformation {
    pub designation: u8,
    pub slot_type: SlotType,
    pub data_bus_width: DataBusWidth,
    pub current_usage: CurrentUsage,
    pub slot_length: SlotLength,
    pub slot_id: u16,
    pub characteristics1: Characteristics1,
    pub characteristics2: Characteristics2,
    pub segment_group: u16,
    pub bus: u8,
    pub device_function: u8,
}

impl Default for SlotInformation {
    fn default() -> Self {
        Self {
            designation: 1,
            slot_type: SlotType::Other,
            data_bus_width: DataBusWidth::Other,
            current_usage: CurrentUsage::Available,
            slot_length: SlotLength::Other,
            slot_id: 0,
            characteristics1: Characteristics1::UNKNOWN,
            characteristics2: Characteristics2::empty(),
            // Not a PCI slot
            segment_group: 0xFFFF,
            bus: 0xFF,
            device_function: 0xFF,
        }
    }
}

impl Body for SlotInformation {
    const TYPE: u8 = 9;
    const LENGTH: usize = 17;

    fn write_fields(&self, bytes: &mut Vec<u8>) {
        bytes.push(self.designation);
        bytes.push(self.slot_type as u8);
        bytes.push(self.data_bus_width as u8);
        bytes.push(self.current_usage as u8);
        bytes.push(self.slot_length as u8);
        bytes.extend_from_slice(&self.slot_id.to_le_bytes());
        bytes.push(self.characteristics1.bits());
        bytes.push(self.characteristics2.bits());
        bytes.extend_from_slice(&self.segment_group.to_le_bytes());
        bytes.push(self.bus);
        bytes.push(self.device_function);
    }
}

/// Publishes the SD card slot.
pub fn publish<R: Registry + ?Sized>(registry: &mut R) -> Result<Handle, Error> {
    build_and_register(registry, &SlotInformation::default(), &[SD_CARD])
}
