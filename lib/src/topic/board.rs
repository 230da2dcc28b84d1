// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! SMBIOS 3.7 7.3 Baseboard Information (Type 2)

use crate::Error;
use crate::header::Handle;
use crate::record::{Body, build_and_register};
use crate::registry::Registry;
use crate::topic::system::Identity;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use bitflags::bitflags;

pub const LOCATION_IN_CHASSIS: &str = "Internal";

bitflags! {
    /// SMBIOS 3.7 7.3.1 Baseboard: Feature Flags
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct FeatureFlags: u8 {
        /// Hosting board, also known as motherboard
        const HOSTING = 1 << 0;
        const REQUIRES_DAUGHTER_BOARD = 1 << 1;
        const REMOVABLE = 1 << 2;
        const REPLACEABLE = 1 << 3;
        const HOT_SWAPPABLE = 1 << 4;
    }
}

/// SMBIOS 3.7 7.3.2 Baseboard: Board Type
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardType {
    Unknown = 0x01,
    Other = 0x02,
    ServerBlade = 0x03,
    ConnectivitySwitch = 0x04,
    SystemManagementModule = 0x05,
    ProcessorModule = 0x06,
    IoModule = 0x07,
    MemoryModule = 0x08,
    DaughterBoard = 0x09,
    Motherboard = 0x0A,
    ProcessorMemoryModule = 0x0B,
    ProcessorIoModule = 0x0C,
    InterconnectBoard = 0x0D,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardInformation {
    pub manufacturer: u8,
    pub product: u8,
    pub version: u8,
    pub serial_number: u8,
    pub asset_tag: u8,
    pub feature_flags: FeatureFlags,
    pub location_in_chassis: u8,
    pub chassis_handle: Handle,
    pub board_type: BoardType,
    pub contained_object_count: u8,
    pub contained_object: Handle,
}

impl BoardInformation {
    pub fn new(chassis_handle: Handle) -> Self {
        Self {
            manufacturer: 1,
            product: 2,
            version: 3,
            serial_number: 4,
            asset_tag: 5,
            feature_flags: FeatureFlags::HOSTING,
            location_in_chassis: 6,
            chassis_handle,
            board_type: BoardType::Motherboard,
            contained_object_count: 0,
            contained_object: Handle(0),
        }
    }
}

impl Body for BoardInformation {
    const TYPE: u8 = 2;
    const LENGTH: usize = 17;

    fn write_fields(&self, bytes: &mut Vec<u8>) {
        bytes.push(self.manufacturer);
        bytes.push(self.product);
        bytes.push(self.version);
        bytes.push(self.serial_number);
        bytes.push(self.asset_tag);
        bytes.push(self.feature_flags.bits());
        bytes.push(self.location_in_chassis);
        bytes.extend_from_slice(&self.chassis_handle.to_bytes());
        bytes.push(self.board_type as u8);
        bytes.push(self.contained_object_count);
        bytes.extend_from_slice(&self.contained_object.to_bytes());
    }
}

/// Publishes the baseboard structure, referencing the chassis it is installed in.
pub fn publish<R: Registry + ?Sized>(
    registry: &mut R,
    identity: &Identity,
    chassis: Handle,
) -> Result<Handle, Error> {
    if chassis == Handle::UNKNOWN {
        log::warn!("Baseboard published without a chassis");
    }

    let version = identity.version();
    let serial = identity.serial();

    build_and_register(
        registry,
        &BoardInformation::new(chassis),
        &[
            identity.manufacturer.as_str(),
            identity.product_name.as_str(),
            version.as_str(),
            serial.as_str(),
            identity.asset_tag.as_str(),
            LOCATION_IN_CHASSIS,
        ],
    )
}
