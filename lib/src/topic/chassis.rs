// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! SMBIOS 3.7 7.4 System Enclosure or Chassis (Type 3)

use crate::Error;
use crate::header::Handle;
use crate::record::{Body, build_and_register};
use crate::registry::Registry;
use crate::topic::system::Identity;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// SMBIOS 3.7 7.4.1 System Enclosure or Chassis Types
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChassisType {
    Other = 0x01,
    Unknown = 0x02,
    Desktop = 0x03,
    Laptop = 0x09,
    Notebook = 0x0A,
    MainServer = 0x11,
    Tablet = 0x1E,
    Convertible = 0x1F,
    Detachable = 0x20,
    IotGateway = 0x21,
    EmbeddedPc = 0x22,
    MiniPc = 0x23,
    StickPc = 0x24,
}

/// SMBIOS 3.7 7.4.2 System Enclosure or Chassis States
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChassisState {
    Other = 0x01,
    Unknown = 0x02,
    Safe = 0x03,
    Warning = 0x04,
    Critical = 0x05,
    NonRecoverable = 0x06,
}

/// SMBIOS 3.7 7.4.3 System Enclosure or Chassis Security Status
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecurityStatus {
    Other = 0x01,
    Unknown = 0x02,
    None = 0x03,
    ExternalInterfaceLockedOut = 0x04,
    ExternalInterfaceEnabled = 0x05,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChassisInformation {
    pub manufacturer: u8,
    pub chassis_type: ChassisType,
    pub version: u8,
    pub serial_number: u8,
    pub asset_tag: u8,
    pub bootup_state: ChassisState,
    pub power_supply_state: ChassisState,
    pub thermal_state: ChassisState,
    pub security_status: SecurityStatus,
    pub oem_defined: u32,
    pub height: u8,
    pub power_cords: u8,
    pub contained_element_count: u8,
    pub contained_element_record_length: u8,
    /// Room for one contained element record
    pub contained_elements: [u8; 3],
}

impl Default for ChassisInformation {
    fn default() -> Self {
        Self {
            manufacturer: 1,
            chassis_type: ChassisType::EmbeddedPc,
            version: 2,
            serial_number: 3,
            asset_tag: 4,
            bootup_state: ChassisState::Safe,
            power_supply_state: ChassisState::Safe,
            thermal_state: ChassisState::Safe,
            security_status: SecurityStatus::None,
            oem_defined: 0,
            height: 0,
            power_cords: 1,
            contained_element_count: 0,
            contained_element_record_length: 0,
            contained_elements: [0; 3],
        }
    }
}

impl Body for ChassisInformation {
    const TYPE: u8 = 3;
    const LENGTH: usize = 24;

    fn write_fields(&self, bytes: &mut Vec<u8>) {
        bytes.push(self.manufacturer);
        bytes.push(self.chassis_type as u8);
        bytes.push(self.version);
        bytes.push(self.serial_number);
        bytes.push(self.asset_tag);
        bytes.push(self.bootup_state as u8);
        bytes.push(self.power_supply_state as u8);
        bytes.push(self.thermal_state as u8);
        bytes.push(self.security_status as u8);
        bytes.extend_from_slice(&self.oem_defined.to_le_bytes());
        bytes.push(self.height);
        bytes.push(self.power_cords);
        bytes.push(self.contained_element_count);
        bytes.push(self.contained_element_record_length);
        bytes.extend_from_slice(&self.contained_elements);
    }
}

/// Publishes the chassis structure. The product name doubles as the chassis version.
pub fn publish<R: Registry + ?Sized>(registry: &mut R, identity: &Identity) -> Result<Handle, Error> {
    let serial = identity.serial();

    build_and_register(
        registry,
        &ChassisInformation::default(),
        &[
            identity.manufacturer.as_str(),
            identity.product_name.as_str(),
            serial.as_str(),
            identity.asset_tag.as_str(),
        ],
    )
}
