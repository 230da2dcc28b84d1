// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Static description of the platform, fixed when the firmware is built.

#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Layout inputs of the structures that do not come from a hardware query
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialize",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct Config {
    /// Physical address of the firmware device
    pub firmware_base: u64,
    /// Size of the firmware device in bytes
    pub firmware_size: u64,
    /// Number of cores reported by the processor structure
    pub cpu_count: u8,
    pub processor_manufacturer: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            firmware_base: 0,
            firmware_size: 0,
            cpu_count: 4,
            processor_manufacturer: String::from("Rockchip"),
        }
    }
}

#[cfg(all(test, feature = "serialize"))]
mod tests {
    use super::*;

    #[test]
    fn json() {
        let config = Config {
            firmware_base: 0x1_0000_0000,
            firmware_size: 0x40_0000,
            cpu_count: 8,
            processor_manufacturer: String::from("Example"),
        };

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<Config>(&json).unwrap(), config);
    }

    #[test]
    fn partial_json() {
        let config: Config = serde_json::from_str(r#"{ "cpu_count": 2 }"#).unwrap();
        assert_eq!(config.cpu_count, 2);
        assert_eq!(config.processor_manufacturer, "Rockchip");

        assert!(serde_json::from_str::<Config>(r#"{ "cores": 2 }"#).is_err());
    }
}
