// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Builds the SMBIOS structure table of a platform.
//!
//! Each hardware inventory topic (firmware, system, chassis, board, processor, caches, slot, OEM
//! strings, memory and boot status) is described by one fixed-layout record followed by a pack of
//! NUL-terminated strings. The records are handed to a [`Registry`](registry::Registry) which
//! assigns the handles that later records use to reference earlier ones.
//!
//! ```
//! use platform_smbios::prelude::*;
//!
//! struct Board;
//!
//! impl Platform for Board {
//!     fn platform_name(&self) -> Option<String> {
//!         Some("Example Board".into())
//!     }
//! }
//!
//! let mut registry = MemoryRegistry::new();
//! let report = install(&mut registry, &Board, &Config::default());
//! assert!(report.is_complete());
//! assert!(registry.get(report.handle(Topic::Board).unwrap()).is_some());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod config;
pub mod crc;
mod error;
pub mod header;
pub mod install;
pub mod platform;
pub mod record;
pub mod registry;
pub mod topic;
pub mod version;

pub use error::Error;

pub mod prelude {
    pub use crate::Error;
    pub use crate::config::Config;
    pub use crate::header::{HEADER_SIZE, Handle, Header};
    pub use crate::install::{Report, install};
    #[cfg(feature = "serialize")]
    pub use crate::platform::PlatformDescription;
    pub use crate::platform::{BuildDate, Platform};
    pub use crate::record::{RecordView, build_and_register, compose};
    pub use crate::registry::{MemoryRegistry, Registry};
    pub use crate::topic::Topic;
}
