// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! SMBIOS 3.7 7.12 OEM Strings (Type 11)

use crate::Error;
use crate::header::Handle;
use crate::platform::Platform;
use crate::record::{Body, build_and_register};
use crate::registry::Registry;
use crate::topic::{NOT_SPECIFIED, text_or};
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OemStrings {
    pub count: u8,
}

impl Body for OemStrings {
    const TYPE: u8 = 11;
    const LENGTH: usize = 5;

    fn write_fields(&self, bytes: &mut Vec<u8>) {
        bytes.push(self.count);
    }
}

/// Publishes the product URL as the only OEM string.
pub fn publish<R, P>(registry: &mut R, platform: &P) -> Result<Handle, Error>
where
    R: Registry + ?Sized,
    P: Platform + ?Sized,
{
    let url = text_or(platform.product_url(), NOT_SPECIFIED, "product URL");
    build_and_register(registry, &OemStrings { count: 1 }, &[url.as_str()])
}
