// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

#[cfg(not(feature = "std"))]
use alloc::string::String;
use core::fmt;

/// Errors raised while composing or registering SMBIOS records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The record buffer could not be allocated.
    OutOfResources,
    /// The buffer is too small to hold a record header.
    RecordTooSmall,
    /// The header length does not match the size of the formatted area.
    LengthMismatch { declared: u8, actual: usize },
    /// The formatted area does not fit in the one-byte header length.
    BodyTooLarge(usize),
    /// The string at the given 1-based position is empty.
    EmptyString(usize),
    /// The string at the given 1-based position contains a NUL byte.
    StringContainsNul(usize),
    /// A record cannot reference more than 254 strings.
    TooManyStrings(usize),
    /// The string pool is not terminated by a double NUL or holds an empty string.
    InvalidStringPool,
    /// No more handles can be assigned by the registry.
    HandleExhausted,
    /// The registry is not ready to accept records.
    RegistryUnavailable,
    /// The registry refused the record.
    Rejected(String),
    /// The platform description could not be parsed.
    InvalidDescription(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OutOfResources => write!(f, "Out of resources"),
            Error::RecordTooSmall => write!(f, "Record is smaller than its header"),
            Error::LengthMismatch { declared, actual } => write!(
                f,
                "Header declares {declared} bytes but the formatted area is {actual} bytes"
            ),
            Error::BodyTooLarge(len) => write!(f, "Formatted area is too large: {len} bytes"),
            Error::EmptyString(index) => write!(f, "String #{index} is empty"),
            Error::StringContainsNul(index) => write!(f, "String #{index} contains a NUL byte"),
            Error::TooManyStrings(count) => write!(f, "Too many strings: {count}"),
            Error::InvalidStringPool => write!(f, "Invalid string pool"),
            Error::HandleExhausted => write!(f, "No SMBIOS handle left"),
            Error::RegistryUnavailable => write!(f, "SMBIOS registry is not available"),
            Error::Rejected(reason) => write!(f, "Record rejected by the registry: {reason}"),
            Error::InvalidDescription(reason) => {
                write!(f, "Invalid platform description: {reason}")
            }
        }
    }
}

impl core::error::Error for Error {}
