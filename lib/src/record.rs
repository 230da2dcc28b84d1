// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Composition of SMBIOS structures: a formatted area followed by its string pack.
//!
//! ```text
//! [formatted area][string 1]\0[string 2]\0 ... [string N]\0\0
//! [formatted area]\0\0                                 (no strings)
//! ```

#[cfg(test)]
mod tests;

use crate::Error;
use crate::header::{HEADER_SIZE, Handle, Header};
use crate::registry::Registry;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Strings are referenced by a one-byte number and 0 means "no string".
pub const MAX_STRING_COUNT: usize = 254;

/// Formatted area of a structure, header included.
pub trait Body {
    /// Structure type written in the header
    const TYPE: u8;
    /// Size of the formatted area in bytes, header included
    const LENGTH: usize;

    /// Appends the fields that follow the header, in little-endian order.
    fn write_fields(&self, bytes: &mut Vec<u8>);

    /// Serializes the formatted area. The handle is left to 0 for the registry to assign.
    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::LENGTH);
        bytes.extend_from_slice(&Header::new(Self::TYPE, Self::LENGTH as u8).to_bytes());
        self.write_fields(&mut bytes);

        debug_assert_eq!(bytes.len(), Self::LENGTH);
        bytes
    }
}

/// Returns the size of a structure made of a `body_len` bytes formatted area and `strings`.
pub fn record_size(body_len: usize, strings: &[&str]) -> usize {
    let pack: usize = strings.iter().map(|s| s.len() + 1).sum();
    // An empty string pack still needs its double NUL.
    body_len + pack + 1 + usize::from(strings.is_empty())
}

fn validate_strings(strings: &[&str]) -> Result<(), Error> {
    if strings.len() > MAX_STRING_COUNT {
        return Err(Error::TooManyStrings(strings.len()));
    }

    for (index, s) in strings.iter().enumerate() {
        if s.is_empty() {
            return Err(Error::EmptyString(index + 1));
        }
        if s.bytes().any(|b| b == 0) {
            return Err(Error::StringContainsNul(index + 1));
        }
    }

    Ok(())
}

/// Concatenates a formatted area and its strings into a single structure.
///
/// The header at the beginning of `body` must declare the length of `body`. Each string is
/// referenced by its 1-based position in `strings`.
pub fn compose(body: &[u8], strings: &[&str]) -> Result<Vec<u8>, Error> {
    let header = Header::from_slice(body).ok_or(Error::RecordTooSmall)?;
    if body.len() > u8::MAX as usize {
        return Err(Error::BodyTooLarge(body.len()));
    }
    if body.len() < HEADER_SIZE || header.length as usize != body.len() {
        return Err(Error::LengthMismatch {
            declared: header.length,
            actual: body.len(),
        });
    }
    validate_strings(strings)?;

    let size = record_size(body.len(), strings);
    let mut record = Vec::new();
    record
        .try_reserve_exact(size)
        .map_err(|_| Error::OutOfResources)?;
    record.resize(size, 0);

    record[..body.len()].copy_from_slice(body);
    let mut cursor = body.len();
    for s in strings {
        record[cursor..cursor + s.len()].copy_from_slice(s.as_bytes());
        // The terminator is already there.
        cursor += s.len() + 1;
    }

    debug_assert!(record.ends_with(&[0, 0]));
    Ok(record)
}

/// Composes a structure and adds it to the registry, returning the handle it was assigned.
///
/// The registry is called exactly once when the structure could be composed. Its errors are
/// returned as is.
pub fn build_and_register<R, B>(registry: &mut R, body: &B, strings: &[&str]) -> Result<Handle, Error>
where
    R: Registry + ?Sized,
    B: Body,
{
    let record = compose(&body.to_bytes(), strings)?;
    let handle = registry.add(&record)?;
    log::debug!(
        "Registered SMBIOS type {} ({} bytes, {} strings) as {handle}",
        B::TYPE,
        record.len(),
        strings.len()
    );
    Ok(handle)
}

/// Read-only view of a structure stored in a byte slice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordView<'a> {
    pub header: Header,
    /// Formatted area, header included
    pub formatted: &'a [u8],
    /// Strings of the pack, without their terminators
    pub strings: Vec<&'a [u8]>,
    /// Size of the whole structure, string pack included
    pub len: usize,
}

impl<'a> RecordView<'a> {
    /// Parses the structure stored at the beginning of a byte slice.
    pub fn from_slice(s: &'a [u8]) -> Option<Self> {
        let header = Header::from_slice(s)?;
        let length = header.length as usize;
        if length < HEADER_SIZE {
            return None;
        }
        let formatted = s.get(..length)?;

        let mut strings = Vec::new();
        let mut cursor = length;
        if s.get(cursor..cursor + 2)? == [0, 0] {
            cursor += 2;
        } else {
            loop {
                let rest = s.get(cursor..)?;
                let end = rest.iter().position(|&b| b == 0)?;
                cursor += end + 1;
                if end == 0 {
                    break;
                }
                strings.push(&rest[..end]);
            }
        }

        Some(Self {
            header,
            formatted,
            strings,
            len: cursor,
        })
    }

    /// Returns the string referenced by a string number. Number 0 references no string.
    pub fn string(&self, number: u8) -> Option<&'a [u8]> {
        let index = (number as usize).checked_sub(1)?;
        self.strings.get(index).copied()
    }

    /// Returns a little-endian word of the formatted area.
    pub fn word(&self, offset: usize) -> Option<u16> {
        Some(u16::from_le_bytes(
            self.formatted.get(offset..offset + 2)?.try_into().ok()?,
        ))
    }

    /// Returns a little-endian double word of the formatted area.
    pub fn dword(&self, offset: usize) -> Option<u32> {
        Some(u32::from_le_bytes(
            self.formatted.get(offset..offset + 4)?.try_into().ok()?,
        ))
    }

    /// Returns a little-endian quad word of the formatted area.
    pub fn qword(&self, offset: usize) -> Option<u64> {
        Some(u64::from_le_bytes(
            self.formatted.get(offset..offset + 8)?.try_into().ok()?,
        ))
    }
}
