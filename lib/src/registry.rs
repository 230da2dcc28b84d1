// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Stores that accept composed structures and assign their handles.

use crate::Error;
use crate::header::{HEADER_SIZE, Handle, Header};
use crate::record::RecordView;
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};

/// Last handle that can be assigned. Higher values have a special meaning.
pub const MAX_HANDLE: u16 = 0xFEFF;

/// Type of the structure that closes a structure table
pub const END_OF_TABLE: u8 = 127;

/// Destination of the composed structures.
pub trait Registry {
    /// Adds a structure (formatted area and string pack) and returns the handle assigned to it.
    ///
    /// The handle field of the structure is ignored and overwritten by the registry.
    fn add(&mut self, record: &[u8]) -> Result<Handle, Error>;
}

impl<R: Registry + ?Sized> Registry for &mut R {
    fn add(&mut self, record: &[u8]) -> Result<Handle, Error> {
        (**self).add(record)
    }
}

struct Entry {
    handle: Handle,
    data: Vec<u8>,
}

/// Registry keeping the structures in memory, in insertion order.
///
/// Handles are assigned sequentially, starting from 1 unless configured otherwise.
pub struct MemoryRegistry {
    entries: Vec<Entry>,
    next_handle: u16,
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::with_first_handle(1)
    }

    /// Creates a registry that assigns handles starting from `first`.
    pub fn with_first_handle(first: u16) -> Self {
        Self {
            entries: Vec::new(),
            next_handle: first,
        }
    }

    /// Reads back a structure table, stopping after the End-of-Table structure.
    ///
    /// The handles stored in the table are preserved.
    pub fn from_table(table: &[u8]) -> Result<Self, Error> {
        let mut registry = Self::new();
        let mut cursor = 0;

        while cursor < table.len() {
            let record =
                RecordView::from_slice(&table[cursor..]).ok_or(Error::InvalidStringPool)?;
            let data = table[cursor..cursor + record.len].to_vec();
            cursor += record.len;

            if record.header.record_type == END_OF_TABLE {
                break;
            }
            registry.next_handle = registry.next_handle.max(record.header.handle.0.saturating_add(1));
            registry.entries.push(Entry {
                handle: record.header.handle,
                data,
            });
        }

        Ok(registry)
    }

    fn allocate_handle(&mut self) -> Result<Handle, Error> {
        let candidate = self.next_handle;
        if candidate > MAX_HANDLE {
            return Err(Error::HandleExhausted);
        }
        self.next_handle = candidate + 1;
        Ok(Handle(candidate))
    }

    /// Returns the structure registered with `handle`.
    pub fn get(&self, handle: Handle) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|entry| entry.handle == handle)
            .map(|entry| entry.data.as_slice())
    }

    /// Iterates over the structures in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &[u8])> {
        self.entries
            .iter()
            .map(|entry| (entry.handle, entry.data.as_slice()))
    }

    /// Iterates over the structures of a given type in registration order.
    pub fn of_type(&self, record_type: u8) -> impl Iterator<Item = (Handle, &[u8])> {
        self.iter()
            .filter(move |(_, data)| data.first() == Some(&record_type))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the structure table, closed by an End-of-Table structure.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = self
            .entries
            .iter()
            .flat_map(|entry| entry.data.iter().copied())
            .collect();

        let end = Header {
            record_type: END_OF_TABLE,
            length: HEADER_SIZE as u8,
            handle: Handle(self.next_handle.min(MAX_HANDLE)),
        };
        bytes.extend_from_slice(&end.to_bytes());
        bytes.extend_from_slice(&[0, 0]);
        bytes
    }
}

impl Registry for MemoryRegistry {
    fn add(&mut self, record: &[u8]) -> Result<Handle, Error> {
        let header = Header::from_slice(record).ok_or(Error::RecordTooSmall)?;
        if (header.length as usize) < HEADER_SIZE || header.length as usize + 2 > record.len() {
            return Err(Error::RecordTooSmall);
        }

        let view = RecordView::from_slice(record).ok_or(Error::InvalidStringPool)?;
        if view.len != record.len() {
            return Err(Error::InvalidStringPool);
        }
        if header.record_type == END_OF_TABLE {
            return Err(Error::Rejected(format!(
                "type {END_OF_TABLE} is appended when the table is serialized"
            )));
        }

        let handle = self.allocate_handle()?;
        let mut data = record.to_vec();
        data[2..4].copy_from_slice(&handle.to_bytes());
        self.entries.push(Entry { handle, data });

        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(record_type: u8, strings: &[&str]) -> Vec<u8> {
        let mut body = Header::new(record_type, 6).to_bytes().to_vec();
        body.extend_from_slice(&[0xAA, 0xBB]);
        crate::record::compose(&body, strings).unwrap()
    }

    #[test]
    fn sequential_handles() {
        let mut registry = MemoryRegistry::new();
        assert_eq!(registry.add(&record(0, &["a"])), Ok(Handle(1)));
        assert_eq!(registry.add(&record(1, &[])), Ok(Handle(2)));
        assert_eq!(registry.len(), 2);

        let stored = registry.get(Handle(2)).unwrap();
        assert_eq!(&stored[..4], &[1, 6, 2, 0]);
        assert!(registry.get(Handle(3)).is_none());
    }

    #[test]
    fn first_handle() {
        let mut registry = MemoryRegistry::with_first_handle(0x100);
        assert_eq!(registry.add(&record(0, &[])), Ok(Handle(0x100)));
    }

    #[test]
    fn handle_exhausted() {
        let mut registry = MemoryRegistry::with_first_handle(MAX_HANDLE);
        assert_eq!(registry.add(&record(0, &[])), Ok(Handle(MAX_HANDLE)));
        assert_eq!(registry.add(&record(0, &[])), Err(Error::HandleExhausted));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn malformed_records() {
        let mut registry = MemoryRegistry::new();
        assert_eq!(registry.add(&[0, 4, 0]), Err(Error::RecordTooSmall));
        assert_eq!(registry.add(&[0, 6, 0, 0, 0]), Err(Error::RecordTooSmall));
        // Missing the second terminator
        assert_eq!(registry.add(&[0, 4, 0, 0, b'a', 0]), Err(Error::InvalidStringPool));
        // Trailing garbage after the string pack
        assert_eq!(registry.add(&[0, 4, 0, 0, 0, 0, 1]), Err(Error::InvalidStringPool));
        assert!(matches!(
            registry.add(&record(END_OF_TABLE, &[])),
            Err(Error::Rejected(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn table_round_trip() {
        let mut registry = MemoryRegistry::new();
        registry.add(&record(0, &["vendor", "1.0"])).unwrap();
        registry.add(&record(32, &[])).unwrap();

        let table = registry.to_bytes();
        assert!(table.ends_with(&[END_OF_TABLE, 4, 3, 0, 0, 0]));

        let reread = MemoryRegistry::from_table(&table).unwrap();
        assert_eq!(reread.len(), 2);
        assert_eq!(reread.get(Handle(1)), registry.get(Handle(1)));
        assert_eq!(reread.of_type(32).count(), 1);
        assert_eq!(reread.to_bytes(), table);
    }
}
