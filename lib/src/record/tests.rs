// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

use super::*;
use crate::registry::MemoryRegistry;

struct Sample {
    value: u16,
}

impl Body for Sample {
    const TYPE: u8 = 0x80;
    const LENGTH: usize = 6;

    fn write_fields(&self, bytes: &mut Vec<u8>) {
        bytes.extend_from_slice(&self.value.to_le_bytes());
    }
}

/// Registry refusing every record while counting the attempts
#[derive(Default)]
struct Refusing {
    calls: usize,
}

impl Registry for Refusing {
    fn add(&mut self, _record: &[u8]) -> Result<Handle, Error> {
        self.calls += 1;
        Err(Error::RegistryUnavailable)
    }
}

fn body(record_type: u8, len: u8) -> Vec<u8> {
    let mut body = Header::new(record_type, len).to_bytes().to_vec();
    body.resize(len as usize, 0x5A);
    body
}

#[test]
fn size() {
    assert_eq!(record_size(4, &[]), 6);
    assert_eq!(record_size(26, &["EDK2", "EDK2-DEV 1.0", "01/02/2025"]), 26 + 5 + 13 + 11 + 1);
    assert_eq!(record_size(5, &["x"]), 8);
}

#[test]
fn without_strings() {
    let record = compose(&body(32, 11), &[]).unwrap();
    assert_eq!(record.len(), 13);
    assert_eq!(&record[11..], &[0, 0]);
    assert_eq!(&record[..4], &[32, 11, 0, 0]);
}

#[test]
fn with_strings() {
    let record = compose(&body(11, 5), &["https://example.com", "ab"]).unwrap();
    assert_eq!(record.len(), record_size(5, &["https://example.com", "ab"]));
    assert_eq!(&record[5..], b"https://example.com\0ab\0\0");

    let view = RecordView::from_slice(&record).unwrap();
    assert_eq!(view.len, record.len());
    assert_eq!(view.formatted, &record[..5]);
    assert_eq!(view.strings.len(), 2);
    assert_eq!(view.string(1), Some(&b"https://example.com"[..]));
    assert_eq!(view.string(2), Some(&b"ab"[..]));
    assert_eq!(view.string(0), None);
    assert_eq!(view.string(3), None);
}

#[test]
fn invalid_body() {
    assert_eq!(compose(&[1, 4, 0], &[]), Err(Error::RecordTooSmall));
    assert_eq!(
        compose(&body(1, 8)[..6], &[]),
        Err(Error::LengthMismatch {
            declared: 8,
            actual: 6
        })
    );

    let mut large = body(1, 255);
    large.push(0);
    assert_eq!(compose(&large, &[]), Err(Error::BodyTooLarge(256)));
}

#[test]
fn invalid_strings() {
    let body = body(1, 8);
    assert_eq!(compose(&body, &["a", ""]), Err(Error::EmptyString(2)));
    assert_eq!(compose(&body, &["a\0b"]), Err(Error::StringContainsNul(1)));

    let strings = vec!["s"; MAX_STRING_COUNT + 1];
    assert_eq!(compose(&body, &strings), Err(Error::TooManyStrings(255)));
    assert!(compose(&body, &strings[..MAX_STRING_COUNT]).is_ok());
}

#[test]
fn body_to_bytes() {
    assert_eq!(Sample { value: 0x1234 }.to_bytes(), [0x80, 6, 0, 0, 0x34, 0x12]);
}

#[test]
fn register() {
    let mut registry = MemoryRegistry::new();
    let first = build_and_register(&mut registry, &Sample { value: 1 }, &["one"]).unwrap();
    let second = build_and_register(&mut registry, &Sample { value: 2 }, &[]).unwrap();
    assert_ne!(first, second);

    let view = RecordView::from_slice(registry.get(second).unwrap()).unwrap();
    assert_eq!(view.header.handle, second);
    assert_eq!(view.word(4), Some(2));
    assert!(view.strings.is_empty());
}

#[test]
fn registry_error() {
    let mut registry = Refusing::default();
    assert_eq!(
        build_and_register(&mut registry, &Sample { value: 1 }, &["one"]),
        Err(Error::RegistryUnavailable)
    );
    assert_eq!(registry.calls, 1);

    // Composition errors never reach the registry.
    assert_eq!(
        build_and_register(&mut registry, &Sample { value: 1 }, &[""]),
        Err(Error::EmptyString(1))
    );
    assert_eq!(registry.calls, 1);
}

#[test]
fn view_accessors() {
    let mut bytes = Header::new(19, 20).to_bytes().to_vec();
    bytes.extend_from_slice(&0x0403_0201u32.to_le_bytes());
    bytes.extend_from_slice(&0x0c0b_0a09_0807_0605u64.to_le_bytes());
    bytes.extend_from_slice(&[0; 4]);
    let record = compose(&bytes, &[]).unwrap();

    let view = RecordView::from_slice(&record).unwrap();
    assert_eq!(view.dword(4), Some(0x0403_0201));
    assert_eq!(view.qword(8), Some(0x0c0b_0a09_0807_0605));
    assert_eq!(view.word(18), Some(0));
    assert_eq!(view.word(19), None);
}
