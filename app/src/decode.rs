// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

use platform_smbios::prelude::*;
use serde_json::{Value, json};
use std::error::Error as StdError;
use std::path::Path;

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn to_json(record: &RecordView) -> Value {
    let strings: Vec<String> = record
        .strings
        .iter()
        .map(|s| String::from_utf8_lossy(s).into_owned())
        .collect();

    json!({
        "type": record.header.record_type,
        "handle": record.header.handle.0,
        "length": record.header.length,
        "formatted": hex(&record.formatted[HEADER_SIZE..]),
        "strings": strings,
    })
}

fn decode_table(table: &[u8]) -> Result<Value, Error> {
    let registry = MemoryRegistry::from_table(table)?;
    let records = registry
        .iter()
        .map(|(_, data)| RecordView::from_slice(data).map(|record| to_json(&record)))
        .collect::<Option<Vec<Value>>>()
        .ok_or(Error::InvalidStringPool)?;
    Ok(Value::Array(records))
}

/// Prints the structures stored in a table file.
pub fn decode(input: &Path) -> Result<(), Box<dyn StdError>> {
    let table = std::fs::read(input)?;
    let records = decode_table(&table)?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
