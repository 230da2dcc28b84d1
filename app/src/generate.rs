// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

use platform_smbios::prelude::*;
use std::error::Error as StdError;
use std::path::{Path, PathBuf};

const DEFAULT_FILE_NAME: &str = "smbios.bin";

fn output_path(output: Option<&Path>) -> PathBuf {
    match output {
        Some(output) if output.is_dir() => output.join(DEFAULT_FILE_NAME),
        Some(output) => output.to_path_buf(),
        None => PathBuf::from(DEFAULT_FILE_NAME),
    }
}

/// Builds the table of a platform description and writes it to `output`.
///
/// The table is written even when some structures could not be installed, but the command
/// then fails.
pub fn generate(platform: &Path, output: Option<&Path>) -> Result<(), Box<dyn StdError>> {
    let description = PlatformDescription::from_json(&std::fs::read_to_string(platform)?)?;

    let mut registry = MemoryRegistry::new();
    let report = install(&mut registry, &description, &description.config);

    for (topic, outcome) in report.iter() {
        match outcome {
            Ok(handle) => println!("{topic}: {handle}"),
            Err(err) => println!("{topic}: {err}"),
        }
    }

    let path = output_path(output);
    std::fs::write(&path, registry.to_bytes())?;
    println!("{}", path.display());

    let failures: Vec<String> = report
        .failures()
        .map(|(topic, err)| format!("{topic} ({err})"))
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("Structures not installed: {}", failures.join(", ")).into())
    }
}
