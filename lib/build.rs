// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

/// Converts a number of days since 1970-01-01 into a proleptic Gregorian (year, month, day).
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

fn main() {
    cargo_emit::rerun_if_changed!("build.rs");
    cargo_emit::rerun_if_env_changed!("SOURCE_DATE_EPOCH");

    // Reproducible builds pin the firmware release date through SOURCE_DATE_EPOCH.
    let seconds = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|epoch| epoch.trim().parse::<i64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs() as i64)
                .unwrap_or(0)
        });

    let (year, month, day) = civil_from_days(seconds.div_euclid(86_400));

    cargo_emit::rustc_env!("PLATFORM_SMBIOS_BUILD_YEAR", "{}", year);
    cargo_emit::rustc_env!("PLATFORM_SMBIOS_BUILD_MONTH", "{}", month);
    cargo_emit::rustc_env!("PLATFORM_SMBIOS_BUILD_DAY", "{}", day);
}
