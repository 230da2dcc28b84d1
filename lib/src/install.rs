// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Installation of the complete structure table.


use crate::Error;
use crate::config::Config;
use crate::header::Handle;
use crate::platform::Platform;
use crate::registry::Registry;
use crate::topic::cache::Cache;
use crate::topic::memory::MemoryLayout;
use crate::topic::processor::CacheHandles;
use crate::topic::system::Identity;
use crate::topic::{Topic, board, boot, cache, chassis, firmware, memory, oem, processor, slot, system};
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Outcome of the installation of each structure, in installation order
#[derive(Debug, Default)]
pub struct Report {
    outcomes: Vec<(Topic, Result<Handle, Error>)>,
}

impl Report {
    /// Records the outcome of a structure and returns the handle to be referenced by the
    /// structures published later, [`Handle::UNKNOWN`] if the structure could not be published.
    fn record(&mut self, topic: Topic, outcome: Result<Handle, Error>) -> Handle {
        let handle = match &outcome {
            Ok(handle) => *handle,
            Err(err) => {
                log::error!("Failed to install the {topic} structure: {err}");
                Handle::UNKNOWN
            }
        };
        self.outcomes.push((topic, outcome));
        handle
    }

    /// Returns the handle assigned to a structure, if it was installed.
    pub fn handle(&self, topic: Topic) -> Option<Handle> {
        self.outcomes
            .iter()
            .find(|(t, _)| *t == topic)
            .and_then(|(_, outcome)| outcome.as_ref().ok().copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Topic, &Result<Handle, Error>)> {
        self.outcomes.iter().map(|(topic, outcome)| (*topic, outcome))
    }

    /// Iterates over the structures that could not be installed.
    pub fn failures(&self) -> impl Iterator<Item = (Topic, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|(topic, outcome)| outcome.as_ref().err().map(|err| (*topic, err)))
    }

    /// Returns true if every structure was installed.
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Publishes every structure of the platform into the registry.
///
/// Structures are published in a fixed order so that the structures referencing others are
/// published after their targets. A structure that fails to publish is reported and skipped,
/// and the references to it are set to [`Handle::UNKNOWN`].
pub fn install<R, P>(registry: &mut R, platform: &P, config: &Config) -> Report
where
    R: Registry + ?Sized,
    P: Platform + ?Sized,
{
    log::info!("Installing SMBIOS structures");
    let mut report = Report::default();

    report.record(
        Topic::Firmware,
        firmware::publish(registry, platform, config),
    );

    let identity = Identity::query(platform);
    report.record(Topic::System, system::publish(registry, &identity));

    let chassis = report.record(Topic::Chassis, chassis::publish(registry, &identity));
    report.record(Topic::Board, board::publish(registry, &identity, chassis));

    report.record(
        Topic::L1InstructionCache,
        cache::publish(registry, &Cache::l1_instruction()),
    );
    let caches = CacheHandles {
        l1: report.record(
            Topic::L1DataCache,
            cache::publish(registry, &Cache::l1_data()),
        ),
        l2: report.record(Topic::L2Cache, cache::publish(registry, &Cache::l2())),
        l3: Handle::UNKNOWN,
    };
    report.record(
        Topic::Processor,
        processor::publish(registry, platform, config, caches),
    );

    report.record(Topic::Slot, slot::publish(registry));
    report.record(Topic::OemStrings, oem::publish(registry, platform));

    let layout = MemoryLayout::query(platform);
    let array = report.record(Topic::MemoryArray, memory::publish_array(registry, &layout));
    report.record(
        Topic::MemoryDevice,
        memory::publish_device(registry, platform, &layout, array),
    );
    report.record(
        Topic::MappedAddress,
        memory::publish_mapped_address(registry, &layout, array),
    );

    report.record(Topic::BootStatus, boot::publish(registry));

    let failures = report.failures().count();
    if failures == 0 {
        log::info!("Installed {} SMBIOS structures", report.outcomes.len());
    } else {
        log::warn!(
            "Installed {} of {} SMBIOS structures",
            report.outcomes.len() - failures,
            report.outcomes.len()
        );
    }
    report
}
