// SPDX-FileCopyrightText: Copyright © 2025 Serpent OS Developers
//
// SPDX-License-Identifier: MPL-2.0

//! Attach planning across a machine's storage controllers
//!
//! This module decides where a batch of new devices lands before any
//! reconfigure call is issued. It allows you to:
//!
//! - Walk controllers in machine order and take the lowest free unit
//! - Spill to the next controller when a bus is fully populated
//! - Track and undo planned attachments

use std::collections::VecDeque;

use devices::{Controller, SlotLayout, VirtualDevice};
use itertools::Itertools;
use log::{debug, warn};
use thiserror::Error;

use crate::slots::{self, SlotError};

/// Errors that can occur while planning attachments
#[derive(Debug, Error)]
pub enum PlanError {
    /// Every controller bus on the machine is fully populated
    #[error("no controller with a free unit number")]
    NoControllerAvailable,
}

/// A planned device attachment.
///
/// The device key is provisional: planned devices are numbered -1, -2, ...
/// until the reconfigure that creates them hands out real keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Provisional key for the new device
    pub device_key: i32,
    /// Key of the controller receiving the device
    pub controller_key: i32,
    /// Unit number the device will occupy
    pub unit_number: i32,
}

/// Snapshot of one controller's bus occupancy
#[derive(Debug)]
struct Bus {
    key: i32,
    layout: SlotLayout,
    devices: Vec<VirtualDevice>,
}

/// Plans device attachments against a snapshot of a machine's controllers.
///
/// Units claimed by earlier plans count as occupied for later plans, so a
/// single planner can place a whole batch of devices before anything is
/// sent to the endpoint. The snapshot is never written back; applying the
/// planned attachments is the caller's business.
#[derive(Debug)]
pub struct AttachPlanner {
    /// Controller snapshots in machine order
    controllers: Vec<Bus>,
    /// Stack of planned attachments that can be undone
    changes: VecDeque<Attachment>,
    /// Next provisional device key
    next_key: i32,
}

impl AttachPlanner {
    /// Creates a planner over the given controllers, preserving their order.
    pub fn new(controllers: &[Controller]) -> Self {
        debug!("Creating attach planner over {} controllers", controllers.len());

        let controllers = controllers
            .iter()
            .map(|controller| Bus {
                key: controller.key(),
                layout: controller.layout(),
                devices: controller.devices().to_vec(),
            })
            .collect();

        Self {
            controllers,
            changes: VecDeque::new(),
            next_key: -1,
        }
    }

    /// Plan to attach one device on the first controller with a free unit.
    pub fn plan_attach(&mut self) -> Result<Attachment, PlanError> {
        for bus in &mut self.controllers {
            match slots::next_unit_number(&bus.devices, bus.layout) {
                Ok(unit_number) => {
                    let attachment = Attachment {
                        device_key: self.next_key,
                        controller_key: bus.key,
                        unit_number,
                    };
                    debug!(
                        "Planning device {} on controller {} at unit {}",
                        attachment.device_key, attachment.controller_key, attachment.unit_number
                    );

                    bus.devices
                        .push(VirtualDevice::new(attachment.device_key).with_unit_number(unit_number));
                    self.next_key -= 1;
                    self.changes.push_back(attachment.clone());
                    return Ok(attachment);
                }
                Err(SlotError::NoAvailableSlots { .. }) => {
                    debug!("Controller {} bus is full, trying the next one", bus.key);
                }
            }
        }

        warn!("Every controller bus on the machine is fully populated");
        Err(PlanError::NoControllerAvailable)
    }

    /// Undo the most recent planned attachment
    pub fn undo(&mut self) -> bool {
        if let Some(attachment) = self.changes.pop_back() {
            debug!("Undoing planned attachment: {attachment:?}");
            if let Some(bus) = self
                .controllers
                .iter_mut()
                .find(|bus| bus.key == attachment.controller_key)
            {
                bus.devices.retain(|device| device.key() != attachment.device_key);
            }
            true
        } else {
            debug!("No planned attachments to undo");
            false
        }
    }

    /// Clear all planned attachments
    pub fn reset(&mut self) {
        debug!("Resetting all planned attachments");
        while self.undo() {}
    }

    /// Check if there are any planned attachments
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Get the list of planned attachments
    pub fn changes(&self) -> &VecDeque<Attachment> {
        &self.changes
    }

    /// Get a human readable description of planned attachments
    pub fn describe_changes(&self) -> String {
        if self.changes.is_empty() {
            return "No planned attachments".to_string();
        }

        let lines = self
            .changes
            .iter()
            .enumerate()
            .map(|(i, attachment)| {
                format!(
                    "  {}: device {} -> controller {} unit {}",
                    i + 1,
                    attachment.device_key,
                    attachment.controller_key,
                    attachment.unit_number
                )
            })
            .join("\n");

        format!("Planned attachments:\n{lines}\n")
    }
}
