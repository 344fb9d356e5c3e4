// SPDX-FileCopyrightText: Copyright © 2025 Serpent OS Developers
//
// SPDX-License-Identifier: MPL-2.0

//! Mock controllers for testing.
//!
//! This module provides a mock controller builder that can be used to test
//! attachment logic without requiring a live management endpoint.

use crate::{ide, sata, scsi, BasicController, Controller, VirtualDevice};

/// Builds controllers pre-populated with attached devices.
#[derive(Debug, Default)]
pub struct MockController(pub BasicController);

impl MockController {
    /// Creates an empty mock controller with the given key and bus number.
    pub fn new(key: i32, bus_number: i32) -> Self {
        Self(BasicController::new(key, bus_number))
    }

    /// Attach a device at the given unit number.
    pub fn attach_at(mut self, unit_number: i32) -> Self {
        let (key, label) = self.next_device();
        self.0
            .attach(VirtualDevice::new(key).with_unit_number(unit_number).with_label(label));
        self
    }

    /// Attach a device that has not been assigned a unit number.
    pub fn attach_unnumbered(mut self) -> Self {
        let (key, label) = self.next_device();
        self.0.attach(VirtualDevice::new(key).with_label(label));
        self
    }

    /// Attach devices at each of the given unit numbers.
    pub fn attach_all(self, unit_numbers: &[i32]) -> Self {
        unit_numbers.iter().fold(self, |mock, unit| mock.attach_at(*unit))
    }

    // Device keys count up from the controller key
    fn next_device(&self) -> (i32, String) {
        let ordinal = self.0.devices().len() as i32 + 1;
        (self.0.key() + ordinal, format!("Hard disk {ordinal}"))
    }

    /// Finish as a SCSI controller.
    pub fn into_scsi(self) -> Controller {
        Controller::Scsi(scsi::Controller(self.0))
    }

    /// Finish as a SATA controller.
    pub fn into_sata(self) -> Controller {
        Controller::Sata(sata::Controller(self.0))
    }

    /// Finish as an IDE controller.
    pub fn into_ide(self) -> Controller {
        Controller::Ide(ide::Controller(self.0))
    }
}
