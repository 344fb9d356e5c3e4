// SPDX-FileCopyrightText: Copyright © 2025 Serpent OS Developers
//
// SPDX-License-Identifier: MPL-2.0

use std::fmt;

/// A virtual device as it appears in a controller's device list.
///
/// The unit number is an explicit option: device lists reported by a
/// management endpoint routinely carry entries that have not been assigned
/// an address yet, and those entries must stay representable without a
/// sentinel value.
#[derive(Debug, Clone)]
pub struct VirtualDevice {
    /// Device key in the owning machine's configuration
    key: i32,
    /// Address on the owning controller's bus, if one has been assigned
    unit_number: Option<i32>,
    /// Optional human readable label
    label: Option<String>,
}

impl VirtualDevice {
    /// Creates a device with the given configuration key and no bus address.
    pub fn new(key: i32) -> Self {
        Self {
            key,
            unit_number: None,
            label: None,
        }
    }

    /// Sets the bus address of the device.
    pub fn with_unit_number(self, unit_number: i32) -> Self {
        Self {
            unit_number: Some(unit_number),
            ..self
        }
    }

    /// Sets the display label of the device.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..self
        }
    }

    /// Returns the device key.
    pub fn key(&self) -> i32 {
        self.key
    }

    /// Returns the unit number on the owning controller, if assigned.
    pub fn unit_number(&self) -> Option<i32> {
        self.unit_number
    }

    /// Returns the display label of the device.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl fmt::Display for VirtualDevice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label} (key {})", self.key)?,
            None => write!(f, "device key {}", self.key)?,
        }
        match self.unit_number {
            Some(unit) => write!(f, " at unit {unit}"),
            None => write!(f, " unassigned"),
        }
    }
}
