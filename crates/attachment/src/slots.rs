// SPDX-FileCopyrightText: Copyright © 2025 Serpent OS Developers
//
// SPDX-License-Identifier: MPL-2.0

//! Unit number allocation on a controller bus
//!
//! A controller bus exposes a fixed number of unit numbers and may hold one
//! for the controller itself. Allocation scans ascending and takes the
//! lowest free unit, so the result is deterministic for a given device list
//! regardless of the order the devices are reported in.

use devices::{SlotLayout, VirtualDevice};
use log::debug;
use thiserror::Error;

/// Errors that can occur while allocating a unit number
#[derive(Debug, Error)]
pub enum SlotError {
    /// Every assignable unit number on the bus is occupied. The caller can
    /// pick another controller or fail the attach request.
    #[error("all {slots} unit numbers on the bus are in use")]
    NoAvailableSlots { slots: i32 },
}

/// Picks the lowest free unit number on a controller bus.
///
/// Devices whose unit number is absent or outside `0..layout.slots` do not
/// occupy a unit and are skipped; device lists reported by a management
/// endpoint routinely carry such entries. The unit held by the controller
/// itself is never returned, even when nothing in `devices` claims it.
pub fn next_unit_number(devices: &[VirtualDevice], layout: SlotLayout) -> Result<i32, SlotError> {
    let slots = layout.slots.max(0);
    let mut taken = vec![false; slots as usize];

    for device in devices {
        match device.unit_number() {
            Some(unit) if (0..slots).contains(&unit) => taken[unit as usize] = true,
            Some(unit) => {
                debug!("device {} reports unit {unit} outside the bus, skipping", device.key());
            }
            None => {}
        }
    }

    (0..slots)
        .filter(|unit| Some(*unit) != layout.reserved)
        .find(|unit| !taken[*unit as usize])
        .ok_or(SlotError::NoAvailableSlots { slots })
}

#[cfg(test)]
mod tests {
    use super::*;
    use devices::mock::MockController;
    use devices::{ide, sata, scsi, VirtualDevice};
    use test_log::test;

    /// Builds a device list occupying the given unit numbers
    fn devices_at(unit_numbers: &[i32]) -> Vec<VirtualDevice> {
        unit_numbers
            .iter()
            .enumerate()
            .map(|(i, unit)| VirtualDevice::new(2000 + i as i32).with_unit_number(*unit))
            .collect()
    }

    #[test]
    fn test_lowest_free_unit() {
        assert_eq!(next_unit_number(&devices_at(&[0, 1, 2]), scsi::LAYOUT).unwrap(), 3);
        assert_eq!(next_unit_number(&devices_at(&[1, 2, 3]), scsi::LAYOUT).unwrap(), 0);
        assert_eq!(next_unit_number(&[], scsi::LAYOUT).unwrap(), 0);
    }

    #[test]
    fn test_reserved_unit_skipped() {
        // Units 0..=6 occupied, unit 7 belongs to the controller
        let devices = devices_at(&[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(next_unit_number(&devices, scsi::LAYOUT).unwrap(), 8);
    }

    #[test]
    fn test_reserved_never_allocated() {
        for occupied in 0..scsi::BUS_SLOTS {
            let devices = devices_at(&(0..occupied).collect::<Vec<_>>());
            if let Ok(unit) = next_unit_number(&devices, scsi::LAYOUT) {
                assert_ne!(unit, scsi::CONTROLLER_UNIT);
            }
        }
    }

    #[test]
    fn test_bus_exhausted() {
        let devices = devices_at(&(0..16).collect::<Vec<_>>());
        assert!(matches!(
            next_unit_number(&devices, scsi::LAYOUT),
            Err(SlotError::NoAvailableSlots { slots: 16 })
        ));
    }

    #[test]
    fn test_out_of_range_units_ignored() {
        // Unit 16 is off the bus and must not block unit 2
        assert_eq!(next_unit_number(&devices_at(&[0, 1, 16]), scsi::LAYOUT).unwrap(), 2);
        // Negative sentinels are equally ignorable
        assert_eq!(next_unit_number(&devices_at(&[-1, 0]), scsi::LAYOUT).unwrap(), 1);
    }

    #[test]
    fn test_unnumbered_devices_ignored() {
        let mut devices = devices_at(&[0, 1]);
        devices.push(VirtualDevice::new(2100));
        assert_eq!(next_unit_number(&devices, scsi::LAYOUT).unwrap(), 2);
    }

    #[test]
    fn test_duplicate_units_tolerated() {
        assert_eq!(next_unit_number(&devices_at(&[0, 0, 1, 1]), scsi::LAYOUT).unwrap(), 2);
    }

    #[test]
    fn test_order_independent() {
        let forward = devices_at(&[0, 2, 4]);
        let backward = devices_at(&[4, 2, 0]);
        assert_eq!(
            next_unit_number(&forward, scsi::LAYOUT).unwrap(),
            next_unit_number(&backward, scsi::LAYOUT).unwrap()
        );
    }

    #[test]
    fn test_alternate_layouts() {
        // A SATA bus holds no unit for the controller
        let devices = devices_at(&[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(next_unit_number(&devices, sata::LAYOUT).unwrap(), 7);

        // Two-unit IDE channel
        assert_eq!(next_unit_number(&devices_at(&[0]), ide::LAYOUT).unwrap(), 1);
        assert!(next_unit_number(&devices_at(&[0, 1]), ide::LAYOUT).is_err());

        // Arbitrary bus shapes work without code change
        let tiny = SlotLayout {
            slots: 4,
            reserved: Some(0),
        };
        assert_eq!(next_unit_number(&[], tiny).unwrap(), 1);
        assert!(next_unit_number(&devices_at(&[1, 2, 3]), tiny).is_err());
    }

    #[test]
    fn test_on_mock_controller() {
        let controller = MockController::new(1000, 0).attach_all(&[0, 1, 2]).into_scsi();
        assert_eq!(next_unit_number(controller.devices(), controller.layout()).unwrap(), 3);
    }
}
