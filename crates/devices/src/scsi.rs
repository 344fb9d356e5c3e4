// SPDX-FileCopyrightText: Copyright © 2025 Serpent OS Developers
//
// SPDX-License-Identifier: MPL-2.0

//! SCSI controller handling
//!
//! The parallel and paravirtual SCSI families share the same bus shape:
//! sixteen unit numbers of which the controller answers at unit 7 itself,
//! leaving fifteen addresses for attached devices.

use std::ops::Deref;

use crate::{BasicController, SlotLayout};

/// Number of addressable unit numbers on a SCSI bus.
pub const BUS_SLOTS: i32 = 16;

/// Unit number the controller itself occupies on its own bus.
pub const CONTROLLER_UNIT: i32 = 7;

/// Bus addressing policy for SCSI controllers.
pub const LAYOUT: SlotLayout = SlotLayout {
    slots: BUS_SLOTS,
    reserved: Some(CONTROLLER_UNIT),
};

/// Represents a SCSI storage controller.
#[derive(Debug, Default)]
pub struct Controller(pub BasicController);

impl Deref for Controller {
    type Target = BasicController;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
