// SPDX-FileCopyrightText: Copyright © 2025 Serpent OS Developers
//
// SPDX-License-Identifier: MPL-2.0

//! IDE controller handling

use std::ops::Deref;

use crate::{BasicController, SlotLayout};

/// An IDE channel carries a primary and a secondary device.
pub const BUS_SLOTS: i32 = 2;

/// Bus addressing policy for IDE controllers.
pub const LAYOUT: SlotLayout = SlotLayout {
    slots: BUS_SLOTS,
    reserved: None,
};

/// Represents an IDE storage controller.
#[derive(Debug, Default)]
pub struct Controller(pub BasicController);

impl Deref for Controller {
    type Target = BasicController;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
