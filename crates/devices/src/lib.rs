// SPDX-FileCopyrightText: Copyright © 2025 Serpent OS Developers
//
// SPDX-License-Identifier: MPL-2.0

//! Data model for virtual machine storage controllers and attached devices.
//!
//! A machine exposes a set of storage controllers, each owning a bus with a
//! fixed number of addressable unit numbers. Devices live on a controller's
//! bus and may or may not have been assigned a unit number yet. The model
//! here is a plain in-memory snapshot; obtaining it from a management
//! endpoint is the caller's business.

mod controller;
pub use controller::{BasicController, Controller, SlotLayout};

mod device;
pub use device::VirtualDevice;

pub mod ide;
pub mod mock;
pub mod sata;
pub mod scsi;
