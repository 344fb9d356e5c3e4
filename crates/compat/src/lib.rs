// SPDX-FileCopyrightText: Copyright © 2025 Serpent OS Developers
//
// SPDX-License-Identifier: MPL-2.0

//! Support gating for management endpoint versions
//!
//! Device attachment drives endpoint apis that only exist in newer product
//! releases. The gate reads the product and api versions the endpoint
//! reports at session establishment and rejects builds older than the
//! supported floors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod version;
pub use version::Version;

/// Errors that can occur when evaluating endpoint versions
#[derive(Debug, Error)]
pub enum Error {
    /// A version segment was not a non-negative integer
    #[error("invalid version {text:?}: segment {segment:?} is not a number")]
    InvalidVersion { text: String, segment: String },
}

/// Oldest api version supported regardless of the product version.
pub const API_FLOOR: [u64; 4] = [7, 0, 3, 0];

/// Oldest supported product version for builds below [`API_FLOOR`].
pub const PRODUCT_FLOOR: [u64; 3] = [7, 0, 2];

/// Api version that must accompany [`PRODUCT_FLOOR`].
pub const PAIRED_API_FLOOR: [u64; 4] = [7, 0, 2, 0];

/// Version information reported by a management endpoint at session time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    /// Product release, e.g. "7.0.3"
    pub version: String,
    /// Wire api release, e.g. "7.0.3.0"
    pub api_version: String,
}

impl ServiceInfo {
    /// Whether this endpoint predates the supported floors.
    pub fn is_unsupported(&self) -> Result<bool, Error> {
        is_unsupported(&self.version, &self.api_version)
    }
}

/// Decides whether an endpoint build is too old for device attachment.
///
/// Supported floors, first match wins:
///
/// 1. api version at or above 7.0.3.0
/// 2. product version at or above 7.0.2 together with an api version at or
///    above 7.0.2.0
///
/// Everything below both floors is unsupported. The only failure is a
/// version string that does not parse; that points at a malformed endpoint
/// report and there is no local recovery.
pub fn is_unsupported(product_version: &str, api_version: &str) -> Result<bool, Error> {
    let product: Version = product_version.parse()?;
    let api: Version = api_version.parse()?;

    if api.at_least(&API_FLOOR) {
        return Ok(false);
    }
    if product.at_least(&PRODUCT_FLOOR) && api.at_least(&PAIRED_API_FLOOR) {
        return Ok(false);
    }
    Ok(true)
}
