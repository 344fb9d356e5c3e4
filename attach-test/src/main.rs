// SPDX-FileCopyrightText: Copyright © 2025 Serpent OS Developers
//
// SPDX-License-Identifier: MPL-2.0

use attachment::planner::AttachPlanner;
use compat::ServiceInfo;
use devices::mock::MockController;
use log::{debug, info, warn};

/// Demonstrates usage of the attachment APIs including:
/// - Gating on the endpoint's reported versions
/// - Unit number allocation across controllers
/// - Undoing and describing planned attachments
fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Debug)
        .init();
    info!("Starting attach planning demo");

    // Versions as the endpoint would report them at session establishment
    let endpoint = ServiceInfo {
        version: "7.0.3".to_string(),
        api_version: "7.0.3.0".to_string(),
    };
    if endpoint.is_unsupported()? {
        warn!(
            "Endpoint {} (api {}) is below the supported floors, refusing to plan",
            endpoint.version, endpoint.api_version
        );
        return Ok(());
    }
    info!("Endpoint {} (api {}) is supported", endpoint.version, endpoint.api_version);

    // A machine with a mostly populated SCSI controller and an empty SATA one
    let machine = vec![
        MockController::new(1000, 0)
            .attach_all(&[0, 1, 2, 3, 4, 5, 6, 8, 9, 10, 11, 12])
            .into_scsi(),
        MockController::new(15000, 0).into_sata(),
    ];
    for controller in &machine {
        info!("Found {controller}");
    }

    // Plan a batch of five disks; the last two spill onto the SATA bus
    let mut planner = AttachPlanner::new(&machine);
    for _ in 0..5 {
        let attachment = planner.plan_attach()?;
        info!(
            "Planned device {} -> controller {} unit {}",
            attachment.device_key, attachment.controller_key, attachment.unit_number
        );
    }

    debug!("Second thoughts, dropping the last planned disk");
    planner.undo();

    info!("{}", planner.describe_changes());
    info!("Demo completed successfully");
    Ok(())
}
