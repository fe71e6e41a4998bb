// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{process::ExitCode, sync::Arc};

use tokio::net::TcpListener;
use tracing::{error, info};

use textrelay::{
    api::gateway_router,
    config::GatewayConfig,
    logging,
    server::{serve, shutdown_on_signal},
    state::GatewayState,
    storage::RedbStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    info!(?config, "Loaded gateway configuration");

    let store = match RedbStore::open_in(&config.data_dir) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!(error = %e, data_dir = %config.data_dir.display(), "Failed to open database");
            return ExitCode::FAILURE;
        }
    };

    let state = match GatewayState::from_config(&config, store) {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to initialize gateway");
            return ExitCode::FAILURE;
        }
    };

    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, addr = %config.bind_addr, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!(
        addr = %config.bind_addr,
        transformer = %config.downstream_base_url,
        "Gateway listening (docs at /docs)"
    );

    if let Err(e) = serve(listener, gateway_router(state), shutdown_on_signal()).await {
        error!(error = %e, "Gateway server failed");
        return ExitCode::FAILURE;
    }

    info!("Gateway stopped");
    ExitCode::SUCCESS
}
