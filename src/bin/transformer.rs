// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use tokio::net::TcpListener;
use tracing::{error, info};

use textrelay::{
    api::transformer_router,
    config::TransformerConfig,
    logging,
    server::{serve, shutdown_on_signal},
    state::TransformerState,
};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let config = match TransformerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
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
    info!(addr = %config.bind_addr, "Transformer listening");

    let state = TransformerState::from_config(&config);
    if let Err(e) = serve(listener, transformer_router(state), shutdown_on_signal()).await {
        error!(error = %e, "Transformer server failed");
        return ExitCode::FAILURE;
    }

    info!("Transformer stopped");
    ExitCode::SUCCESS
}
