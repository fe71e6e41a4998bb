// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request/response logic behind the gateway's HTTP handlers.
//!
//! Components take their collaborators as constructor arguments; there is
//! no shared mutable state besides the stores.

pub mod auth;
pub mod process;

pub use auth::AuthCoordinator;
pub use process::RequestGateway;
