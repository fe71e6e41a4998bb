// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! TextRelay - token-authenticated text processing
//!
//! Two cooperating HTTP services built from one crate:
//!
//! - **gateway**: registers identities, issues HS256 session tokens, forwards
//!   text to the transformer and keeps an audit log of every exchange
//! - **transformer**: reverses and uppercases text, reachable only with the
//!   shared internal secret
//!
//! ## Modules
//!
//! - `api` - HTTP routers and handlers (Axum)
//! - `auth` - Session tokens, password hashing, internal trust gate
//! - `services` - Registration, login and process orchestration
//! - `providers` - Outbound client for the transformer
//! - `storage` - Identity and audit persistence (redb or in-memory)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod providers;
pub mod server;
pub mod services;
pub mod state;
pub mod storage;
pub mod transform;
