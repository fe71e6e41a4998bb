// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Outbound HTTP clients.

pub mod transformer;

pub use transformer::TransformerClient;
