// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Session tokens for end users and the shared-secret gate for internal calls.
//!
//! ## Auth Flow
//!
//! 1. Client registers or logs in and receives a signed session token
//! 2. Client sends `Authorization: Bearer <token>` to the gateway
//! 3. Gateway:
//!    - Verifies the HS256 signature with the configured secret
//!    - Rejects expired tokens
//!    - Extracts `userId` and checks the identity still exists
//! 4. Gateway calls the transformer with `X-Internal-Token: <secret>`
//!
//! ## Security
//!
//! - Tokens are stateless; there is no revocation list
//! - Passwords are stored as Argon2id hashes only
//! - Internal secret comparison is constant-time

pub mod bearer;
pub mod claims;
pub mod error;
pub mod middleware;
pub mod password;
pub mod token;

pub use bearer::{authorization_header, parse_bearer};
pub use claims::SessionClaims;
pub use error::AuthError;
pub use middleware::{internal_token_middleware, InternalTrustGate, INTERNAL_TOKEN_HEADER};
pub use password::{hash_password, verify_against_dummy, verify_password, PasswordError};
pub use token::TokenCodec;
