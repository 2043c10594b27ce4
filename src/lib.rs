// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Thingful - Things & Reviews Service
//!
//! REST backend where users post things and review them. Logging in with a
//! user name and password yields an HS256 session token; protected routes
//! sit behind a request gate that resolves the caller from that token (or,
//! when configured, from a legacy `Basic` credential).
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Login flow, token service, password checks and the request gate
//! - `config` - Environment-driven runtime configuration
//! - `storage` - User, thing and review stores (in-memory or redb)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;

#[cfg(test)]
mod test_support;
