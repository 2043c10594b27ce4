// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Login and request gating for the Thingful API.
//!
//! ## Auth Flow
//!
//! 1. Client posts `{user_name, password}` to `/api/auth/login`
//! 2. Server looks the user up, checks the bcrypt hash and returns an
//!    HS256 JWT with `sub` = user name and `user_id` = id
//! 3. Client sends `Authorization: Bearer <token>` on protected routes
//! 4. The gate verifies signature, algorithm and expiry, loads the user
//!    named by `sub` and attaches it to the request
//!
//! A legacy `Authorization: Basic` scheme can be wired in place of the
//! bearer scheme; see [`BasicAuth`].
//!
//! ## Security
//!
//! - Failed logins never reveal whether the user name exists
//! - Any credential failure past the header check is reported as
//!   "Unauthorized request"
//! - No server-side session state; tokens are checked on every request

pub mod authenticator;
pub mod error;
pub mod extractor;
pub mod login;
pub mod middleware;
pub mod password;
pub mod token;

pub use authenticator::{Authenticator, BasicAuth, BearerAuth};
pub use error::AuthError;
pub use extractor::CurrentUser;
pub use login::{LoginError, LoginFlow};
pub use middleware::require_auth;
pub use token::{Claims, TokenService};
