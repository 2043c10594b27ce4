// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{BasicAuth, BearerAuth, LoginFlow, TokenService};
use crate::storage::{ThingStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub things: Arc<dyn ThingStore>,
    pub tokens: TokenService,
    pub login: LoginFlow,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        things: Arc<dyn ThingStore>,
        tokens: TokenService,
    ) -> Self {
        let login = LoginFlow::new(users.clone(), tokens.clone());
        Self {
            users,
            things,
            tokens,
            login,
        }
    }

    pub fn bearer_auth(&self) -> BearerAuth {
        BearerAuth::new(self.users.clone(), self.tokens.clone())
    }

    pub fn basic_auth(&self) -> BasicAuth {
        BasicAuth::new(self.users.clone())
    }
}
