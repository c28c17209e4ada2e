//! The caller's resolved role access.

use std::collections::{BTreeMap, BTreeSet};

use axum::{Json, Router, routing::get};
use ridgeline_core::roles::{Capability, Module, RoleGroup};
use serde::Serialize;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::auth::AuthUser;

/// Body of `GET /me/access`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessResponse {
    /// Caller id.
    pub user_id: Uuid,
    /// Display name from the token.
    pub name: String,
    /// Role as carried in the token.
    pub role: String,
    /// Resolved role group.
    pub group: RoleGroup,
    /// Modules the front-end should show.
    pub visible_modules: BTreeSet<Module>,
    /// Every capability with its flag.
    pub capabilities: BTreeMap<Capability, bool>,
}

async fn my_access(auth: AuthUser) -> Json<AccessResponse> {
    let access = auth.access().clone();
    Json(AccessResponse {
        user_id: auth.user_id(),
        name: auth.claims().name.clone(),
        role: access.role,
        group: access.group,
        visible_modules: access.visible_modules,
        capabilities: access.capabilities,
    })
}

/// Creates access routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/me/access", get(my_access))
}
