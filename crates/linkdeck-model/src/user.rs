// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::Username;

/// Public account shape returned by the auth endpoints. Credential
/// material never travels with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: Username,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
