//! Session Models

use serde::{Deserialize, Serialize};

use crate::domain::carts::models::CartUuid;

/// What a session key is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSession {
    pub cart_uuid: CartUuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Fields of a [`CartSession`] that may be changed after it is bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartSessionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// A freshly started session, as handed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSessionToken {
    pub cart_uuid: CartUuid,

    /// Session prefix followed by the raw session key.
    pub token: String,
}
