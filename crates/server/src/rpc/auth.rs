//! `auth.*` procedures.

use dashcart_core::models::LoginInput;
use serde_json::Value;
use tracing::instrument;

use crate::dummyjson::DummyJsonClient;
use crate::error::{Result, RpcError};
use crate::rpc::{RequestContext, parse_input};

/// `auth.login`: exchange username/password for profile + tokens.
#[instrument(skip_all)]
pub async fn login(catalog: &DummyJsonClient, input: Value) -> Result<Value> {
    let input: LoginInput = parse_input(input)?;
    input.validate()?;

    catalog
        .login(&input)
        .await
        .map_err(|e| RpcError::remote("Invalid credentials", e))
}

/// `auth.getCurrentUser`: profile for the session token, or `null`.
///
/// Never fails; a missing token or any catalog error yields `null`.
#[instrument(skip_all)]
pub async fn get_current_user(catalog: &DummyJsonClient, ctx: &RequestContext) -> Value {
    let Some(token) = &ctx.token else {
        return Value::Null;
    };

    match catalog.current_user(token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::debug!(error = %e, "Session token rejected");
            Value::Null
        }
    }
}
