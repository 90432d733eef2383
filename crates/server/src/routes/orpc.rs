//! Procedure endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::Method,
};
use serde_json::Value;

use crate::error::Result;
use crate::rpc::{Procedure, RequestContext};
use crate::state::AppState;

/// `GET|POST /api/orpc/{router}.{procedure}`
///
/// POST bodies that are missing or not valid JSON are treated as `{}`.
/// GET requests always call the procedure with `{}`.
#[tracing::instrument(skip_all, fields(procedure = %path))]
pub async fn call_procedure(
    State(state): State<AppState>,
    Path(path): Path<String>,
    method: Method,
    ctx: RequestContext,
    body: Bytes,
) -> Result<Json<Value>> {
    let procedure = Procedure::lookup(&path)?;
    let input = if method == Method::POST {
        parse_body(&body)
    } else {
        empty_input()
    };

    let output = procedure.call(&state, &ctx, input).await?;
    tracing::debug!(authenticated = ctx.is_authenticated(), "Procedure succeeded");
    Ok(Json(output))
}

fn parse_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|_| empty_input())
}

fn empty_input() -> Value {
    Value::Object(serde_json::Map::new())
}
