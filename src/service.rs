//! Process-boundary dispatch for the encoder.
//!
//! The upstream parser runs in another process and ships the query AST
//! across the boundary as JSON. [`invoke`] is the single entry point the
//! dispatch service calls: any failure, from a malformed request to an
//! unsupported construct, is converted into a stable `"ERROR: <message>"`
//! response here so one bad query never takes the hosting process down.

use serde::{Deserialize, Serialize};

use crate::ast::Query;
use crate::encoder::Encoder;
use crate::error::{EncodeError, EncodeResult};

/// The request body: a query tree plus the one encoding option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeRequest {
    pub query: Query,
    /// Enable name-based date inference (`...date` suffixes).
    #[serde(default)]
    pub date_name_heuristic: bool,
}

/// Encode a request, never letting a failure escape as anything but text.
pub fn invoke(request: &str) -> String {
    match handle(request) {
        Ok(encoding) => encoding,
        Err(err) => format!("ERROR: {err}"),
    }
}

fn handle(request: &str) -> EncodeResult<String> {
    let request: EncodeRequest = serde_json::from_str(request)
        .map_err(|err| EncodeError::InvalidUsage(err.to_string()))?;
    Encoder::new()
        .with_date_name_heuristic(request.date_name_heuristic)
        .encode(&request.query)
}
