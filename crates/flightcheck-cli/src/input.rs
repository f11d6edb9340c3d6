//! Reading drone records from a detection request body.

use std::io::Read;

use anyhow::{Context, Result};
use flightcheck_core::DroneRecord;
use serde::Deserialize;

/// `{"drones": [...]}` or a bare array of records.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequestBody {
    Wrapped { drones: Vec<DroneRecord> },
    Bare(Vec<DroneRecord>),
}

pub fn parse_request(body: &str) -> Result<Vec<DroneRecord>> {
    let request: RequestBody =
        serde_json::from_str(body).context("request body is not a valid drone list")?;
    Ok(match request {
        RequestBody::Wrapped { drones } | RequestBody::Bare(drones) => drones,
    })
}

/// Read a request body from `reader`; `source` names it in errors.
pub fn read_request<R: Read>(mut reader: R, source: &str) -> Result<Vec<DroneRecord>> {
    let mut body = String::new();
    reader
        .read_to_string(&mut body)
        .with_context(|| format!("failed to read {source}"))?;
    parse_request(&body).with_context(|| format!("failed to parse {source}"))
}
