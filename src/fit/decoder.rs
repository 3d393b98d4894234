// ABOUTME: Decodes FIT bytes into sparse activity records using fitparser
// ABOUTME: Keeps record messages only and maps known field names onto RecordField
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use fitanalysis_core::models::{Record, RecordField};
use fitparser::profile::MesgNum;
use fitparser::{FitDataField, FitDataRecord, Value};
use tracing::debug;

/// Numeric value of a decoded FIT field, if it has one
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Byte(v) | Value::Enum(v) | Value::UInt8(v) | Value::UInt8z(v) => Some(f64::from(*v)),
        Value::SInt8(v) => Some(f64::from(*v)),
        Value::SInt16(v) => Some(f64::from(*v)),
        Value::UInt16(v) | Value::UInt16z(v) => Some(f64::from(*v)),
        Value::SInt32(v) => Some(f64::from(*v)),
        Value::UInt32(v) | Value::UInt32z(v) => Some(f64::from(*v)),
        Value::SInt64(v) => Some(*v as f64),
        Value::UInt64(v) | Value::UInt64z(v) => Some(*v as f64),
        Value::Float32(v) => Some(f64::from(*v)),
        Value::Float64(v) => Some(*v),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn timestamp_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Timestamp(ts) => Some(ts.with_timezone(&Utc)),
        _ => None,
    }
}

/// Target field for a FIT field name, and whether it is the enhanced variant
fn map_field_name(name: &str) -> Option<(RecordField, bool)> {
    match name {
        "heart_rate" => Some((RecordField::HeartRate, false)),
        "power" => Some((RecordField::Power, false)),
        "cadence" => Some((RecordField::Cadence, false)),
        "altitude" => Some((RecordField::Altitude, false)),
        "enhanced_altitude" => Some((RecordField::Altitude, true)),
        "speed" => Some((RecordField::Speed, false)),
        "enhanced_speed" => Some((RecordField::Speed, true)),
        "distance" => Some((RecordField::Distance, false)),
        "temperature" => Some((RecordField::Temperature, false)),
        _ => None,
    }
}

fn convert_record(fields: &[FitDataField]) -> Option<Record> {
    let timestamp = fields
        .iter()
        .find(|field| field.name() == "timestamp")
        .and_then(|field| timestamp_value(field.value()))?;

    let mut record = Record::new(timestamp);
    let mut enhanced = Vec::new();

    for field in fields {
        let Some((target, is_enhanced)) = map_field_name(field.name()) else {
            continue;
        };
        let Some(value) = numeric_value(field.value()) else {
            continue;
        };
        if is_enhanced {
            record.set(target, value);
            enhanced.push(target);
        } else if !enhanced.contains(&target) {
            record.set(target, value);
        }
    }

    Some(record)
}

/// Convert decoded FIT messages into activity records
///
/// Non-`record` messages are ignored. Records without a timestamp are skipped.
#[must_use]
pub fn records_from_messages(messages: &[FitDataRecord]) -> Vec<Record> {
    let mut skipped = 0_usize;
    let records: Vec<Record> = messages
        .iter()
        .filter(|message| message.kind() == MesgNum::Record)
        .filter_map(|message| {
            let record = convert_record(message.fields());
            if record.is_none() {
                skipped += 1;
            }
            record
        })
        .collect();

    if skipped > 0 {
        debug!(skipped, "Skipped record messages without a timestamp");
    }
    records
}

/// Decode FIT bytes into activity records
///
/// # Errors
///
/// Returns an `InvalidFormat` error when the bytes are empty or not a readable
/// FIT file
pub fn decode_fit_bytes(bytes: &[u8]) -> AppResult<Vec<Record>> {
    if bytes.is_empty() {
        return Err(AppError::invalid_format(
            "The FIT file is corrupted or invalid: file is empty",
        ));
    }

    let messages = fitparser::from_bytes(bytes).map_err(|e| {
        AppError::invalid_format(format!("The FIT file is corrupted or invalid: {e}"))
    })?;

    let records = records_from_messages(&messages);
    debug!(
        messages = messages.len(),
        records = records.len(),
        "Decoded FIT data"
    );
    Ok(records)
}
