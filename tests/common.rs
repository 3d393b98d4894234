// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Synthesizes FIT files, multipart bodies and in-memory server resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `fitanalysis`
//!
//! The FIT encoder writes the smallest valid file fitparser accepts: a
//! 14-byte header with CRC, one definition message for `record` (global
//! message 20) with timestamp, heart rate and power, one data message per
//! sample, and the trailing file CRC.

use chrono::{DateTime, TimeZone, Utc};
use fitanalysis::config::{DatabaseConfig, FitAnalysisConfig};
use fitanalysis::database::MetadataStore;
use fitanalysis::resources::ServerResources;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Seconds between the Unix epoch and the FIT epoch (1989-12-31T00:00:00Z)
const FIT_EPOCH_OFFSET: i64 = 631_065_600;

/// FIT timestamp of 2025-07-05 10:00:00 UTC
pub const START_FIT_TIMESTAMP: u32 = 1_120_644_000;

/// Wall-clock time of [`START_FIT_TIMESTAMP`]
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 5, 10, 0, 0).unwrap()
}

/// Unix time of a FIT timestamp
pub fn fit_to_utc(fit_timestamp: u32) -> DateTime<Utc> {
    Utc.timestamp_opt(i64::from(fit_timestamp) + FIT_EPOCH_OFFSET, 0)
        .unwrap()
}

/// One `record` message to encode
#[derive(Debug, Clone, Copy)]
pub struct FitSample {
    /// Seconds after [`START_FIT_TIMESTAMP`]
    pub offset_secs: u32,
    /// Heart rate, `None` encodes the FIT invalid value
    pub heart_rate: Option<u8>,
    /// Power, `None` encodes the FIT invalid value
    pub power: Option<u16>,
}

impl FitSample {
    pub const fn new(offset_secs: u32, heart_rate: Option<u8>, power: Option<u16>) -> Self {
        Self {
            offset_secs,
            heart_rate,
            power,
        }
    }
}

/// Samples one second apart with constant power and heart rate
pub fn steady_samples(seconds: u32, power: u16, heart_rate: u8) -> Vec<FitSample> {
    (0..seconds)
        .map(|i| FitSample::new(i, Some(heart_rate), Some(power)))
        .collect()
}

fn fit_crc(data: &[u8]) -> u16 {
    const CRC_TABLE: [u16; 16] = [
        0x0000, 0xCC01, 0xD801, 0x1400, 0xF001, 0x3C00, 0x2800, 0xE401, 0xA001, 0x6C00, 0x7800,
        0xB401, 0x5000, 0x9C01, 0x8801, 0x4400,
    ];

    data.iter().fold(0u16, |crc, byte| {
        let mut tmp = CRC_TABLE[(crc & 0xF) as usize];
        let mut crc = (crc >> 4) & 0x0FFF;
        crc ^= tmp ^ CRC_TABLE[(byte & 0xF) as usize];
        tmp = CRC_TABLE[(crc & 0xF) as usize];
        crc = (crc >> 4) & 0x0FFF;
        crc ^ tmp ^ CRC_TABLE[((byte >> 4) & 0xF) as usize]
    })
}

/// Encode `samples` as a complete FIT file
pub fn encode_fit(samples: &[FitSample]) -> Vec<u8> {
    const RECORD_MESG_NUM: u16 = 20;
    const LOCAL_TYPE: u8 = 0;

    let mut data = vec![
        0x40 | LOCAL_TYPE, // definition message header
        0,                 // reserved
        0,                 // little-endian
    ];
    data.extend_from_slice(&RECORD_MESG_NUM.to_le_bytes());
    data.push(3); // field count
    data.extend_from_slice(&[253, 4, 0x86]); // timestamp: uint32
    data.extend_from_slice(&[3, 1, 0x02]); // heart_rate: uint8
    data.extend_from_slice(&[7, 2, 0x84]); // power: uint16

    for sample in samples {
        data.push(LOCAL_TYPE);
        data.extend_from_slice(&(START_FIT_TIMESTAMP + sample.offset_secs).to_le_bytes());
        data.push(sample.heart_rate.unwrap_or(0xFF));
        data.extend_from_slice(&sample.power.unwrap_or(0xFFFF).to_le_bytes());
    }

    let mut file = vec![14, 0x20];
    file.extend_from_slice(&2132_u16.to_le_bytes()); // profile version
    file.extend_from_slice(&u32::try_from(data.len()).unwrap().to_le_bytes());
    file.extend_from_slice(b".FIT");
    let header_crc = fit_crc(&file);
    file.extend_from_slice(&header_crc.to_le_bytes());

    file.extend_from_slice(&data);
    let file_crc = fit_crc(&file);
    file.extend_from_slice(&file_crc.to_le_bytes());
    file
}

/// Boundary used by [`multipart_body`]
pub const BOUNDARY: &str = "fitanalysis-test-boundary";

/// `multipart/form-data` body with a single file part
pub fn multipart_body(part_name: &str, file_name: &str, contents: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{part_name}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// `Content-Type` header value matching [`multipart_body`]
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Configuration backed by an in-memory database
pub fn memory_config() -> FitAnalysisConfig {
    FitAnalysisConfig {
        database: DatabaseConfig {
            path: ":memory:".into(),
            read_only: false,
        },
        ..FitAnalysisConfig::default()
    }
}

/// Server resources over an in-memory metadata store
pub async fn create_test_resources(config: FitAnalysisConfig) -> Arc<ServerResources> {
    init_test_logging();
    let store = MetadataStore::new(&config.database).await.unwrap();
    Arc::new(ServerResources::new(config, Arc::new(store)))
}
