// ABOUTME: Shared resource container handed to every HTTP route
// ABOUTME: Holds the immutable configuration and the metadata recorder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::FitAnalysisConfig;
use crate::database::MetadataRecorder;
use std::sync::Arc;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Configuration loaded at startup
    pub config: Arc<FitAnalysisConfig>,
    /// Store that uploads are recorded into
    pub recorder: Arc<dyn MetadataRecorder>,
}

impl ServerResources {
    /// Bundle configuration and recorder
    #[must_use]
    pub fn new(config: FitAnalysisConfig, recorder: Arc<dyn MetadataRecorder>) -> Self {
        Self {
            config: Arc::new(config),
            recorder,
        }
    }
}
