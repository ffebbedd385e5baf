//! Application state shared across handlers

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{auth::JwtService, config::Platform, repositories::ChirpyRepository};

/// Number of requests served from the static file tree
#[derive(Debug, Default)]
pub struct HitCounter(AtomicU64);

impl HitCounter {
    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn load(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn ChirpyRepository>,
    pub jwt_service: JwtService,
    pub platform: Platform,
    pub polka_key: Arc<str>,
    pub file_server_hits: Arc<HitCounter>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn ChirpyRepository>,
        jwt_secret: &str,
        platform: Platform,
        polka_key: &str,
    ) -> Self {
        Self {
            repository,
            jwt_service: JwtService::new(jwt_secret.as_bytes()),
            platform,
            polka_key: Arc::from(polka_key),
            file_server_hits: Arc::new(HitCounter::default()),
        }
    }
}
