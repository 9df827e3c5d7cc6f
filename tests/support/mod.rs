//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use kotoba_providers::factory::{ClientFactory, ClientSettings, FactoryError};

/// Handle returned by [`RecordingFactory`], tagged so tests can check it came back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeClient {
    pub serial: usize,
    pub api_key: Option<String>,
    pub base_url: String,
}

/// Client factory that records every call and either succeeds or fails on demand.
#[derive(Clone, Default)]
pub struct RecordingFactory {
    calls: Arc<Mutex<Vec<ClientSettings>>>,
    failure: Option<&'static str>,
}

impl RecordingFactory {
    pub fn failing(message: &'static str) -> Self {
        Self {
            failure: Some(message),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ClientSettings> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl ClientFactory for RecordingFactory {
    type Client = FakeClient;

    fn create(&self, settings: ClientSettings) -> Result<FakeClient, FactoryError> {
        let mut calls = self.calls.lock().expect("calls lock");
        calls.push(settings.clone());
        if let Some(message) = self.failure {
            return Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, message).into());
        }
        Ok(FakeClient {
            serial: calls.len(),
            api_key: settings.api_key,
            base_url: settings.base_url,
        })
    }
}
