//! Mock description generator

use altscribe_core::{GeneratedDescription, SignedAccessUrl};
use altscribe_vision::DescriptionGenerator;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

#[derive(Clone, Default)]
pub struct MockGenerator {
    calls: Arc<Mutex<Vec<String>>>,
    fail: bool,
    gate: Option<Arc<Barrier>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails like an unreachable model endpoint.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Calls block until `parties` callers are waiting. Used to force
    /// concurrent invocations past the existence check together.
    pub fn gated(parties: usize) -> Self {
        Self {
            gate: Some(Arc::new(Barrier::new(parties))),
            ..Self::default()
        }
    }

    /// Signed URLs received, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DescriptionGenerator for MockGenerator {
    async fn describe(&self, image_url: &SignedAccessUrl) -> Result<GeneratedDescription> {
        let call_number = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(image_url.as_str().to_string());
            calls.len()
        };

        if let Some(gate) = &self.gate {
            gate.wait().await;
        }
        if self.fail {
            anyhow::bail!("model endpoint unreachable");
        }

        Ok(GeneratedDescription {
            url: image_url.canonical().to_string(),
            description: format!("Photo produit numéro {}", call_number),
        })
    }
}
