use std::sync::Arc;

use super::probe::Probe;
use crate::error::{HealthError, Result};

/// Ordered collection of probes. Registration order is report order.
///
/// Probe names are unique: registering a second probe under an existing name fails.
#[derive(Default, Clone)]
pub struct CheckRegistry {
    probes: Vec<Arc<dyn Probe>>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<P: Probe + 'static>(&mut self, probe: P) -> Result<&mut Self> {
        self.register_shared(Arc::new(probe))
    }

    pub fn register_shared(&mut self, probe: Arc<dyn Probe>) -> Result<&mut Self> {
        if self.contains(probe.name()) {
            return Err(HealthError::duplicate_probe(probe.name()));
        }
        log::debug!("Registered probe '{}'", probe.name());
        self.probes.push(probe);
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.probes.iter().any(|p| p.name() == name)
    }

    pub fn list(&self) -> &[Arc<dyn Probe>] {
        &self.probes
    }

    pub fn names(&self) -> Vec<&str> {
        self.probes.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

impl std::fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckRegistry")
            .field("probes", &self.names())
            .finish()
    }
}
