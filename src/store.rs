//! store.rs: persistence contract for generated insights plus a bounded
//! in-memory implementation (default for the binary and for tests).

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

use crate::insight::{Domain, Insight};

#[async_trait]
pub trait InsightStore: Send + Sync {
    async fn save(&self, insight: &Insight) -> Result<()>;
    async fn find_by_domain(&self, domain: Domain) -> Result<Vec<Insight>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Insight>>;
    /// Replace a stored insight with the same id; unknown ids are an error.
    async fn update(&self, insight: &Insight) -> Result<()>;
}

/// Oldest entries are evicted once `cap` is exceeded.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Vec<Insight>>,
    cap: usize,
}

impl MemoryStore {
    pub fn with_capacity(cap: usize) -> Self {
        let cap = cap.clamp(1, 10_000);
        Self {
            inner: Mutex::new(Vec::with_capacity(cap.min(256))),
            cap,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most recent `n` insights, oldest first.
    pub fn snapshot_last_n(&self, n: usize) -> Vec<Insight> {
        let v = self.lock();
        v[v.len().saturating_sub(n)..].to_vec()
    }

    /// A panic in another holder cannot leave the list half-written, so a
    /// poisoned lock is recovered rather than reported.
    fn lock(&self) -> MutexGuard<'_, Vec<Insight>> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("insight store mutex poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_capacity(1_000)
    }
}

#[async_trait]
impl InsightStore for MemoryStore {
    async fn save(&self, insight: &Insight) -> Result<()> {
        let mut v = self.lock();
        // same id saved twice replaces the earlier copy
        v.retain(|i| i.id != insight.id);
        v.push(insight.clone());
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
        Ok(())
    }

    async fn find_by_domain(&self, domain: Domain) -> Result<Vec<Insight>> {
        let v = self.lock();
        Ok(v.iter().filter(|i| i.domain == domain).cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Insight>> {
        let v = self.lock();
        Ok(v.iter().find(|i| i.id == id).cloned())
    }

    async fn update(&self, insight: &Insight) -> Result<()> {
        let mut v = self.lock();
        let slot = v
            .iter_mut()
            .find(|i| i.id == insight.id)
            .ok_or_else(|| anyhow!("insight {} not found", insight.id))?;
        *slot = insight.clone();
        Ok(())
    }
}
