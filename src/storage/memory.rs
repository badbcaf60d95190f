//! In-memory chart store

use super::traits::{ChartStore, StorageResult};
use crate::chart::{MedicalChart, UserId};
use dashmap::DashMap;

/// Volatile store for tests and throwaway servers
#[derive(Debug, Default)]
pub struct MemoryStore {
    charts: DashMap<UserId, MedicalChart>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            charts: DashMap::new(),
        }
    }

    /// Number of stored charts
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

impl ChartStore for MemoryStore {
    fn load(&self, id: &UserId) -> StorageResult<Option<MedicalChart>> {
        Ok(self.charts.get(id).map(|r| r.clone()))
    }

    fn save(&self, id: &UserId, chart: &MedicalChart) -> StorageResult<()> {
        self.charts.insert(id.clone(), chart.clone());
        Ok(())
    }

    fn delete(&self, id: &UserId) -> StorageResult<bool> {
        Ok(self.charts.remove(id).is_some())
    }

    fn list(&self) -> StorageResult<Vec<UserId>> {
        let mut ids: Vec<UserId> = self.charts.iter().map(|r| r.key().clone()).collect();
        ids.sort();
        Ok(ids)
    }

    fn contains(&self, id: &UserId) -> StorageResult<bool> {
        Ok(self.charts.contains_key(id))
    }
}
