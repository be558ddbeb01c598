//! Published candidate sets.
//!
//! The model loader owns a [`CandidateSource`] and publishes a fresh,
//! immutable list every time the set of pickable objects changes. Readers
//! take a [`CandidateSet`] snapshot and compare versions once per tick, so
//! nothing ever iterates a list that is being mutated.

use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

/// Immutable snapshot of the pickable objects, in publication order
#[derive(Debug, Clone)]
pub struct CandidateSet {
    version: u64,
    ids: Arc<[Uuid]>,
}

impl Default for CandidateSet {
    fn default() -> Self {
        Self {
            version: 0,
            ids: Arc::from(Vec::new()),
        }
    }
}

impl CandidateSet {
    /// Publication counter, `0` for the initial empty set
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }
}

/// Shared publisher handle. Cloning shares the same underlying slot.
#[derive(Debug, Clone, Default)]
pub struct CandidateSource {
    current: Arc<RwLock<CandidateSet>>,
}

impl CandidateSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidate list, returns the new version
    pub fn publish(&self, ids: impl IntoIterator<Item = Uuid>) -> u64 {
        let mut current = self.current.write();
        let version = current.version + 1;
        *current = CandidateSet {
            version,
            ids: ids.into_iter().collect(),
        };
        tracing::debug!("Published candidate set v{} ({} objects)", version, current.len());
        version
    }

    /// Current snapshot (cheap: clones an `Arc`)
    pub fn snapshot(&self) -> CandidateSet {
        self.current.read().clone()
    }

    pub fn version(&self) -> u64 {
        self.current.read().version
    }
}
