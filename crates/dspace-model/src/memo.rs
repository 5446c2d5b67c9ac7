use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;

use crate::ids::LayerId;

/// Results of one query, keyed by the layer selection they were computed for.
///
/// Lives inside a single immutable aggregate, so entries never go stale.
pub(crate) struct SelectionMemo<V> {
    entries: Mutex<HashMap<Vec<LayerId>, V>>,
}

impl<V: Clone> SelectionMemo<V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `layers`, computing it on first use.
    ///
    /// The lock is not held while computing; queries built on other queries
    /// re-enter the cache.
    pub(crate) fn get_or_compute(&self, layers: &[LayerId], compute: impl FnOnce() -> V) -> V {
        if let Some(hit) = self.entries.lock().get(layers) {
            return hit.clone();
        }
        let value = compute();
        self.entries
            .lock()
            .entry(layers.to_vec())
            .or_insert(value)
            .clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().len()
    }
}

impl<V: Clone> Default for SelectionMemo<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for SelectionMemo<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionMemo")
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}
