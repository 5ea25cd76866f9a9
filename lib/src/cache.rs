use crate::extract::extract_text;
use crate::model::ShapeGraph;
use crate::occurrence::TextOccurrence;
use log::trace;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, Weak};

type Occurrences = Arc<[TextOccurrence]>;

struct CacheSlot<G: ?Sized> {
    // Keeps the allocation (and so the address used as key) from being reused
    // while the slot exists.
    model: Weak<G>,
    occurrences: Arc<OnceLock<Occurrences>>,
}

/// Extracted text per model instance.
///
/// Entries are keyed by the identity of the `Arc` holding the model, never by
/// its contents: two equal models built separately get separate entries.
/// A dropped model's entry keeps its occurrences alive until the cache is
/// next touched; [`OccurrenceCache::prune`] releases them on demand.
pub struct OccurrenceCache<G: ShapeGraph + ?Sized> {
    entries: Mutex<HashMap<usize, CacheSlot<G>>>,
}

fn prune_dead<G: ?Sized>(entries: &mut HashMap<usize, CacheSlot<G>>) -> usize {
    let before = entries.len();
    entries.retain(|_, slot| slot.model.strong_count() > 0);
    let pruned = before - entries.len();
    if pruned > 0 {
        trace!("Pruned {} cache entries for dropped models", pruned);
    }
    pruned
}

fn identity<G: ?Sized>(model: &Arc<G>) -> usize {
    Arc::as_ptr(model) as *const () as usize
}

impl<G: ShapeGraph + ?Sized> OccurrenceCache<G> {
    pub fn new() -> Self {
        OccurrenceCache {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Extracts the text of `model` on first use and returns the cached
    /// sequence afterwards.
    pub fn get_or_extract(&self, model: &Arc<G>) -> Occurrences {
        self.get_or_compute(model, |graph| extract_text(graph))
    }

    /// Returns the cached sequence for `model`, running `compute` if there is
    /// none. Concurrent callers for the same model wait for a single
    /// computation and all observe its result.
    pub fn get_or_compute<F>(&self, model: &Arc<G>, compute: F) -> Occurrences
    where
        F: FnOnce(&G) -> Vec<TextOccurrence>,
    {
        let cell = {
            let mut entries = self.entries.lock();
            prune_dead(&mut *entries);
            entries
                .entry(identity(model))
                .or_insert_with(|| CacheSlot {
                    model: Arc::downgrade(model),
                    occurrences: Arc::new(OnceLock::new()),
                })
                .occurrences
                .clone()
        };

        if let Some(hit) = cell.get() {
            trace!("Text occurrence cache hit ({} occurrences)", hit.len());
            return hit.clone();
        }
        cell.get_or_init(|| compute(model.as_ref()).into()).clone()
    }

    /// Cached sequence for `model`, if it has been computed.
    pub fn get(&self, model: &Arc<G>) -> Option<Occurrences> {
        let mut entries = self.entries.lock();
        prune_dead(&mut *entries);
        entries
            .get(&identity(model))
            .and_then(|slot| slot.occurrences.get().cloned())
    }

    pub fn evict(&self, model: &Arc<G>) -> bool {
        self.entries.lock().remove(&identity(model)).is_some()
    }

    /// Drops the entries of models that no longer exist and returns how many
    /// were removed.
    pub fn prune(&self) -> usize {
        prune_dead(&mut *self.entries.lock())
    }

    pub fn len(&self) -> usize {
        let mut entries = self.entries.lock();
        prune_dead(&mut *entries);
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl<G: ShapeGraph + ?Sized> Default for OccurrenceCache<G> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Model, Shape, ShapeType};
    use crate::types::ShapeId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn model() -> Arc<Model> {
        Arc::new(
            Model::builder()
                .add_shape(Shape::new(ShapeId::new("example", "Widget"), ShapeType::String))
                .unwrap()
                .build(),
        )
    }

    #[test]
    fn computes_once_per_model() {
        let cache = OccurrenceCache::new();
        let model = model();
        let calls = AtomicUsize::new(0);
        let compute = |graph: &Model| {
            calls.fetch_add(1, Ordering::SeqCst);
            extract_text(graph)
        };
        let first = cache.get_or_compute(&model, compute);
        let second = cache.get_or_compute(&model, compute);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn equal_models_are_cached_separately() {
        let cache = OccurrenceCache::new();
        let (a, b) = (model(), model());
        let first = cache.get_or_extract(&a);
        let second = cache.get_or_extract(&b);
        assert_eq!(first, second);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn dropped_models_are_pruned() {
        let cache = OccurrenceCache::new();
        let kept = model();
        cache.get_or_extract(&kept);
        {
            let dropped = model();
            cache.get_or_extract(&dropped);
            assert_eq!(cache.len(), 2);
        }
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&kept).is_some());
    }

    #[test]
    fn prune_releases_dropped_models() {
        let cache = OccurrenceCache::new();
        let dropped = model();
        let occurrences = cache.get_or_extract(&dropped);
        let weak = Arc::downgrade(&dropped);
        drop(dropped);
        assert_eq!(weak.strong_count(), 0);
        assert_eq!(Arc::strong_count(&occurrences), 2);

        assert_eq!(cache.prune(), 1);
        assert_eq!(cache.prune(), 0);
        assert_eq!(Arc::strong_count(&occurrences), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn evict_and_clear() {
        let cache = OccurrenceCache::new();
        let model = model();
        assert!(cache.get(&model).is_none());
        cache.get_or_extract(&model);
        assert!(cache.get(&model).is_some());
        assert!(cache.evict(&model));
        assert!(!cache.evict(&model));
        cache.get_or_extract(&model);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_first_access_computes_once() {
        let cache = OccurrenceCache::new();
        let model = model();
        let calls = AtomicUsize::new(0);
        let results: Vec<Occurrences> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        cache.get_or_compute(&model, |graph| {
                            calls.fetch_add(1, Ordering::SeqCst);
                            std::thread::sleep(std::time::Duration::from_millis(10));
                            extract_text(graph)
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
    }
}
