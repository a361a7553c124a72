//! Process-wide, shape-keyed cache of neighbour-pair lists.
//!
//! Grids of equal [`Shape`] resolve to the same `Arc<NeighbourPairs>`.
//! The cache holds only `Weak` handles, so a topology is dropped once the
//! last grid using it goes away and rebuilt on next demand.

use crate::neighbours::NeighbourPairs;
use coulomb_core::Shape;
use indexmap::IndexMap;
use std::sync::{Arc, LazyLock, Mutex, PoisonError, Weak};

static PAIR_CACHE: LazyLock<Mutex<IndexMap<Shape, Weak<NeighbourPairs>>>> =
    LazyLock::new(|| Mutex::new(IndexMap::new()));

/// Return the shared pair list for `shape`, building it on first use.
pub fn shared_pairs(shape: Shape) -> Arc<NeighbourPairs> {
    // A panic while building cannot leave a half-written entry behind, so
    // a poisoned lock is still safe to use.
    let mut cache = PAIR_CACHE.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(live) = cache.get(&shape).and_then(Weak::upgrade) {
        return live;
    }

    cache.retain(|_, w| w.strong_count() > 0);
    let built = Arc::new(NeighbourPairs::build(shape));
    cache.insert(shape, Arc::downgrade(&built));
    built
}

/// Number of shapes whose topology is currently alive in the cache.
pub fn live_shape_count() -> usize {
    let cache = PAIR_CACHE.lock().unwrap_or_else(PoisonError::into_inner);
    cache.values().filter(|w| w.strong_count() > 0).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_shape_shares_one_list() {
        let shape = Shape::new(7, 11).unwrap();
        let a = shared_pairs(shape);
        let b = shared_pairs(shape);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn different_shapes_get_different_lists() {
        let a = shared_pairs(Shape::new(6, 13).unwrap());
        let b = shared_pairs(Shape::new(13, 6).unwrap());
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), b.len(), "transposed shapes have equal pair counts");
    }

    #[test]
    fn dropped_topology_is_rebuilt() {
        let shape = Shape::new(9, 17).unwrap();
        let first = shared_pairs(shape);
        let weak = Arc::downgrade(&first);
        drop(first);
        assert!(weak.upgrade().is_none());

        let again = shared_pairs(shape);
        assert_eq!(again.shape(), shape);
        assert!(live_shape_count() >= 1);
    }
}
