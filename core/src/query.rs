//! Lazy filter/sort views over keyed maps.
//!
//! A [`MapQuery`] walks the live backing map until an operation needs an explicit key
//! list (filter, sort, invert). From then on every operation works on that list. The
//! backing map is never mutated.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Whether `sort_by` computes each projection once up front or inside every comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionCache {
    #[default]
    Enable,
    Disable,
}

/// Chainable query over a `HashMap`.
#[derive(Debug)]
pub struct MapQuery<'a, K, V> {
    source: &'a HashMap<K, V>,
    /// Default ordering used by `sort()`, when the source has one.
    order: Option<&'a HashMap<K, usize>>,
    results: Option<Vec<K>>,
}

impl<'a, K, V> MapQuery<'a, K, V>
where
    K: Copy + Eq + Hash,
{
    pub fn new(source: &'a HashMap<K, V>) -> Self {
        Self {
            source,
            order: None,
            results: None,
        }
    }

    /// Use an explicit position map for `sort()`.
    pub fn with_order(mut self, order: &'a HashMap<K, usize>) -> Self {
        self.order = Some(order);
        self
    }

    /// Returns true once filtering or sorting has produced an explicit key list.
    pub fn is_materialized(&self) -> bool {
        self.results.is_some()
    }

    fn init_results(&mut self) -> &mut Vec<K> {
        let source = self.source;
        self.results
            .get_or_insert_with(|| source.keys().copied().collect())
    }

    // ==================== Filtering ====================

    /// Keep keys matching the predicate.
    pub fn filter(self, mut pred: impl FnMut(&K) -> bool) -> Self {
        self.filter_entry(|k, _| pred(k))
    }

    /// Keep entries whose value matches the predicate.
    pub fn filter_value(self, mut pred: impl FnMut(&V) -> bool) -> Self {
        self.filter_entry(|_, v| pred(v))
    }

    /// Keep entries matching the predicate.
    pub fn filter_entry(mut self, mut pred: impl FnMut(&K, &V) -> bool) -> Self {
        let source = self.source;
        self.init_results()
            .retain(|k| source.get(k).is_some_and(|v| pred(k, v)));
        self
    }

    /// Drop entries matching the predicate.
    pub fn filter_not(self, mut pred: impl FnMut(&K, &V) -> bool) -> Self {
        self.filter_entry(|k, v| !pred(k, v))
    }

    /// Replace the results with every backing key not currently in them.
    pub fn invert(mut self) -> Self {
        let full = self.source.len();
        match self.results.take() {
            None => self.results = Some(Vec::new()),
            Some(current) if current.len() == full => self.results = Some(Vec::new()),
            Some(current) => {
                let excluded: HashSet<K> = current.into_iter().collect();
                self.results = Some(
                    self.source
                        .keys()
                        .filter(|k| !excluded.contains(k))
                        .copied()
                        .collect(),
                );
            }
        }
        self
    }

    // ==================== Sorting ====================

    /// Sort with a comparator on keys.
    pub fn sort_with(mut self, cmp: impl FnMut(&K, &K) -> Ordering) -> Self {
        self.init_results().sort_by(cmp);
        self
    }

    /// Sort by a projected value.
    pub fn sort_by<P: Ord>(
        self,
        projection: impl FnMut(&K, &V) -> P,
        cache: ProjectionCache,
    ) -> Self {
        self.sort_by_with(projection, P::cmp, cache)
    }

    /// Sort by a projected value with a custom comparator.
    pub fn sort_by_with<P>(
        mut self,
        mut projection: impl FnMut(&K, &V) -> P,
        mut cmp: impl FnMut(&P, &P) -> Ordering,
        cache: ProjectionCache,
    ) -> Self {
        let source = self.source;
        let results = self.init_results();
        match cache {
            ProjectionCache::Enable => {
                let mut keyed: Vec<(P, K)> = results
                    .iter()
                    .filter_map(|k| source.get(k).map(|v| (projection(k, v), *k)))
                    .collect();
                keyed.sort_by(|a, b| cmp(&a.0, &b.0));
                *results = keyed.into_iter().map(|(_, k)| k).collect();
            }
            ProjectionCache::Disable => {
                results.retain(|k| source.contains_key(k));
                results.sort_by(|a, b| match (source.get(a), source.get(b)) {
                    (Some(va), Some(vb)) => cmp(&projection(a, va), &projection(b, vb)),
                    _ => Ordering::Equal,
                });
            }
        }
        self
    }

    /// `sort_with`, only when `condition` holds.
    pub fn sort_if(self, condition: bool, cmp: impl FnMut(&K, &K) -> Ordering) -> Self {
        if condition {
            self.sort_with(cmp)
        } else {
            self
        }
    }

    /// `sort_by`, only when `condition` holds.
    pub fn sort_by_if<P: Ord>(
        self,
        condition: bool,
        projection: impl FnMut(&K, &V) -> P,
        cache: ProjectionCache,
    ) -> Self {
        if condition {
            self.sort_by(projection, cache)
        } else {
            self
        }
    }

    // ==================== Reading ====================

    pub fn for_each(&self, mut f: impl FnMut(&K, &V)) {
        match &self.results {
            Some(keys) => {
                for k in keys {
                    if let Some(v) = self.source.get(k) {
                        f(k, v);
                    }
                }
            }
            None => {
                for (k, v) in self.source {
                    f(k, v);
                }
            }
        }
    }

    /// First entry for which `f` returns a value.
    pub fn find<R>(&self, mut f: impl FnMut(&K, &V) -> Option<R>) -> Option<R> {
        match &self.results {
            Some(keys) => keys
                .iter()
                .find_map(|k| self.source.get(k).and_then(|v| f(k, v))),
            None => self.source.iter().find_map(|(k, v)| f(k, v)),
        }
    }

    /// Materialized key list.
    pub fn get(mut self) -> Vec<K> {
        self.init_results();
        self.results.unwrap_or_default()
    }

    /// Values of the current results, in result order.
    pub fn values(&self) -> Vec<&'a V> {
        let source = self.source;
        match &self.results {
            Some(keys) => keys.iter().filter_map(|k| source.get(k)).collect(),
            None => source.values().collect(),
        }
    }

    pub fn num(&self) -> usize {
        match &self.results {
            Some(keys) => keys.len(),
            None => self.source.len(),
        }
    }
}

impl<'a, K, V> MapQuery<'a, K, V>
where
    K: Copy + Eq + Hash + Ord,
{
    /// Default sort: the source's explicit order if it has one, otherwise key order.
    pub fn sort(mut self) -> Self {
        let order = self.order;
        let results = self.init_results();
        match order {
            Some(order) => results.sort_by_key(|k| order.get(k).copied().unwrap_or(usize::MAX)),
            None => results.sort(),
        }
        self
    }
}
