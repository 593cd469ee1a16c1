//! Memoization engine.
//!
//! [`CachedIndicator`] wraps a [`Calculator`] and stores each value it
//! computes for a closed bar, so that every node of an indicator DAG computes
//! every closed index at most once. The open bar (the last index of the
//! series) is always recomputed, since its bar may still change.
//!
//! Each node guards its store with a re-entrant lock: a calculator may call
//! back into its own node (recursive formulas) on the same thread, while
//! concurrent callers for the same node are serialized. Nodes only lock their
//! dependencies while holding their own lock, and dependencies form a DAG, so
//! lock acquisition order follows the graph.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use lumen_types::{BarSeries, CacheConfig, Num, NumKind};
use parking_lot::ReentrantMutex;

use crate::error::IndicatorError;
use crate::traits::{CacheMode, Calculator, Indicator};

/// Stored values of one node, indexed by bar index.
#[derive(Debug)]
struct CacheStore<K> {
    values: Vec<Option<Num<K>>>,
    highest: Option<usize>,
    in_flight: Vec<usize>,
}

impl<K: NumKind> CacheStore<K> {
    fn new() -> Self {
        Self {
            values: Vec::new(),
            highest: None,
            in_flight: Vec::new(),
        }
    }

    fn get(&self, index: usize) -> Option<Num<K>> {
        self.values.get(index).copied().flatten()
    }

    fn insert(&mut self, index: usize, value: Num<K>) {
        if index >= self.values.len() {
            self.values.resize(index + 1, None);
        }
        self.values[index] = Some(value);
        self.highest = Some(self.highest.map_or(index, |h| h.max(index)));
    }

    fn count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Memoized indicator around a [`Calculator`].
pub struct CachedIndicator<K, C> {
    calculator: C,
    name: String,
    mode: CacheMode,
    recursion_threshold: usize,
    store: ReentrantMutex<RefCell<CacheStore<K>>>,
}

impl<K: NumKind, C: Calculator<K>> CachedIndicator<K, C> {
    /// Wraps `calculator` with default cache settings.
    #[must_use]
    pub fn new(calculator: C) -> Self {
        Self::with_config(calculator, &CacheConfig::default())
    }

    /// Wraps `calculator`.
    #[must_use]
    pub fn with_config(calculator: C, config: &CacheConfig) -> Self {
        let name = calculator.name();
        let mode = calculator.cache_mode();
        Self {
            calculator,
            name,
            mode,
            recursion_threshold: config.recursion_threshold,
            store: ReentrantMutex::new(RefCell::new(CacheStore::new())),
        }
    }

    /// The wrapped formula.
    #[must_use]
    pub fn calculator(&self) -> &C {
        &self.calculator
    }

    /// Cache fill strategy.
    #[must_use]
    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    /// Number of stored values.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.store.lock().borrow().count()
    }

    /// Highest stored index.
    #[must_use]
    pub fn highest_cached_index(&self) -> Option<usize> {
        self.store.lock().borrow().highest
    }

    /// Returns `true` if a value is stored for `index`.
    #[must_use]
    pub fn is_cached(&self, index: usize) -> bool {
        self.store.lock().borrow().get(index).is_some()
    }

    /// Runs the calculator for `index`, rejecting re-entry for the same index.
    fn evaluate(
        &self,
        store: &RefCell<CacheStore<K>>,
        index: usize,
    ) -> Result<Num<K>, IndicatorError> {
        {
            let mut store = store.borrow_mut();
            if store.in_flight.contains(&index) {
                tracing::warn!(indicator = %self.name, index, "circular evaluation");
                return Err(IndicatorError::CircularEvaluation {
                    indicator: self.name.clone(),
                    index,
                });
            }
            store.in_flight.push(index);
        }

        let result = self.calculator.calculate(self, index);

        store.borrow_mut().in_flight.retain(|&i| i != index);
        result
    }

    /// Fills `[highest + 1, index)` in ascending order when the gap exceeds
    /// the recursion threshold, keeping the call depth of recursive formulas
    /// bounded.
    fn fill_forward(
        &self,
        store: &RefCell<CacheStore<K>>,
        index: usize,
    ) -> Result<(), IndicatorError> {
        let start = store.borrow().highest.map_or(0, |h| h + 1);
        if index <= start || index - start <= self.recursion_threshold {
            return Ok(());
        }
        tracing::debug!(indicator = %self.name, from = start, to = index, "filling cache forward");
        for i in start..index {
            self.value(i)?;
        }
        Ok(())
    }
}

impl<K: NumKind, C: Calculator<K>> Indicator<K> for CachedIndicator<K, C> {
    fn value(&self, index: usize) -> Result<Num<K>, IndicatorError> {
        let series = self.calculator.series();
        series.check_index(index)?;

        let guard = self.store.lock();
        let store: &RefCell<CacheStore<K>> = &guard;

        if series.is_open_index(index) {
            tracing::trace!(indicator = %self.name, index, "open bar, not cached");
            return self.evaluate(store, index);
        }

        let cached = store.borrow().get(index);
        if let Some(value) = cached {
            return Ok(value);
        }

        if self.mode == CacheMode::Recursive {
            self.fill_forward(store, index)?;
        }

        let value = self.evaluate(store, index)?;
        store.borrow_mut().insert(index, value);
        Ok(value)
    }

    fn series(&self) -> &Arc<BarSeries<K>> {
        self.calculator.series()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<K: NumKind, C: Calculator<K>> fmt::Debug for CachedIndicator<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedIndicator")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("recursion_threshold", &self.recursion_threshold)
            .field("cached", &self.cached_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_types::{Bar, DOUBLE, SeriesError};
    use parking_lot::Mutex;
    use std::collections::HashMap;

    fn series_of(closes: &[f64]) -> Arc<BarSeries<f64>> {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::from_f64(DOUBLE, i as i64, c, c, c, c, 1.0))
            .collect();
        Arc::new(BarSeries::with_bars("test", bars).unwrap())
    }

    /// Doubles the close and counts calls per index.
    struct Doubling {
        series: Arc<BarSeries<f64>>,
        calls: CallLog,
    }

    impl Calculator<f64> for Doubling {
        fn series(&self) -> &Arc<BarSeries<f64>> {
            &self.series
        }

        fn calculate(
            &self,
            _this: &dyn Indicator<f64>,
            index: usize,
        ) -> Result<Num<f64>, IndicatorError> {
            *self.calls.lock().entry(index).or_insert(0) += 1;
            let bar = self.series.bar(index)?;
            Ok(bar.close * DOUBLE.num_of(2))
        }

        fn name(&self) -> String {
            "Doubling".to_string()
        }
    }

    /// Running sum of closes through its own previous value.
    struct RunningSum {
        series: Arc<BarSeries<f64>>,
        mode: CacheMode,
    }

    impl Calculator<f64> for RunningSum {
        fn series(&self) -> &Arc<BarSeries<f64>> {
            &self.series
        }

        fn calculate(
            &self,
            this: &dyn Indicator<f64>,
            index: usize,
        ) -> Result<Num<f64>, IndicatorError> {
            let close = self.series.bar(index)?.close;
            if index == 0 {
                return Ok(close);
            }
            Ok(this.value(index - 1)? + close)
        }

        fn name(&self) -> String {
            "RunningSum".to_string()
        }

        fn cache_mode(&self) -> CacheMode {
            self.mode
        }
    }

    /// Asks itself for the index it is computing.
    struct SelfLoop {
        series: Arc<BarSeries<f64>>,
    }

    impl Calculator<f64> for SelfLoop {
        fn series(&self) -> &Arc<BarSeries<f64>> {
            &self.series
        }

        fn calculate(
            &self,
            this: &dyn Indicator<f64>,
            index: usize,
        ) -> Result<Num<f64>, IndicatorError> {
            this.value(index)
        }

        fn name(&self) -> String {
            "SelfLoop".to_string()
        }
    }

    type CallLog = Arc<Mutex<HashMap<usize, usize>>>;

    fn doubling(series: &Arc<BarSeries<f64>>) -> (CachedIndicator<f64, Doubling>, CallLog) {
        let calls = Arc::new(Mutex::new(HashMap::new()));
        let node = CachedIndicator::new(Doubling {
            series: Arc::clone(series),
            calls: Arc::clone(&calls),
        });
        (node, calls)
    }

    #[test]
    fn test_closed_index_computed_once() {
        let series = series_of(&[1.0, 2.0, 3.0]);
        let (node, calls) = doubling(&series);

        assert_eq!(node.value(1).unwrap(), DOUBLE.num_of(4));
        assert_eq!(node.value(1).unwrap(), DOUBLE.num_of(4));
        assert_eq!(calls.lock()[&1], 1);
        assert!(node.is_cached(1));
        assert_eq!(node.cached_count(), 1);
    }

    #[test]
    fn test_open_index_recomputed() {
        let series = series_of(&[1.0, 2.0, 3.0]);
        let (node, calls) = doubling(&series);

        assert_eq!(node.value(2).unwrap(), DOUBLE.num_of(6));
        assert!(!node.is_cached(2));

        series.add_price(DOUBLE.num_of(5)).unwrap();
        assert_eq!(node.value(2).unwrap(), DOUBLE.num_of(10));
        assert_eq!(calls.lock()[&2], 2);
    }

    #[test]
    fn test_formerly_open_index_cached_after_append() {
        let series = series_of(&[1.0, 2.0]);
        let (node, calls) = doubling(&series);

        node.value(1).unwrap();
        series
            .add_bar(Bar::from_f64(DOUBLE, 2, 7.0, 7.0, 7.0, 7.0, 1.0))
            .unwrap();
        node.value(1).unwrap();
        node.value(1).unwrap();
        assert_eq!(calls.lock()[&1], 2);
        assert!(node.is_cached(1));
    }

    #[test]
    fn test_out_of_range_not_cached() {
        let series = series_of(&[1.0, 2.0]);
        let (node, calls) = doubling(&series);

        let err = node.value(2).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::Series(SeriesError::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert!(node.value(usize::MAX).unwrap_err().is_out_of_bounds());
        assert!(calls.lock().is_empty());
        assert_eq!(node.cached_count(), 0);
    }

    #[test]
    fn test_self_reference_is_circular() {
        let series = series_of(&[1.0, 2.0, 3.0]);
        let node = CachedIndicator::new(SelfLoop {
            series: Arc::clone(&series),
        });

        let err = node.value(0).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::CircularEvaluation {
                indicator: "SelfLoop".to_string(),
                index: 0
            }
        );
        // The in-flight marker is cleared, so the error repeats rather than hanging.
        assert!(matches!(
            node.value(0),
            Err(IndicatorError::CircularEvaluation { .. })
        ));
        assert_eq!(node.cached_count(), 0);
    }

    #[test]
    fn test_recursive_fill_forward() {
        let closes = vec![1.0; 500];
        let series = series_of(&closes);
        let node = CachedIndicator::with_config(
            RunningSum {
                series: Arc::clone(&series),
                mode: CacheMode::Recursive,
            },
            &CacheConfig {
                recursion_threshold: 10,
            },
        );

        assert_eq!(node.value(400).unwrap(), DOUBLE.num_of(401));
        assert_eq!(node.highest_cached_index(), Some(400));
        assert_eq!(node.cached_count(), 401);
    }

    #[test]
    fn test_recursive_small_gap_uses_call_chain() {
        let series = series_of(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let node = CachedIndicator::new(RunningSum {
            series: Arc::clone(&series),
            mode: CacheMode::Recursive,
        });
        assert_eq!(node.value(3).unwrap(), DOUBLE.num_of(10));
        assert_eq!(node.cached_count(), 4);
    }

    #[test]
    fn test_concurrent_callers_compute_once() {
        let closes: Vec<f64> = (0..64).map(f64::from).collect();
        let series = series_of(&closes);
        let (node, calls) = doubling(&series);
        let node = Arc::new(node);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let node = Arc::clone(&node);
                scope.spawn(move || {
                    for i in 0..63 {
                        assert_eq!(node.value(i).unwrap(), DOUBLE.num_of(2.0 * i as f64));
                    }
                });
            }
        });

        let calls = calls.lock();
        assert!(calls.values().all(|&n| n == 1));
        assert_eq!(calls.len(), 63);
    }
}
