//! Append-only bar series.

use std::fmt;

use parking_lot::RwLock;

use crate::bar::Bar;
use crate::error::SeriesError;
use crate::num::{Num, NumFactory, NumKind};

/// Ordered, index-addressable sequence of bars of one numeric representation.
///
/// Committed bars never change, except the last one: it is the *open* bar
/// and may still be updated in place until the next bar is appended. Only
/// the owner of the series appends; indicators only read.
pub struct BarSeries<K> {
    name: String,
    factory: NumFactory<K>,
    bars: RwLock<Vec<Bar<K>>>,
    expected_len: Option<usize>,
}

impl<K: NumKind> BarSeries<K> {
    /// Creates an empty series.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            factory: NumFactory::new(),
            bars: RwLock::new(Vec::new()),
            expected_len: None,
        }
    }

    /// Creates a series from bars in timestamp order.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NonMonotonicTimestamp`] if timestamps do not
    /// strictly increase.
    pub fn with_bars(name: impl Into<String>, bars: Vec<Bar<K>>) -> Result<Self, SeriesError> {
        for (index, pair) in bars.windows(2).enumerate() {
            if pair[1].timestamp_ns <= pair[0].timestamp_ns {
                return Err(SeriesError::NonMonotonicTimestamp {
                    index: index + 1,
                    timestamp_ns: pair[1].timestamp_ns,
                    previous_ns: pair[0].timestamp_ns,
                });
            }
        }
        Ok(Self {
            name: name.into(),
            factory: NumFactory::new(),
            bars: RwLock::new(bars),
            expected_len: None,
        })
    }

    /// Announces how many bars the series will eventually hold.
    ///
    /// Indices in `[len, expected)` are reported as not yet available instead
    /// of out of bounds.
    #[must_use]
    pub fn with_expected_len(mut self, expected: usize) -> Self {
        self.expected_len = Some(expected);
        self
    }

    /// Series name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Factory governing every value in this series.
    #[must_use]
    pub fn factory(&self) -> NumFactory<K> {
        self.factory
    }

    /// Number of committed bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.read().len()
    }

    /// Returns `true` if no bar has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.read().is_empty()
    }

    /// Announced final length, if any.
    #[must_use]
    pub fn expected_len(&self) -> Option<usize> {
        self.expected_len
    }

    /// Index of the open bar.
    #[must_use]
    pub fn end_index(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    /// Returns `true` if `index` is the open bar, whose values may still change.
    #[must_use]
    pub fn is_open_index(&self, index: usize) -> bool {
        self.end_index() == Some(index)
    }

    /// Checks that `index` refers to a committed bar.
    ///
    /// # Errors
    ///
    /// - [`SeriesError::NotYetAvailable`] inside the announced horizon.
    /// - [`SeriesError::IndexOutOfBounds`] otherwise.
    pub fn check_index(&self, index: usize) -> Result<(), SeriesError> {
        let len = self.len();
        if index < len {
            return Ok(());
        }
        match self.expected_len {
            Some(expected) if index < expected => Err(SeriesError::NotYetAvailable {
                index,
                len,
                expected,
            }),
            _ => Err(SeriesError::IndexOutOfBounds { index, len }),
        }
    }

    /// Bar at `index`.
    ///
    /// # Errors
    ///
    /// Same as [`BarSeries::check_index`].
    pub fn bar(&self, index: usize) -> Result<Bar<K>, SeriesError> {
        if let Some(bar) = self.bars.read().get(index) {
            return Ok(*bar);
        }
        self.check_index(index)?;
        Err(SeriesError::IndexOutOfBounds {
            index,
            len: self.len(),
        })
    }

    /// First committed bar.
    #[must_use]
    pub fn first_bar(&self) -> Option<Bar<K>> {
        self.bars.read().first().copied()
    }

    /// The open bar.
    #[must_use]
    pub fn last_bar(&self) -> Option<Bar<K>> {
        self.bars.read().last().copied()
    }

    /// Appends a bar; the previous open bar becomes closed.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NonMonotonicTimestamp`] if the bar does not
    /// start after the current open bar.
    pub fn add_bar(&self, bar: Bar<K>) -> Result<(), SeriesError> {
        let mut bars = self.bars.write();
        if let Some(last) = bars.last() {
            if bar.timestamp_ns <= last.timestamp_ns {
                return Err(SeriesError::NonMonotonicTimestamp {
                    index: bars.len(),
                    timestamp_ns: bar.timestamp_ns,
                    previous_ns: last.timestamp_ns,
                });
            }
        }
        bars.push(bar);
        Ok(())
    }

    /// Applies `update` to the open bar.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Empty`] if the series has no bars.
    pub fn update_last_bar(&self, update: impl FnOnce(&mut Bar<K>)) -> Result<(), SeriesError> {
        let mut bars = self.bars.write();
        let last = bars
            .last_mut()
            .ok_or_else(|| SeriesError::Empty(self.name.clone()))?;
        update(last);
        Ok(())
    }

    /// Moves the open bar's price.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Empty`] if the series has no bars.
    pub fn add_price(&self, price: Num<K>) -> Result<(), SeriesError> {
        self.update_last_bar(|bar| bar.add_price(price))
    }

    /// Records a trade on the open bar.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Empty`] if the series has no bars.
    pub fn add_trade(&self, volume: Num<K>, price: Num<K>) -> Result<(), SeriesError> {
        self.update_last_bar(|bar| bar.add_trade(volume, price))
    }
}

impl<K> fmt::Debug for BarSeries<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarSeries")
            .field("name", &self.name)
            .field("representation", &std::any::type_name::<K>())
            .field("len", &self.bars.read().len())
            .field("expected_len", &self.expected_len)
            .finish()
    }
}
