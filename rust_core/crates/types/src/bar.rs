use crate::num::{Num, NumFactory, NumKind};

/// One OHLCV observation.
/// `timestamp_ns` is the **open time** of the period.
#[derive(Debug, Clone, Copy)]
pub struct Bar<K> {
    /// Unix epoch nanoseconds UTC (open time)
    pub timestamp_ns: i64,
    /// Open price
    pub open: Num<K>,
    /// High price
    pub high: Num<K>,
    /// Low price
    pub low: Num<K>,
    /// Close price
    pub close: Num<K>,
    /// Traded volume
    pub volume: Num<K>,
    /// Traded amount (sum of volume * price)
    pub amount: Num<K>,
    /// Number of trades
    pub trades: u64,
}

impl<K: NumKind> Bar<K> {
    /// Creates a bar from values of one representation.
    #[must_use]
    pub fn new(
        timestamp_ns: i64,
        open: Num<K>,
        high: Num<K>,
        low: Num<K>,
        close: Num<K>,
        volume: Num<K>,
    ) -> Self {
        Self {
            timestamp_ns,
            open,
            high,
            low,
            close,
            volume,
            amount: NumFactory::<K>::new().zero(),
            trades: 0,
        }
    }

    /// Creates a bar from raw `f64` prices through `factory`.
    #[must_use]
    pub fn from_f64(
        factory: NumFactory<K>,
        timestamp_ns: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self::new(
            timestamp_ns,
            factory.num_of(open),
            factory.num_of(high),
            factory.num_of(low),
            factory.num_of(close),
            factory.num_of(volume),
        )
    }

    /// Creates an empty bar whose prices are filled by [`Bar::add_price`].
    #[must_use]
    pub fn empty(timestamp_ns: i64) -> Self {
        let factory = NumFactory::<K>::new();
        Self {
            timestamp_ns,
            open: Num::NaN,
            high: Num::NaN,
            low: Num::NaN,
            close: Num::NaN,
            volume: factory.zero(),
            amount: factory.zero(),
            trades: 0,
        }
    }

    /// Updates close, and extends high/low, with a new price.
    pub fn add_price(&mut self, price: Num<K>) {
        if self.open.is_nan() {
            self.open = price;
        }
        if self.high.is_nan() || self.high.is_less_than(&price) {
            self.high = price;
        }
        if self.low.is_nan() || self.low.is_greater_than(&price) {
            self.low = price;
        }
        self.close = price;
    }

    /// Records a trade: adds volume and amount, bumps the trade count, moves the price.
    pub fn add_trade(&mut self, volume: Num<K>, price: Num<K>) {
        self.volume = self.volume.plus(volume);
        self.amount = self.amount.plus(volume.multiplied_by(price));
        self.trades += 1;
        self.add_price(price);
    }

    /// `close > open`
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close.is_greater_than(&self.open)
    }

    /// `close < open`
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close.is_less_than(&self.open)
    }
}

impl<K: NumKind> PartialEq for Bar<K> {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp_ns == other.timestamp_ns
            && self.open == other.open
            && self.high == other.high
            && self.low == other.low
            && self.close == other.close
            && self.volume == other.volume
            && self.amount == other.amount
            && self.trades == other.trades
    }
}
