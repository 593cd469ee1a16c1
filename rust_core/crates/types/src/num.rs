//! Numeric values with a pluggable representation.
//!
//! A [`Num`] is either a concrete value of some representation `K` (see
//! [`NumKind`]) or the NaN sentinel. NaN absorbs every arithmetic operation and
//! answers `false` to every predicate, except [`Num::is_nan`] and NaN-to-NaN
//! equality. Values of different representations are different types, so they
//! cannot be mixed by accident.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, MathematicalOps};

use crate::error::NumError;

/// Capability set of a concrete numeric representation.
///
/// Checked operations return `None` when the result is undefined or cannot
/// be represented; [`Num`] maps that to NaN.
pub trait NumKind:
    Copy + PartialEq + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Representation name used in diagnostics.
    const NAME: &'static str;

    /// Converts a float literal.
    fn from_f64(value: f64) -> Option<Self>;
    /// Converts an integer literal.
    fn from_i64(value: i64) -> Option<Self>;
    /// Parses a textual literal.
    fn parse_str(text: &str) -> Option<Self>;
    /// Additive identity.
    fn zero() -> Self;

    /// Checked addition.
    fn checked_add(self, rhs: Self) -> Option<Self>;
    /// Checked subtraction.
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    /// Checked multiplication.
    fn checked_mul(self, rhs: Self) -> Option<Self>;
    /// Checked division, `None` for a zero divisor.
    fn checked_div(self, rhs: Self) -> Option<Self>;
    /// Checked remainder, `None` for a zero divisor.
    fn checked_rem(self, rhs: Self) -> Option<Self>;
    /// Checked integer power.
    fn checked_powi(self, exp: i32) -> Option<Self>;
    /// Checked square root, `None` for negative input.
    fn checked_sqrt(self) -> Option<Self>;
    /// Absolute value.
    fn abs_value(self) -> Self;
    /// Negation.
    fn negated(self) -> Self;

    /// Approximate conversion to `f64`.
    fn to_f64(self) -> f64;
    /// Truncating conversion to `i64`, `None` when out of range.
    fn to_i64(self) -> Option<i64>;

    /// Whether a raw value is a valid concrete number.
    fn is_defined(self) -> bool {
        true
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

impl NumKind for f64 {
    const NAME: &'static str = "double";

    fn from_f64(value: f64) -> Option<Self> {
        finite(value)
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_i64(value: i64) -> Option<Self> {
        Some(value as f64)
    }

    fn parse_str(text: &str) -> Option<Self> {
        text.trim().parse::<f64>().ok().and_then(finite)
    }

    fn zero() -> Self {
        0.0
    }

    fn checked_add(self, rhs: Self) -> Option<Self> {
        finite(self + rhs)
    }

    fn checked_sub(self, rhs: Self) -> Option<Self> {
        finite(self - rhs)
    }

    fn checked_mul(self, rhs: Self) -> Option<Self> {
        finite(self * rhs)
    }

    fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs == 0.0 { None } else { finite(self / rhs) }
    }

    fn checked_rem(self, rhs: Self) -> Option<Self> {
        if rhs == 0.0 { None } else { finite(self % rhs) }
    }

    fn checked_powi(self, exp: i32) -> Option<Self> {
        finite(self.powi(exp))
    }

    fn checked_sqrt(self) -> Option<Self> {
        if self < 0.0 { None } else { finite(self.sqrt()) }
    }

    fn abs_value(self) -> Self {
        self.abs()
    }

    fn negated(self) -> Self {
        -self
    }

    fn to_f64(self) -> f64 {
        self
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn to_i64(self) -> Option<i64> {
        let truncated = self.trunc();
        if truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
            Some(truncated as i64)
        } else {
            None
        }
    }

    fn is_defined(self) -> bool {
        self.is_finite()
    }
}

impl NumKind for Decimal {
    const NAME: &'static str = "decimal";

    /// Goes through the shortest round-trip text of `value`, so `1.2_f64`
    /// becomes exactly `1.2`.
    fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Decimal::from_str(&value.to_string())
            .ok()
            .or_else(|| <Decimal as FromPrimitive>::from_f64(value))
    }

    fn from_i64(value: i64) -> Option<Self> {
        Some(Decimal::from(value))
    }

    fn parse_str(text: &str) -> Option<Self> {
        let text = text.trim();
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
    }

    fn zero() -> Self {
        Decimal::ZERO
    }

    fn checked_add(self, rhs: Self) -> Option<Self> {
        Decimal::checked_add(self, rhs)
    }

    fn checked_sub(self, rhs: Self) -> Option<Self> {
        Decimal::checked_sub(self, rhs)
    }

    fn checked_mul(self, rhs: Self) -> Option<Self> {
        Decimal::checked_mul(self, rhs)
    }

    fn checked_div(self, rhs: Self) -> Option<Self> {
        Decimal::checked_div(self, rhs)
    }

    fn checked_rem(self, rhs: Self) -> Option<Self> {
        Decimal::checked_rem(self, rhs)
    }

    fn checked_powi(self, exp: i32) -> Option<Self> {
        MathematicalOps::checked_powi(&self, i64::from(exp))
    }

    fn checked_sqrt(self) -> Option<Self> {
        MathematicalOps::sqrt(&self)
    }

    fn abs_value(self) -> Self {
        self.abs()
    }

    fn negated(self) -> Self {
        -self
    }

    fn to_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
    }

    fn to_i64(self) -> Option<i64> {
        ToPrimitive::to_i64(&self)
    }
}

/// A numeric value of representation `K`, or the NaN sentinel.
///
/// Build concrete values through a [`NumFactory`] so that undefined raw values
/// (e.g. an infinite `f64`) become NaN.
#[derive(Clone, Copy, Debug)]
pub enum Num<K> {
    /// Concrete value.
    Value(K),
    /// Not-a-number sentinel.
    NaN,
}

/// Values backed by `f64`.
pub type DoubleNum = Num<f64>;

/// Values backed by `rust_decimal::Decimal`.
pub type DecimalNum = Num<Decimal>;

impl<K: NumKind> Num<K> {
    /// The NaN sentinel.
    pub const NAN: Self = Num::NaN;

    /// Wraps a raw representation value; undefined values become NaN.
    #[must_use]
    pub fn from_kind(value: K) -> Self {
        if value.is_defined() {
            Num::Value(value)
        } else {
            Num::NaN
        }
    }

    /// Factory of this value's representation.
    #[must_use]
    pub fn factory(&self) -> NumFactory<K> {
        NumFactory::new()
    }

    /// Returns the concrete value, `None` for NaN.
    #[must_use]
    pub fn get(&self) -> Option<K> {
        match self {
            Num::Value(v) => Some(*v),
            Num::NaN => None,
        }
    }

    /// Returns `true` only for the NaN sentinel.
    #[must_use]
    pub fn is_nan(&self) -> bool {
        matches!(self, Num::NaN)
    }

    fn combine(self, other: Self, op: impl FnOnce(K, K) -> Option<K>) -> Self {
        match (self, other) {
            (Num::Value(a), Num::Value(b)) => op(a, b).map_or(Num::NaN, Num::from_kind),
            _ => Num::NaN,
        }
    }

    fn map(self, op: impl FnOnce(K) -> Option<K>) -> Self {
        match self {
            Num::Value(v) => op(v).map_or(Num::NaN, Num::from_kind),
            Num::NaN => Num::NaN,
        }
    }

    /// `self + augend`
    #[must_use]
    pub fn plus(self, augend: Self) -> Self {
        self.combine(augend, K::checked_add)
    }

    /// `self - subtrahend`
    #[must_use]
    pub fn minus(self, subtrahend: Self) -> Self {
        self.combine(subtrahend, K::checked_sub)
    }

    /// `self * multiplicand`
    #[must_use]
    pub fn multiplied_by(self, multiplicand: Self) -> Self {
        self.combine(multiplicand, K::checked_mul)
    }

    /// `self / divisor`; NaN when the divisor is zero or NaN.
    #[must_use]
    pub fn divided_by(self, divisor: Self) -> Self {
        self.combine(divisor, K::checked_div)
    }

    /// `self % divisor`; NaN when the divisor is zero or NaN.
    #[must_use]
    pub fn remainder(self, divisor: Self) -> Self {
        self.combine(divisor, K::checked_rem)
    }

    /// `self ^ n`
    #[must_use]
    pub fn pow(self, n: i32) -> Self {
        self.map(|v| v.checked_powi(n))
    }

    /// Square root; NaN for negative values.
    #[must_use]
    pub fn sqrt(self) -> Self {
        self.map(K::checked_sqrt)
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        self.map(|v| Some(v.abs_value()))
    }

    /// Negated value.
    #[must_use]
    pub fn negate(self) -> Self {
        self.map(|v| Some(v.negated()))
    }

    /// Smaller of the two values; NaN if either is NaN.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        self.combine(other, |a, b| Some(if a <= b { a } else { b }))
    }

    /// Larger of the two values; NaN if either is NaN.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        self.combine(other, |a, b| Some(if a >= b { a } else { b }))
    }

    fn test(&self, predicate: impl FnOnce(K, K) -> bool) -> bool {
        match self {
            Num::Value(v) => predicate(*v, K::zero()),
            Num::NaN => false,
        }
    }

    fn test_with(&self, other: &Self, predicate: impl FnOnce(K, K) -> bool) -> bool {
        match (self, other) {
            (Num::Value(a), Num::Value(b)) => predicate(*a, *b),
            _ => false,
        }
    }

    /// `self == 0`
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.test(|v, zero| v == zero)
    }

    /// `self > 0`
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.test(|v, zero| v > zero)
    }

    /// `self >= 0`
    #[must_use]
    pub fn is_positive_or_zero(&self) -> bool {
        self.test(|v, zero| v >= zero)
    }

    /// `self < 0`
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.test(|v, zero| v < zero)
    }

    /// `self <= 0`
    #[must_use]
    pub fn is_negative_or_zero(&self) -> bool {
        self.test(|v, zero| v <= zero)
    }

    /// Numeric equality. NaN is equal to NaN and to nothing else.
    #[must_use]
    pub fn is_equal(&self, other: &Self) -> bool {
        match (self, other) {
            (Num::NaN, Num::NaN) => true,
            (Num::Value(a), Num::Value(b)) => a == b,
            _ => false,
        }
    }

    /// `self > other`
    #[must_use]
    pub fn is_greater_than(&self, other: &Self) -> bool {
        self.test_with(other, |a, b| a > b)
    }

    /// `self >= other`
    #[must_use]
    pub fn is_greater_than_or_equal(&self, other: &Self) -> bool {
        self.test_with(other, |a, b| a >= b)
    }

    /// `self < other`
    #[must_use]
    pub fn is_less_than(&self, other: &Self) -> bool {
        self.test_with(other, |a, b| a < b)
    }

    /// `self <= other`
    #[must_use]
    pub fn is_less_than_or_equal(&self, other: &Self) -> bool {
        self.test_with(other, |a, b| a <= b)
    }

    /// Total order over concrete values.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::NaNOperation`] if either side is NaN.
    pub fn compare_to(&self, other: &Self) -> Result<Ordering, NumError> {
        match (self, other) {
            (Num::Value(a), Num::Value(b)) => a
                .partial_cmp(b)
                .ok_or(NumError::NaNOperation("compare_to")),
            _ => Err(NumError::NaNOperation("compare_to")),
        }
    }

    /// Truncating conversion to `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::NaNOperation`] for NaN and [`NumError::OutOfRange`]
    /// when the value does not fit.
    pub fn int_value(&self) -> Result<i32, NumError> {
        match self {
            Num::NaN => Err(NumError::NaNOperation("int_value")),
            Num::Value(v) => v
                .to_i64()
                .and_then(|l| i32::try_from(l).ok())
                .ok_or_else(|| NumError::OutOfRange {
                    value: v.to_string(),
                    target: "i32",
                }),
        }
    }

    /// Truncating conversion to `i64`.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::NaNOperation`] for NaN and [`NumError::OutOfRange`]
    /// when the value does not fit.
    pub fn long_value(&self) -> Result<i64, NumError> {
        match self {
            Num::NaN => Err(NumError::NaNOperation("long_value")),
            Num::Value(v) => v.to_i64().ok_or_else(|| NumError::OutOfRange {
                value: v.to_string(),
                target: "i64",
            }),
        }
    }

    /// Approximate conversion to `f32`; `f32::NAN` for NaN.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn float_value(&self) -> f32 {
        self.double_value() as f32
    }

    /// Approximate conversion to `f64`; `f64::NAN` for NaN.
    #[must_use]
    pub fn double_value(&self) -> f64 {
        match self {
            Num::Value(v) => v.to_f64(),
            Num::NaN => f64::NAN,
        }
    }
}

impl<K: NumKind> PartialEq for Num<K> {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl<K: NumKind> fmt::Display for Num<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Num::Value(v) => fmt::Display::fmt(v, f),
            Num::NaN => f.write_str("NaN"),
        }
    }
}

impl<K: NumKind> Add for Num<K> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.plus(rhs)
    }
}

impl<K: NumKind> Sub for Num<K> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.minus(rhs)
    }
}

impl<K: NumKind> Mul for Num<K> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiplied_by(rhs)
    }
}

impl<K: NumKind> Div for Num<K> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self.divided_by(rhs)
    }
}

impl<K: NumKind> Neg for Num<K> {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

/// Raw literal accepted by [`NumFactory::num_of`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawNumber {
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
}

impl From<i32> for RawNumber {
    fn from(value: i32) -> Self {
        RawNumber::Int(i64::from(value))
    }
}

impl From<u32> for RawNumber {
    fn from(value: u32) -> Self {
        RawNumber::Int(i64::from(value))
    }
}

impl From<i64> for RawNumber {
    fn from(value: i64) -> Self {
        RawNumber::Int(value)
    }
}

impl From<usize> for RawNumber {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or(RawNumber::Float(value as f64), RawNumber::Int)
    }
}

impl From<f32> for RawNumber {
    fn from(value: f32) -> Self {
        RawNumber::Float(f64::from(value))
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Float(value)
    }
}

/// Converts raw literals into [`Num`] values of representation `K`.
///
/// The factory is a zero-sized handle: copying it is free, and every value of
/// the same representation hands out an equal factory.
pub struct NumFactory<K> {
    kind: PhantomData<fn() -> K>,
}

/// Factory for `f64`-backed values.
pub const DOUBLE: NumFactory<f64> = NumFactory::new();

/// Factory for `Decimal`-backed values.
pub const DECIMAL: NumFactory<Decimal> = NumFactory::new();

impl<K> NumFactory<K> {
    /// Creates the factory for representation `K`.
    #[must_use]
    pub const fn new() -> Self {
        Self { kind: PhantomData }
    }
}

impl<K: NumKind> NumFactory<K> {
    /// Representation name ("double", "decimal").
    #[must_use]
    pub fn representation(&self) -> &'static str {
        K::NAME
    }

    /// Converts a raw literal. Values the representation cannot hold become NaN.
    pub fn num_of(&self, raw: impl Into<RawNumber>) -> Num<K> {
        let value = match raw.into() {
            RawNumber::Int(i) => K::from_i64(i),
            RawNumber::Float(f) => K::from_f64(f),
        };
        value.map_or(Num::NaN, Num::from_kind)
    }

    /// Parses a textual literal; `"NaN"` yields the sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::Parse`] if the text is not a number.
    pub fn num_of_str(&self, text: &str) -> Result<Num<K>, NumError> {
        if text.trim().eq_ignore_ascii_case("nan") {
            return Ok(Num::NaN);
        }
        K::parse_str(text)
            .map(Num::from_kind)
            .ok_or_else(|| NumError::Parse {
                input: text.to_string(),
                representation: K::NAME,
            })
    }

    /// The NaN sentinel.
    #[must_use]
    pub fn nan(&self) -> Num<K> {
        Num::NaN
    }

    /// Zero.
    #[must_use]
    pub fn zero(&self) -> Num<K> {
        Num::Value(K::zero())
    }

    /// One.
    #[must_use]
    pub fn one(&self) -> Num<K> {
        self.num_of(1)
    }

    /// One hundred, for percentage scaling.
    #[must_use]
    pub fn hundred(&self) -> Num<K> {
        self.num_of(100)
    }
}

impl<K> Clone for NumFactory<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NumFactory<K> {}

impl<K> Default for NumFactory<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> PartialEq for NumFactory<K> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<K> Eq for NumFactory<K> {}

impl<K: NumKind> fmt::Debug for NumFactory<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumFactory")
            .field("representation", &K::NAME)
            .finish()
    }
}
