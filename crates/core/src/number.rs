//! Signed Decimal Numbers
//!
//! A [`Number`] is an arbitrary-precision signed decimal integer stored as a
//! [`Chain`] of digit bytes, least-significant first, plus an explicit sign
//! tag. Arithmetic and comparison walk the chain directly; a native integer
//! is only ever materialized at the I/O boundary ([`Number::from_int`],
//! [`Number::to_i64`]).
//!
//! # Digit bytes
//!
//! Digits are stored as raw bytes rather than 0-9 values because the machine
//! traffics in characters: the `.` instruction prepends an arbitrary input
//! byte, program literals land in the chain as typed, `>` emits the detached
//! byte verbatim, and `[`/`]` convert between a byte and its numeric code.
//! In a well-formed number every byte is an ASCII digit; arithmetic and
//! comparison assume this (a caller precondition, like type correctness in
//! any untyped stack code).
//!
//! # The empty number
//!
//! An empty chain (fresh from the `'` instruction) denotes zero: it is falsy,
//! formats as `0`, converts to 0 and compares equal to any all-zero number.
//!
//! # Negative zero
//!
//! `-0` can be constructed (negate a zero). Every comparison and arithmetic
//! entry point canonicalizes it by working with *effective* signs: the sign
//! of a zero magnitude is always treated as positive. Operands are never
//! mutated by comparison.

use std::cmp::Ordering;
use std::fmt;

use crate::chain::Chain;

const ZERO_DIGIT: u8 = b'0';

/// Sign of a number, an explicit tag rather than an in-band marker element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

/// Arbitrary-precision signed decimal integer over a digit chain.
#[derive(Debug, Clone)]
pub struct Number {
    sign: Sign,
    /// Digit bytes, least-significant first.
    digits: Chain<u8>,
}

impl Number {
    /// The empty number: zero with no digits at all.
    pub fn new() -> Self {
        Number {
            sign: Sign::Positive,
            digits: Chain::new(),
        }
    }

    /// Build a number from a native integer, digit by digit.
    ///
    /// Zero yields the single digit `0`. `i64::MIN` is handled via the
    /// unsigned magnitude, so every `i64` round-trips through [`to_i64`].
    ///
    /// [`to_i64`]: Number::to_i64
    pub fn from_int(value: i64) -> Self {
        let mut digits = Chain::new();
        let mut magnitude = value.unsigned_abs();
        loop {
            digits.push_back((magnitude % 10) as u8 + ZERO_DIGIT);
            magnitude /= 10;
            if magnitude == 0 {
                break;
            }
        }
        Number {
            sign: if value < 0 {
                Sign::Negative
            } else {
                Sign::Positive
            },
            digits,
        }
    }

    /// A non-negative number holding exactly one byte.
    pub fn from_byte(byte: u8) -> Self {
        let mut digits = Chain::new();
        digits.push_back(byte);
        Number {
            sign: Sign::Positive,
            digits,
        }
    }

    /// Collapse to a native integer, most-significant digit first.
    ///
    /// Wrapping semantics on overflow; the machine only uses this for small
    /// control values (stack depths, jump targets, character codes).
    pub fn to_i64(&self) -> i64 {
        let mut out: i64 = 0;
        for &byte in self.digits.iter().rev() {
            out = out
                .wrapping_mul(10)
                .wrapping_add(i64::from(byte.wrapping_sub(ZERO_DIGIT)));
        }
        if self.is_negative() { out.wrapping_neg() } else { out }
    }

    /// Raw sign tag check. See [`is_truthy`] for the semantic (zero-aware)
    /// notion of negativity.
    ///
    /// [`is_truthy`]: Number::is_truthy
    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Negative
    }

    /// True iff every digit byte is `0` (the empty number counts as zero).
    /// The sign is ignored, so `-0` is zero.
    pub fn is_zero(&self) -> bool {
        self.digits.iter().all(|&byte| byte == ZERO_DIGIT)
    }

    /// A number is boolean-true unless it is exactly zero.
    pub fn is_truthy(&self) -> bool {
        !self.is_zero()
    }

    /// Force the sign non-negative.
    pub fn make_absolute(&mut self) {
        self.sign = Sign::Positive;
    }

    /// Flip the sign.
    pub fn negate(&mut self) {
        self.sign = match self.sign {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        };
    }

    /// Drop most-significant `0` digits, never trimming the lone remaining
    /// digit. Idempotent.
    pub fn trim_leading_zeros(&mut self) {
        while self.digits.len() > 1 && self.digits.back() == Some(&ZERO_DIGIT) {
            self.digits.pop_back();
        }
    }

    /// Insert a byte at the least-significant end.
    pub fn push_low(&mut self, byte: u8) {
        self.digits.push_front(byte);
    }

    /// Insert a byte at the most-significant end.
    pub fn push_high(&mut self, byte: u8) {
        self.digits.push_back(byte);
    }

    /// Remove and return the least-significant byte; `None` when empty.
    pub fn detach_low(&mut self) -> Option<u8> {
        self.digits.pop_front()
    }

    /// The underlying digit chain, least-significant first.
    pub fn digits(&self) -> &Chain<u8> {
        &self.digits
    }

    /// Mutable access to the digit chain (used by the machine's splice
    /// instruction, which transfers one number's digits onto another).
    pub fn digits_mut(&mut self) -> &mut Chain<u8> {
        &mut self.digits
    }

    /// Sign with negative zero canonicalized away.
    fn effective_sign(&self) -> Sign {
        if self.is_zero() { Sign::Positive } else { self.sign }
    }

    /// Number of digits above the leading-zero prefix. Zero for a zero
    /// magnitude, including the empty number.
    fn significant_len(&self) -> usize {
        let mut len = self.digits.len();
        for &byte in self.digits.iter().rev() {
            if byte != ZERO_DIGIT {
                break;
            }
            len -= 1;
        }
        len
    }

    /// Compare magnitudes, ignoring signs and leading zeros. Positions past
    /// the shorter chain count as implicit zeros.
    fn cmp_magnitude(&self, other: &Number) -> Ordering {
        let len_a = self.significant_len();
        let len_b = other.significant_len();
        if len_a != len_b {
            return len_a.cmp(&len_b);
        }

        // Equal significant length: the first difference scanning from the
        // most-significant digit decides.
        let skip_a = self.digits.len() - len_a;
        let skip_b = other.digits.len() - len_b;
        let digits_a = self.digits.iter().rev().skip(skip_a);
        let digits_b = other.digits.iter().rev().skip(skip_b);
        for (a, b) in digits_a.zip(digits_b) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    /// Numeric equality: equal effective signs and equal magnitudes, with
    /// missing positions on the shorter side treated as zeros.
    pub fn eq_numeric(&self, other: &Number) -> bool {
        self.effective_sign() == other.effective_sign()
            && self.cmp_magnitude(other) == Ordering::Equal
    }

    /// Numeric strict-less-than.
    ///
    /// Differing effective signs decide immediately; for two negatives the
    /// magnitude comparison runs with operands swapped (`-a < -b ⟺ b < a`).
    pub fn lt_numeric(&self, other: &Number) -> bool {
        match (self.effective_sign(), other.effective_sign()) {
            (Sign::Negative, Sign::Positive) => true,
            (Sign::Positive, Sign::Negative) => false,
            (Sign::Positive, Sign::Positive) => self.cmp_magnitude(other) == Ordering::Less,
            (Sign::Negative, Sign::Negative) => other.cmp_magnitude(self) == Ordering::Less,
        }
    }

    /// Add two numbers; subtraction is the differing-signs case.
    ///
    /// Returns a freshly built number with leading zeros trimmed; an
    /// all-zero result is forced non-negative.
    pub fn add(&self, other: &Number) -> Number {
        let sign_a = self.effective_sign();
        let sign_b = other.effective_sign();

        let mut out = if sign_a == sign_b {
            let mut out = Self::add_magnitudes(self, other);
            out.sign = sign_a;
            out
        } else {
            // Larger magnitude minus smaller; the result keeps the sign of
            // the larger-magnitude operand, ties resolving to zero.
            let (big, small, sign) = match self.cmp_magnitude(other) {
                Ordering::Less => (other, self, sign_b),
                Ordering::Greater => (self, other, sign_a),
                Ordering::Equal => return Number::from_int(0),
            };
            let mut out = Self::sub_magnitudes(big, small);
            out.sign = sign;
            out
        };

        out.trim_leading_zeros();
        if out.is_zero() {
            out.sign = Sign::Positive;
        }
        out
    }

    /// Digit-wise magnitude addition with carry, least-significant first.
    fn add_magnitudes(a: &Number, b: &Number) -> Number {
        let mut out = Number::new();
        let mut digits_a = a.digits.iter();
        let mut digits_b = b.digits.iter();
        let mut carry = 0u8;

        loop {
            let (next_a, next_b) = (digits_a.next(), digits_b.next());
            if next_a.is_none() && next_b.is_none() {
                break;
            }
            let digit_a = next_a.map_or(0, |&byte| byte - ZERO_DIGIT);
            let digit_b = next_b.map_or(0, |&byte| byte - ZERO_DIGIT);
            let sum = digit_a + digit_b + carry;
            out.push_high(sum % 10 + ZERO_DIGIT);
            carry = sum / 10;
        }
        if carry != 0 {
            out.push_high(carry + ZERO_DIGIT);
        }
        out
    }

    /// Digit-wise magnitude subtraction with borrow; `big`'s magnitude must
    /// not be smaller than `small`'s (guaranteed by the caller's compare).
    fn sub_magnitudes(big: &Number, small: &Number) -> Number {
        let mut out = Number::new();
        let mut digits_big = big.digits.iter();
        let mut digits_small = small.digits.iter();
        let mut borrow = 0i8;

        loop {
            let (next_big, next_small) = (digits_big.next(), digits_small.next());
            if next_big.is_none() && next_small.is_none() {
                break;
            }
            let digit_big = next_big.map_or(0, |&byte| (byte - ZERO_DIGIT) as i8);
            let digit_small = next_small.map_or(0, |&byte| (byte - ZERO_DIGIT) as i8);
            let mut diff = digit_big - digit_small - borrow;
            if diff < 0 {
                diff += 10;
                borrow = 1;
            } else {
                borrow = 0;
            }
            out.push_high(diff as u8 + ZERO_DIGIT);
        }
        out
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::new()
    }
}

impl fmt::Display for Number {
    /// Most-significant digit first, with a leading `-` for a negative sign
    /// tag. The empty number prints as `0`. Digits print as stored (a
    /// padded `007` prints as `007`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.digits.is_empty() {
            return f.write_str("0");
        }
        if self.is_negative() {
            f.write_str("-")?;
        }
        for &byte in self.digits.iter().rev() {
            write!(f, "{}", byte as char)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_round_trip() {
        for value in [
            0,
            1,
            -1,
            9,
            10,
            -10,
            12345,
            -98765,
            i64::MAX,
            i64::MIN,
            i64::MAX - 1,
            i64::MIN + 1,
        ] {
            assert_eq!(Number::from_int(value).to_i64(), value, "value {value}");
        }
    }

    #[test]
    fn test_from_int_zero_is_canonical() {
        let zero = Number::from_int(0);
        assert!(!zero.is_negative());
        assert!(zero.is_zero());
        assert!(!zero.is_truthy());
        assert_eq!(zero.digits().len(), 1);
        assert_eq!(zero.to_string(), "0");
    }

    #[test]
    fn test_display() {
        assert_eq!(Number::from_int(1203).to_string(), "1203");
        assert_eq!(Number::from_int(-45).to_string(), "-45");
        assert_eq!(Number::new().to_string(), "0");
    }

    #[test]
    fn test_empty_number_is_zero() {
        let empty = Number::new();
        assert!(empty.is_zero());
        assert!(!empty.is_truthy());
        assert_eq!(empty.to_i64(), 0);
        assert!(empty.eq_numeric(&Number::from_int(0)));
        assert!(!empty.lt_numeric(&Number::from_int(0)));
        assert!(empty.lt_numeric(&Number::from_int(1)));
    }

    #[test]
    fn test_negate_round_trip() {
        let mut n = Number::from_int(5);
        n.negate();
        assert_eq!(n.to_i64(), -5);
        n.negate();
        assert_eq!(n.to_i64(), 5);
        assert_eq!(n.to_string(), "5");
    }

    #[test]
    fn test_negative_zero_canonicalization() {
        let mut minus_zero = Number::from_int(0);
        minus_zero.negate();
        assert!(minus_zero.is_negative()); // raw tag
        assert!(!minus_zero.is_truthy()); // but semantically zero

        let zero = Number::from_int(0);
        assert!(minus_zero.eq_numeric(&zero));
        assert!(!minus_zero.lt_numeric(&zero));
        assert!(!zero.lt_numeric(&minus_zero));
    }

    #[test]
    fn test_eq_iff_zero_under_negation() {
        for value in -30..=30 {
            let a = Number::from_int(value);
            let mut negated = a.clone();
            negated.negate();
            assert_eq!(a.eq_numeric(&negated), value == 0, "value {value}");
        }
    }

    #[test]
    fn test_trim_leading_zeros() {
        let mut n = Number::from_int(7);
        n.push_high(b'0');
        n.push_high(b'0');
        assert_eq!(n.to_string(), "007");

        n.trim_leading_zeros();
        assert_eq!(n.to_string(), "7");

        // idempotent
        n.trim_leading_zeros();
        assert_eq!(n.to_string(), "7");
    }

    #[test]
    fn test_trim_keeps_lone_zero() {
        let mut n = Number::from_int(0);
        n.push_high(b'0');
        n.push_high(b'0');
        n.trim_leading_zeros();
        assert_eq!(n.digits().len(), 1);
        assert_eq!(n.to_string(), "0");
    }

    #[test]
    fn test_comparison_ignores_leading_zeros() {
        let mut padded = Number::from_int(42);
        padded.push_high(b'0');
        padded.push_high(b'0');
        let plain = Number::from_int(42);

        assert!(padded.eq_numeric(&plain));
        assert!(!padded.lt_numeric(&plain));
        assert!(!plain.lt_numeric(&padded));
    }

    #[test]
    fn test_comparison_does_not_mutate_operands() {
        let mut a = Number::from_int(0);
        a.negate(); // -0
        let b = Number::from_int(-7);

        let _ = a.lt_numeric(&b);
        let _ = a.eq_numeric(&b);
        let _ = a.add(&b);

        // a still holds its raw form: negative sign tag, one digit
        assert!(a.is_negative());
        assert_eq!(a.digits().len(), 1);
    }

    #[test]
    fn test_comparison_trichotomy() {
        for a in -25..=25 {
            for b in -25..=25 {
                let na = Number::from_int(a);
                let nb = Number::from_int(b);
                let outcomes = [
                    na.lt_numeric(&nb),
                    nb.lt_numeric(&na),
                    na.eq_numeric(&nb),
                ];
                assert_eq!(
                    outcomes.iter().filter(|&&o| o).count(),
                    1,
                    "trichotomy violated for {a}, {b}"
                );
                assert_eq!(na.lt_numeric(&nb), a < b, "order wrong for {a}, {b}");
            }
        }
    }

    #[test]
    fn test_addition_matches_native() {
        for a in -120..=120 {
            for b in -120..=120 {
                let sum = Number::from_int(a).add(&Number::from_int(b));
                assert_eq!(sum.to_i64(), a + b, "{a} + {b}");
            }
        }
    }

    #[test]
    fn test_addition_carry_chain() {
        let sum = Number::from_int(999_999_999).add(&Number::from_int(1));
        assert_eq!(sum.to_string(), "1000000000");
    }

    #[test]
    fn test_subtraction_borrow_chain() {
        let diff = Number::from_int(1_000_000_000).add(&Number::from_int(-1));
        assert_eq!(diff.to_string(), "999999999");
    }

    #[test]
    fn test_addition_result_is_canonical() {
        // 100 + -100: all-zero difference must come out as plain 0
        let sum = Number::from_int(100).add(&Number::from_int(-100));
        assert!(!sum.is_negative());
        assert_eq!(sum.digits().len(), 1);
        assert_eq!(sum.to_string(), "0");

        // leading zeros produced by the borrow chain are trimmed: 105 - 100
        let diff = Number::from_int(105).add(&Number::from_int(-100));
        assert_eq!(diff.to_string(), "5");
    }

    #[test]
    fn test_addition_beyond_i64() {
        // 2 * i64::MAX overflows any native register; the chain does not.
        let max = Number::from_int(i64::MAX);
        let doubled = max.add(&max);
        assert_eq!(doubled.to_string(), "18446744073709551614");
    }

    #[test]
    fn test_detach_low() {
        let mut n = Number::from_int(123);
        assert_eq!(n.detach_low(), Some(b'3'));
        assert_eq!(n.to_string(), "12");

        let mut empty = Number::new();
        assert_eq!(empty.detach_low(), None);
    }

    #[test]
    fn test_push_low_builds_literals() {
        // typing "1" then "2" builds twelve: each typed byte becomes the
        // new least-significant digit
        let mut n = Number::new();
        n.push_low(b'1');
        n.push_low(b'2');
        assert_eq!(n.to_string(), "12");
        assert_eq!(n.to_i64(), 12);
    }
}
