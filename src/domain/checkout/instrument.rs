//! Payment instrument and its stateless validation rules.
//!
//! Instruments are transient: they exist only for one validate-then-verify
//! call and are never persisted or logged. `Debug` output is redacted.

use std::fmt;

use serde::Deserialize;

use crate::domain::foundation::Timestamp;

use super::CheckoutError;

/// Maximum number of digits kept from a card number.
const MAX_CARD_DIGITS: usize = 16;

/// Minimum number of digits a card number must have.
const MIN_CARD_DIGITS: usize = 13;

/// Card details collected from the checkout form.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInstrument {
    #[serde(default)]
    pub cardholder_name: String,
    pub card_number: String,
    pub expiry: String,
    pub cvc: String,
}

impl PaymentInstrument {
    pub fn new(
        cardholder_name: impl Into<String>,
        card_number: impl Into<String>,
        expiry: impl Into<String>,
        cvc: impl Into<String>,
    ) -> Self {
        Self {
            cardholder_name: cardholder_name.into(),
            card_number: card_number.into(),
            expiry: expiry.into(),
            cvc: cvc.into(),
        }
    }

    /// Last four digits of the normalized card number.
    pub fn last_four(&self) -> String {
        let digits = normalize_card_number(&self.card_number);
        let start = digits.len().saturating_sub(4);
        digits[start..].to_string()
    }
}

impl fmt::Debug for PaymentInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked = format!("**** {}", self.last_four());
        f.debug_struct("PaymentInstrument")
            .field("cardholder_name", &self.cardholder_name)
            .field("card_number", &masked)
            .field("expiry", &self.expiry)
            .field("cvc", &"***")
            .finish()
    }
}

/// Strips every non-digit and keeps at most the first 16 digits.
pub fn normalize_card_number(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_CARD_DIGITS)
        .collect()
}

/// Normalizes and groups a card number in blocks of four (`4242 4242 ...`).
pub fn format_card_number(value: &str) -> String {
    let digits: Vec<char> = normalize_card_number(value).chars().collect();
    digits
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Luhn checksum over the normalized digits; requires at least 13 digits.
pub fn is_valid_luhn(card_number: &str) -> bool {
    let digits = normalize_card_number(card_number);
    if digits.len() < MIN_CARD_DIGITS {
        return false;
    }

    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}

/// Parses `MM/YY` into `(month, year)`; `None` on any format violation.
fn parse_expiry(value: &str) -> Option<(u32, u32)> {
    let bytes = value.trim().as_bytes();
    if bytes.len() != 5 || bytes[2] != b'/' {
        return None;
    }
    let (mm, yy) = (&bytes[..2], &bytes[3..]);
    if !mm.iter().chain(yy).all(u8::is_ascii_digit) {
        return None;
    }
    let month = u32::from(mm[0] - b'0') * 10 + u32::from(mm[1] - b'0');
    let year = u32::from(yy[0] - b'0') * 10 + u32::from(yy[1] - b'0');
    Some((month, year))
}

/// Checks an `MM/YY` expiry against the card period of `now`.
///
/// The current month itself is still valid.
pub fn is_valid_expiry(value: &str, now: &Timestamp) -> bool {
    let Some((month, year)) = parse_expiry(value) else {
        return false;
    };
    if !(1..=12).contains(&month) {
        return false;
    }

    let (current_year, current_month) = now.card_period();
    (year, month) >= (current_year, current_month)
}

/// CVC must be 3 or 4 ASCII digits after trimming.
pub fn is_valid_cvc(value: &str) -> bool {
    let cvc = value.trim();
    (3..=4).contains(&cvc.len()) && cvc.bytes().all(|b| b.is_ascii_digit())
}

/// Stateless validator for payment instruments.
///
/// Checks run in order (card number, expiry, CVC) and the first failure is
/// returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstrumentValidator;

impl InstrumentValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validates against the current UTC month.
    pub fn validate(&self, instrument: &PaymentInstrument) -> Result<(), CheckoutError> {
        self.validate_at(instrument, &Timestamp::now())
    }

    /// Validates against an explicit point in time.
    pub fn validate_at(
        &self,
        instrument: &PaymentInstrument,
        now: &Timestamp,
    ) -> Result<(), CheckoutError> {
        if !is_valid_luhn(&instrument.card_number) {
            return Err(CheckoutError::InvalidCardNumber);
        }
        if !is_valid_expiry(&instrument.expiry, now) {
            return Err(CheckoutError::InvalidExpiry);
        }
        if !is_valid_cvc(&instrument.cvc) {
            return Err(CheckoutError::InvalidCvc);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn at(year: i32, month: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(year, month, 15, 12, 0, 0).unwrap())
    }

    fn test_card() -> PaymentInstrument {
        PaymentInstrument::new("Test User", "4242 4242 4242 4242", "12/30", "123")
    }

    /// Reference Luhn used to cross-check the implementation.
    fn reference_luhn_sum(digits: &[u8]) -> u32 {
        let mut sum = 0;
        let mut double = false;
        for &d in digits.iter().rev() {
            let mut v = u32::from(d);
            if double {
                v *= 2;
                if v > 9 {
                    v -= 9;
                }
            }
            sum += v;
            double = !double;
        }
        sum
    }

    // Card number

    #[test]
    fn accepts_test_card() {
        assert!(is_valid_luhn("4242424242424242"));
        assert!(is_valid_luhn("4242 4242 4242 4242"));
        assert!(is_valid_luhn("4242-4242-4242-4242"));
    }

    #[test]
    fn rejects_failed_checksum() {
        assert!(!is_valid_luhn("4242424242424241"));
    }

    #[test]
    fn rejects_short_numbers_even_with_valid_checksum() {
        // 12-digit number whose checksum is 0 mod 10
        assert!(!is_valid_luhn("000000000000"));
        assert!(!is_valid_luhn(""));
    }

    #[test]
    fn accepts_thirteen_digit_numbers() {
        assert!(is_valid_luhn("4222222222222"));
    }

    #[test]
    fn ignores_digits_beyond_sixteen() {
        // Trailing digit is dropped by normalization
        assert!(is_valid_luhn("42424242424242429"));
    }

    #[test]
    fn formats_in_groups_of_four() {
        assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
        assert_eq!(format_card_number("42424"), "4242 4");
        assert_eq!(format_card_number("abc"), "");
    }

    // Expiry

    #[test]
    fn expiry_in_current_month_is_valid() {
        assert!(is_valid_expiry("10/26", &at(2026, 10)));
    }

    #[test]
    fn expiry_in_previous_month_is_invalid() {
        assert!(!is_valid_expiry("09/26", &at(2026, 10)));
    }

    #[test]
    fn expiry_in_previous_year_is_invalid() {
        assert!(!is_valid_expiry("12/25", &at(2026, 10)));
    }

    #[test]
    fn expiry_rejects_bad_format() {
        let now = at(2026, 1);
        for value in ["1/30", "12-30", "12/3", "123/0", "ab/cd", "", "12/300"] {
            assert!(!is_valid_expiry(value, &now), "{value:?} should be rejected");
        }
    }

    #[test]
    fn expiry_rejects_month_out_of_range() {
        let now = at(2026, 1);
        assert!(!is_valid_expiry("00/30", &now));
        assert!(!is_valid_expiry("13/30", &now));
    }

    #[test]
    fn expiry_is_trimmed() {
        assert!(is_valid_expiry(" 12/30 ", &at(2026, 1)));
    }

    // CVC

    #[test]
    fn cvc_accepts_three_or_four_digits() {
        assert!(is_valid_cvc("123"));
        assert!(is_valid_cvc("1234"));
        assert!(is_valid_cvc(" 123 "));
    }

    #[test]
    fn cvc_rejects_other_lengths_and_letters() {
        assert!(!is_valid_cvc("12"));
        assert!(!is_valid_cvc("12345"));
        assert!(!is_valid_cvc("12a"));
    }

    // Validator ordering

    #[test]
    fn validator_accepts_test_card() {
        assert_eq!(InstrumentValidator::new().validate_at(&test_card(), &at(2026, 10)), Ok(()));
    }

    #[test]
    fn validator_reports_card_number_first() {
        let instrument = PaymentInstrument::new("x", "4242424242424241", "00/00", "1");
        assert_eq!(
            InstrumentValidator::new().validate_at(&instrument, &at(2026, 10)),
            Err(CheckoutError::InvalidCardNumber)
        );
    }

    #[test]
    fn validator_reports_expiry_before_cvc() {
        let instrument = PaymentInstrument::new("x", "4242424242424242", "01/20", "1");
        assert_eq!(
            InstrumentValidator::new().validate_at(&instrument, &at(2026, 10)),
            Err(CheckoutError::InvalidExpiry)
        );
    }

    #[test]
    fn validator_reports_cvc() {
        let instrument = PaymentInstrument::new("x", "4242424242424242", "12/30", "12");
        assert_eq!(
            InstrumentValidator::new().validate_at(&instrument, &at(2026, 10)),
            Err(CheckoutError::InvalidCvc)
        );
    }

    #[test]
    fn debug_output_redacts_card_data() {
        let rendered = format!("{:?}", test_card());
        assert!(rendered.contains("**** 4242"));
        assert!(!rendered.contains("4242424242424242"));
        assert!(!rendered.contains("123"));
    }

    proptest! {
        #[test]
        fn luhn_matches_reference(digits in proptest::collection::vec(0u8..10, 0..17)) {
            let number: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
            let expected = digits.len() >= 13 && reference_luhn_sum(&digits) % 10 == 0;
            prop_assert_eq!(is_valid_luhn(&number), expected);
        }

        #[test]
        fn appending_check_digit_makes_number_valid(body in proptest::collection::vec(0u8..10, 12..16)) {
            // Choose the trailing digit that zeroes the checksum
            let check = (0u8..10)
                .find(|c| {
                    let mut all = body.clone();
                    all.push(*c);
                    reference_luhn_sum(&all) % 10 == 0
                })
                .unwrap();
            let number: String = body.iter().chain(std::iter::once(&check)).map(|d| char::from(b'0' + d)).collect();
            prop_assert!(is_valid_luhn(&number));
        }

        #[test]
        fn past_expiries_rejected_future_accepted(
            now_year in 2001i32..2098,
            now_month in 1u32..=12,
            month in 1u32..=12,
            year_offset in -1i32..=2,
        ) {
            let now = at(now_year, now_month);
            let yy = (now_year + year_offset).rem_euclid(100) as u32;
            let expiry = format!("{:02}/{:02}", month, yy);
            let expected = (year_offset, month) >= (0, now_month);
            prop_assert_eq!(is_valid_expiry(&expiry, &now), expected);
        }
    }
}
