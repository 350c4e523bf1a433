//! 환율 변환 테스트. 네트워크 없이 고정 환율 제공자를 주입한다.
use std::cell::Cell;

use unit_converter_toolbox::conversion::format_result;
use unit_converter_toolbox::currency::{convert_currency, CurrencyCode, CurrencyError, RateProvider};

struct StubRates {
    rate: f64,
    calls: Cell<u32>,
}

impl RateProvider for StubRates {
    fn get_rate(&self, from: CurrencyCode, to: CurrencyCode) -> Result<f64, CurrencyError> {
        self.calls.set(self.calls.get() + 1);
        match (from, to) {
            (CurrencyCode::Usd, CurrencyCode::Eur) => Ok(self.rate),
            _ => Err(CurrencyError::UnknownCurrency(format!("{from}->{to}"))),
        }
    }
}

struct Offline;

impl RateProvider for Offline {
    fn get_rate(&self, _: CurrencyCode, _: CurrencyCode) -> Result<f64, CurrencyError> {
        Err(CurrencyError::ServiceUnavailable("connection refused".into()))
    }
}

#[test]
fn stubbed_rate_converts_amount() {
    let rates = StubRates {
        rate: 1.10,
        calls: Cell::new(0),
    };
    let out = convert_currency(&rates, 100.0, CurrencyCode::Usd, CurrencyCode::Eur).unwrap();
    assert_eq!(format!("{out:.2}"), "110.00");
    assert_eq!(
        format_result(100.0, "USD", out, "EUR"),
        "100.0 USD = 110.00 EUR"
    );
    assert_eq!(rates.calls.get(), 1);
}

#[test]
fn lookup_failures_propagate_without_retry() {
    let rates = StubRates {
        rate: 1.10,
        calls: Cell::new(0),
    };
    let err = convert_currency(&rates, 5.0, CurrencyCode::Gbp, CurrencyCode::Jpy).unwrap_err();
    assert!(matches!(err, CurrencyError::UnknownCurrency(ref p) if p == "GBP->JPY"));
    assert_eq!(rates.calls.get(), 1);

    let err = convert_currency(&Offline, 5.0, CurrencyCode::Usd, CurrencyCode::Aud).unwrap_err();
    assert!(matches!(err, CurrencyError::ServiceUnavailable(_)));
}

#[test]
fn currency_codes_cover_the_offered_list() {
    let codes: Vec<&str> = CurrencyCode::ALL.iter().map(|c| c.as_str()).collect();
    assert_eq!(codes, ["USD", "EUR", "GBP", "INR", "JPY", "AUD"]);
}
