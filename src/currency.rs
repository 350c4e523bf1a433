//! 실시간 환율 조회. 변환 코어는 [`RateProvider`]를 주입받아 호출만 하고
//! 네트워크 클라이언트를 직접 만들지 않는다.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::CurrencySettings;

/// 화면에서 선택 가능한 통화 코드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Usd,
    Eur,
    Gbp,
    Inr,
    Jpy,
    Aud,
}

impl CurrencyCode {
    pub const ALL: [CurrencyCode; 6] = [
        CurrencyCode::Usd,
        CurrencyCode::Eur,
        CurrencyCode::Gbp,
        CurrencyCode::Inr,
        CurrencyCode::Jpy,
        CurrencyCode::Aud,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Inr => "INR",
            CurrencyCode::Jpy => "JPY",
            CurrencyCode::Aud => "AUD",
        }
    }

    /// 대소문자 구분 없이 통화 코드를 파싱한다.
    pub fn parse(s: &str) -> Result<Self, CurrencyError> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == upper)
            .ok_or_else(|| CurrencyError::UnknownCurrency(s.to_string()))
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 환율 조회 오류.
#[derive(Debug, Error)]
pub enum CurrencyError {
    /// 네트워크 오류 또는 서비스 응답 이상
    #[error("환율 서비스를 사용할 수 없음: {0}")]
    ServiceUnavailable(String),
    /// 서비스가 모르는 통화이거나 환율이 없음
    #[error("알 수 없는 통화: {0}")]
    UnknownCurrency(String),
}

impl From<reqwest::Error> for CurrencyError {
    fn from(value: reqwest::Error) -> Self {
        CurrencyError::ServiceUnavailable(value.to_string())
    }
}

/// 환율 조회 기능. 동기 호출이며 재시도하지 않는다.
pub trait RateProvider {
    /// `from` 1단위가 `to`로 얼마인지 반환한다.
    fn get_rate(&self, from: CurrencyCode, to: CurrencyCode) -> Result<f64, CurrencyError>;
}

/// `amount * rate`로 통화를 환산한다.
pub fn convert_currency(
    provider: &dyn RateProvider,
    amount: f64,
    from: CurrencyCode,
    to: CurrencyCode,
) -> Result<f64, CurrencyError> {
    let rate = provider.get_rate(from, to)?;
    Ok(amount * rate)
}

/// HTTP 환율 서비스(frankfurter 호환 `/latest?from=..&to=..`) 클라이언트.
pub struct HttpRateProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

impl HttpRateProvider {
    pub fn new(settings: &CurrencySettings) -> Result<Self, CurrencyError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &settings.endpoint))
    }

    /// 미리 구성한 클라이언트로 생성한다.
    pub fn with_client(client: reqwest::blocking::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

impl RateProvider for HttpRateProvider {
    fn get_rate(&self, from: CurrencyCode, to: CurrencyCode) -> Result<f64, CurrencyError> {
        if from == to {
            return Ok(1.0);
        }
        let url = format!("{}/latest", self.endpoint);
        info!(%from, %to, %url, "fetching exchange rate");
        let response = self
            .client
            .get(&url)
            .query(&[("from", from.as_str()), ("to", to.as_str())])
            .send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::UNPROCESSABLE_ENTITY {
            warn!(%from, %to, %status, "rate service rejected currency pair");
            return Err(CurrencyError::UnknownCurrency(format!("{from}->{to}")));
        }
        if !status.is_success() {
            warn!(%status, "rate service returned an error status");
            return Err(CurrencyError::ServiceUnavailable(format!("HTTP {status}")));
        }
        let body = response.text()?;
        parse_rate_response(&body, to)
    }
}

/// 서비스 응답 본문에서 대상 통화의 환율을 꺼낸다.
pub fn parse_rate_response(body: &str, to: CurrencyCode) -> Result<f64, CurrencyError> {
    let parsed: LatestRatesResponse = serde_json::from_str(body)
        .map_err(|e| CurrencyError::ServiceUnavailable(format!("응답 파싱 실패: {e}")))?;
    parsed
        .rates
        .get(to.as_str())
        .copied()
        .ok_or_else(|| CurrencyError::UnknownCurrency(to.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// 요청 하나에 고정 응답을 돌려주는 로컬 서버. 받은 요청 헤더를 반환한다.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (endpoint, handle)
    }

    fn local_provider(endpoint: &str) -> HttpRateProvider {
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpRateProvider::with_client(client, endpoint)
    }

    fn usd_to_eur(status_line: &'static str, body: &'static str) -> Result<f64, CurrencyError> {
        let (endpoint, server) = serve_once(status_line, body);
        let result = local_provider(&endpoint).get_rate(CurrencyCode::Usd, CurrencyCode::Eur);
        server.join().unwrap();
        result
    }

    #[test]
    fn ok_response_yields_rate_and_queries_pair() {
        let (endpoint, server) = serve_once("200 OK", r#"{"base":"USD","rates":{"EUR":1.1}}"#);
        let rate = local_provider(&endpoint)
            .get_rate(CurrencyCode::Usd, CurrencyCode::Eur)
            .unwrap();
        assert!((rate - 1.1).abs() < 1e-12);
        let request = server.join().unwrap();
        assert!(
            request.starts_with("GET /latest?from=USD&to=EUR "),
            "request was {request:?}"
        );
    }

    #[test]
    fn not_found_and_unprocessable_are_unknown_currency() {
        for status in ["404 Not Found", "422 Unprocessable Entity"] {
            let err = usd_to_eur(status, r#"{"message":"not found"}"#).unwrap_err();
            assert!(matches!(err, CurrencyError::UnknownCurrency(_)), "{status}: {err}");
        }
    }

    #[test]
    fn other_error_status_is_service_unavailable() {
        for status in ["500 Internal Server Error", "503 Service Unavailable", "400 Bad Request"] {
            let err = usd_to_eur(status, "{}").unwrap_err();
            assert!(matches!(err, CurrencyError::ServiceUnavailable(_)), "{status}: {err}");
        }
    }

    #[test]
    fn ok_response_without_target_rate_is_unknown_currency() {
        let err = usd_to_eur("200 OK", r#"{"rates":{"GBP":0.8}}"#).unwrap_err();
        assert!(matches!(err, CurrencyError::UnknownCurrency(_)));
    }

    #[test]
    fn ok_response_with_garbage_body_is_service_unavailable() {
        let err = usd_to_eur("200 OK", "not json").unwrap_err();
        assert!(matches!(err, CurrencyError::ServiceUnavailable(_)));
    }

    #[test]
    fn connection_refused_is_service_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let err = local_provider(&endpoint)
            .get_rate(CurrencyCode::Usd, CurrencyCode::Eur)
            .unwrap_err();
        assert!(matches!(err, CurrencyError::ServiceUnavailable(_)));
    }

    #[test]
    fn parses_latest_rates_body() {
        let body = r#"{"amount":1.0,"base":"USD","date":"2024-05-10","rates":{"EUR":0.9281}}"#;
        let rate = parse_rate_response(body, CurrencyCode::Eur).unwrap();
        assert!((rate - 0.9281).abs() < 1e-12);
    }

    #[test]
    fn missing_target_is_unknown_currency() {
        let body = r#"{"rates":{"GBP":0.8}}"#;
        let err = parse_rate_response(body, CurrencyCode::Jpy).unwrap_err();
        assert!(matches!(err, CurrencyError::UnknownCurrency(c) if c == "JPY"));
    }

    #[test]
    fn malformed_body_is_service_unavailable() {
        let err = parse_rate_response("<html>oops</html>", CurrencyCode::Eur).unwrap_err();
        assert!(matches!(err, CurrencyError::ServiceUnavailable(_)));
    }

    #[test]
    fn same_currency_skips_the_network() {
        let settings = CurrencySettings {
            endpoint: "http://127.0.0.1:9".into(),
            timeout_secs: 1,
        };
        let provider = HttpRateProvider::new(&settings).unwrap();
        let rate = provider.get_rate(CurrencyCode::Gbp, CurrencyCode::Gbp).unwrap();
        assert_eq!(rate, 1.0);
    }

    #[test]
    fn currency_code_parse_is_case_insensitive() {
        assert_eq!(CurrencyCode::parse("inr").unwrap(), CurrencyCode::Inr);
        assert!(matches!(
            CurrencyCode::parse("XYZ"),
            Err(CurrencyError::UnknownCurrency(_))
        ));
    }
}
