//! ORATS data API client
//!
//! Thin blocking client over the ORATS `datav2` endpoints used for IV
//! history: `hist/strikes` (one trade date, all strikes), `option-history`
//! (ranged query with a field projection), and `cores` (current summary).
//!
//! Requests are independent and stateless; there is no retry, backoff, or
//! caching. A 404 means "nothing quoted that day" and comes back as an
//! empty record set; any other non-success status is an error the fetch
//! loop downgrades to a warning.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::{IvError, IvResult, OptionType};

const DEFAULT_BASE_URL: &str = "https://api.orats.io/datav2";

/// Fields requested from `option-history` in range mode
const HISTORY_FIELDS: &str = "tradeDate,expirDate,strike,callMidIv,putMidIv";

/// ORATS API client
pub struct OratsClient {
    client: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl OratsClient {
    /// Create a client with the given API token
    pub fn new(token: impl Into<String>) -> IvResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| IvError::network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
        })
    }

    /// Override the base URL (test fixtures, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// All strike records for a ticker on one trade date (bulk mode)
    ///
    /// The caller filters client-side for the strikes/expirations it wants.
    /// A 404 yields an empty vec: nothing was quoted that day.
    pub fn strikes_history(&self, ticker: &str, trade_date: NaiveDate) -> IvResult<Vec<StrikeRecord>> {
        let url = format!("{}/hist/strikes", self.base_url);
        let date = trade_date.format("%Y-%m-%d").to_string();

        self.get_records(
            &url,
            &[
                ("token", self.token.as_str()),
                ("ticker", ticker),
                ("tradeDate", date.as_str()),
            ],
        )
    }

    /// Ranged IV history for a ticker (range mode)
    ///
    /// One request for the whole date range with a field projection;
    /// `strike` optionally pins a strike price upstream.
    pub fn option_history(
        &self,
        ticker: &str,
        option_type: OptionType,
        start: NaiveDate,
        end: NaiveDate,
        strike: Option<f64>,
    ) -> IvResult<Vec<StrikeRecord>> {
        let url = format!("{}/option-history", self.base_url);
        let start = start.format("%Y-%m-%d").to_string();
        let end = end.format("%Y-%m-%d").to_string();
        let strike = strike.map(|s| s.to_string());

        let mut params = vec![
            ("token", self.token.as_str()),
            ("ticker", ticker),
            ("startDate", start.as_str()),
            ("endDate", end.as_str()),
            ("optionType", option_type.api_name()),
            ("fields", HISTORY_FIELDS),
        ];
        if let Some(s) = strike.as_deref() {
            params.push(("strikePrice", s));
        }

        self.get_records(&url, &params)
    }

    /// Current core summary records for a ticker
    pub fn cores(&self, ticker: &str) -> IvResult<Vec<CoreRecord>> {
        let url = format!("{}/cores", self.base_url);

        self.get_records(
            &url,
            &[
                ("token", self.token.as_str()),
                ("ticker", ticker),
                ("fields", "ticker,tradeDate,iv30d"),
            ],
        )
    }

    /// GET + status policy + envelope handling shared by all endpoints
    fn get_records<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> IvResult<Vec<T>> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .map_err(|e| IvError::network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(IvError::Upstream {
                status: status.as_u16(),
                context: url.to_string(),
            });
        }

        let payload: Payload<T> = response
            .json()
            .map_err(|e| IvError::data(format!("Failed to parse response: {}", e)))?;

        Ok(payload.into_records())
    }
}

/// Response body: either a bare array or a `{"data": [...]}` envelope
///
/// Both shapes occur across the ORATS endpoints.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Enveloped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Payload<T> {
    fn into_records(self) -> Vec<T> {
        match self {
            Payload::Enveloped { data } => data,
            Payload::Bare(records) => records,
        }
    }
}

// ORATS record structures

/// One per-strike record as returned by `hist/strikes` / `option-history`
///
/// Dates stay as `YYYY-MM-DD` strings at the wire level; the reducer
/// parses `trade_date` and matches `expir_date` by exact string equality.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrikeRecord {
    /// Trade date, `YYYY-MM-DD` (`quoteDate` in some response shapes)
    #[serde(alias = "quoteDate")]
    pub trade_date: String,
    /// Expiration date, `YYYY-MM-DD` (`expiration` in some response shapes)
    #[serde(alias = "expiration")]
    pub expir_date: String,
    /// Strike price
    #[serde(default)]
    pub strike: Option<f64>,
    /// Call mid IV, decimal fraction (0–1 scale at the source)
    #[serde(default)]
    pub call_mid_iv: Option<f64>,
    /// Put mid IV, decimal fraction
    #[serde(default)]
    pub put_mid_iv: Option<f64>,
}

impl StrikeRecord {
    /// IV field for the given option side, if present on this record
    pub fn mid_iv(&self, option_type: OptionType) -> Option<f64> {
        match option_type {
            OptionType::Call => self.call_mid_iv,
            OptionType::Put => self.put_mid_iv,
        }
    }
}

/// One summary record from `cores`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreRecord {
    pub ticker: String,
    #[serde(default)]
    pub trade_date: Option<String>,
    /// 30-day interpolated IV, decimal fraction
    #[serde(default)]
    pub iv30d: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array_payload() {
        let json = r#"[
            {"tradeDate": "2025-04-07", "expirDate": "2025-05-16",
             "strike": 55.0, "callMidIv": 0.30, "putMidIv": 0.32}
        ]"#;
        let payload: Payload<StrikeRecord> = serde_json::from_str(json).unwrap();
        let records = payload.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].trade_date, "2025-04-07");
        assert_eq!(records[0].strike, Some(55.0));
    }

    #[test]
    fn test_enveloped_payload() {
        let json = r#"{"data": [
            {"tradeDate": "2025-04-07", "expirDate": "2025-05-16",
             "strike": 55.0, "callMidIv": 0.30}
        ]}"#;
        let payload: Payload<StrikeRecord> = serde_json::from_str(json).unwrap();
        let records = payload.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].call_mid_iv, Some(0.30));
        assert_eq!(records[0].put_mid_iv, None);
    }

    #[test]
    fn test_field_aliases() {
        let json = r#"[
            {"quoteDate": "2025-04-07", "expiration": "2025-05-16", "strike": 55.0}
        ]"#;
        let payload: Payload<StrikeRecord> = serde_json::from_str(json).unwrap();
        let records = payload.into_records();
        assert_eq!(records[0].trade_date, "2025-04-07");
        assert_eq!(records[0].expir_date, "2025-05-16");
    }

    #[test]
    fn test_core_record_payload() {
        // cores typically responds enveloped; the bare form must parse too
        let json = r#"{"data": [
            {"ticker": "SPY", "tradeDate": "2025-04-07", "iv30d": 0.21}
        ]}"#;
        let payload: Payload<CoreRecord> = serde_json::from_str(json).unwrap();
        let records = payload.into_records();
        assert_eq!(records[0].ticker, "SPY");
        assert_eq!(records[0].trade_date.as_deref(), Some("2025-04-07"));
        assert_eq!(records[0].iv30d, Some(0.21));

        let bare: Payload<CoreRecord> = serde_json::from_str(r#"[{"ticker": "SPY"}]"#).unwrap();
        let records = bare.into_records();
        assert_eq!(records[0].iv30d, None);
    }

    #[test]
    fn test_mid_iv_side_selection() {
        let record = StrikeRecord {
            trade_date: "2025-04-07".into(),
            expir_date: "2025-05-16".into(),
            strike: Some(55.0),
            call_mid_iv: Some(0.30),
            put_mid_iv: None,
        };
        assert_eq!(record.mid_iv(OptionType::Call), Some(0.30));
        assert_eq!(record.mid_iv(OptionType::Put), None);
    }

    #[test]
    #[ignore] // Requires network and a real ORATS token
    fn test_strikes_history_live() {
        let token = std::env::var("ORATS_TOKEN").unwrap();
        let client = OratsClient::new(token).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();

        let records = client.strikes_history("SPY", date).unwrap();
        assert!(!records.is_empty());
    }
}
