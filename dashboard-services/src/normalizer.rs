//! Oracle payload normalization
//!
//! Turns the decoded JSON body into a typed [`Snapshot`]. The payload as a
//! whole must be an array; individual records that lack a required field are
//! dropped without failing the batch.

use dashboard_core::{DashboardError, DashboardResult, PriceRecord, Snapshot};
use serde_json::{Map, Value};
use tracing::debug;

/// Why a single record was left out of the snapshot
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordRejection {
    #[error("record is not an object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Normalize a full oracle payload
///
/// Fails with [`DashboardError::MalformedPayload`] only when the payload is
/// not an array. Record order is preserved.
pub fn normalize_payload(payload: &Value) -> DashboardResult<Snapshot> {
    let items = payload.as_array().ok_or_else(|| {
        DashboardError::malformed_payload(format!(
            "expected an array of records, got {}",
            json_kind(payload)
        ))
    })?;

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match normalize_record(item) {
            Ok(record) => records.push(record),
            Err(reason) => debug!("Dropping oracle record #{}: {}", index, reason),
        }
    }

    if records.len() < items.len() {
        debug!(
            "Normalized {}/{} oracle records",
            records.len(),
            items.len()
        );
    }

    Ok(Snapshot::new(records))
}

/// Interpret one record-shaped value
pub fn normalize_record(value: &Value) -> Result<PriceRecord, RecordRejection> {
    let obj = value.as_object().ok_or(RecordRejection::NotAnObject)?;

    Ok(PriceRecord {
        base: symbol(obj, "base")?,
        quote: symbol(obj, "quote")?,
        price_e8: unsigned(obj, "priceE8")?,
        confidence_bp: signed(obj, "confidenceBP")?,
        timestamp: signed(obj, "timestamp")?,
        prediction5m: prediction(obj.get("prediction5m")),
        tx_hash: obj
            .get("txHash")
            .and_then(Value::as_str)
            .filter(|h| !h.is_empty())
            .map(str::to_string),
    })
}

fn required<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, RecordRejection> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(RecordRejection::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> RecordRejection {
    RecordRejection::InvalidField {
        field,
        reason: reason.into(),
    }
}

fn symbol(obj: &Map<String, Value>, field: &'static str) -> Result<String, RecordRejection> {
    match required(obj, field)? {
        Value::String(s) if !s.is_empty() => Ok(s.clone()),
        Value::String(_) => Err(invalid(field, "empty symbol")),
        other => Err(invalid(field, format!("expected string, got {}", json_kind(other)))),
    }
}

/// Integral value, also accepting floats with no fractional part (e.g. `1.7e9`)
fn integral(value: &Value, field: &'static str) -> Result<f64, RecordRejection> {
    let n = value
        .as_f64()
        .ok_or_else(|| invalid(field, format!("expected number, got {}", json_kind(value))))?;

    if !n.is_finite() || n.fract() != 0.0 {
        return Err(invalid(field, format!("expected integer, got {}", n)));
    }
    Ok(n)
}

fn unsigned(obj: &Map<String, Value>, field: &'static str) -> Result<u64, RecordRejection> {
    let value = required(obj, field)?;
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }

    let n = integral(value, field)?;
    if n < 0.0 {
        return Err(invalid(field, "must be non-negative"));
    }
    if n > u64::MAX as f64 {
        return Err(invalid(field, "out of range"));
    }
    Ok(n as u64)
}

fn signed(obj: &Map<String, Value>, field: &'static str) -> Result<i64, RecordRejection> {
    let value = required(obj, field)?;
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }

    let n = integral(value, field)?;
    if n < i64::MIN as f64 || n > i64::MAX as f64 {
        return Err(invalid(field, "out of range"));
    }
    Ok(n as i64)
}

/// Null, missing and blank predictions all mean "no prediction"
fn prediction(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eth_usd() -> Value {
        json!({
            "base": "ETH",
            "quote": "USD",
            "priceE8": 300000000000u64,
            "confidenceBP": 9800,
            "timestamp": 1000,
            "prediction5m": "3050.00"
        })
    }

    #[test]
    fn test_normalize_full_record() {
        let record = normalize_record(&eth_usd()).unwrap();
        assert_eq!(record.base, "ETH");
        assert_eq!(record.quote, "USD");
        assert_eq!(record.price_e8, 300_000_000_000);
        assert_eq!(record.confidence_bp, 9800);
        assert_eq!(record.timestamp, 1000);
        assert_eq!(record.prediction5m.as_deref(), Some("3050.00"));
        assert_eq!(record.tx_hash, None);
    }

    #[test]
    fn test_optional_fields_may_be_missing() {
        let value = json!({
            "base": "BTC",
            "quote": "USD",
            "priceE8": 6500000000000u64,
            "confidenceBP": 9500,
            "timestamp": 1200
        });
        let record = normalize_record(&value).unwrap();
        assert_eq!(record.prediction5m, None);
        assert_eq!(record.tx_hash, None);
    }

    #[test]
    fn test_tx_hash_kept_verbatim() {
        let mut value = eth_usd();
        value["txHash"] = json!("0xDEADbeef");
        let record = normalize_record(&value).unwrap();
        assert_eq!(record.tx_hash.as_deref(), Some("0xDEADbeef"));

        value["txHash"] = json!("");
        assert_eq!(normalize_record(&value).unwrap().tx_hash, None);
    }

    #[test]
    fn test_missing_timestamp_dropped_from_batch() {
        let mut no_timestamp = eth_usd();
        no_timestamp.as_object_mut().unwrap().remove("timestamp");

        let payload = json!([
            no_timestamp,
            {
                "base": "BTC",
                "quote": "USD",
                "priceE8": 6500000000000u64,
                "confidenceBP": 9500,
                "timestamp": 1200
            },
            {
                "base": "ETH",
                "quote": "BNB",
                "priceE8": 500000000,
                "confidenceBP": 9100,
                "timestamp": 1100,
                "prediction5m": "Not enough data yet"
            }
        ]);

        let snapshot = normalize_payload(&payload).unwrap();
        let keys: Vec<_> = snapshot
            .iter()
            .map(|r| format!("{}/{}", r.base, r.quote))
            .collect();
        assert_eq!(keys, vec!["BTC/USD", "ETH/BNB"]);
    }

    #[test]
    fn test_each_required_field_enforced() {
        for field in ["base", "quote", "priceE8", "confidenceBP", "timestamp"] {
            let mut value = eth_usd();
            value.as_object_mut().unwrap().remove(field);
            assert_eq!(
                normalize_record(&value),
                Err(RecordRejection::MissingField(field)),
                "field {}",
                field
            );

            let mut value = eth_usd();
            value[field] = Value::Null;
            assert_eq!(
                normalize_record(&value),
                Err(RecordRejection::MissingField(field))
            );
        }
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut value = eth_usd();
        value["priceE8"] = json!(-5);
        assert!(matches!(
            normalize_record(&value),
            Err(RecordRejection::InvalidField { field: "priceE8", .. })
        ));

        let mut value = eth_usd();
        value["base"] = json!("");
        assert!(matches!(
            normalize_record(&value),
            Err(RecordRejection::InvalidField { field: "base", .. })
        ));

        let mut value = eth_usd();
        value["timestamp"] = json!("1000");
        assert!(matches!(
            normalize_record(&value),
            Err(RecordRejection::InvalidField { field: "timestamp", .. })
        ));

        let mut value = eth_usd();
        value["confidenceBP"] = json!(98.5);
        assert!(matches!(
            normalize_record(&value),
            Err(RecordRejection::InvalidField { field: "confidenceBP", .. })
        ));

        assert_eq!(
            normalize_record(&json!("ETH/USD")),
            Err(RecordRejection::NotAnObject)
        );
    }

    #[test]
    fn test_integral_floats_accepted() {
        let mut value = eth_usd();
        value["timestamp"] = json!(1.7e9);
        value["priceE8"] = json!(3.0e11);
        let record = normalize_record(&value).unwrap();
        assert_eq!(record.timestamp, 1_700_000_000);
        assert_eq!(record.price_e8, 300_000_000_000);
    }

    #[test]
    fn test_prediction_shapes() {
        let mut value = eth_usd();
        value["prediction5m"] = json!(3050.5);
        assert_eq!(
            normalize_record(&value).unwrap().prediction5m.as_deref(),
            Some("3050.5")
        );

        value["prediction5m"] = json!("   ");
        assert_eq!(normalize_record(&value).unwrap().prediction5m, None);

        value["prediction5m"] = Value::Null;
        assert_eq!(normalize_record(&value).unwrap().prediction5m, None);

        value["prediction5m"] = json!(true);
        assert_eq!(
            normalize_record(&value).unwrap().prediction5m.as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_non_array_payload_is_malformed() {
        for payload in [json!({"base": "ETH"}), json!("oops"), Value::Null, json!(42)] {
            let err = normalize_payload(&payload).unwrap_err();
            assert!(matches!(err, DashboardError::MalformedPayload(_)), "{:?}", payload);
        }
    }

    #[test]
    fn test_empty_array_is_empty_snapshot() {
        let snapshot = normalize_payload(&json!([])).unwrap();
        assert!(snapshot.is_empty());
    }
}
