//! Types exchanged with the HTM engine's HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{error::ClientError, timestamp::to_wire_timestamp};

/// A single observation to append to a model's series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,

    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

impl Reading {
    pub fn new(value: f64, timestamp: i64) -> Self {
        Reading { value, timestamp }
    }
}

/// Body of the `event` and `bulkEvent` endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EventRequest {
    pub value: f64,
    pub timestamp: String,
}

impl TryFrom<&Reading> for EventRequest {
    type Error = ClientError;

    fn try_from(reading: &Reading) -> Result<Self, Self::Error> {
        Ok(EventRequest {
            value: reading.value,
            timestamp: to_wire_timestamp(reading.timestamp)?,
        })
    }
}

/// Expected input range for a new model. Sent as the body of the `create` endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ModelBounds {
    pub min: f64,
    pub max: f64,
}

/// One point of a model's history as reported by the engine.
///
/// Fields are kept as raw JSON: the engine echoes back whatever it stored, including
/// `null` values for non-finite readings and timestamps in forms other than the wire
/// string. An element that is not an object becomes the `value` of a point with a
/// `null` timestamp.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "Value")]
pub struct DataPoint {
    pub value: Value,

    /// Timestamp in whatever form the engine stored it, usually `MM/DD/YY HH:mm`.
    pub timestamp: Value,

    /// Any other per-point fields the engine attaches (anomaly scores and the like).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DataPoint {
    pub fn new(value: impl Into<Value>, timestamp: impl Into<Value>) -> Self {
        DataPoint {
            value: value.into(),
            timestamp: timestamp.into(),
            extra: Map::new(),
        }
    }
}

impl From<Value> for DataPoint {
    fn from(point: Value) -> Self {
        match point {
            Value::Object(mut fields) => DataPoint {
                value: fields.remove("value").unwrap_or(Value::Null),
                timestamp: fields.remove("timestamp").unwrap_or(Value::Null),
                extra: fields,
            },
            other => DataPoint::new(other, Value::Null),
        }
    }
}

/// Response body of the `getData` endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GetDataResponse {
    pub data: Vec<DataPoint>,
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::{DataPoint, GetDataResponse, ModelBounds};

    #[test]
    pub fn bounds_serde() {
        let bounds = ModelBounds {
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(
            serde_json::to_value(bounds).unwrap(),
            json!({"min": 0.0, "max": 100.0})
        );
    }

    #[test]
    pub fn get_data_serde() {
        let response = serde_json::from_str::<GetDataResponse>(
            r#"
            {
                "data": [
                    {"value": 1, "timestamp": "01/01/14 00:00"},
                    {"value": 2.5, "timestamp": "01/01/14 00:05", "anomaly": 0.25}
                ]
            }
        "#,
        )
        .unwrap();

        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0], DataPoint::new(1, "01/01/14 00:00"));
        assert_eq!(response.data[1].value, json!(2.5));
        assert_eq!(response.data[1].extra.get("anomaly"), Some(&json!(0.25)));

        // Extra fields survive a round trip untouched.
        assert_eq!(
            serde_json::to_value(&response.data[1]).unwrap(),
            json!({"value": 2.5, "timestamp": "01/01/14 00:05", "anomaly": 0.25})
        );
    }

    #[test]
    pub fn get_data_keeps_loose_points() {
        let response = serde_json::from_value::<GetDataResponse>(json!({
            "data": [
                {"value": null, "timestamp": "01/01/14 00:00"},
                {"value": 1, "timestamp": 1388534400},
                {"anomaly": 0.5},
                7
            ]
        }))
        .unwrap();

        assert_eq!(
            response.data,
            vec![
                DataPoint::new(json!(null), "01/01/14 00:00"),
                DataPoint::new(1, 1_388_534_400),
                DataPoint {
                    value: json!(null),
                    timestamp: json!(null),
                    extra: json!({"anomaly": 0.5}).as_object().unwrap().clone(),
                },
                DataPoint::new(7, json!(null)),
            ]
        );
    }

    #[test]
    pub fn get_data_requires_data_array() {
        assert!(serde_json::from_str::<GetDataResponse>(r#"{"rows": []}"#).is_err());
        assert!(serde_json::from_str::<GetDataResponse>(r#"{"data": "nope"}"#).is_err());
        assert!(serde_json::from_str::<GetDataResponse>(r#"{"data": null}"#).is_err());
    }
}
