use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validate::Validate;

/// Window accepted by `GET /admin/metrics?range=`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1h")]
    OneHour,
    #[default]
    #[serde(rename = "24h")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [TimeRange::OneHour, TimeRange::OneDay, TimeRange::SevenDays, TimeRange::ThirtyDays];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::OneHour => "1h",
            TimeRange::OneDay => "24h",
            TimeRange::SevenDays => "7d",
            TimeRange::ThirtyDays => "30d",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeRange::ALL
            .into_iter()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| ModelError::Validation(format!("unknown time range {s:?}; expected one of 1h, 24h, 7d, 30d")))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsDataPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsSeries {
    pub label: String,
    pub data: Vec<MetricsDataPoint>,
}

impl MetricsSeries {
    pub fn latest(&self) -> Option<&MetricsDataPoint> {
        self.data.iter().max_by_key(|p| p.timestamp)
    }
}

/// The five series returned by `GET /admin/metrics`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub query_latency_p50: MetricsSeries,
    pub query_latency_p95: MetricsSeries,
    pub query_latency_p99: MetricsSeries,
    pub error_rate: MetricsSeries,
    pub throughput: MetricsSeries,
}

impl MetricsResponse {
    /// `(field name, series)` in wire order.
    pub fn series(&self) -> [(&'static str, &MetricsSeries); 5] {
        [
            ("query_latency_p50", &self.query_latency_p50),
            ("query_latency_p95", &self.query_latency_p95),
            ("query_latency_p99", &self.query_latency_p99),
            ("error_rate", &self.error_rate),
            ("throughput", &self.throughput),
        ]
    }
}

impl Validate for MetricsResponse {
    fn validate(&self) -> Result<(), ModelError> {
        for (name, series) in self.series() {
            if let Some(p) = series.data.iter().find(|p| !p.value.is_finite()) {
                return Err(ModelError::contract("metrics", format!("{name} has non-finite value at {}", p.timestamp)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(label: &str, values: &[f64]) -> MetricsSeries {
        let base = DateTime::parse_from_rfc3339("2026-05-01T00:00:00Z").map(|d| d.with_timezone(&Utc)).unwrap();
        MetricsSeries {
            label: label.into(),
            data: values
                .iter()
                .enumerate()
                .map(|(i, v)| MetricsDataPoint { timestamp: base + chrono::Duration::minutes(i as i64), value: *v })
                .collect(),
        }
    }

    #[test]
    fn time_range_round_trips_through_text() {
        for r in TimeRange::ALL {
            assert_eq!(r.as_str().parse::<TimeRange>(), Ok(r));
        }
        assert_eq!(TimeRange::default(), TimeRange::OneDay);
        assert!("2h".parse::<TimeRange>().is_err());
        assert!("".parse::<TimeRange>().is_err());
    }

    #[test]
    fn decodes_metrics_payload() -> anyhow::Result<()> {
        let s = r#"{"label":"p50","data":[{"timestamp":"2026-05-01T00:00:00Z","value":1.5}]}"#;
        let body = format!(
            r#"{{"query_latency_p50":{s},"query_latency_p95":{s},"query_latency_p99":{s},"error_rate":{s},"throughput":{s}}}"#
        );
        let m: MetricsResponse = serde_json::from_str(&body)?;
        m.validate()?;
        assert_eq!(m.query_latency_p50.data[0].value, 1.5);
        assert_eq!(m.series().len(), 5);
        Ok(())
    }

    #[test]
    fn missing_series_fails_decoding() {
        let r = serde_json::from_str::<MetricsResponse>(r#"{"query_latency_p50":{"label":"x","data":[]}}"#);
        assert!(r.is_err());
    }

    #[test]
    fn latest_picks_newest_point() {
        let s = series("tput", &[1.0, 3.0, 2.0]);
        assert_eq!(s.latest().map(|p| p.value), Some(2.0));
        assert!(series("empty", &[]).latest().is_none());
    }

    #[test]
    fn non_finite_values_violate_contract() {
        let ok = series("ok", &[1.0]);
        let m = MetricsResponse {
            query_latency_p50: ok.clone(),
            query_latency_p95: ok.clone(),
            query_latency_p99: ok.clone(),
            error_rate: series("err", &[f64::NAN]),
            throughput: ok,
        };
        assert!(matches!(m.validate(), Err(ModelError::Contract(_))));
    }
}
