//! Typed schema for uploaded benchmark documents.
//!
//! The benchmark suite has shipped several output formats, so every field
//! below is optional and partial documents must never abort ingestion.
//! Accessors apply the default for their optional hop (`0.0`, `false`,
//! empty slice) so projectors read flat values without branching on
//! missingness.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::numeric::safe_number;

/// Algorithm families the pipeline consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    PhaseEstimation,
    Grover,
    Shor,
    DeutschJozsa,
    MinMax,
}

impl Family {
    pub const ALL: [Family; 5] = [
        Family::PhaseEstimation,
        Family::Grover,
        Family::Shor,
        Family::DeutschJozsa,
        Family::MinMax,
    ];

    /// JSON key for this family under `results`.
    pub fn key(&self) -> &'static str {
        match self {
            Family::PhaseEstimation => "phase_estimation",
            Family::Grover => "grover",
            Family::Shor => "shor",
            Family::DeutschJozsa => "deutsch_jozsa",
            Family::MinMax => "min_max",
        }
    }
}

/// A parsed uploaded document. A document is ingestible when at least one
/// of `results` or `datasets` is present; everything else is advisory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDataset {
    /// ISO-8601 string or epoch-parseable value.
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub seed: Option<i64>,
    #[serde(default)]
    pub results: Option<FamilyResults>,
    /// Generator input echo; presence alone makes the document ingestible.
    #[serde(default)]
    pub datasets: Option<Value>,
}

impl RawDataset {
    pub fn has_payload(&self) -> bool {
        self.results.is_some() || self.datasets.is_some()
    }

    /// Items for one family, or an empty slice when the family key (or the
    /// whole `results` map) is absent.
    pub fn family(&self, family: Family) -> &[RawResultItem] {
        self.results.as_ref().map(|r| r.get(family)).unwrap_or(&[])
    }

    /// Upload timestamp: RFC3339 first, then a naive datetime (the
    /// generator writes `datetime.isoformat()` without a zone), then epoch
    /// seconds.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        match self.timestamp.as_ref()? {
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                        .ok()
                        .map(|naive| Utc.from_utc_datetime(&naive))
                })
                .or_else(|| {
                    s.parse::<i64>()
                        .ok()
                        .and_then(|epoch| Utc.timestamp_opt(epoch, 0).single())
                }),
            Value::Number(n) => n
                .as_i64()
                .and_then(|epoch| Utc.timestamp_opt(epoch, 0).single()),
            _ => None,
        }
    }
}

/// The `results` mapping: family key -> ordered run items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FamilyResults {
    #[serde(default)]
    pub phase_estimation: Vec<RawResultItem>,
    #[serde(default)]
    pub grover: Vec<RawResultItem>,
    #[serde(default)]
    pub shor: Vec<RawResultItem>,
    #[serde(default)]
    pub deutsch_jozsa: Vec<RawResultItem>,
    #[serde(default)]
    pub min_max: Vec<RawResultItem>,
}

impl FamilyResults {
    pub fn get(&self, family: Family) -> &[RawResultItem] {
        match family {
            Family::PhaseEstimation => &self.phase_estimation,
            Family::Grover => &self.grover,
            Family::Shor => &self.shor,
            Family::DeutschJozsa => &self.deutsch_jozsa,
            Family::MinMax => &self.min_max,
        }
    }
}

/// One benchmark run. The skeleton is shared across families; which scalar
/// inputs are populated depends on the family.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawResultItem {
    #[serde(default, rename = "N")]
    pub n: Option<u64>,
    #[serde(default)]
    pub phase: Option<f64>,
    #[serde(default)]
    pub n_qubits: Option<u32>,
    #[serde(default)]
    pub space_size: Option<u64>,
    #[serde(default)]
    pub marked_items: Option<Vec<u64>>,
    #[serde(default)]
    pub data_size: Option<u64>,
    #[serde(default)]
    pub function_type: Option<String>,
    #[serde(default)]
    pub quantum: Option<QuantumSide>,
    #[serde(default)]
    pub classical: Option<ClassicalSide>,
    #[serde(default)]
    pub metrics: Option<ItemMetrics>,
}

impl RawResultItem {
    pub fn outcome(&self) -> Option<&QuantumOutcome> {
        self.quantum.as_ref()?.result.as_ref()
    }

    /// Numeric quantum error, 0.0 when absent or reported as a message.
    pub fn quantum_error(&self) -> f64 {
        safe_number(self.outcome().and_then(|o| o.error_value()))
    }

    pub fn classical_fields(&self) -> Option<&ClassicalFields> {
        match self.classical.as_ref()? {
            ClassicalSide::Fields(fields) => Some(fields),
            ClassicalSide::Factors(_) => None,
        }
    }

    pub fn classical_error(&self) -> f64 {
        safe_number(self.classical_fields().and_then(|f| f.error))
    }

    /// Shor's classical baseline is a bare factor array.
    pub fn classical_factors(&self) -> &[u64] {
        match self.classical.as_ref() {
            Some(ClassicalSide::Factors(factors)) => factors,
            _ => &[],
        }
    }

    /// Quantum wall time in seconds, 0.0 when absent.
    pub fn quantum_wall_time(&self) -> f64 {
        safe_number(
            self.metrics
                .as_ref()
                .and_then(|m| m.quantum.as_ref())
                .and_then(|s| s.wall_time_avg),
        )
    }

    /// Classical wall time in seconds, 0.0 when absent.
    pub fn classical_wall_time(&self) -> f64 {
        safe_number(
            self.metrics
                .as_ref()
                .and_then(|m| m.classical.as_ref())
                .and_then(|s| s.wall_time_avg),
        )
    }

    pub fn quantum_memory_mb(&self) -> f64 {
        safe_number(
            self.metrics
                .as_ref()
                .and_then(|m| m.quantum.as_ref())
                .and_then(|s| s.memory_mb_avg),
        )
    }

    pub fn classical_memory_mb(&self) -> f64 {
        safe_number(
            self.metrics
                .as_ref()
                .and_then(|m| m.classical.as_ref())
                .and_then(|s| s.memory_mb_avg),
        )
    }

    /// Raw speedup ratio as reported; callers decide how to guard it.
    pub fn time_speedup(&self) -> Option<f64> {
        self.metrics.as_ref().and_then(|m| m.time_speedup)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuantumSide {
    #[serde(default)]
    pub result: Option<QuantumOutcome>,
}

/// The quantum algorithm's reported outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuantumOutcome {
    /// Error magnitude (phase estimation) or failure message (Shor).
    #[serde(default)]
    pub error: Option<ErrorField>,
    #[serde(default)]
    pub estimated_phase: Option<f64>,
    #[serde(default)]
    pub database_size: Option<u64>,
    #[serde(default)]
    pub iterations: Option<f64>,
    #[serde(default)]
    pub success_rate: Option<f64>,
    #[serde(default)]
    pub queries: Option<f64>,
    /// `null` means the factorization failed; absent is treated the same.
    #[serde(default)]
    pub factors: Option<Vec<u64>>,
    #[serde(default)]
    pub found_value: Option<f64>,
    #[serde(default)]
    pub found_index: Option<i64>,
    #[serde(default)]
    pub is_min: Option<bool>,
}

impl QuantumOutcome {
    pub fn error_value(&self) -> Option<f64> {
        self.error.as_ref().and_then(ErrorField::as_number)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().and_then(ErrorField::as_message)
    }
}

/// `error` is a number for estimation families and a message string for
/// Shor's failure modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorField {
    Value(f64),
    Message(String),
}

impl ErrorField {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ErrorField::Value(v) => Some(*v),
            ErrorField::Message(_) => None,
        }
    }

    pub fn as_message(&self) -> Option<&str> {
        match self {
            ErrorField::Message(s) => Some(s),
            ErrorField::Value(_) => None,
        }
    }
}

/// The classical baseline: Shor reports a bare factor array, every other
/// family an object of scalar fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassicalSide {
    Factors(Vec<u64>),
    Fields(ClassicalFields),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassicalFields {
    #[serde(default)]
    pub error: Option<f64>,
    #[serde(default)]
    pub estimated_phase: Option<f64>,
    #[serde(default)]
    pub queries: Option<f64>,
    #[serde(default)]
    pub comparisons: Option<f64>,
    #[serde(default)]
    pub average_comparisons: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemMetrics {
    #[serde(default)]
    pub quantum: Option<SideMetrics>,
    #[serde(default)]
    pub classical: Option<SideMetrics>,
    #[serde(default)]
    pub time_speedup: Option<f64>,
}

/// Wall/CPU/memory measurements for one side of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SideMetrics {
    #[serde(default)]
    pub wall_time_avg: Option<f64>,
    #[serde(default)]
    pub wall_time_variance: Option<f64>,
    #[serde(default)]
    pub cpu_time_avg: Option<f64>,
    #[serde(default)]
    pub memory_mb_avg: Option<f64>,
    #[serde(default)]
    pub repeat_runs: Option<u32>,
}
