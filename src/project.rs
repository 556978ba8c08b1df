//! Per-family projection of raw run items into flat derived records.
//!
//! Projectors are pure: same input sequence, same output sequence, record
//! `id` preserving the input index. They never fail — missing sub-objects
//! degrade to the schema accessors' defaults, and every stored numeric is
//! finite (ratios collapse to 1, everything else to 0).

use serde::Serialize;
use std::f64::consts::PI;

use crate::numeric::{finite_or_one, finite_or_zero};
use crate::schema::RawResultItem;

const MS_PER_SEC: f64 = 1000.0;
const PCT: f64 = 100.0;

/// Classical-over-quantum wall-time ratio; 1.0 unless both sides are
/// strictly positive.
fn wall_speedup(item: &RawResultItem) -> f64 {
    let quantum = item.quantum_wall_time();
    let classical = item.classical_wall_time();
    if quantum > 0.0 && classical > 0.0 {
        finite_or_one(classical / quantum)
    } else {
        1.0
    }
}

// =============================================================================
// Phase Estimation
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PhaseEstimationRecord {
    pub id: usize,
    pub label: String,
    pub phase: f64,
    pub n_qubits: u32,
    pub estimated_phase: f64,
    /// Percent.
    pub quantum_error: f64,
    /// Percent.
    pub classical_error: f64,
    /// Milliseconds.
    pub quantum_time: f64,
    /// Milliseconds.
    pub classical_time: f64,
    /// Megabytes.
    pub quantum_memory: f64,
    /// Megabytes.
    pub classical_memory: f64,
    pub speedup_factor: f64,
    /// Percent; 0 when the classical error is zero.
    pub error_improvement: f64,
    pub efficiency: f64,
}

pub fn project_phase_estimation(items: &[RawResultItem]) -> Vec<PhaseEstimationRecord> {
    items
        .iter()
        .enumerate()
        .map(|(id, item)| {
            let phase = finite_or_zero(item.phase.unwrap_or(0.0));
            let n_qubits = item.n_qubits.unwrap_or(0);
            let quantum_error = finite_or_zero(item.quantum_error().abs() * PCT);
            let classical_error = finite_or_zero(item.classical_error().abs() * PCT);
            let quantum_time = finite_or_zero(item.quantum_wall_time() * MS_PER_SEC);
            let classical_time = finite_or_zero(item.classical_wall_time() * MS_PER_SEC);

            // The generator reports time_speedup = classical / quantum; the
            // derived factor is its reciprocal.
            let speedup_factor = match item.time_speedup() {
                Some(s) if s.is_finite() && s > 0.0 => finite_or_one(1.0 / s),
                _ => 1.0,
            };
            let error_improvement = if classical_error > 0.0 {
                finite_or_zero((classical_error - quantum_error) / classical_error * PCT)
            } else {
                0.0
            };
            let efficiency = if quantum_time > 0.0 {
                finite_or_zero((1.0 - quantum_error / PCT) / quantum_time)
            } else {
                0.0
            };

            PhaseEstimationRecord {
                id,
                label: format!("phase {:.3}, {} qubits", phase, n_qubits),
                phase,
                n_qubits,
                estimated_phase: finite_or_zero(
                    item.outcome()
                        .and_then(|o| o.estimated_phase)
                        .unwrap_or(0.0),
                ),
                quantum_error,
                classical_error,
                quantum_time,
                classical_time,
                quantum_memory: finite_or_zero(item.quantum_memory_mb()),
                classical_memory: finite_or_zero(item.classical_memory_mb()),
                speedup_factor,
                error_improvement,
                efficiency,
            }
        })
        .collect()
}

// =============================================================================
// Grover
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GroverRecord {
    pub id: usize,
    pub label: String,
    pub database_size: u64,
    pub iterations: f64,
    /// ceil(pi/4 * sqrt(database_size)); 0 when the size is unknown.
    pub theoretical_iterations: u64,
    /// Percent; 100 when the reported iteration count is unusable.
    pub efficiency: f64,
    /// Percent.
    pub success_rate: f64,
    /// Milliseconds.
    pub quantum_time: f64,
    /// Milliseconds.
    pub classical_time: f64,
    pub speedup: f64,
}

pub fn project_grover(items: &[RawResultItem]) -> Vec<GroverRecord> {
    items
        .iter()
        .enumerate()
        .map(|(id, item)| {
            let database_size = item
                .outcome()
                .and_then(|o| o.database_size)
                .unwrap_or(0);
            let iterations =
                finite_or_zero(item.outcome().and_then(|o| o.iterations).unwrap_or(0.0));
            let theoretical_iterations = if database_size > 0 {
                (PI / 4.0 * (database_size as f64).sqrt()).ceil() as u64
            } else {
                0
            };
            let efficiency = if iterations > 0.0 {
                finite_or_zero(theoretical_iterations as f64 / iterations * PCT)
            } else {
                100.0
            };
            let success_rate = finite_or_zero(
                item.outcome().and_then(|o| o.success_rate).unwrap_or(0.0) * PCT,
            );

            GroverRecord {
                id,
                label: format!("{} items", database_size),
                database_size,
                iterations,
                theoretical_iterations,
                efficiency,
                success_rate,
                quantum_time: finite_or_zero(item.quantum_wall_time() * MS_PER_SEC),
                classical_time: finite_or_zero(item.classical_wall_time() * MS_PER_SEC),
                speedup: wall_speedup(item),
            }
        })
        .collect()
}

// =============================================================================
// Shor
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ShorRecord {
    pub id: usize,
    pub label: String,
    pub n: u64,
    /// Classical baseline factor list.
    pub factors: Vec<u64>,
    /// True only when a non-null quantum factor list is present.
    pub quantum_success: bool,
    pub quantum_error: Option<String>,
    /// Milliseconds.
    pub quantum_time: f64,
    /// Milliseconds.
    pub classical_time: f64,
    pub speedup: f64,
}

pub fn project_shor(items: &[RawResultItem]) -> Vec<ShorRecord> {
    items
        .iter()
        .enumerate()
        .map(|(id, item)| {
            let n = item.n.unwrap_or(0);
            ShorRecord {
                id,
                label: format!("N = {}", n),
                n,
                factors: item.classical_factors().to_vec(),
                quantum_success: item
                    .outcome()
                    .map(|o| o.factors.is_some())
                    .unwrap_or(false),
                quantum_error: item
                    .outcome()
                    .and_then(|o| o.error_message())
                    .map(str::to_string),
                quantum_time: finite_or_zero(item.quantum_wall_time() * MS_PER_SEC),
                classical_time: finite_or_zero(item.classical_wall_time() * MS_PER_SEC),
                speedup: wall_speedup(item),
            }
        })
        .collect()
}

// =============================================================================
// Deutsch-Jozsa
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DeutschJozsaRecord {
    pub id: usize,
    pub label: String,
    pub n_qubits: u32,
    pub function_type: String,
    pub quantum_queries: f64,
    pub classical_queries: f64,
    /// Unclamped: negative when quantum needed more queries.
    pub query_reduction: f64,
    /// Percent; 0 when the classical count is zero.
    pub query_reduction_percent: f64,
    /// Milliseconds.
    pub quantum_time: f64,
    /// Milliseconds.
    pub classical_time: f64,
    pub speedup: f64,
}

pub fn project_deutsch_jozsa(items: &[RawResultItem]) -> Vec<DeutschJozsaRecord> {
    items
        .iter()
        .enumerate()
        .map(|(id, item)| {
            let n_qubits = item.n_qubits.unwrap_or(0);
            let function_type = item
                .function_type
                .clone()
                .unwrap_or_else(|| "unknown".to_string());
            let quantum_queries =
                finite_or_zero(item.outcome().and_then(|o| o.queries).unwrap_or(0.0));
            let classical_queries = finite_or_zero(
                item.classical_fields()
                    .and_then(|f| f.queries)
                    .unwrap_or(0.0),
            );
            let query_reduction = finite_or_zero(classical_queries - quantum_queries);
            let query_reduction_percent = if classical_queries > 0.0 {
                finite_or_zero(query_reduction / classical_queries * PCT)
            } else {
                0.0
            };

            DeutschJozsaRecord {
                id,
                label: format!("{} qubits, {}", n_qubits, function_type),
                n_qubits,
                function_type,
                quantum_queries,
                classical_queries,
                query_reduction,
                query_reduction_percent,
                quantum_time: finite_or_zero(item.quantum_wall_time() * MS_PER_SEC),
                classical_time: finite_or_zero(item.classical_wall_time() * MS_PER_SEC),
                speedup: wall_speedup(item),
            }
        })
        .collect()
}

// =============================================================================
// Min/Max
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MinMaxRecord {
    pub id: usize,
    pub label: String,
    pub data_size: u64,
    pub quantum_iterations: f64,
    pub classical_comparisons: f64,
    /// Unclamped: negative when amplitude amplification needed more steps.
    pub comparison_reduction: f64,
    /// Percent.
    pub success_rate: f64,
    pub found_value: f64,
    /// Defaults to true when the raw field is absent.
    pub is_min_operation: bool,
    /// Milliseconds.
    pub quantum_time: f64,
    /// Milliseconds.
    pub classical_time: f64,
    pub speedup: f64,
}

pub fn project_min_max(items: &[RawResultItem]) -> Vec<MinMaxRecord> {
    items
        .iter()
        .enumerate()
        .map(|(id, item)| {
            let data_size = item.data_size.unwrap_or(0);
            let is_min_operation = item
                .outcome()
                .and_then(|o| o.is_min)
                .unwrap_or(true);
            let quantum_iterations =
                finite_or_zero(item.outcome().and_then(|o| o.iterations).unwrap_or(0.0));
            let classical_comparisons = finite_or_zero(
                item.classical_fields()
                    .and_then(|f| f.comparisons)
                    .unwrap_or(0.0),
            );
            let success_rate = finite_or_zero(
                item.outcome().and_then(|o| o.success_rate).unwrap_or(0.0) * PCT,
            );

            MinMaxRecord {
                id,
                label: format!(
                    "{} of {} items",
                    if is_min_operation { "min" } else { "max" },
                    data_size
                ),
                data_size,
                quantum_iterations,
                classical_comparisons,
                comparison_reduction: finite_or_zero(classical_comparisons - quantum_iterations),
                success_rate,
                found_value: finite_or_zero(
                    item.outcome().and_then(|o| o.found_value).unwrap_or(0.0),
                ),
                is_min_operation,
                quantum_time: finite_or_zero(item.quantum_wall_time() * MS_PER_SEC),
                classical_time: finite_or_zero(item.classical_wall_time() * MS_PER_SEC),
                speedup: wall_speedup(item),
            }
        })
        .collect()
}
