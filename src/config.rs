//! Konfiguration eines Laufs: Punktanzahl, Worker, Seed und Strategien.

use crate::error::{MonteCarloError, Result};
use clap::ValueEnum;
use tracing::{info, warn};

/// Standardwert für die Gesamtzahl der Punkte.
pub const DEFAULT_TOTAL_SAMPLES: u64 = 100_000_000;

/// Anzahl der Worker, wenn keine (gültige) Anzahl angegeben wurde.
pub const DEFAULT_WORKERS: usize = 2;

/// Wie ein Worker seine Punkte erzeugt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SamplingStrategy {
    /// Punkt für Punkt, ohne zusätzlichen Speicher.
    #[default]
    Scalar,
    /// Alle x- und y-Koordinaten zuerst in Puffer, dann zählen.
    Batched,
}

/// Wie die Gesamtzahl auf die Worker verteilt wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PartitionPolicy {
    /// Jeder Worker bekommt `floor(gesamt / worker)`; der Rest entfällt.
    #[default]
    Truncate,
    /// Der Rest wird einzeln auf die ersten Worker verteilt.
    Spread,
}

/// Verhalten bei einer ungültigen Worker-Anzahl von der Kommandozeile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerFallback {
    /// Abbrechen mit [`MonteCarloError::InvalidWorkerCount`].
    Reject,
    /// Warnen und den angegebenen Wert verwenden.
    Default(usize),
}

impl Default for WorkerFallback {
    fn default() -> Self {
        WorkerFallback::Default(DEFAULT_WORKERS)
    }
}

/// Liest die Worker-Anzahl aus dem (optionalen) Argument.
///
/// Fehlt das Argument, wird [`DEFAULT_WORKERS`] verwendet. Ist es ungültig
/// (keine Zahl, 0 oder negativ), entscheidet `fallback`.
pub fn resolve_workers(raw: Option<&str>, fallback: WorkerFallback) -> Result<usize> {
    let Some(raw) = raw else {
        info!(workers = DEFAULT_WORKERS, "keine Worker-Anzahl angegeben, verwende Standardwert");
        return Ok(DEFAULT_WORKERS);
    };

    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => match fallback {
            WorkerFallback::Reject => Err(MonteCarloError::InvalidWorkerCount(raw.to_string())),
            WorkerFallback::Default(n) => {
                let n = n.max(1);
                warn!(input = raw, workers = n, "ungültige Worker-Anzahl, verwende Standardwert");
                Ok(n)
            }
        },
    }
}

/// Geprüfte, unveränderliche Konfiguration eines Laufs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorConfig {
    total_samples: u64,
    workers: usize,
    seed: Option<u64>,
    strategy: SamplingStrategy,
    partition: PartitionPolicy,
}

impl EstimatorConfig {
    /// Erstellt eine Konfiguration; Punktanzahl und Worker müssen mindestens 1 sein.
    pub fn new(total_samples: u64, workers: usize) -> Result<Self> {
        if total_samples == 0 {
            return Err(MonteCarloError::InvalidParameter(
                "Punktanzahl muss mindestens 1 sein".into(),
            ));
        }
        if workers == 0 {
            return Err(MonteCarloError::InvalidParameter(
                "Anzahl der Worker muss mindestens 1 sein".into(),
            ));
        }

        Ok(Self {
            total_samples,
            workers,
            seed: None,
            strategy: SamplingStrategy::default(),
            partition: PartitionPolicy::default(),
        })
    }

    /// Fester Basis-Seed für reproduzierbare Läufe.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_strategy(mut self, strategy: SamplingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_partition(mut self, partition: PartitionPolicy) -> Self {
        self.partition = partition;
        self
    }

    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn strategy(&self) -> SamplingStrategy {
        self.strategy
    }

    pub fn partition(&self) -> PartitionPolicy {
        self.partition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_argument_uses_default() {
        assert_eq!(resolve_workers(None, WorkerFallback::Reject).unwrap(), DEFAULT_WORKERS);
    }

    #[test]
    fn valid_argument_is_used() {
        assert_eq!(resolve_workers(Some("8"), WorkerFallback::default()).unwrap(), 8);
        assert_eq!(resolve_workers(Some(" 3 "), WorkerFallback::Reject).unwrap(), 3);
    }

    #[test]
    fn invalid_argument_falls_back() {
        for raw in ["abc", "0", "-4", "2.5", ""] {
            assert_eq!(resolve_workers(Some(raw), WorkerFallback::default()).unwrap(), 2);
        }
        assert_eq!(resolve_workers(Some("x"), WorkerFallback::Default(6)).unwrap(), 6);
    }

    #[test]
    fn invalid_argument_is_rejected_in_strict_mode() {
        let err = resolve_workers(Some("zwei"), WorkerFallback::Reject).unwrap_err();
        assert!(matches!(err, MonteCarloError::InvalidWorkerCount(ref s) if s == "zwei"));
    }

    #[test]
    fn config_rejects_zero_values() {
        assert!(EstimatorConfig::new(0, 2).unwrap_err().is_config_error());
        assert!(EstimatorConfig::new(10, 0).unwrap_err().is_config_error());
    }

    #[test]
    fn builder_sets_fields() {
        let config = EstimatorConfig::new(1_000, 4)
            .unwrap()
            .with_seed(Some(7))
            .with_strategy(SamplingStrategy::Batched)
            .with_partition(PartitionPolicy::Spread);

        assert_eq!(config.total_samples(), 1_000);
        assert_eq!(config.workers(), 4);
        assert_eq!(config.seed(), Some(7));
        assert_eq!(config.strategy(), SamplingStrategy::Batched);
        assert_eq!(config.partition(), PartitionPolicy::Spread);
    }
}
