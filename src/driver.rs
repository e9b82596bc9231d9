//! Verteilung der Arbeit auf die Worker und Zusammenführung der Treffer zur Pi-Schätzung.

use crate::config::{EstimatorConfig, SamplingStrategy};
use crate::error::{MonteCarloError, Result};
use crate::partition::Partition;
use crate::sampler::{entropy_seed, ProgressSink, Sampler};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Ergebnis eines einzelnen Workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker: usize,
    pub share: u64,
    pub hits: u64,
    pub elapsed: Duration,
}

/// Ergebnis eines kompletten Laufs.
#[derive(Debug, Clone)]
pub struct Estimate {
    pub pi: f64,                     // Angenäherter Pi-Wert.
    pub hits: u64,                   // Treffer aller Worker.
    pub samples_used: u64,           // Tatsächlich gezogene Punkte (Nenner).
    pub requested: u64,              // Angeforderte Punkte.
    pub workers: usize,              // Anzahl der Worker.
    pub elapsed: Duration,           // Dauer von Verteilung bis Zusammenführung.
    pub reports: Vec<WorkerReport>,  // Ergebnisse pro Worker, nach Index sortiert.
}

impl Estimate {
    /// Abweichung vom tatsächlichen π.
    pub fn abs_error(&self) -> f64 {
        (self.pi - std::f64::consts::PI).abs()
    }

    pub fn samples_per_second(&self) -> f64 {
        self.samples_used as f64 / self.elapsed.as_secs_f64().max(1e-9)
    }
}

/// Schätzt π mit `total_samples` Punkten auf `workers` Workern.
///
/// Kurzform für [`Estimator::run`] mit Standardkonfiguration.
pub fn estimate_pi(total_samples: u64, workers: usize) -> Result<f64> {
    let config = EstimatorConfig::new(total_samples, workers)?;
    Estimator::new(config)?.run().map(|estimate| estimate.pi)
}

/// Führt einen Lauf gemäß einer [`EstimatorConfig`] aus.
///
/// Die Aufteilung auf die Worker wird einmal beim Erstellen geplant und für
/// Ausgabe, Fortschrittsanzeige und Lauf gemeinsam genutzt.
#[derive(Debug, Clone)]
pub struct Estimator {
    config: EstimatorConfig,
    partition: Partition,
}

impl Estimator {
    /// Plant die Aufteilung; zu wenige Punkte für die Worker sind ein Fehler.
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        let partition = Partition::plan(
            config.total_samples(),
            config.workers(),
            config.partition(),
        )?;

        Ok(Self { config, partition })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn run(&self) -> Result<Estimate> {
        self.run_with_progress(&())
    }

    /// Wie [`Estimator::run`], meldet aber den Fortschritt jedes Workers an `progress`.
    pub fn run_with_progress(&self, progress: &dyn ProgressSink) -> Result<Estimate> {
        let workers = self.config.workers();
        let partition = &self.partition;

        if let Ok(cores) = std::thread::available_parallelism() {
            if workers > cores.get() {
                warn!(workers, cores = cores.get(), "mehr Worker als verfügbare Kerne");
            }
        }

        if partition.dropped() > 0 {
            info!(
                dropped = partition.dropped(),
                samples_used = partition.samples_used(),
                "Rest der Division wird nicht gezogen"
            );
        }

        let seed = self.config.seed().unwrap_or_else(entropy_seed);
        let strategy = self.config.strategy();
        debug!(seed, ?strategy, "Basis-Seed gewählt");

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("sampler-{i}"))
            .build()?;

        let start = Instant::now();

        // Jeder Worker bekommt genau einen Anteil; gewartet wird, bis alle fertig sind.
        let reports = pool.install(|| {
            partition
                .shares()
                .par_iter()
                .enumerate()
                .map(|(worker, &share)| run_worker(seed, worker, share, strategy, progress))
                .collect::<Result<Vec<_>>>()
        })?;

        let hits: u64 = reports.iter().map(|report| report.hits).sum();
        let samples_used = partition.samples_used();
        let pi = 4.0 * hits as f64 / samples_used as f64;
        let elapsed = start.elapsed();

        for report in &reports {
            debug!(
                worker = report.worker,
                share = report.share,
                hits = report.hits,
                secs = report.elapsed.as_secs_f64(),
                "Worker fertig"
            );
        }
        info!(pi, hits, samples_used, secs = elapsed.as_secs_f64(), "Schätzung fertig");

        Ok(Estimate {
            pi,
            hits,
            samples_used,
            requested: partition.requested(),
            workers,
            elapsed,
            reports,
        })
    }
}

/// Führt einen Worker aus; ein Panic wird zu [`MonteCarloError::WorkerFailed`].
fn run_worker(
    seed: u64,
    worker: usize,
    share: u64,
    strategy: SamplingStrategy,
    progress: &dyn ProgressSink,
) -> Result<WorkerReport> {
    let start = Instant::now();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        Sampler::new(seed, worker, strategy).run(share, progress)
    }));

    let hits = match outcome {
        Ok(result) => result?,
        Err(payload) => {
            return Err(MonteCarloError::WorkerFailed {
                worker,
                reason: panic_message(payload.as_ref()),
            })
        }
    };

    Ok(WorkerReport {
        worker,
        share,
        hits,
        elapsed: start.elapsed(),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unbekannter Fehler".to_string()
    }
}
