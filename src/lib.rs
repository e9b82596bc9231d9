//! Annäherung von Pi (π) durch den Monte-Carlo-Algorithmus.
//!
//! Die Gesamtzahl der Punkte wird auf mehrere Worker verteilt. Jeder Worker
//! zieht mit seinem eigenen Zufallszahlengenerator Punkte im Einheitsquadrat
//! und zählt die Treffer im Viertelkreis. Am Ende werden alle Treffer addiert:
//!
//! ```text
//! π ≈ 4 * Treffer / tatsächlich gezogene Punkte
//! ```
//!
//! # Beispiel
//!
//! ```no_run
//! use piapprox::{Estimator, EstimatorConfig};
//!
//! let config = EstimatorConfig::new(1_000_000, 4)?.with_seed(Some(42));
//! let estimate = Estimator::new(config)?.run()?;
//! println!("π ≈ {:.6}", estimate.pi);
//! # Ok::<(), piapprox::MonteCarloError>(())
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod partition;
pub mod progress;
pub mod sampler;
pub mod system;

pub use config::{
    resolve_workers, EstimatorConfig, PartitionPolicy, SamplingStrategy, WorkerFallback,
    DEFAULT_TOTAL_SAMPLES, DEFAULT_WORKERS,
};
pub use driver::{estimate_pi, Estimate, Estimator, WorkerReport};
pub use error::{MonteCarloError, Result};
pub use partition::Partition;
pub use progress::{LogWriter, ProgressDisplay};
pub use sampler::{count_hits, count_hits_batched, is_in_quarter_circle, ProgressSink, Sampler};
pub use system::SystemInfo;
