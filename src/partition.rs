//! Aufteilung der Gesamtpunktzahl auf die Worker.

use crate::config::PartitionPolicy;
use crate::error::{MonteCarloError, Result};

/// Anteile aller Worker an einem Lauf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    shares: Vec<u64>,
    requested: u64,
}

impl Partition {
    /// Verteilt `total` Punkte auf `workers` Worker.
    ///
    /// Bei [`PartitionPolicy::Truncate`] bekommt jeder Worker `total / workers`
    /// Punkte, ein Rest wird nicht gezogen. Ein Anteil von 0 ist ein Fehler,
    /// weil sonst Worker ohne Arbeit laufen oder der Nenner 0 wird.
    pub fn plan(total: u64, workers: usize, policy: PartitionPolicy) -> Result<Self> {
        if workers == 0 {
            return Err(MonteCarloError::InvalidParameter(
                "Anzahl der Worker muss mindestens 1 sein".into(),
            ));
        }

        let n = workers as u64;
        let share = total / n;
        let remainder = total % n;

        if share == 0 {
            return Err(MonteCarloError::InvalidParameter(format!(
                "{total} Punkte reichen nicht für {workers} Worker"
            )));
        }

        let shares = match policy {
            PartitionPolicy::Truncate => vec![share; workers],
            PartitionPolicy::Spread => (0..n)
                .map(|i| if i < remainder { share + 1 } else { share })
                .collect(),
        };

        Ok(Self {
            shares,
            requested: total,
        })
    }

    pub fn shares(&self) -> &[u64] {
        &self.shares
    }

    /// Kleinster Anteil eines Workers.
    pub fn min_share(&self) -> u64 {
        self.shares.iter().copied().min().unwrap_or(0)
    }

    /// Größter Anteil eines Workers; bei `Spread` höchstens eins mehr als der kleinste.
    pub fn max_share(&self) -> u64 {
        self.shares.iter().copied().max().unwrap_or(0)
    }

    /// Ursprünglich angeforderte Punktzahl.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Tatsächlich gezogene Punkte; das ist der Nenner der Schätzung.
    pub fn samples_used(&self) -> u64 {
        self.shares.iter().sum()
    }

    /// Punkte, die durch das Abschneiden nicht gezogen werden.
    pub fn dropped(&self) -> u64 {
        self.requested - self.samples_used()
    }
}
