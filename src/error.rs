//! Fehlertypen für die Pi-Annäherung.

use thiserror::Error;

/// Ergebnis-Typ für alle Operationen dieser Bibliothek.
pub type Result<T> = std::result::Result<T, MonteCarloError>;

/// Alle Fehler, die bei einem Lauf auftreten können.
///
/// Es gibt keine Wiederholungsversuche: jeder Fehler beendet den ganzen Lauf,
/// weil ohne alle Teilergebnisse der Nenner der Schätzung nicht stimmt.
#[derive(Error, Debug)]
pub enum MonteCarloError {
    /// Ungültige Thread-Anzahl von der Kommandozeile (nur im strikten Modus).
    #[error("Ungültige Anzahl an Workern: {0:?}")]
    InvalidWorkerCount(String),

    /// Ungültiger Parameter, z.B. Punktanzahl 0.
    #[error("Ungültiger Parameter: {0}")]
    InvalidParameter(String),

    /// Puffer für die Punkte konnte nicht angelegt werden.
    #[error("Speicher reicht nicht für {requested} Punkte")]
    ResourceExhausted { requested: u64 },

    /// Ein Worker ist abgestürzt.
    #[error("Worker {worker} ist fehlgeschlagen: {reason}")]
    WorkerFailed { worker: usize, reason: String },

    /// Der Rayon Thread-Pool konnte nicht gebaut werden.
    #[error("Thread-Pool konnte nicht erstellt werden: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),
}

impl MonteCarloError {
    /// Ob der Fehler aus der Konfiguration stammt (und nicht aus der Berechnung).
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            MonteCarloError::InvalidWorkerCount(_) | MonteCarloError::InvalidParameter(_)
        )
    }
}
