//! Monte-Carlo-Kern: Zufallspunkte im Einheitsquadrat erzeugen und Treffer im Viertelkreis zählen.
//!
//! - Verhältnis der Fläche eines Viertelkreises zur Fläche des Quadrats: π/4
//! - Daraus folgt: π ≈ 4 * (Punkte im Kreis / Gesamtpunkte)

use crate::config::SamplingStrategy;
use crate::error::{MonteCarloError, Result};
use rand::rngs::OsRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Punkte pro Batch, nach jedem Batch wird der Fortschritt gemeldet.
pub const BATCH_SIZE: u64 = 10_000;

/// Empfänger für Fortschrittsmeldungen der Worker.
///
/// Wird von allen Workern gleichzeitig aufgerufen und muss daher `Sync` sein.
pub trait ProgressSink: Sync {
    /// `points` weitere Punkte von `worker` sind verarbeitet.
    fn advance(&self, worker: usize, points: u64);
}

/// Keine Fortschrittsanzeige.
impl ProgressSink for () {
    fn advance(&self, _worker: usize, _points: u64) {}
}

/// Liegt (x, y) im Viertelkreis? Punkte genau auf dem Kreis zählen mit.
#[inline]
pub fn is_in_quarter_circle(x: f64, y: f64) -> bool {
    x * x + y * y <= 1.0
}

/// Zieht `n` Punkte aus `[0, 1) × [0, 1)` und zählt die Treffer im Viertelkreis.
pub fn count_hits<R: Rng + ?Sized>(rng: &mut R, n: u64) -> u64 {
    let mut hits = 0; // Zähler für Punkte innerhalb des Kreises.

    for _ in 0..n {
        let x: f64 = rng.gen(); // Zufällige x-Koordinate zwischen 0 und 1.
        let y: f64 = rng.gen(); // Zufällige y-Koordinate zwischen 0 und 1.

        if is_in_quarter_circle(x, y) {
            hits += 1;
        }
    }

    hits
}

/// Wie [`count_hits`], erzeugt aber zuerst alle x- und dann alle y-Koordinaten
/// in eigenen Puffern und zählt danach.
///
/// Braucht `16 * n` Bytes. Reicht der Speicher nicht, gibt es
/// [`MonteCarloError::ResourceExhausted`].
pub fn count_hits_batched<R: Rng + ?Sized>(rng: &mut R, n: u64) -> Result<u64> {
    let len = usize::try_from(n).map_err(|_| MonteCarloError::ResourceExhausted { requested: n })?;

    let xs = random_buffer(rng, len, n)?;
    let ys = random_buffer(rng, len, n)?;

    let hits = xs
        .iter()
        .zip(&ys)
        .filter(|&(&x, &y)| is_in_quarter_circle(x, y))
        .count();

    Ok(hits as u64)
}

fn random_buffer<R: Rng + ?Sized>(rng: &mut R, len: usize, requested: u64) -> Result<Vec<f64>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| MonteCarloError::ResourceExhausted { requested })?;
    buffer.extend((0..len).map(|_| rng.gen::<f64>()));
    Ok(buffer)
}

/// Basis-Seed aus der Entropiequelle des Betriebssystems.
pub fn entropy_seed() -> u64 {
    OsRng.next_u64()
}

/// Ein Worker mit eigenem Zufallszahlengenerator.
///
/// Jeder Worker nutzt denselben Basis-Seed, aber einen eigenen ChaCha-Stream
/// (Stream = Worker-Index). Die Folgen zweier Worker überschneiden sich daher
/// nie, auch nicht bei festem Seed.
pub struct Sampler {
    worker: usize,
    rng: ChaCha8Rng,
    strategy: SamplingStrategy,
}

impl Sampler {
    pub fn new(base_seed: u64, worker: usize, strategy: SamplingStrategy) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(base_seed);
        rng.set_stream(worker as u64);

        Self {
            worker,
            rng,
            strategy,
        }
    }

    /// Zieht `n` Punkte und gibt die Anzahl der Treffer zurück.
    pub fn run(&mut self, n: u64, progress: &dyn ProgressSink) -> Result<u64> {
        debug!(worker = self.worker, samples = n, strategy = ?self.strategy, "Worker startet");

        match self.strategy {
            SamplingStrategy::Scalar => {
                let mut hits = 0;
                let mut processed = 0;

                while processed < n {
                    let batch = BATCH_SIZE.min(n - processed);
                    hits += count_hits(&mut self.rng, batch);
                    processed += batch;
                    progress.advance(self.worker, batch);
                }

                Ok(hits)
            }
            SamplingStrategy::Batched => {
                let hits = count_hits_batched(&mut self.rng, n)?;
                progress.advance(self.worker, n);
                Ok(hits)
            }
        }
    }
}
