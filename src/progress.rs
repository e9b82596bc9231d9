//! Fortschrittsanzeige mit einem Balken pro Worker.

use crate::partition::Partition;
use crate::sampler::ProgressSink;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

const SPINNER_TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏✓";
const BAR_WIDTH: usize = 50;

/// Spinner als Kopfzeile und darunter ein Balken pro Worker.
pub struct ProgressDisplay {
    multi: MultiProgress,
    header: ProgressBar,
    bars: Vec<ProgressBar>,
}

impl ProgressDisplay {
    /// Legt in `multi` für jeden Anteil aus `partition` einen Balken an.
    pub fn new(multi: &MultiProgress, partition: &Partition) -> Self {
        let header = multi.add(ProgressBar::new_spinner());
        header.set_style(style("Berechne... {spinner} {elapsed_precise}").tick_chars(SPINNER_TICKS));
        header.enable_steady_tick(Duration::from_millis(50));

        let bars = partition
            .shares()
            .iter()
            .enumerate()
            .map(|(worker, &share)| {
                let bar = multi.add(ProgressBar::new(share));
                bar.set_style(
                    style(&format!("[Thread {{prefix}}]: [{{bar:{BAR_WIDTH}}}] {{percent}}%"))
                        .progress_chars("█░"),
                );
                bar.set_prefix(worker.to_string());
                bar
            })
            .collect();

        Self {
            multi: multi.clone(),
            header,
            bars,
        }
    }

    /// Beendet alle Balken und räumt die Anzeige ab.
    pub fn finish(&self) {
        for bar in &self.bars {
            bar.finish();
        }
        self.header.finish_with_message("fertig");
        // Fehler beim Löschen des Terminals sind für das Ergebnis egal.
        let _ = self.multi.clear();
    }
}

impl ProgressSink for ProgressDisplay {
    fn advance(&self, worker: usize, points: u64) {
        if let Some(bar) = self.bars.get(worker) {
            bar.inc(points);
        }
    }
}

/// Log-Ausgabe nach stderr, die laufende Balken kurz ausblendet.
///
/// Wird als Writer für `tracing_subscriber` verwendet, damit Log-Zeilen
/// während eines Laufs die Balken nicht zerschießen.
#[derive(Clone)]
pub struct LogWriter {
    multi: MultiProgress,
}

impl LogWriter {
    pub fn new(multi: &MultiProgress) -> Self {
        Self {
            multi: multi.clone(),
        }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.multi.suspend(|| io::stderr().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for LogWriter {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_bar())
}
