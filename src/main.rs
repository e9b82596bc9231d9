use clap::Parser;
use indicatif::MultiProgress;
use piapprox::{
    resolve_workers, Estimate, Estimator, EstimatorConfig, LogWriter, MonteCarloError, Partition,
    PartitionPolicy, ProgressDisplay, SamplingStrategy, SystemInfo, WorkerFallback,
    DEFAULT_TOTAL_SAMPLES,
};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Annäherung von Pi (π) durch den Monte-Carlo-Algorithmus.
///
/// Die Punkte werden gleichmäßig auf die Worker verteilt; jeder Worker hat
/// seinen eigenen Zufallszahlengenerator.
#[derive(Parser, Debug)]
#[command(name = "piapprox")]
#[command(version, about, long_about = None)]
struct Args {
    /// Anzahl der Worker. Fehlt sie oder ist sie ungültig, werden 2 verwendet
    #[arg(allow_hyphen_values = true)]
    workers: Option<String>,

    /// Gesamtzahl der Punkte
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOTAL_SAMPLES)]
    samples: u64,

    /// Fester Seed für reproduzierbare Ergebnisse. Ohne Seed wird die Entropie
    /// des Betriebssystems verwendet.
    #[arg(long)]
    seed: Option<u64>,

    /// Wie jeder Worker seine Punkte erzeugt
    #[arg(long, value_enum, default_value_t = SamplingStrategy::Scalar)]
    strategy: SamplingStrategy,

    /// Wie der Rest der Division auf die Worker verteilt wird
    #[arg(long, value_enum, default_value_t = PartitionPolicy::Truncate)]
    partition: PartitionPolicy,

    /// Ungültige Worker-Anzahl als Fehler behandeln statt auf 2 zurückzufallen
    #[arg(long)]
    strict: bool,

    /// Fortschrittsbalken pro Worker anzeigen
    #[arg(long)]
    progress: bool,
}

fn main() -> ExitCode {
    // Logs und Balken teilen sich stderr; Log-Zeilen blenden die Balken kurz aus.
    let multi = MultiProgress::new();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,piapprox=info")),
        )
        .with_writer(LogWriter::new(&multi))
        .init();

    let args = Args::parse();

    match run(&args, &multi) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(report_failure(&e, &mut io::stderr())),
    }
}

fn run(args: &Args, multi: &MultiProgress) -> Result<(), MonteCarloError> {
    println!("\nAnnäherung von Pi (π) durch den Monte-Carlo-Algorithmus.");
    println!("Implementiert in Rust mit der Rayon Bibliothek für die parallele Berechnung.");

    let fallback = if args.strict {
        WorkerFallback::Reject
    } else {
        WorkerFallback::default()
    };
    let workers = resolve_workers(args.workers.as_deref(), fallback)?;

    let config = EstimatorConfig::new(args.samples, workers)?
        .with_seed(args.seed)
        .with_strategy(args.strategy)
        .with_partition(args.partition);
    let estimator = Estimator::new(config)?;

    let system = SystemInfo::detect();
    info!(pid = std::process::id(), ?system, "Hauptprozess gestartet");
    println!("\n{system}");
    println!("{}\n", plan_line(estimator.partition()));

    let estimate = if args.progress {
        let display = ProgressDisplay::new(multi, estimator.partition());
        let result = estimator.run_with_progress(&display);
        display.finish();
        result?
    } else {
        estimator.run()?
    };

    print_estimate(&estimate);
    Ok(())
}

/// Beschreibt die Aufteilung; bei ungleichen Anteilen mit kleinstem und größtem Anteil.
fn plan_line(partition: &Partition) -> String {
    let (min, max) = (partition.min_share(), partition.max_share());
    let per_worker = if min == max {
        min.to_string()
    } else {
        format!("{min} bis {max}")
    };

    format!(
        "{per_worker} Punkte pro Worker bei {} Workern ({} von {} Punkten)",
        partition.shares().len(),
        partition.samples_used(),
        partition.requested()
    )
}

/// Meldet einen Fehler genau einmal und wählt den Exit-Code.
fn report_failure(error: &MonteCarloError, out: &mut impl Write) -> u8 {
    // Wenn stderr nicht beschreibbar ist, bleibt nur der Exit-Code.
    let _ = writeln!(out, "\n{error}");
    if error.is_config_error() {
        2
    } else {
        1
    }
}

/// Gibt die Ergebnisse aller Worker und die Schätzung aus.
fn print_estimate(estimate: &Estimate) {
    for report in &estimate.reports {
        println!(
            "[Worker {}]: {} Punkte, {} Treffer in {:.3} s",
            report.worker,
            report.share,
            report.hits,
            report.elapsed.as_secs_f64()
        );
    }

    println!("\nErgebnisse:");
    println!("π Annäherung:      {:.10}", estimate.pi);
    println!("Eigentliches π:    {:.10}", std::f64::consts::PI);
    println!("Abweichung:        {:.10}", estimate.abs_error());
    println!("Verwendete Punkte: {}", estimate.samples_used);
    println!("Berechnungszeit:   {:.2?}", estimate.elapsed);
    println!("Punkte pro Sekunde: {:.2e}", estimate.samples_per_second());
}
