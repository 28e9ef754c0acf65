use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use surface_epoly::{
    DegreeEstimator, EPolyError, EPolynomialTable, GaloisField, GenusSweep, PointCounter,
    SampleCollector, SweepConfig, TracingProgress,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "surface-epoly",
    about = "E-polynomials of AGL(1) representation varieties of surface groups"
)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute E-polynomials for genus 1 up to a maximum.
    Sweep {
        /// Largest genus to compute.
        #[arg(long, default_value_t = 1)]
        max_genus: u32,
        /// Fixed degree bound instead of 4g - 1.
        #[arg(long)]
        degree: Option<usize>,
        /// Check each fit against one extra sample.
        #[arg(long)]
        verify: bool,
        /// Count each field order on all cores.
        #[arg(long)]
        parallel: bool,
        /// Largest field order scanned for samples.
        #[arg(long, default_value_t = surface_epoly::sampling::DEFAULT_MAX_FIELD_ORDER)]
        max_field_order: u64,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Plain)]
        format: Format,
    },
    /// Count solutions for one genus over GF(q).
    Count {
        /// Surface genus.
        #[arg(long)]
        genus: u32,
        /// Field order (a prime power).
        #[arg(long)]
        q: u64,
        /// Split the alpha rows across all cores.
        #[arg(long)]
        parallel: bool,
    },
    /// List (q, count) samples for one genus.
    Samples {
        /// Surface genus.
        #[arg(long)]
        genus: u32,
        /// Number of samples to collect.
        #[arg(long)]
        count: usize,
        /// Count each field order on all cores.
        #[arg(long)]
        parallel: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Plain,
    Latex,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Sweep {
            max_genus,
            degree,
            verify,
            parallel,
            max_field_order,
            format,
        } => {
            let estimator = degree.map_or(DegreeEstimator::Standard, DegreeEstimator::Fixed);
            let config = SweepConfig::for_max_genus(max_genus)
                .with_degree_estimator(estimator)
                .with_verification(verify)
                .with_parallelism(parallel)
                .with_max_field_order(max_field_order);
            run_sweep(config, format)?
        }
        Commands::Count { genus, q, parallel } => {
            let count = count_once(genus, q, parallel)
                .with_context(|| format!("counting failed for genus {} over GF({})", genus, q))?;
            println!("{}", count);
        }
        Commands::Samples {
            genus,
            count,
            parallel,
        } => {
            let samples = SampleCollector::new(genus)
                .parallel(parallel)
                .with_observer(&TracingProgress)
                .collect(count)
                .with_context(|| format!("sample collection failed for genus {}", genus))?;
            for sample in samples.samples() {
                println!("{}\t{}", sample.field_order, sample.count);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn count_once(genus: u32, q: u64, parallel: bool) -> surface_epoly::Result<u64> {
    if genus == 0 {
        return Err(EPolyError::InvalidGenus(0));
    }
    let field = GaloisField::new(q)?;
    PointCounter::new(&field, genus)
        .parallel(parallel)
        .with_observer(&TracingProgress)
        .count()
}

fn run_sweep(config: SweepConfig, format: Format) -> Result<()> {
    let table = GenusSweep::new(config)
        .with_observer(&TracingProgress)
        .run()
        .context("genus sweep failed")?;

    match format {
        Format::Plain => print_table(&table, |p| p.to_string()),
        Format::Latex => print_table(&table, |p| p.to_latex()),
        Format::Json => print_json(&table)?,
    }

    Ok(())
}

fn print_table(table: &EPolynomialTable, render: impl Fn(&surface_epoly::EPolynomial) -> String) {
    for result in table.iter() {
        println!("g={}\tE(q) = {}", result.genus, render(&result.polynomial));
    }
}

#[cfg(feature = "json")]
fn print_json(table: &EPolynomialTable) -> Result<()> {
    #[derive(serde::Serialize)]
    struct Entry<'a> {
        genus: u32,
        degree_bound: usize,
        samples: &'a [surface_epoly::Sample],
        coefficients: Vec<String>,
        polynomial: String,
    }

    let entries: Vec<Entry<'_>> = table
        .iter()
        .map(|result| Entry {
            genus: result.genus,
            degree_bound: result.degree_bound,
            samples: result.samples.samples(),
            coefficients: result
                .polynomial
                .coefficients()
                .iter()
                .map(|c| c.to_string())
                .collect(),
            polynomial: result.polynomial.to_string(),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

#[cfg(not(feature = "json"))]
fn print_json(_table: &EPolynomialTable) -> Result<()> {
    anyhow::bail!("JSON output requires building with the `json` feature")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_accepts_parallel_flag() {
        let cli = Cli::try_parse_from([
            "surface-epoly", "count", "--genus", "2", "--q", "3", "--parallel",
        ])
        .unwrap();
        let Commands::Count { genus, q, parallel } = cli.command else {
            panic!("expected the count subcommand");
        };
        assert!(parallel);
        assert_eq!(
            count_once(genus, q, parallel).unwrap(),
            surface_epoly::count_points(genus, q).unwrap()
        );
        assert!(count_once(0, q, true).is_err());
    }
}
