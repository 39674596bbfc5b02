use anyhow::{Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use jobsim::report;
use jobsim::{FrequencyTable, RngSource, allocate_ranges, run_simulations};

const MAX_JOBS: usize = 50;
const DEFAULT_FREQUENCY: u32 = 10;

#[derive(Parser, Debug)]
#[command(author, version, about = "Monte Carlo simulation for job scheduling", long_about = None)]
struct Args {
    /// Number of jobs, named J1..JN
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=MAX_JOBS as i64))]
    jobs: u8,

    /// Frequency of each job in order; repeat per job, missing ones default to 10
    #[arg(short, long = "freq", value_parser = clap::value_parser!(u32).range(1..))]
    freq: Vec<u32>,

    /// Number of simulations
    #[arg(short = 'n', long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..))]
    simulations: u32,

    /// Jobs drawn per simulation
    #[arg(short, long, default_value_t = 29, value_parser = clap::value_parser!(u32).range(1..))]
    draws: u32,

    /// Random seed (optional)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Also print per-draw details for every simulation
    #[arg(long)]
    details: bool,
}

fn frequency_table(args: &Args) -> Result<FrequencyTable> {
    let jobs = usize::from(args.jobs);
    if args.freq.len() > jobs {
        bail!("{} frequencies given for {} jobs", args.freq.len(), jobs);
    }
    let mut freqs = args.freq.clone();
    freqs.resize(jobs, DEFAULT_FREQUENCY);
    Ok(FrequencyTable::numbered(&freqs))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let frequencies = frequency_table(&args)?;

    let ranges = allocate_ranges(&frequencies)?;
    println!("Generated Random Number Ranges (1–{})", ranges.total_range());
    print!("{}", report::render_ranges(&ranges));

    let mut source = match args.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };
    info!(
        simulations = args.simulations,
        draws = args.draws,
        seed = ?args.seed,
        "running simulations"
    );
    let batch = run_simulations(
        &ranges,
        ranges.total_range(),
        args.simulations as usize,
        args.draws as usize,
        &mut source,
    )?;

    println!();
    println!("Job Probabilities and Cumulative Probabilities");
    print!("{}", report::render_probabilities(&batch.aggregate));

    if args.details {
        println!();
        print!("{}", report::render_details(&batch, &ranges));
    }

    println!();
    println!("Simulated Job Sequences");
    print!("{}", report::render_sequences(&batch));

    if let Some(top) = report::most_frequent(&batch.aggregate) {
        println!();
        println!(
            "Most frequent job: {} ({} of {} draws, {:.4})",
            top.job,
            top.count,
            batch.aggregate.total_draws(),
            top.probability
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("jobsim").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_follow_form() {
        let args = parse(&[]);
        assert_eq!(args.jobs, 3);
        assert_eq!(args.simulations, 50);
        assert_eq!(args.draws, 29);
        let table = frequency_table(&args).unwrap();
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![("J1", 10), ("J2", 10), ("J3", 10)]);
    }

    #[test]
    fn missing_frequencies_are_padded() {
        let args = parse(&["--jobs", "3", "--freq", "10", "--freq", "20"]);
        let table = frequency_table(&args).unwrap();
        assert_eq!(table.get("J2"), Some(20));
        assert_eq!(table.get("J3"), Some(DEFAULT_FREQUENCY));
    }

    #[test]
    fn extra_frequencies_are_rejected() {
        let args = parse(&["--jobs", "1", "--freq", "1", "--freq", "2"]);
        assert!(frequency_table(&args).is_err());
    }

    #[test]
    fn job_count_is_bounded() {
        let argv = ["jobsim", "--jobs", "51"];
        assert!(Args::try_parse_from(argv).is_err());
        let argv = ["jobsim", "--jobs", "0"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn zero_frequency_is_rejected_by_parser() {
        assert!(Args::try_parse_from(["jobsim", "--freq", "0"]).is_err());
    }
}
