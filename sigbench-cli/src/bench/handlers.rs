use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::ProgressBar;

use sigbench::{BenchConfig, Benchmark, Report};
use sigbench_core::DenseSignal;
use sigbench_core::models::ChromSizes;

pub fn run_bench(matches: &ArgMatches) -> Result<()> {
    // get arguments from CLI
    let chromsizes = matches
        .get_one::<String>("chromsizes")
        .expect("A path to a chrom.sizes file is required.");

    let bedgraph = matches
        .get_one::<String>("bedgraph")
        .expect("A path to a bedGraph file is required.");

    let chrom_name = matches
        .get_one::<String>("chrom")
        .expect("A chromosome name is required.");

    let num_tests: usize = parse_arg(matches, "num-tests")?;
    let interval_size: u32 = parse_arg(matches, "interval-size")?;
    let bin_size: u32 = parse_arg(matches, "bin-size")?;
    let seed: u64 = parse_arg(matches, "seed")?;

    let stats: Vec<String> = match matches.get_one::<String>("stats") {
        Some(list) => list
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => Vec::new(),
    };

    let chrom_sizes = ChromSizes::try_from(Path::new(chromsizes))?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Loading signal from {bedgraph}..."));
    let reference = DenseSignal::from_bedgraph(bedgraph, &chrom_sizes)?;
    let mut tested = reference.clone();
    tested.load_bins(chrom_name, bin_size)?;
    spinner.finish_with_message("Signal loaded.");

    let config = BenchConfig {
        num_tests,
        interval_size,
        chrom_name: chrom_name.to_string(),
        bin_size,
        stats,
        only_runtime: matches.get_flag("only-runtime"),
        bench_reference: !matches.get_flag("skip-reference"),
        reference_is_ground_truth: !matches.get_flag("self-baseline"),
    };

    let report = Benchmark::new(&tested, &reference, &chrom_sizes)
        .with_seed(seed)
        .run(&config)?;

    print_report(&report);

    if let Some(output) = matches.get_one::<String>("output") {
        let file = File::create(output)
            .with_context(|| format!("Failed to create output file: {output}"))?;
        serde_json::to_writer_pretty(file, &report)?;
        println!("Report written to {output}");
    }

    Ok(())
}

fn parse_arg<T: std::str::FromStr>(matches: &ArgMatches, name: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .get_one::<String>(name)
        .expect("argument has a default value")
        .parse::<T>()
        .with_context(|| format!("Invalid value for --{name}"))
}

fn print_report(report: &Report) {
    println!(
        "\n{:<20} {:>14} {:>18} {:>16} {:>14}",
        "statistic", "run_time (s)", "approx_time (s)", "exact_time (s)", "error"
    );
    for (key, record) in report.iter() {
        println!(
            "{:<20} {:>14} {:>18} {:>16} {:>14}",
            key,
            format_figure(record.run_time),
            format_figure(record.approx_run_time),
            format_figure(record.exact_run_time),
            format_figure(record.error),
        );
    }
}

fn format_figure(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.6}"),
        None => "-".to_string(),
    }
}
