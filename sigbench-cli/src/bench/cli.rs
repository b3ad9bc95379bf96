use clap::{Arg, Command, arg};

pub const BENCH_CMD: &str = "bench";
pub const DEFAULT_NUM_TESTS: &str = "1000";
pub const DEFAULT_INTERVAL_SIZE: &str = "500";
pub const DEFAULT_BIN_SIZE: &str = "64";
pub const DEFAULT_SEED: &str = "1";

pub fn create_bench_cli() -> Command {
    Command::new(BENCH_CMD)
        .about("Benchmark a binned signal backend against exact computation over a randomized, reproducible query set.")
        .arg(Arg::new("chromsizes").required(true).help("Path to a chrom.sizes file"))
        .arg(Arg::new("bedgraph").required(true).help("Path to a bedGraph signal file (plain or gzip'd)"))
        .arg(arg!(--chrom <chrom>).required(true).help("Chromosome to query"))
        .arg(
            arg!(--"num-tests" <n>)
                .default_value(DEFAULT_NUM_TESTS)
                .help("Number of randomized query intervals"),
        )
        .arg(
            arg!(--"interval-size" <size>)
                .default_value(DEFAULT_INTERVAL_SIZE)
                .help("Width of every query interval"),
        )
        .arg(
            arg!(--"bin-size" <size>)
                .default_value(DEFAULT_BIN_SIZE)
                .help("Bin size used by the backend under test for approximate statistics"),
        )
        .arg(arg!(--stats <stats>).help("Comma-separated statistic names (default: all)"))
        .arg(
            arg!(--seed <seed>)
                .default_value(DEFAULT_SEED)
                .help("Query generator seed; runs with the same seed share query sets"),
        )
        .arg(
            arg!(--"only-runtime")
                .action(clap::ArgAction::SetTrue)
                .help("Measure latency only, skipping ground-truth fetching and error computation"),
        )
        .arg(
            arg!(--"skip-reference")
                .action(clap::ArgAction::SetTrue)
                .help("Skip timing the reference backend"),
        )
        .arg(
            arg!(--"self-baseline")
                .action(clap::ArgAction::SetTrue)
                .help("Use the backend under test, not the reference, as ground truth"),
        )
        .arg(arg!(--output <path>).help("Write the report to a JSON file"))
}
