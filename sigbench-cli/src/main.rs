mod bench;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "sigbench";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Comparative benchmarking of genomic interval statistics backends: measure the latency of a binned signal backend and its deviation from exact answers.")
        .subcommand_required(true)
        .subcommand(bench::cli::create_bench_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // BENCH
        //
        Some((bench::cli::BENCH_CMD, matches)) => {
            bench::handlers::run_bench(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
