use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use docweave_lib::Docweave;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Docweave - Command Line Interface",
    long_about = "Compose documentation pages out of shared content fragments"
)]
struct Args {
    /// path to the pages tree, paths below it become page locations
    /// (eg. ./pages/writing-algorithms/universes/settings.html)
    pages: PathBuf,

    /// path to the fragment tree, defaults to "resources" next to the pages tree
    #[clap(long, short)]
    fragments: Option<PathBuf>,

    /// path to put the rendered pages into
    #[clap(long, short, default_value = "build")]
    output: PathBuf,

    /// Print output of a single page location instead of building the site
    #[clap(long, short)]
    single_page: Option<String>,

    /// Validate all pages and fragments without writing output
    #[clap(long)]
    check: bool,

    /// "TRACE", "DEBUG", "INFO", "WARN", "ERROR"
    #[clap(long, short)]
    log: Option<LevelFilter>,
}

fn main() -> ExitCode {
    let args: Args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log.unwrap_or(LevelFilter::Info))
        .init();

    let fragments = match args.fragments {
        Some(fragments) => fragments,
        None => args
            .pages
            .parent()
            .unwrap_or(Path::new("."))
            .join("resources"),
    };
    let docweave = Docweave::new(args.pages, fragments, args.output);

    if let Some(location) = args.single_page {
        return match docweave.render_page(&location) {
            Ok(html) => {
                println!("{html}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to render '{location}': {e}");
                ExitCode::FAILURE
            }
        };
    }

    let result = if args.check {
        docweave.check()
    } else {
        docweave.render()
    };
    match result {
        Ok(report) => {
            println!("{report}");
            if report.has_failures() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Build failed: {e}");
            ExitCode::FAILURE
        }
    }
}
