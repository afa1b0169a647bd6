use std::ffi::OsString;
use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sumcheck_core::{verify, Algorithm, CheckConfig, Verification};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const EXIT_DIFFERENT: u8 = 1;
const EXIT_FAILED: u8 = 2;

#[derive(Parser)]
#[command(
    name = "sumcheck",
    version,
    about = "Hash a file and compare the result against an expected hex digest"
)]
struct Cli {
    /// Hash type: sha224, sha256, sha384 or sha512
    #[arg(short = 't', long = "type", default_value = Algorithm::default().name())]
    hash_type: String,

    #[arg(long, value_enum, default_value = "console")]
    output: OutputArg,

    /// Only print the report
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// <filepath> <expected-hex-digest>
    #[arg(value_name = "ARGS")]
    args: Vec<String>,
}

#[derive(Clone, ValueEnum)]
enum OutputArg {
    Console,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(long_flags(std::env::args_os()));
    init_tracing(&cli);

    match run(&cli) {
        Ok(report) if report.matched => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_DIFFERENT),
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(EXIT_FAILED)
        }
    }
}

fn run(cli: &Cli) -> Result<Verification> {
    let config = CheckConfig::from_args(&cli.hash_type, cli.args.as_slice())?;
    let report = verify(&config)?;

    match cli.output {
        OutputArg::Json => {
            let json = serde_json::to_string_pretty(&report).context("Serializing report")?;
            println!("{json}");
        }
        OutputArg::Console => print_console(&report),
    }

    Ok(report)
}

fn print_console(report: &Verification) {
    println!("want: {}", report.expected);
    println!("got:  {}", report.actual);
    println!("{}", report.verdict());
}

/// Reads the command line the way Go's `flag` package does: `-type` may be
/// spelled with a single dash, and flag parsing stops at the first positional
/// argument. The rest are handed to clap after a `--` so they stay positional.
fn long_flags<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    let mut args = args.into_iter();
    let mut out: Vec<OsString> = args.next().into_iter().collect();
    let mut value_next = false;

    while let Some(arg) = args.next() {
        if value_next {
            value_next = false;
            out.push(arg);
            continue;
        }
        match arg.to_str() {
            Some("--") => {
                out.push(arg);
                out.extend(args.by_ref());
                break;
            }
            Some(s) if s == "-type" || s.starts_with("-type=") => {
                value_next = s == "-type";
                out.push(OsString::from(format!("-{s}")));
            }
            Some(s) if s.starts_with('-') && s != "-" => {
                value_next = takes_value(s);
                out.push(arg);
            }
            _ => {
                out.push(OsString::from("--"));
                out.push(arg);
                out.extend(args.by_ref());
                break;
            }
        }
    }

    out
}

fn takes_value(flag: &str) -> bool {
    matches!(flag, "-t" | "--type" | "--output")
}

fn init_tracing(cli: &Cli) {
    let filter = match cli.verbose {
        _ if cli.quiet => "error",
        0 => "warn,sumcheck=info,sumcheck_core=info",
        1 => "info,sumcheck=debug,sumcheck_core=debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();
}
