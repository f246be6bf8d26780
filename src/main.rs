use std::process::ExitCode;

use clap::{Parser, Subcommand};
use num_bigint::BigUint;
use tracing_subscriber::{fmt, EnvFilter};

use gq_elgamal::{GqGroup, GqGroupGenerator, Result, SecurityLevel};

#[derive(Parser)]
#[command(name = "gq-domain")]
#[command(about = "Derive and audit election group parameters from a public seed")]
#[command(version)]
struct Cli {
    /// Security level: TESTING_ONLY, LEGACY or EXTENDED (defaults to $SECURITY_LEVEL, then EXTENDED)
    #[arg(long, short = 'l', global = true)]
    security_level: Option<SecurityLevel>,

    /// Stop after this many rejected candidates
    #[arg(long, global = true)]
    max_iterations: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive (p, q, g) for a seed
    Derive {
        /// Public seed, usually the election identifier
        #[arg(long)]
        seed: String,
    },
    /// Check published (p, q, g) against the seed they claim to come from
    Verify {
        #[arg(long)]
        seed: String,
        #[arg(long)]
        p: BigUint,
        #[arg(long)]
        q: BigUint,
        #[arg(long)]
        g: BigUint,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_directive = if cli.verbose { "debug" } else { "warn" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let level = match cli.security_level {
        Some(level) => level,
        None => SecurityLevel::from_env()?,
    };
    let mut generator = GqGroupGenerator::new(level);
    if let Some(limit) = cli.max_iterations {
        generator = generator.with_iteration_limit(limit);
    }

    match cli.command {
        Commands::Derive { seed } => {
            let group = generator.derive_domain(&seed)?;
            print_group(&group);
            Ok(true)
        }
        Commands::Verify { seed, p, q, g } => {
            let group = GqGroup::new(p, q, g)?;
            let result = generator.verify_domain(&seed, &group);
            if result.is_verified() {
                println!("OK: domain matches seed {seed:?} at level {level}");
            } else {
                println!("{result}");
            }
            Ok(result.is_verified())
        }
    }
}

fn print_group(group: &GqGroup) {
    println!("p = {}", group.p());
    println!("q = {}", group.q());
    println!("g = {}", group.generator().value());
}
