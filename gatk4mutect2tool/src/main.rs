use clap::{Parser, Subcommand};
use mutect2::Mutect2Error;
use std::env;

#[derive(Debug, Subcommand)]
pub enum Commands {
    Mutect2(mutect2::Mutect2),
    VcfUtils(vcfutils::VCFUtils),
}

impl Commands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Commands::Mutect2(x) => x.run(),
            Commands::VcfUtils(x) => x.run(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Tool for running GATK4 Mutect2")]
pub struct Cli {
    #[arg(short = 'v', long = "verbose", action= clap::ArgAction::Count, help="verbose level")]
    verbose: u8,
    #[command(subcommand)]
    commands: Commands,
}

/// Exit status for a failed command: the external tool's own exit code when
/// it failed, 1 otherwise.
fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<Mutect2Error>()
        .and_then(Mutect2Error::exit_code)
        .unwrap_or(1)
}

fn main() {
    let matches = Cli::parse();

    match matches.verbose {
        1 => env::set_var("RUST_LOG", "info"),
        2 => env::set_var("RUST_LOG", "debug"),
        3 => env::set_var("RUST_LOG", "trace"),
        _ => {
            if env::var("RUST_LOG").is_err() {
                env::set_var("RUST_LOG", "warn")
            }
        }
    }

    pretty_env_logger::init();

    if let Err(e) = matches.commands.run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cli() {
        let cli = Cli::parse_from([
            "gatk4mutect2tool",
            "-vv",
            "mutect2",
            "-R",
            "ref.fa",
            "-I",
            "tumor.bam",
            "-O",
            "out.vcf.gz",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.commands, Commands::Mutect2(_)));

        let cli = Cli::parse_from([
            "gatk4mutect2tool",
            "vcf-utils",
            "replace-sample",
            "--input",
            "in.vcf.gz",
            "--sample-name",
            "TUMOR",
        ]);
        assert!(matches!(cli.commands, Commands::VcfUtils(_)));
    }

    #[test]
    fn test_exit_code() {
        let failure: anyhow::Error = Mutect2Error::ExternalToolFailure {
            exit_code: Some(2),
            stderr_tail: "A USER ERROR has occurred".to_string(),
        }
        .into();
        assert_eq!(exit_code(&failure), 2);

        let not_found: anyhow::Error = Mutect2Error::BinaryNotFound("gatk".to_string()).into();
        assert_eq!(exit_code(&not_found), 1);

        assert_eq!(exit_code(&anyhow::anyhow!("malformed header")), 1);
    }
}
