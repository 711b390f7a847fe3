use crate::logic::header::read_column_header;
use crate::utils;
use anyhow::Context;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(about = "List up sample names", version, author)]
pub struct ListSamples {
    #[arg(help = "Input VCF file")]
    input: PathBuf,
    #[arg(short, long, help = "Output text")]
    output: Option<String>,
}

impl ListSamples {
    pub fn run(&self) -> anyhow::Result<()> {
        let reader = utils::open_vcf_from_path(&self.input)?;
        let header = read_column_header(reader)
            .with_context(|| format!("Failed to read header of {}", self.input.display()))?;
        let mut output = autocompress::autodetect_create_or_stdout(
            self.output.as_ref(),
            autocompress::CompressionLevel::Default,
        )
        .with_context(|| {
            format!(
                "Failed to create {}",
                self.output.as_deref().unwrap_or("/dev/stdout")
            )
        })?;
        for one in &header.samples {
            writeln!(output, "{}", one)?;
        }
        Ok(())
    }
}
