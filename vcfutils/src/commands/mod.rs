mod list_samples;
mod replace_sample;
mod tumor_normal;

use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(name = "replace-sample")]
    ReplaceSampleName(replace_sample::ReplaceSampleName),
    #[command(name = "tumor-normal")]
    TumorNormal(tumor_normal::TumorNormal),
    #[command(name = "list-samples")]
    ListSamples(list_samples::ListSamples),
}

impl Commands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Commands::ReplaceSampleName(x) => x.run(),
            Commands::TumorNormal(x) => x.run(),
            Commands::ListSamples(x) => x.run(),
        }
    }
}
