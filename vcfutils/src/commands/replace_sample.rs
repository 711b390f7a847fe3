use crate::logic::replace_sample::{replace_sample_in_file, MultiSamplePolicy, SampleRenaming};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(about = "Replace sample names", version, author)]
pub struct ReplaceSampleName {
    #[arg(short, long, help = "Input VCF file")]
    input: PathBuf,
    #[arg(
        short,
        long,
        help = "Output VCF",
        long_help = "Output VCF. BGZF compressed when the name ends with .gz or .bgz. The input is rewritten in place when omitted."
    )]
    output: Option<PathBuf>,
    #[arg(short, long = "sample-name", help = "New sample name")]
    sample_name: String,
    #[arg(
        long = "old-name",
        help = "Sample to rename",
        long_help = "Sample to rename. When omitted, sample columns are selected by --multi-sample."
    )]
    old_name: Option<String>,
    #[arg(
        long = "multi-sample",
        value_enum,
        default_value_t = MultiSamplePolicy::All,
        help = "Behavior when VCF has more than one sample column"
    )]
    multi_sample: MultiSamplePolicy,
    #[arg(long, help = "Create tabix index (BGZF output only)")]
    index: bool,
}

impl ReplaceSampleName {
    pub fn run(&self) -> anyhow::Result<()> {
        let output = self.output.as_ref().unwrap_or(&self.input);
        replace_sample_in_file(&self.input, output, &self.renaming(), self.index)
            .with_context(|| format!("Failed to rewrite {}", self.input.display()))?;
        Ok(())
    }

    fn renaming(&self) -> SampleRenaming {
        if let Some(old_name) = self.old_name.as_ref() {
            SampleRenaming::Mapping(vec![(old_name.clone(), self.sample_name.clone())])
        } else {
            SampleRenaming::Columns {
                new_name: self.sample_name.clone(),
                policy: self.multi_sample,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::VCFUtilsError;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        command: ReplaceSampleName,
    }

    const VCF: &[u8] = b"##fileformat=VCFv4.2\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNORMAL_SM\tTUMOR_SM\n\
chr1\t100\t.\tG\tA\t.\tPASS\t.\tGT\t0/0\t0/1\n";

    #[test]
    fn test_replace_sample_command() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("mutect2.vcf");
        let output = dir.path().join("renamed.vcf");
        std::fs::write(&input, VCF)?;

        let cli = TestCli::parse_from([
            "replace-sample",
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--sample-name",
            "TUMOR",
            "--old-name",
            "TUMOR_SM",
        ]);
        cli.command.run()?;
        assert!(std::fs::read_to_string(&output)?.contains("FORMAT\tNORMAL_SM\tTUMOR\n"));

        let cli = TestCli::parse_from([
            "replace-sample",
            "-i",
            input.to_str().unwrap(),
            "-s",
            "SAMPLE",
            "--multi-sample",
            "single",
        ]);
        let error = cli.command.run().unwrap_err();
        assert!(matches!(
            error.downcast_ref::<VCFUtilsError>(),
            Some(VCFUtilsError::AmbiguousSampleCount(2))
        ));
        assert_eq!(std::fs::read(&input)?, VCF);

        let cli = TestCli::parse_from([
            "replace-sample",
            "-i",
            input.to_str().unwrap(),
            "-s",
            "SAMPLE",
        ]);
        cli.command.run()?;
        assert!(std::fs::read_to_string(&input)?.contains("FORMAT\tSAMPLE_1\tSAMPLE_2\n"));
        Ok(())
    }
}
