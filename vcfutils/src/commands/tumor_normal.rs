use crate::logic::replace_sample::{replace_sample_in_file, SampleRenaming};
use crate::utils::readgroup::sample_name_from_bam;
use anyhow::Context;
use clap::Args;
use log::info;
use std::path::PathBuf;

pub const TUMOR_SAMPLE_NAME: &str = "TUMOR";
pub const NORMAL_SAMPLE_NAME: &str = "NORMAL";

#[derive(Args, Debug)]
#[command(
    about = "Rename Mutect2 sample columns to TUMOR and NORMAL",
    long_about = "Rename Mutect2 sample columns to TUMOR and NORMAL. Original sample names are taken from SM tag of the read group in the BAM files.",
    version,
    author
)]
pub struct TumorNormal {
    #[arg(long = "tumor-bam", help = "Tumor BAM/CRAM file")]
    tumor_bam: PathBuf,
    #[arg(long = "normal-bam", help = "Normal BAM/CRAM file")]
    normal_bam: Option<PathBuf>,
    #[arg(long, help = "Mutect2 VCF")]
    vcf: PathBuf,
    #[arg(short, long, help = "Output VCF (default: rewrite input in place)")]
    output: Option<PathBuf>,
    #[arg(long, help = "Create tabix index (BGZF output only)")]
    index: bool,
}

impl TumorNormal {
    pub fn run(&self) -> anyhow::Result<()> {
        let tumor_sample = sample_name_from_bam(&self.tumor_bam)
            .with_context(|| format!("Failed to read {}", self.tumor_bam.display()))?;
        info!("tumor sample: {}", tumor_sample);
        let mut mapping = vec![(tumor_sample, TUMOR_SAMPLE_NAME.to_string())];

        if let Some(normal_bam) = self.normal_bam.as_ref() {
            let normal_sample = sample_name_from_bam(normal_bam)
                .with_context(|| format!("Failed to read {}", normal_bam.display()))?;
            info!("normal sample: {}", normal_sample);
            mapping.push((normal_sample, NORMAL_SAMPLE_NAME.to_string()));
        }

        let output = self.output.as_ref().unwrap_or(&self.vcf);
        replace_sample_in_file(
            &self.vcf,
            output,
            &SampleRenaming::Mapping(mapping),
            self.index,
        )
        .with_context(|| format!("Failed to rewrite {}", self.vcf.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::VCFUtilsError;
    use std::path::Path;

    fn write_sam(path: &Path, sample: &str) -> std::io::Result<()> {
        std::fs::write(
            path,
            format!(
                "@HD\tVN:1.6\n@SQ\tSN:chr1\tLN:1000\n@RG\tID:rg1\tSM:{}\tPL:ILLUMINA\n",
                sample
            ),
        )
    }

    #[test]
    fn test_tumor_normal() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let tumor = dir.path().join("tumor.sam");
        let normal = dir.path().join("normal.sam");
        let vcf = dir.path().join("mutect2.vcf");
        let output = dir.path().join("mutect2.renamed.vcf");
        write_sam(&tumor, "T_SM")?;
        write_sam(&normal, "N_SM")?;
        std::fs::write(
            &vcf,
            "##fileformat=VCFv4.2\n##tumor_sample=T_SM\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tN_SM\tT_SM\nchr1\t5\t.\tC\tG\t.\tPASS\t.\tGT\t0/0\t0/1\n",
        )?;

        TumorNormal {
            tumor_bam: tumor.clone(),
            normal_bam: Some(normal.clone()),
            vcf: vcf.clone(),
            output: Some(output.clone()),
            index: false,
        }
        .run()?;
        assert_eq!(
            std::fs::read_to_string(&output)?,
            "##fileformat=VCFv4.2\n##tumor_sample=T_SM\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNORMAL\tTUMOR\nchr1\t5\t.\tC\tG\t.\tPASS\t.\tGT\t0/0\t0/1\n"
        );

        // tumor sample is not in the VCF
        write_sam(&tumor, "OTHER")?;
        let error = TumorNormal {
            tumor_bam: tumor,
            normal_bam: None,
            vcf,
            output: Some(output),
            index: false,
        }
        .run()
        .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<VCFUtilsError>(),
            Some(VCFUtilsError::SampleNotFound(x)) if x == "OTHER"
        ));
        Ok(())
    }

    #[test]
    fn test_tumor_normal_same_sample() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let tumor = dir.path().join("tumor.sam");
        let normal = dir.path().join("normal.sam");
        let vcf = dir.path().join("mutect2.vcf");
        let output = dir.path().join("mutect2.renamed.vcf");
        write_sam(&tumor, "SAME_SM")?;
        write_sam(&normal, "SAME_SM")?;
        std::fs::write(
            &vcf,
            "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tSAME_SM\n",
        )?;

        let error = TumorNormal {
            tumor_bam: tumor,
            normal_bam: Some(normal),
            vcf,
            output: Some(output.clone()),
            index: false,
        }
        .run()
        .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<VCFUtilsError>(),
            Some(VCFUtilsError::ConflictingRenaming(x)) if x == "SAME_SM"
        ));
        assert!(!output.exists());
        Ok(())
    }
}
