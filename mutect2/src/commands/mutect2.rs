use crate::error::Mutect2Error;
use crate::logic::arguments::{Mutect2Request, ToolOptions, DEFAULT_GATK_PATH};
use crate::logic::intervals::resolve_intervals;
use clap::Args;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Args)]
#[command(about = "Run GATK4 Mutect2", version, author)]
pub struct Mutect2 {
    #[arg(short = 'R', long, help = "Reference sequence file")]
    reference: String,
    #[arg(short = 'I', long = "input", required = true, help = "BAM files")]
    inputs: Vec<String>,
    #[arg(short = 'O', long, help = "Output VCF")]
    output: String,
    #[arg(
        short = 'L',
        long,
        help = "Genomic intervals over which to operate",
        long_help = "Genomic intervals over which to operate. BED files (.bed, .bed.gz) are \
                     expanded into one interval per region; other values are passed to GATK as is."
    )]
    intervals: Vec<String>,
    #[arg(long = "gatk4-path", help = "GATK4 executable path", default_value = DEFAULT_GATK_PATH)]
    gatk4_path: String,
    #[arg(
        long = "java-heap",
        help = "Maximum Java heap size (e.g. 8G). This is NOT a GATK parameter."
    )]
    java_heap: Option<String>,
    #[arg(long = "f1r2-tar-gz", help = "Collect F1R2 counts into this tar.gz file")]
    f1r2_tar_gz: Option<String>,
    #[arg(long = "bam-output", help = "Write assembled haplotypes to this BAM")]
    bam_output: Option<String>,
    #[arg(
        long = "arguments-file",
        help = "Write tool options to this file and pass it with --arguments_file"
    )]
    arguments_file: Option<PathBuf>,
    #[arg(long = "working-directory", help = "Run GATK in this directory")]
    working_directory: Option<PathBuf>,
    #[arg(
        long,
        help = "Print the command line instead of running it. The arguments file is not written."
    )]
    dry_run: bool,

    #[arg(long = "normal-sample", help = "BAM sample name of normal(s)")]
    normal_sample: Vec<String>,
    #[arg(long, help = "Population VCF of germline sequencing containing allele fractions")]
    germline_resource: Option<String>,
    #[arg(long, help = "VCF file of sites observed in normal")]
    panel_of_normals: Option<String>,
    #[arg(
        long,
        help = "Population allele fraction assigned to alleles not found in germline resource"
    )]
    af_of_alleles_not_in_resource: Option<String>,
    #[arg(long, help = "Threads used by the native pair-HMM implementation")]
    native_pair_hmm_threads: Option<usize>,
    #[arg(long, help = "Minimum base quality required to consider a base for calling")]
    min_base_quality_score: Option<u8>,
    #[arg(long, help = "Minimum depth to be considered callable for Mutect stats")]
    callable_depth: Option<u32>,
    #[arg(long, help = "Sets emission and initial LODs to 0")]
    mitochondria_mode: bool,
    #[arg(long, help = "Call all apparent germline sites even though they will be filtered")]
    genotype_germline_sites: bool,
    #[arg(long, help = "Call sites in the PoN even though they will be filtered")]
    genotype_pon_sites: bool,
    #[arg(long, help = "Do not analyze soft clipped bases in the reads")]
    dont_use_soft_clipped_bases: bool,

    #[arg(last = true, help = "Additional arguments passed to Mutect2 as is")]
    passthrough: Vec<String>,
}

impl Mutect2 {
    pub fn run(&self) -> anyhow::Result<()> {
        let request = self.request()?;
        request.validate()?;
        let invocation = request.invocation()?;

        if self.dry_run {
            println!("{}", invocation.command_line());
            return Ok(());
        }

        request.write_arguments_file()?;
        let start = Instant::now();
        invocation.run()?;
        info!(
            "Finished, took {:.2} seconds.",
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    fn tool_options(&self) -> ToolOptions {
        let mut options = ToolOptions::new();
        options
            .values("normal_sample", &self.normal_sample)
            .value("germline_resource", self.germline_resource.as_ref())
            .value("panel_of_normals", self.panel_of_normals.as_ref())
            .value(
                "af_of_alleles_not_in_resource",
                self.af_of_alleles_not_in_resource.as_ref(),
            )
            .value("native_pair_hmm_threads", self.native_pair_hmm_threads)
            .value("min_base_quality_score", self.min_base_quality_score)
            .value("callable_depth", self.callable_depth)
            .flag("mitochondria_mode", self.mitochondria_mode)
            .flag("genotype_germline_sites", self.genotype_germline_sites)
            .flag("genotype_pon_sites", self.genotype_pon_sites)
            .flag("dont_use_soft_clipped_bases", self.dont_use_soft_clipped_bases);
        options
    }

    fn request(&self) -> Result<Mutect2Request, Mutect2Error> {
        let mut intervals = Vec::new();
        for one in &self.intervals {
            intervals.extend(resolve_intervals(one)?);
        }

        Ok(Mutect2Request {
            gatk_path: self.gatk4_path.clone(),
            java_heap: self.java_heap.clone(),
            reference: self.reference.clone(),
            inputs: self.inputs.clone(),
            output: self.output.clone(),
            intervals,
            f1r2_tar_gz: self.f1r2_tar_gz.clone(),
            bam_output: self.bam_output.clone(),
            tool_options: self.tool_options(),
            arguments_file: self.arguments_file.clone(),
            passthrough: self.passthrough.clone(),
            working_directory: self.working_directory.clone(),
        })
    }
}
