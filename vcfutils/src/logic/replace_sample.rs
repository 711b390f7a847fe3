use crate::error::VCFUtilsError;
use crate::logic::header::{is_column_header, split_line_terminator, ColumnHeader};
use crate::utils::{self, AtomicOutput};
use log::{info, warn};
use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// What to do when a VCF has more than one sample column and no explicit
/// old name is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MultiSamplePolicy {
    /// Rename every sample column; multiple columns become NAME_1, NAME_2, ...
    #[default]
    All,
    /// Require exactly one sample column
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleRenaming {
    Columns {
        new_name: String,
        policy: MultiSamplePolicy,
    },
    /// Pairs of (old name, new name)
    Mapping(Vec<(String, String)>),
}

fn check_sample_name(name: &str) -> Result<(), VCFUtilsError> {
    if name.is_empty() || name.contains(|x: char| x == '\t' || x == '\n' || x == '\r') {
        return Err(VCFUtilsError::InvalidSampleName(name.to_string()));
    }
    Ok(())
}

impl SampleRenaming {
    /// Compute new sample names. Returned vector is positionally aligned
    /// with `samples`.
    pub fn apply(&self, samples: &[String]) -> Result<Vec<String>, VCFUtilsError> {
        if samples.is_empty() {
            return Err(VCFUtilsError::NoSampleColumns);
        }

        let new_samples: Vec<String> = match self {
            SampleRenaming::Columns { new_name, policy } => {
                check_sample_name(new_name)?;
                match (samples.len(), policy) {
                    (1, _) => vec![new_name.clone()],
                    (n, MultiSamplePolicy::Single) => {
                        return Err(VCFUtilsError::AmbiguousSampleCount(n))
                    }
                    (n, MultiSamplePolicy::All) => {
                        (1..=n).map(|i| format!("{}_{}", new_name, i)).collect()
                    }
                }
            }
            SampleRenaming::Mapping(mapping) => {
                let mut old_names = HashSet::new();
                for (old_name, new_name) in mapping {
                    check_sample_name(new_name)?;
                    if !old_names.insert(old_name.as_str()) {
                        return Err(VCFUtilsError::ConflictingRenaming(old_name.clone()));
                    }
                    if !samples.iter().any(|x| x == old_name) {
                        return Err(VCFUtilsError::SampleNotFound(old_name.clone()));
                    }
                }
                samples
                    .iter()
                    .map(|sample| {
                        mapping
                            .iter()
                            .find(|(old_name, _)| old_name == sample)
                            .map(|(_, new_name)| new_name.clone())
                            .unwrap_or_else(|| sample.clone())
                    })
                    .collect()
            }
        };

        let mut seen = HashSet::new();
        for one in &new_samples {
            if !seen.insert(one.as_str()) {
                return Err(VCFUtilsError::DuplicatedSampleName(one.clone()));
            }
        }
        Ok(new_samples)
    }
}

/// Rewrite sample names in the `#CHROM` line and copy everything else as is.
///
/// Returns pairs of (old name, new name) for every sample column.
pub fn replace_sample<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    renaming: &SampleRenaming,
) -> Result<Vec<(String, String)>, VCFUtilsError> {
    let mut line = Vec::new();
    let mut renamed = None;
    while reader.read_until(b'\n', &mut line)? > 0 {
        if is_column_header(&line) {
            let (content, terminator) = split_line_terminator(&line);
            let mut header = ColumnHeader::parse(content)?;
            let new_samples = renaming.apply(&header.samples)?;
            let pairs: Vec<_> = header
                .samples
                .iter()
                .cloned()
                .zip(new_samples.iter().cloned())
                .collect();
            header.samples = new_samples;
            writer.write_all(header.to_line().as_bytes())?;
            writer.write_all(terminator)?;
            renamed = Some(pairs);
            break;
        } else if line.starts_with(b"#") {
            writer.write_all(&line)?;
        } else {
            return Err(VCFUtilsError::MalformedHeader(
                "data line found before #CHROM line",
            ));
        }
        line.clear();
    }

    let renamed = renamed.ok_or(VCFUtilsError::MalformedHeader("no #CHROM line found"))?;
    io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(renamed)
}

/// Rename samples of a VCF file. The destination is replaced only after the
/// whole file was rewritten. `output` may be the same path as `input`.
pub fn replace_sample_in_file(
    input: &Path,
    output: &Path,
    renaming: &SampleRenaming,
    create_index: bool,
) -> Result<Vec<(String, String)>, VCFUtilsError> {
    let reader = utils::open_vcf_from_path(input)?;
    let atomic_output = AtomicOutput::create(output)?;
    let renamed = {
        let mut writer = atomic_output.writer()?;
        replace_sample(reader, &mut writer, renaming)?
    };
    atomic_output.commit()?;

    for (old_name, new_name) in &renamed {
        info!("{}: {} -> {}", output.display(), old_name, new_name);
    }

    if create_index {
        if utils::is_bgzf_path(output) {
            utils::build_tabix_index(output)?;
        } else {
            warn!(
                "Index is not created because {} is not BGZF compressed",
                output.display()
            );
        }
    }
    Ok(renamed)
}
