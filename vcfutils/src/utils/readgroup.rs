use crate::error::VCFUtilsError;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_htslib::bam::{self, Read};
use std::path::Path;

static SM_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\tSM:([^\t\r\n]+)").unwrap());

/// Sample name (`SM`) of the first read group which has one.
pub fn sample_name_from_header(header: &str) -> Option<String> {
    header
        .lines()
        .filter(|x| x.starts_with("@RG"))
        .find_map(|x| SM_TAG.captures(x))
        .and_then(|x| x.get(1))
        .map(|x| x.as_str().to_string())
}

pub fn sample_name_from_bam(path: &Path) -> Result<String, VCFUtilsError> {
    let reader = bam::Reader::from_path(path)?;
    let header = String::from_utf8_lossy(reader.header().as_bytes()).to_string();
    sample_name_from_header(&header)
        .ok_or_else(|| VCFUtilsError::ReadGroupNotFound(path.display().to_string()))
}
