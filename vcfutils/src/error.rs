use thiserror::Error;

#[derive(Debug, Error)]
pub enum VCFUtilsError {
    #[error("Malformed VCF header: {0}")]
    MalformedHeader(&'static str),
    #[error("{0} sample columns found; specify which sample to rename")]
    AmbiguousSampleCount(usize),
    #[error("No sample column found in VCF header")]
    NoSampleColumns,
    #[error("Unable to find sample in the VCF header: {0}")]
    SampleNotFound(String),
    #[error("Duplicated sample name after renaming: {0}")]
    DuplicatedSampleName(String),
    #[error("Sample {0} is renamed more than once")]
    ConflictingRenaming(String),
    #[error("Invalid sample name: {0:?}")]
    InvalidSampleName(String),
    #[error("No read group with sample name is found in {0}")]
    ReadGroupNotFound(String),
    #[error("Failed to create index: {0}")]
    IndexError(String),
    #[error("I/O Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Utf8 Error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),
    #[error("htslib Error: {0}")]
    HtslibError(#[from] rust_htslib::errors::Error),
}
