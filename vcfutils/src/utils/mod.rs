pub mod readgroup;

use crate::error::VCFUtilsError;
use log::debug;
use rust_htslib::bgzf;
use std::fs;
use std::io::{self, prelude::*, BufReader, BufWriter, SeekFrom};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Open plain, gzip or BGZF compressed VCF.
pub fn open_vcf_from_path(path: &Path) -> Result<Box<dyn BufRead>, VCFUtilsError> {
    let reader = autocompress::autodetect_open(path).map_err(|e| {
        io::Error::other(format!("Failed to open {}: {}", path.display(), e))
    })?;
    Ok(Box::new(BufReader::new(reader)))
}

/// Empty BGZF block which terminates every complete BGZF file.
const BGZF_EOF: [u8; 28] = [
    0x1f, 0x8b, 0x08, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0x06, 0x00, 0x42, 0x43, 0x02, 0x00,
    0x1b, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

pub fn is_bgzf_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|x| x.to_str()),
        Some("gz") | Some("bgz")
    )
}

/// Output file which appears at its destination only after `commit`.
///
/// Data is written to a temporary file in the destination directory and
/// renamed into place, so an interrupted write never leaves a truncated file
/// behind. Dropping without commit removes the temporary file.
#[derive(Debug)]
pub struct AtomicOutput {
    destination: PathBuf,
    temporary: NamedTempFile,
}

impl AtomicOutput {
    pub fn create(destination: &Path) -> Result<Self, VCFUtilsError> {
        let directory = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temporary = tempfile::Builder::new()
            .prefix(".vcfutils-")
            .suffix(".tmp")
            .tempfile_in(directory)?;
        debug!(
            "writing {} through {}",
            destination.display(),
            temporary.path().display()
        );
        Ok(AtomicOutput {
            destination: destination.to_path_buf(),
            temporary,
        })
    }

    /// BGZF writer when the destination ends with `.gz` or `.bgz`, plain text otherwise.
    pub fn writer(&self) -> Result<Box<dyn Write>, VCFUtilsError> {
        if is_bgzf_path(&self.destination) {
            Ok(Box::new(bgzf::Writer::from_path(self.temporary.path())?))
        } else {
            Ok(Box::new(BufWriter::new(self.temporary.reopen()?)))
        }
    }

    /// Move the temporary file to the destination. Writers returned by
    /// `writer` must be dropped before calling this.
    pub fn commit(self) -> Result<(), VCFUtilsError> {
        if is_bgzf_path(&self.destination) {
            check_bgzf_eof(self.temporary.as_file())?;
        }
        self.temporary.as_file().sync_all()?;
        if let Ok(metadata) = fs::metadata(&self.destination) {
            fs::set_permissions(self.temporary.path(), metadata.permissions())?;
        } else {
            set_default_permissions(self.temporary.path())?;
        }
        self.temporary
            .persist(&self.destination)
            .map_err(|e| e.error)?;
        Ok(())
    }
}

/// The BGZF writer reports close errors only on drop, where they are lost.
/// A missing EOF block means the file was not completely written.
fn check_bgzf_eof(mut file: &fs::File) -> io::Result<()> {
    let mut tail = [0u8; 28];
    if file.metadata()?.len() < tail.len() as u64 {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "BGZF output is truncated"));
    }
    file.seek(SeekFrom::End(-(tail.len() as i64)))?;
    file.read_exact(&mut tail)?;
    if tail != BGZF_EOF {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "BGZF output has no EOF block"));
    }
    Ok(())
}

#[cfg(unix)]
fn set_default_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Create `<path>.tbi` for a BGZF compressed VCF.
pub fn build_tabix_index(path: &Path) -> Result<(), VCFUtilsError> {
    rust_htslib::bcf::index::build(path, None, 1, rust_htslib::bcf::index::Type::Tbx)
        .map_err(|e| VCFUtilsError::IndexError(format!("{}: {:?}", path.display(), e)))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_is_bgzf_path() {
        assert!(is_bgzf_path(Path::new("out.vcf.gz")));
        assert!(is_bgzf_path(Path::new("/data/out.vcf.bgz")));
        assert!(!is_bgzf_path(Path::new("out.vcf")));
        assert!(!is_bgzf_path(Path::new("gz")));
    }

    #[test]
    fn test_atomic_output() -> Result<(), VCFUtilsError> {
        let dir = tempfile::tempdir()?;
        let destination = dir.path().join("out.vcf");

        let output = AtomicOutput::create(&destination)?;
        {
            let mut writer = output.writer()?;
            writer.write_all(b"##fileformat=VCFv4.2\n")?;
        }
        assert!(!destination.exists());
        output.commit()?;
        assert_eq!(fs::read(&destination)?, b"##fileformat=VCFv4.2\n");

        let abandoned = AtomicOutput::create(&destination)?;
        {
            let mut writer = abandoned.writer()?;
            writer.write_all(b"partial")?;
        }
        drop(abandoned);
        assert_eq!(fs::read(&destination)?, b"##fileformat=VCFv4.2\n");
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_atomic_output_bgzf() -> Result<(), VCFUtilsError> {
        let dir = tempfile::tempdir()?;
        let destination = dir.path().join("out.vcf.gz");

        let output = AtomicOutput::create(&destination)?;
        {
            let mut writer = output.writer()?;
            writer.write_all(b"##fileformat=VCFv4.2\n")?;
        }
        output.commit()?;
        assert!(fs::read(&destination)?.ends_with(&BGZF_EOF));

        // plain bytes under a BGZF name are rejected and never reach the destination
        let broken_destination = dir.path().join("broken.vcf.gz");
        let mut broken = AtomicOutput::create(&broken_destination)?;
        broken.temporary.as_file_mut().write_all(b"##fileformat=VCFv4.2\n")?;
        assert!(matches!(
            broken.commit(),
            Err(VCFUtilsError::IoError(e)) if e.kind() == io::ErrorKind::InvalidData
        ));
        assert!(!broken_destination.exists());
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }
}
