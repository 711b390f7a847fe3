use crate::error::Mutect2Error;
use log::debug;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub fn is_bed_path(value: &str) -> bool {
    value.ends_with(".bed") || value.ends_with(".bed.gz")
}

/// Convert BED regions (0-based, half open) into GATK interval strings
/// (1-based, closed).
pub fn bed_to_intervals<R: BufRead>(mut reader: R) -> Result<Vec<String>, Mutect2Error> {
    let mut intervals = Vec::new();
    let mut line = String::new();
    let mut line_number = 0;
    while reader.read_line(&mut line)? > 0 {
        line_number += 1;
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.starts_with('#')
            || trimmed.starts_with("track")
            || trimmed.starts_with("browser")
        {
            line.clear();
            continue;
        }

        let mut columns = trimmed.split_whitespace();
        let (chrom, start, end) = match (columns.next(), columns.next(), columns.next()) {
            (Some(chrom), Some(start), Some(end)) => (chrom, start, end),
            _ => {
                return Err(Mutect2Error::InvalidInterval {
                    line: line_number,
                    message: "BED line should have at least three columns".to_string(),
                })
            }
        };
        let parse = |value: &str| {
            value
                .parse::<u64>()
                .map_err(|e| Mutect2Error::InvalidInterval {
                    line: line_number,
                    message: format!("{}: {}", value, e),
                })
        };
        let start = parse(start)?;
        let end = parse(end)?;
        if end <= start {
            return Err(Mutect2Error::InvalidInterval {
                line: line_number,
                message: format!("end {} is not greater than start {}", end, start),
            });
        }
        intervals.push(format!("{}:{}-{}", chrom, start + 1, end));
        line.clear();
    }
    Ok(intervals)
}

/// Expand an `--intervals` value. BED files are converted region by region,
/// anything else is handed to GATK verbatim.
pub fn resolve_intervals(value: &str) -> Result<Vec<String>, Mutect2Error> {
    if !is_bed_path(value) {
        return Ok(vec![value.to_string()]);
    }
    let reader = autocompress::autodetect_open(Path::new(value))
        .map_err(|e| std::io::Error::other(format!("Failed to open {}: {}", value, e)))?;
    let intervals = bed_to_intervals(BufReader::new(reader))?;
    debug!("{} intervals loaded from {}", intervals.len(), value);
    Ok(intervals)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bed_to_intervals() -> Result<(), Mutect2Error> {
        let bed = b"track name=capture\n# comment\nchr1\t0\t1000\n\nchr2\t99\t200\tname\t0\t+\n";
        let intervals = bed_to_intervals(&bed[..])?;
        assert_eq!(intervals, vec!["chr1:1-1000", "chr2:100-200"]);
        Ok(())
    }

    #[test]
    fn test_bed_to_intervals_error() {
        let result = bed_to_intervals(&b"chr1\t0\t100\nchr1\t100\n"[..]);
        assert!(matches!(
            result,
            Err(Mutect2Error::InvalidInterval { line: 2, .. })
        ));

        let result = bed_to_intervals(&b"chr1\tstart\t100\n"[..]);
        assert!(matches!(
            result,
            Err(Mutect2Error::InvalidInterval { line: 1, .. })
        ));

        let result = bed_to_intervals(&b"chr1\t100\t100\n"[..]);
        assert!(matches!(
            result,
            Err(Mutect2Error::InvalidInterval { line: 1, .. })
        ));
    }

    #[test]
    fn test_resolve_intervals() -> Result<(), Mutect2Error> {
        assert_eq!(resolve_intervals("chr3:1-500")?, vec!["chr3:1-500"]);
        assert_eq!(
            resolve_intervals("wgs_calling_regions.interval_list")?,
            vec!["wgs_calling_regions.interval_list"]
        );

        let dir = tempfile::tempdir()?;
        let bed_path = dir.path().join("regions.bed");
        let mut bed = std::fs::File::create(&bed_path)?;
        bed.write_all(b"chrX\t10\t20\nchrY\t0\t5\n")?;
        drop(bed);
        assert_eq!(
            resolve_intervals(bed_path.to_str().unwrap())?,
            vec!["chrX:11-20", "chrY:1-5"]
        );
        Ok(())
    }
}
