use crate::error::VCFUtilsError;
use std::io::BufRead;
use std::str;

pub const MANDATORY_COLUMNS: [&str; 8] = [
    "#CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "INFO",
];
pub const FORMAT_COLUMN: &str = "FORMAT";
pub const FIRST_SAMPLE_COLUMN: usize = 9;

pub fn is_column_header(line: &[u8]) -> bool {
    line.starts_with(b"#CHROM")
}

/// Split a line into its content and its terminator (`\n`, `\r\n` or nothing).
pub fn split_line_terminator(line: &[u8]) -> (&[u8], &[u8]) {
    if line.ends_with(b"\r\n") {
        line.split_at(line.len() - 2)
    } else if line.ends_with(b"\n") {
        line.split_at(line.len() - 1)
    } else {
        (line, &line[line.len()..])
    }
}

/// The `#CHROM` line of a VCF header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub fixed: Vec<String>,
    pub samples: Vec<String>,
}

impl ColumnHeader {
    pub fn parse(content: &[u8]) -> Result<Self, VCFUtilsError> {
        let content = str::from_utf8(content)?;
        let columns: Vec<&str> = content.split('\t').collect();
        if columns.len() < MANDATORY_COLUMNS.len() || columns[0] != MANDATORY_COLUMNS[0] {
            return Err(VCFUtilsError::MalformedHeader(
                "#CHROM line should have at least eight tab separated columns",
            ));
        }
        if columns.len() > MANDATORY_COLUMNS.len() && columns[8] != FORMAT_COLUMN {
            return Err(VCFUtilsError::MalformedHeader(
                "ninth column of #CHROM line should be FORMAT",
            ));
        }
        let split = columns.len().min(FIRST_SAMPLE_COLUMN);
        Ok(ColumnHeader {
            fixed: columns[..split].iter().map(|x| x.to_string()).collect(),
            samples: columns[split..].iter().map(|x| x.to_string()).collect(),
        })
    }

    pub fn to_line(&self) -> String {
        self.fixed
            .iter()
            .chain(self.samples.iter())
            .map(|x| x.as_str())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// Read header lines until the `#CHROM` line and return it.
pub fn read_column_header<R: BufRead>(mut reader: R) -> Result<ColumnHeader, VCFUtilsError> {
    let mut line = Vec::new();
    while reader.read_until(b'\n', &mut line)? > 0 {
        if is_column_header(&line) {
            return ColumnHeader::parse(split_line_terminator(&line).0);
        } else if !line.starts_with(b"#") {
            return Err(VCFUtilsError::MalformedHeader(
                "data line found before #CHROM line",
            ));
        }
        line.clear();
    }
    Err(VCFUtilsError::MalformedHeader("no #CHROM line found"))
}
