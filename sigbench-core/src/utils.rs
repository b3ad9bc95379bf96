use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

/// Parse one line of a chrom.sizes file into a chromosome name and its size.
/// Returns None for blank or comment lines.
pub fn parse_chrom_sizes_line(line: &str) -> Option<(String, u32)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut fields = line.split_whitespace();
    let name = fields.next()?;
    let size = fields.next().and_then(|s| s.parse::<u32>().ok())?;

    Some((name.to_string(), size))
}

/// Parse one line of a bedGraph file into (chrom, start, end, value).
/// Skips track/browser header lines and blank lines by returning None.
pub fn parse_bedgraph_line(line: &str) -> Option<(String, u32, u32, f64)> {
    let line = line.trim_end();
    if line.is_empty()
        || line.starts_with('#')
        || line.starts_with("track")
        || line.starts_with("browser")
    {
        return None;
    }

    let mut fields = line.split_whitespace();
    let chrom = fields.next()?;
    let start = fields.next().and_then(|s| s.parse::<u32>().ok())?;
    let end = fields.next().and_then(|s| s.parse::<u32>().ok())?;
    let value = fields.next().and_then(|s| s.parse::<f64>().ok())?;

    Some((chrom.to_string(), start, end, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("chr1\t248956422", Some(("chr1".to_string(), 248956422)))]
    #[case("chr2 1000", Some(("chr2".to_string(), 1000)))]
    #[case("", None)]
    #[case("# a comment", None)]
    #[case("chr1\tnot_a_number", None)]
    fn test_parse_chrom_sizes_line(#[case] line: &str, #[case] expected: Option<(String, u32)>) {
        assert_eq!(parse_chrom_sizes_line(line), expected);
    }

    #[rstest]
    fn test_parse_bedgraph_line() {
        let parsed = parse_bedgraph_line("chr1\t100\t200\t1.5");
        assert_eq!(parsed, Some(("chr1".to_string(), 100, 200, 1.5)));
    }

    #[rstest]
    #[case("track type=bedGraph name=signal")]
    #[case("browser position chr1:1-1000")]
    #[case("")]
    #[case("chr1\t100\t200")]
    fn test_parse_bedgraph_line_skips(#[case] line: &str) {
        assert_eq!(parse_bedgraph_line(line), None);
    }
}
