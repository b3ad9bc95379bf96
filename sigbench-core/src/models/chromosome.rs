use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::errors::SignalError;
use crate::utils::{get_dynamic_reader, parse_chrom_sizes_line};

///
/// Chromosome struct, one queryable coordinate domain with an exclusive
/// upper bound on valid coordinates
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Chromosome {
    pub name: String,
    pub max_index: u32,
}

/// Chromosome domains keyed by name, loaded from a chrom.sizes file.
/// Immutable once loaded; must be ready before any query intervals are
/// generated against its chromosomes.
#[derive(Debug, Clone, Default)]
pub struct ChromSizes {
    chromosomes: HashMap<String, Chromosome>,
}

impl ChromSizes {
    pub fn get(&self, name: &str) -> Option<&Chromosome> {
        self.chromosomes.get(name)
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chromosome> {
        self.chromosomes.values()
    }
}

impl From<Vec<Chromosome>> for ChromSizes {
    fn from(value: Vec<Chromosome>) -> Self {
        ChromSizes {
            chromosomes: value.into_iter().map(|c| (c.name.clone(), c)).collect(),
        }
    }
}

impl TryFrom<&Path> for ChromSizes {
    type Error = SignalError;

    ///
    /// Create a new [ChromSizes] from a chrom.sizes file (plain or gzip'd)
    ///
    fn try_from(value: &Path) -> Result<ChromSizes, SignalError> {
        let reader = get_dynamic_reader(value)
            .map_err(|e| SignalError::FileReadError(format!("{}: {}", value.display(), e)))?;

        let mut chromosomes = HashMap::new();
        for line in reader.lines() {
            let line = line?;
            if let Some((name, max_index)) = parse_chrom_sizes_line(&line) {
                chromosomes.insert(name.clone(), Chromosome { name, max_index });
            }
        }

        if chromosomes.is_empty() {
            return Err(SignalError::EmptyChromSizes(
                value.to_string_lossy().to_string(),
            ));
        }

        Ok(ChromSizes { chromosomes })
    }
}

impl TryFrom<&str> for ChromSizes {
    type Error = SignalError;

    fn try_from(value: &str) -> Result<ChromSizes, SignalError> {
        ChromSizes::try_from(Path::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[rstest]
    fn test_chrom_sizes_load() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "chr1\t248956422").unwrap();
        writeln!(f, "chr2\t242193529").unwrap();
        writeln!(f, "# comment line").unwrap();
        f.flush().unwrap();

        let sizes = ChromSizes::try_from(f.path()).unwrap();
        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes.get("chr1").unwrap().max_index, 248956422);
        assert!(sizes.get("chrX").is_none());
    }

    #[rstest]
    fn test_chrom_sizes_empty_file_is_an_error() {
        let f = NamedTempFile::new().unwrap();
        let result = ChromSizes::try_from(f.path());
        assert!(matches!(result, Err(SignalError::EmptyChromSizes(_))));
    }

    #[rstest]
    fn test_chrom_sizes_from_vec() {
        let sizes = ChromSizes::from(vec![Chromosome {
            name: "chr1".to_string(),
            max_index: 1000,
        }]);
        assert_eq!(sizes.get("chr1").unwrap().max_index, 1000);
    }
}
