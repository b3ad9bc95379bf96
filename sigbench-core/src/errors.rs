use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Error parsing chrom.sizes line: {0}")]
    ChromSizesParseError(String),

    #[error("Corrupted file. 0 chromosomes found in the file: {0}")]
    EmptyChromSizes(String),

    #[error("Error parsing bedGraph line: {0}")]
    BedGraphParseError(String),

    #[error("Unknown chromosome: {0}")]
    UnknownChromosome(String),

    #[error("Unknown statistic: {0}")]
    UnknownStatistic(String),

    #[error("No bins loaded for chromosome {0}: load bins before querying approximate statistics")]
    BinsNotLoaded(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
