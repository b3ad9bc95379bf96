pub mod chromosome;
pub mod query_set;
pub mod stat;

// re-export for cleaner imports
pub use self::chromosome::{ChromSizes, Chromosome};
pub use self::query_set::QuerySet;
