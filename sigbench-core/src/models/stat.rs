//! Statistic identifiers and mean-family aliasing.

/// Every statistic the in-tree backend understands; a benchmark run with no
/// explicit statistic list measures all of these.
pub const ALL_STATS: &[&str] = &[
    "mean",
    "approx_mean",
    "mod_approx_mean",
    "max",
    "min",
    "coverage",
    "std",
];

/// Resolve a statistic identifier to the base identifier used when fetching
/// its reference value.
///
/// All mean-family variants ("approx_mean", "mod_approx_mean", anything else
/// containing "mean") share the single exact "mean" reference computation, so
/// a reference value is fetched at most once for the whole family.
pub fn base_stat_name(stat: &str) -> &str {
    if stat.contains("mean") && stat != "mean" {
        "mean"
    } else {
        stat
    }
}
