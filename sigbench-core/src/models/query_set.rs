/// A set of fixed-width query intervals, `[starts[i], ends[i])`, shared by
/// every statistic measured in one benchmark invocation.
///
/// The two sequences always have equal length and `ends[i] = starts[i] +
/// interval_size`. A set is built once per invocation and read-only for the
/// rest of the run, so every backend sees the exact same queries.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuerySet {
    starts: Vec<u32>,
    ends: Vec<u32>,
}

impl QuerySet {
    /// Build a query set from interval start positions and a shared width.
    pub fn from_starts(starts: Vec<u32>, interval_size: u32) -> Self {
        let ends = starts.iter().map(|s| s + interval_size).collect();
        QuerySet { starts, ends }
    }

    pub fn starts(&self) -> &[u32] {
        &self.starts
    }

    pub fn ends(&self) -> &[u32] {
        &self.ends
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}
