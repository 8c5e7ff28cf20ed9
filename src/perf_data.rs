use crate::perf::{Measurement, ProfileData};
use std::sync::LazyLock;

// Profiling results for the parallel DFS traversal. Speedup stays below 1.0
// at every thread count: on this workload the parallel overhead dominates.
// That is the measurement, not a transcription error.
pub static DFS_TRAVERSAL: LazyLock<ProfileData> = LazyLock::new(|| ProfileData {
    serial_secs: 0.000571,
    points: vec![
        Measurement { threads: 2, parallel_secs: 0.003119, speedup: 0.1829, efficiency: 0.0915 },
        Measurement { threads: 4, parallel_secs: 0.004229, speedup: 0.1349, efficiency: 0.0337 },
        Measurement { threads: 8, parallel_secs: 0.008202, speedup: 0.0696, efficiency: 0.0087 },
        Measurement { threads: 16, parallel_secs: 0.009997, speedup: 0.0571, efficiency: 0.0036 },
    ],
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_one_point_per_thread_count() {
        assert_eq!(DFS_TRAVERSAL.thread_counts(), vec![2, 4, 8, 16]);
        assert!(DFS_TRAVERSAL.validate().is_ok());
    }
}
