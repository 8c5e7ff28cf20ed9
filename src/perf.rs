use std::error::Error;

/// One profiling point of the parallel DFS traversal at a fixed thread count.
#[derive(Debug, Clone, Copy)]
pub struct Measurement {
    pub threads: u32,
    pub parallel_secs: f64,
    pub speedup: f64,
    pub efficiency: f64,
}

/// The full profiling dataset: a serial baseline plus one measurement per
/// thread count, ordered by increasing thread count.
#[derive(Debug, Clone)]
pub struct ProfileData {
    pub serial_secs: f64,
    pub points: Vec<Measurement>,
}

impl ProfileData {
    /// Checks the invariants the plotting code relies on: a non-empty table,
    /// strictly increasing thread counts, and positive times and ratios.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.points.is_empty() {
            return Err("profile data has no measurement points".into());
        }
        if self.serial_secs <= 0.0 {
            return Err(format!("serial time must be positive, got {}", self.serial_secs).into());
        }
        let mut last_threads = 0;
        for m in &self.points {
            if m.threads <= last_threads {
                return Err(format!(
                    "thread counts must be strictly increasing, got {} after {}",
                    m.threads, last_threads
                )
                .into());
            }
            if m.parallel_secs <= 0.0 || m.speedup <= 0.0 || m.efficiency <= 0.0 {
                return Err(
                    format!("non-positive value in measurement for {} threads", m.threads).into()
                );
            }
            last_threads = m.threads;
        }
        Ok(())
    }

    pub fn thread_counts(&self) -> Vec<u32> {
        self.points.iter().map(|m| m.threads).collect()
    }

    /// Parallel execution times in milliseconds.
    pub fn parallel_ms(&self) -> Vec<f64> {
        self.points.iter().map(|m| m.parallel_secs * 1000.0).collect()
    }

    /// Serial baseline in milliseconds.
    pub fn serial_ms(&self) -> f64 {
        self.serial_secs * 1000.0
    }

    /// Efficiency expressed as a percentage per thread count.
    pub fn efficiency_percent(&self) -> Vec<f64> {
        self.points.iter().map(|m| m.efficiency * 100.0).collect()
    }

    /// How many times slower than serial each parallel run is, `1 / S`.
    pub fn degradation(&self) -> Vec<f64> {
        self.points.iter().map(|m| 1.0 / m.speedup).collect()
    }

    /// The ideal linear speedup reference, equal to the thread counts.
    pub fn ideal_speedup(&self) -> Vec<f64> {
        self.points.iter().map(|m| f64::from(m.threads)).collect()
    }

    pub fn max_efficiency_percent(&self) -> f64 {
        self.efficiency_percent().into_iter().fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perf_data::DFS_TRAVERSAL;
    use approx::assert_relative_eq;

    fn sample() -> ProfileData {
        DFS_TRAVERSAL.clone()
    }

    #[test]
    fn times_scale_to_milliseconds() {
        let data = sample();
        let ms = data.parallel_ms();
        assert_relative_eq!(ms[0], 3.119, max_relative = 1e-12);
        assert_relative_eq!(ms[3], 9.997, max_relative = 1e-12);
        assert_relative_eq!(data.serial_ms(), 0.571, max_relative = 1e-12);
    }

    #[test]
    fn efficiency_scales_to_percent() {
        let pct = sample().efficiency_percent();
        assert_relative_eq!(pct[0], 9.15, max_relative = 1e-12);
        assert_relative_eq!(pct[3], 0.36, max_relative = 1e-12);
    }

    #[test]
    fn degradation_is_reciprocal_of_speedup() {
        let data = sample();
        let deg = data.degradation();
        for (m, d) in data.points.iter().zip(&deg) {
            assert_relative_eq!(*d, 1.0 / m.speedup);
        }
        assert_relative_eq!(deg[0], 5.467, max_relative = 1e-3);
    }

    #[test]
    fn ideal_speedup_matches_thread_counts() {
        assert_eq!(sample().ideal_speedup(), vec![2.0, 4.0, 8.0, 16.0]);
    }

    #[test]
    fn embedded_dataset_is_valid() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn rejects_empty_dataset() {
        let data = ProfileData { serial_secs: 0.1, points: Vec::new() };
        assert!(data.validate().is_err());
    }

    #[test]
    fn rejects_unordered_thread_counts() {
        let mut data = sample();
        data.points.swap(0, 1);
        assert!(data.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_values() {
        let mut data = sample();
        data.points[2].speedup = 0.0;
        assert!(data.validate().is_err());

        let mut data = sample();
        data.serial_secs = -1.0;
        assert!(data.validate().is_err());
    }
}
