use std::collections::VecDeque;

/// Number of samples each series keeps by default.
pub const DEFAULT_HISTORY: usize = 300;

/// Fixed-length sample history for one graphed sensor.
///
/// The buffer always holds exactly `capacity` samples: it starts zero-filled
/// and every push evicts the oldest sample.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples:  VecDeque<f32>,
    capacity: usize,
}

impl SampleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: std::iter::repeat(0.0).take(capacity).collect(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Push a new sample, evicting the oldest.
    pub fn append(&mut self, value: f32) {
        if self.capacity == 0 {
            return;
        }
        self.samples.pop_front();
        self.samples.push_back(value);
    }

    /// The most recent `k` samples, oldest first.  `k` is clamped to the
    /// capacity.
    pub fn window(&self, k: usize) -> Vec<f32> {
        let k = k.min(self.capacity);
        self.samples.iter().skip(self.capacity - k).copied().collect()
    }

    /// Largest of the most recent `k` samples, `None` when `k == 0`.
    pub fn window_max(&self, k: usize) -> Option<f32> {
        let k = k.min(self.capacity);
        self.samples
            .iter()
            .skip(self.capacity - k)
            .copied()
            .reduce(f32::max)
    }

    /// Zero every sample.
    pub fn reset(&mut self) {
        self.samples.iter_mut().for_each(|s| *s = 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zero_filled() {
        let buf = SampleBuffer::new(4);
        assert_eq!(buf.window(4), vec![0.0; 4]);
    }

    #[test]
    fn overflow_drops_first_value() {
        let mut buf = SampleBuffer::new(3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            buf.append(v);
        }
        assert_eq!(buf.window(3), vec![2.0, 3.0, 4.0]);
        assert!(!buf.window(3).contains(&1.0));
    }

    #[test]
    fn window_is_chronological_and_clamped() {
        let mut buf = SampleBuffer::new(5);
        for v in [1.0, 2.0, 3.0] {
            buf.append(v);
        }
        assert_eq!(buf.window(2), vec![2.0, 3.0]);
        assert_eq!(buf.window(0), Vec::<f32>::new());
        assert_eq!(buf.window(50).len(), 5);
    }

    #[test]
    fn window_max_ignores_older_samples() {
        let mut buf = SampleBuffer::new(4);
        for v in [90.0, 1.0, 7.0, 3.0] {
            buf.append(v);
        }
        assert_eq!(buf.window_max(3), Some(7.0));
        assert_eq!(buf.window_max(0), None);
    }

    #[test]
    fn reset_keeps_length() {
        let mut buf = SampleBuffer::new(3);
        buf.append(5.0);
        buf.reset();
        assert_eq!(buf.window(3), vec![0.0; 3]);
    }

    #[test]
    fn zero_capacity_is_inert() {
        let mut buf = SampleBuffer::new(0);
        buf.append(1.0);
        assert!(buf.window(1).is_empty());
    }
}
