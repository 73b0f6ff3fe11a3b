//! Weighted random selection over a fixed set of values

/// Picks values with a probability proportional to their weight
///
/// Weights are kept as a cumulative table, so a pick is a binary search.
/// Picking never mutates the picker; randomness comes from the caller.
#[derive(Debug, Clone)]
pub struct RandomPicker<T> {
    values: Vec<T>,
    cumulative: Vec<f64>,
    total: f64,
}

impl<T> Default for RandomPicker<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            cumulative: Vec::new(),
            total: 0.0,
        }
    }
}

impl<T> RandomPicker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value; values with a weight that is not positive can never be
    /// picked and are skipped
    pub fn add(&mut self, value: T, weight: f64) {
        if weight <= 0.0 || !weight.is_finite() {
            return;
        }
        self.total += weight;
        self.cumulative.push(self.total);
        self.values.push(value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn total_weight(&self) -> f64 {
        self.total
    }

    /// Pick a value using the given random number generator
    pub fn pick(&self, rng: &mut fastrand::Rng) -> Option<&T> {
        self.pick_at(rng.f64())
    }

    /// Pick the value at `roll`, a fraction in `[0, 1)` of the total weight
    pub fn pick_at(&self, roll: f64) -> Option<&T> {
        if self.values.is_empty() {
            return None;
        }
        let target = roll.clamp(0.0, 1.0) * self.total;
        let index = self.cumulative.partition_point(|&c| c <= target);
        self.values.get(index.min(self.values.len() - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_picker() {
        let picker: RandomPicker<u32> = RandomPicker::new();
        assert!(picker.is_empty());
        assert_eq!(picker.pick(&mut fastrand::Rng::with_seed(1)), None);
    }

    #[test]
    fn test_skips_non_positive_weights() {
        let mut picker = RandomPicker::new();
        picker.add("never", 0.0);
        picker.add("negative", -1.0);
        picker.add("nan", f64::NAN);
        picker.add("always", 2.0);

        assert_eq!(picker.len(), 1);
        assert_eq!(picker.total_weight(), 2.0);
        assert_eq!(picker.pick_at(0.0), Some(&"always"));
        assert_eq!(picker.pick_at(0.999), Some(&"always"));
    }

    #[test]
    fn test_pick_at_boundaries() {
        let mut picker = RandomPicker::new();
        picker.add('a', 1.0);
        picker.add('b', 3.0);

        assert_eq!(picker.pick_at(0.0), Some(&'a'));
        assert_eq!(picker.pick_at(0.24), Some(&'a'));
        assert_eq!(picker.pick_at(0.25), Some(&'b'));
        assert_eq!(picker.pick_at(1.0), Some(&'b'));
    }

    #[test]
    fn test_frequencies_follow_weights() {
        let mut picker = RandomPicker::new();
        picker.add(0usize, 1.0);
        picker.add(1usize, 2.0);
        picker.add(2usize, 0.5);

        let mut rng = fastrand::Rng::with_seed(7);
        let mut counts = [0usize; 3];
        let draws = 20_000;
        for _ in 0..draws {
            counts[*picker.pick(&mut rng).unwrap()] += 1;
        }

        for (i, weight) in [1.0, 2.0, 0.5].iter().enumerate() {
            let expected = weight / 3.5;
            let observed = counts[i] as f64 / draws as f64;
            assert!(
                (observed - expected).abs() < 0.02,
                "value {} picked {:.3}, expected {:.3}",
                i,
                observed,
                expected
            );
        }
    }
}
