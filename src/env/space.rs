use crate::seeding::RandomSource;

/// A box in `N` dimensions, the product of the closed intervals `[low[i], high[i]]`
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSpace<const N: usize> {
    low: [f64; N],
    high: [f64; N],
}

impl<const N: usize> BoxSpace<N> {
    /// **Returns** `None` if any bound is not finite or any `low[i] > high[i]`
    pub fn new(low: [f64; N], high: [f64; N]) -> Option<Self> {
        low.iter()
            .zip(&high)
            .all(|(l, h)| l.is_finite() && h.is_finite() && l <= h)
            .then_some(Self { low, high })
    }

    /// Every dimension shares the bounds `[low, high]`
    pub fn uniform(low: f64, high: f64) -> Option<Self> {
        Self::new([low; N], [high; N])
    }

    pub fn low(&self) -> &[f64; N] {
        &self.low
    }

    pub fn high(&self) -> &[f64; N] {
        &self.high
    }

    pub const fn dim(&self) -> usize {
        N
    }

    pub fn contains(&self, x: &[f64; N]) -> bool {
        x.iter()
            .zip(self.low.iter().zip(&self.high))
            .all(|(v, (l, h))| v >= l && v <= h)
    }

    /// Project `x` onto the box
    pub fn clip(&self, x: [f64; N]) -> [f64; N] {
        std::array::from_fn(|i| x[i].max(self.low[i]).min(self.high[i]))
    }

    /// Draw a point from the box using an environment's [`RandomSource`]
    pub fn sample_with<S: RandomSource>(&self, source: &mut S) -> [f64; N] {
        std::array::from_fn(|i| source.uniform(self.low[i], self.high[i]))
    }
}
