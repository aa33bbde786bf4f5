//! Shared scoring primitives for directional and scanner scores.

/// Produces a 0-100 strength score from some input.
pub trait StrengthScorer: Send + Sync {
    type Input: ?Sized;

    /// Identifier for logging.
    fn id(&self) -> &str;

    /// Score the input. Always within [0, 100].
    fn score(&self, input: &Self::Input) -> f64;
}

/// Weighted factor accumulator.
///
/// Each factor contributes its full weight to the denominator and a fraction
/// of that weight to the numerator. The result is points / weight * 100,
/// or 50 when no factor took part.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedScore {
    points: f64,
    weight: f64,
}

impl WeightedScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a factor worth `weight`, credited with `fraction` (0.0 - 1.0) of it.
    pub fn add(&mut self, weight: f64, fraction: f64) -> &mut Self {
        self.points += weight * fraction.clamp(0.0, 1.0);
        self.weight += weight;
        self
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn finish(&self) -> f64 {
        if self.weight <= 0.0 {
            return 50.0;
        }
        (self.points / self.weight * 100.0).clamp(0.0, 100.0)
    }
}

/// Base-plus-adjustments accumulator, clamped to [0, 100].
#[derive(Debug, Clone, Copy)]
pub struct PointScore {
    total: f64,
}

impl PointScore {
    pub fn new(base: f64) -> Self {
        Self { total: base }
    }

    pub fn add(&mut self, points: f64) -> &mut Self {
        self.total += points;
        self
    }

    /// Add `points` only when `condition` holds.
    pub fn add_if(&mut self, condition: bool, points: f64) -> &mut Self {
        if condition {
            self.total += points;
        }
        self
    }

    pub fn finish(&self) -> f64 {
        self.total.clamp(0.0, 100.0)
    }
}
