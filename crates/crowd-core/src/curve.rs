//! Clamped piecewise-linear response curves.
//!
//! Used for the alert conviction-impact response: how much total conviction a
//! released alert distributes, as a function of the caller's own conviction.
//! Keyframes are `(input, output)` pairs; evaluation interpolates linearly
//! between neighbors and clamps to the end keys outside the covered range.

/// A piecewise-linear curve over sorted `(x, y)` keyframes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResponseCurve {
    keys: Vec<(f32, f32)>,
}

impl ResponseCurve {
    /// Build a curve from keyframes.  Keys are sorted by `x`; duplicate `x`
    /// values keep their relative order (the later one wins on evaluation).
    pub fn new(mut keys: Vec<(f32, f32)>) -> Self {
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { keys }
    }

    /// A curve that returns `y` for every input.
    pub fn constant(y: f32) -> Self {
        Self { keys: vec![(0.0, y)] }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Evaluate the curve at `x`.
    ///
    /// Outside the keyed range the curve is flat (clamped to the first/last
    /// key).  An empty curve evaluates to `0.0`.
    pub fn evaluate(&self, x: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return 0.0,
        };
        if x <= first.0 {
            return first.1;
        }
        if x >= last.0 {
            return last.1;
        }

        // x is strictly inside the keyed range; find the bracketing pair.
        let hi = self.keys.partition_point(|k| k.0 < x);
        let (x0, y0) = self.keys[hi - 1];
        let (x1, y1) = self.keys[hi];
        let span = x1 - x0;
        if span <= f32::EPSILON {
            return y1;
        }
        let t = (x - x0) / span;
        y0 + (y1 - y0) * t
    }
}
