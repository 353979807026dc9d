//! Magnitude to pixel radius.

/// Square-root scale: equal areas for equal magnitude steps.
///
/// Maps `[d0, d1]` to `[r0, r1]` by interpolating linearly between the square
/// roots of the domain ends. Outputs are clamped to the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Scale for a dataset whose largest magnitude is `max_magnitude`.
    pub fn for_max_magnitude(max_magnitude: f64, range: (f64, f64)) -> Self {
        Self::new((0.0, max_magnitude), range)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn radius(&self, magnitude: f64) -> f64 {
        let (r0, r1) = self.range;
        let d0 = signed_sqrt(self.domain.0);
        let d1 = signed_sqrt(self.domain.1);
        let span = d1 - d0;
        if span <= 0.0 || !span.is_finite() {
            return r0;
        }

        let t = (signed_sqrt(magnitude) - d0) / span;
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        r0 + (r1 - r0) * t
    }
}

fn signed_sqrt(x: f64) -> f64 {
    if x < 0.0 {
        -(-x).sqrt()
    } else {
        x.sqrt()
    }
}
