use glam::Vec2;

use crate::error::MorphError;

/// Feature lines shorter than this are considered degenerate.
pub(crate) const MIN_LINE_LENGTH: f32 = 1e-6;

/// Barycentric weight sums below this cannot be normalized.
pub(crate) const MIN_WEIGHT_SUM: f32 = 1e-6;

/// A directed feature line segment in image pixel coordinates.
///
/// The segment runs from `p` to `q` and defines a local coordinate frame:
/// `u` measures the normalized projection along the segment (0 at `p`, 1 at
/// `q`) and `v` the signed perpendicular distance from it, in pixel units.
/// The perpendicular follows the +90 degree rotation of `q - p`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureLine {
    /// Start point of the segment.
    pub p: Vec2,
    /// End point of the segment.
    pub q: Vec2,
}

impl FeatureLine {
    /// Create a new feature line from its endpoints.
    pub fn new(p: Vec2, q: Vec2) -> Self {
        Self { p, q }
    }

    /// Create a new feature line from endpoint coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use linemorph_imgproc::lines::FeatureLine;
    ///
    /// let line = FeatureLine::from_coords(0.0, 0.0, 3.0, 0.0);
    /// assert_eq!(line.length(), 3.0);
    /// ```
    pub fn from_coords(px: f32, py: f32, qx: f32, qy: f32) -> Self {
        Self::new(Vec2::new(px, py), Vec2::new(qx, qy))
    }

    /// The direction vector `q - p` of the segment.
    pub fn direction(&self) -> Vec2 {
        self.q - self.p
    }

    /// The length of the segment in pixels.
    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    /// Whether the segment is too short to define a coordinate frame.
    pub fn is_degenerate(&self) -> bool {
        self.direction().length_squared() < MIN_LINE_LENGTH * MIN_LINE_LENGTH
    }

    /// Compute the local `(u, v)` coordinates of a point relative to this line.
    ///
    /// `u = (x - p) . (q - p) / |q - p|^2` and may fall outside `[0, 1]` for
    /// points beyond the segment endpoints. `v = (x - p) . perp(q - p) / |q - p|`
    /// is the signed perpendicular distance in pixel units.
    pub fn to_local(&self, x: Vec2) -> (f32, f32) {
        let d = self.direction();
        let rel = x - self.p;
        let u = rel.dot(d) / d.length_squared();
        let v = rel.dot(d.perp()) / d.length();
        (u, v)
    }

    /// Map local `(u, v)` coordinates back to a point relative to this line.
    ///
    /// `x = p + u * (q - p) + v * perp(q - p) / |q - p|`. This is the exact
    /// inverse of [`FeatureLine::to_local`] for the same line: a point with
    /// `v = 0` lands on the segment at parameter `u`.
    pub fn from_local(&self, u: f32, v: f32) -> Vec2 {
        let d = self.direction();
        self.p + u * d + v * d.perp() / d.length()
    }

    /// Distance from a point to the line segment, given its `(u, v)` coordinates.
    ///
    /// Distance to `p` when `u < 0`, to `q` when `u > 1`, and the
    /// perpendicular distance `|v|` in between.
    pub fn segment_distance(&self, x: Vec2, u: f32, v: f32) -> f32 {
        if u < 0.0 {
            (x - self.p).length()
        } else if u > 1.0 {
            (x - self.q).length()
        } else {
            v.abs()
        }
    }
}

/// Barycentric weights for combining three geometries.
///
/// Callers may supply unnormalized, non-negative weights (e.g. raw slider
/// positions); [`BarycentricWeights::normalized`] rescales them to sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarycentricWeights {
    /// Weight of the first geometry.
    pub t1: f32,
    /// Weight of the second geometry.
    pub t2: f32,
    /// Weight of the third geometry.
    pub t3: f32,
}

impl BarycentricWeights {
    /// Create a new weight triple.
    pub fn new(t1: f32, t2: f32, t3: f32) -> Self {
        Self { t1, t2, t3 }
    }

    /// Rescale the weights so they sum to one.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::ZeroWeightSum`] when the sum is effectively zero.
    pub fn normalized(&self) -> Result<Self, MorphError> {
        let sum = self.t1 + self.t2 + self.t3;
        if sum <= MIN_WEIGHT_SUM {
            return Err(MorphError::ZeroWeightSum);
        }
        Ok(Self {
            t1: self.t1 / sum,
            t2: self.t2 / sum,
            t3: self.t3 / sum,
        })
    }
}

/// Check that two corresponding line sets can drive one warp.
///
/// Lengths must match and every line must be non-degenerate.
pub(crate) fn validate_line_pair(
    src_lines: &[FeatureLine],
    dst_lines: &[FeatureLine],
) -> Result<(), MorphError> {
    if src_lines.len() != dst_lines.len() {
        return Err(MorphError::LineSetLengthMismatch(
            src_lines.len(),
            dst_lines.len(),
        ));
    }
    for (i, (src, dst)) in src_lines.iter().zip(dst_lines.iter()).enumerate() {
        if src.is_degenerate() || dst.is_degenerate() {
            return Err(MorphError::DegenerateLine(i));
        }
    }
    Ok(())
}

/// Linearly interpolate between two corresponding line sets.
///
/// Each endpoint is interpolated as `(1 - alpha) * a + alpha * b`, producing
/// the intermediate target geometry for a two-image morph.
///
/// # Errors
///
/// Returns [`MorphError::LineSetLengthMismatch`] when the sets differ in length.
pub fn interpolate_lines(
    lines_a: &[FeatureLine],
    lines_b: &[FeatureLine],
    alpha: f32,
) -> Result<Vec<FeatureLine>, MorphError> {
    if lines_a.len() != lines_b.len() {
        return Err(MorphError::LineSetLengthMismatch(
            lines_a.len(),
            lines_b.len(),
        ));
    }
    Ok(lines_a
        .iter()
        .zip(lines_b.iter())
        .map(|(a, b)| FeatureLine::new(a.p.lerp(b.p, alpha), a.q.lerp(b.q, alpha)))
        .collect())
}

/// Combine three corresponding line sets into one shared geometry.
///
/// For each line index the endpoints are the weighted sum
/// `t1 * l1 + t2 * l2 + t3 * l3` with the weights normalized to sum to one.
/// The result is the common warp target for a three-image merge.
///
/// # Errors
///
/// Returns [`MorphError::LineSetLengthMismatch`] when the sets differ in
/// length, or [`MorphError::ZeroWeightSum`] when the weights cannot be
/// normalized.
pub fn interpolate_multiple_lines(
    lines1: &[FeatureLine],
    lines2: &[FeatureLine],
    lines3: &[FeatureLine],
    weights: &BarycentricWeights,
) -> Result<Vec<FeatureLine>, MorphError> {
    if lines1.len() != lines2.len() {
        return Err(MorphError::LineSetLengthMismatch(
            lines1.len(),
            lines2.len(),
        ));
    }
    if lines1.len() != lines3.len() {
        return Err(MorphError::LineSetLengthMismatch(
            lines1.len(),
            lines3.len(),
        ));
    }
    let w = weights.normalized()?;
    Ok(lines1
        .iter()
        .zip(lines2.iter())
        .zip(lines3.iter())
        .map(|((l1, l2), l3)| {
            FeatureLine::new(
                w.t1 * l1.p + w.t2 * l2.p + w.t3 * l3.p,
                w.t1 * l1.q + w.t2 * l2.q + w.t3 * l3.q,
            )
        })
        .collect())
}
