use linemorph_image::ImageError;

/// Errors that can occur during morphing operations.
///
/// All variants are detected before any per-pixel work starts, so a failed
/// call never leaves a partially written destination buffer.
#[derive(thiserror::Error, Debug)]
pub enum MorphError {
    /// Corresponding line sets must have the same number of lines.
    #[error("line sets must have the same length, got {0} and {1}")]
    LineSetLengthMismatch(usize, usize),

    /// A feature line with coincident endpoints cannot define a coordinate frame.
    #[error("feature line {0} has zero length")]
    DegenerateLine(usize),

    /// The barycentric weight triple sums to zero and cannot be normalized.
    #[error("barycentric weights sum to zero")]
    ZeroWeightSum,

    /// Images participating in one operation must have matching dimensions.
    #[error("image size ({0}x{1}) does not match ({2}x{3})")]
    ImageSizeMismatch(usize, usize, usize, usize),

    /// The source image has no pixels to sample from.
    #[error("source image has no pixels")]
    EmptyImage,

    /// Error from the underlying image container.
    #[error(transparent)]
    Image(#[from] ImageError),
}
