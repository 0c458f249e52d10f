use linemorph_image::{Image, ImageDtype};

use crate::error::MorphError;
use crate::lines::BarycentricWeights;
use crate::parallel;

fn check_same_size<T, const C: usize>(
    a: &Image<T, C>,
    b: &Image<T, C>,
) -> Result<(), MorphError> {
    if a.size() != b.size() {
        return Err(MorphError::ImageSizeMismatch(
            a.cols(),
            a.rows(),
            b.cols(),
            b.rows(),
        ));
    }
    Ok(())
}

/// Blend two images with a scalar alpha.
///
/// Each channel is computed as `(1 - alpha) * a + alpha * b` in f32 and
/// written back through the pixel type's conversion, which clamps to the
/// valid channel range (no wraparound). Alpha values outside `[0, 1]` are
/// permitted and simply produce out-of-gamut values before clamping.
///
/// # Errors
///
/// Returns [`MorphError::ImageSizeMismatch`] when the input or destination
/// dimensions differ.
pub fn blend_images<T: ImageDtype, const C: usize>(
    src1: &Image<T, C>,
    src2: &Image<T, C>,
    alpha: f32,
    dst: &mut Image<T, C>,
) -> Result<(), MorphError> {
    check_same_size(src1, src2)?;
    check_same_size(src1, dst)?;

    parallel::par_iter_rows_val_two(src1, src2, dst, |&a, &b, out| {
        let a: f32 = a.into();
        let b: f32 = b.into();
        *out = T::from_f32((1.0 - alpha) * a + alpha * b);
    });

    Ok(())
}

/// Blend three images with barycentric weights.
///
/// The weights are normalized to sum to one, then each channel is the
/// weighted sum `t1 * a + t2 * b + t3 * c`, clamped to the valid channel
/// range on write-back.
///
/// # Errors
///
/// Returns [`MorphError::ImageSizeMismatch`] when any dimensions differ, or
/// [`MorphError::ZeroWeightSum`] when the weights cannot be normalized.
pub fn blend_multiple_images<T: ImageDtype, const C: usize>(
    srcs: [&Image<T, C>; 3],
    weights: &BarycentricWeights,
    dst: &mut Image<T, C>,
) -> Result<(), MorphError> {
    let w = weights.normalized()?;

    check_same_size(srcs[0], srcs[1])?;
    check_same_size(srcs[0], srcs[2])?;
    check_same_size(srcs[0], dst)?;

    parallel::par_iter_rows_val_three(srcs[0], srcs[1], srcs[2], dst, |&a, &b, &c, out| {
        let a: f32 = a.into();
        let b: f32 = b.into();
        let c: f32 = c.into();
        *out = T::from_f32(w.t1 * a + w.t2 * b + w.t3 * c);
    });

    Ok(())
}
