use linemorph_image::{Image, ImageDtype};

use crate::blend::{blend_images, blend_multiple_images};
use crate::error::MorphError;
use crate::interpolation::InterpolationMode;
use crate::lines::{interpolate_lines, interpolate_multiple_lines, BarycentricWeights, FeatureLine};
use crate::warp::{warp_image_with_lines, WarpParams};

/// Result of a two-image morph: both warped images and their blend.
#[derive(Debug, Clone)]
pub struct MorphResult<T, const C: usize> {
    /// The interpolation parameter the frame was computed at.
    pub alpha: f32,
    /// Both inputs warped into the intermediate geometry.
    pub warped: [Image<T, C>; 2],
    /// The alpha blend of the two warped images.
    pub blended: Image<T, C>,
}

/// Result of a three-image merge: the warped images and their blend.
#[derive(Debug, Clone)]
pub struct MergeResult<T, const C: usize> {
    /// Each input warped into the shared geometry.
    pub warped: [Image<T, C>; 3],
    /// The weighted blend of the three warped images.
    pub blended: Image<T, C>,
}

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

/// Morph two images at a given alpha.
///
/// Interpolates the feature-line geometry at `alpha`, warps both images into
/// that intermediate geometry, and blends the results with the same alpha.
/// Returns both warped images along with the blend so callers can present
/// all stages.
///
/// # Errors
///
/// Fails before any pixel work when the line sets mismatch, contain
/// degenerate lines, or the images differ in size.
pub fn morph_images<T: ImageDtype, const C: usize>(
    image_a: &Image<T, C>,
    image_b: &Image<T, C>,
    lines_a: &[FeatureLine],
    lines_b: &[FeatureLine],
    alpha: f32,
    params: &WarpParams,
) -> Result<MorphResult<T, C>, MorphError> {
    check_same_size(image_a, image_b)?;

    let lines_interp = interpolate_lines(lines_a, lines_b, alpha)?;
    let size = image_a.size();

    let mut warped_a = Image::from_size_val(size, T::default())?;
    warp_image_with_lines(
        image_a,
        &mut warped_a,
        lines_a,
        &lines_interp,
        params,
        InterpolationMode::Bilinear,
    )?;

    let mut warped_b = Image::from_size_val(size, T::default())?;
    warp_image_with_lines(
        image_b,
        &mut warped_b,
        lines_b,
        &lines_interp,
        params,
        InterpolationMode::Bilinear,
    )?;

    let mut blended = Image::from_size_val(size, T::default())?;
    blend_images(&warped_a, &warped_b, alpha, &mut blended)?;

    Ok(MorphResult {
        alpha,
        warped: [warped_a, warped_b],
        blended,
    })
}

/// Pre-compute an evenly spaced sequence of morph frames.
///
/// Produces `frames` results with alpha running from 0 to 1 inclusive.
/// Playback timing is the caller's concern; this only computes the frames.
///
/// # Errors
///
/// Propagates the first error from [`morph_images`]; no frames are returned
/// on failure.
pub fn morph_sequence<T: ImageDtype, const C: usize>(
    image_a: &Image<T, C>,
    image_b: &Image<T, C>,
    lines_a: &[FeatureLine],
    lines_b: &[FeatureLine],
    frames: usize,
    params: &WarpParams,
) -> Result<Vec<MorphResult<T, C>>, MorphError> {
    let mut sequence = Vec::with_capacity(frames);
    for i in 0..frames {
        let alpha = if frames > 1 {
            i as f32 / (frames - 1) as f32
        } else {
            0.0
        };
        sequence.push(morph_images(
            image_a, image_b, lines_a, lines_b, alpha, params,
        )?);
    }
    Ok(sequence)
}

/// Merge three images into a shared geometry with barycentric weights.
///
/// Normalizes the weights, builds the shared feature-line geometry, warps
/// every image from its own lines into that geometry, and blends the three
/// warped images with the same normalized weights. Returns the three warped
/// images plus the final blend.
///
/// # Errors
///
/// Fails before any pixel work when the weights sum to zero, the line sets
/// mismatch or contain degenerate lines, or the images differ in size.
pub fn merge_multiple_images<T: ImageDtype, const C: usize>(
    images: [&Image<T, C>; 3],
    line_sets: [&[FeatureLine]; 3],
    weights: &BarycentricWeights,
    params: &WarpParams,
) -> Result<MergeResult<T, C>, MorphError> {
    check_same_size(images[0], images[1])?;
    check_same_size(images[0], images[2])?;

    let w = weights.normalized()?;
    let shared = interpolate_multiple_lines(line_sets[0], line_sets[1], line_sets[2], &w)?;

    let size = images[0].size();
    let warp_one = |image: &Image<T, C>,
                        lines: &[FeatureLine]|
     -> Result<Image<T, C>, MorphError> {
        let mut warped = Image::from_size_val(size, T::default())?;
        warp_image_with_lines(
            image,
            &mut warped,
            lines,
            &shared,
            params,
            InterpolationMode::Bilinear,
        )?;
        Ok(warped)
    };

    let warped = [
        warp_one(images[0], line_sets[0])?,
        warp_one(images[1], line_sets[1])?,
        warp_one(images[2], line_sets[2])?,
    ];

    let mut blended = Image::from_size_val(size, T::default())?;
    blend_multiple_images([&warped[0], &warped[1], &warped[2]], &w, &mut blended)?;

    Ok(MergeResult { warped, blended })
}

#[cfg(test)]
mod tests {
    use super::*;
    use linemorph_image::ImageSize;

    const SIZE: ImageSize = ImageSize {
        width: 6,
        height: 6,
    };

    fn gradient() -> Image<u8, 1> {
        Image::new(SIZE, (0..36).map(|i| (i * 7) as u8).collect()).unwrap()
    }

    fn diagonal_lines() -> Vec<FeatureLine> {
        vec![FeatureLine::from_coords(1.0, 1.0, 4.0, 4.0)]
    }

    #[test]
    fn morph_at_zero_with_shared_lines_returns_first_image() -> Result<(), MorphError> {
        let a = gradient();
        let b = Image::<u8, 1>::from_size_val(SIZE, 200)?;
        let lines = diagonal_lines();

        let result = morph_images(&a, &b, &lines, &lines, 0.0, &WarpParams::default())?;
        assert_eq!(result.blended.as_slice(), a.as_slice());

        Ok(())
    }

    #[test]
    fn morph_size_mismatch_rejected() {
        let a = gradient();
        let b = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 3,
            },
            0,
        )
        .unwrap();
        let lines = diagonal_lines();

        assert!(matches!(
            morph_images(&a, &b, &lines, &lines, 0.5, &WarpParams::default()),
            Err(MorphError::ImageSizeMismatch(6, 6, 3, 3))
        ));
    }

    #[test]
    fn sequence_runs_alpha_from_zero_to_one() -> Result<(), MorphError> {
        let a = gradient();
        let b = gradient();
        let lines = diagonal_lines();

        let frames = morph_sequence(&a, &b, &lines, &lines, 5, &WarpParams::default())?;
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0].alpha, 0.0);
        assert_eq!(frames[4].alpha, 1.0);
        assert!((frames[2].alpha - 0.5).abs() < 1e-6);

        Ok(())
    }

    #[test]
    fn merge_identical_images_returns_same_image() -> Result<(), MorphError> {
        let image = gradient();
        let l1 = vec![FeatureLine::from_coords(0.0, 0.0, 5.0, 0.0)];
        let l2 = vec![FeatureLine::from_coords(0.0, 0.0, 5.0, 0.0)];
        let l3 = vec![FeatureLine::from_coords(0.0, 0.0, 5.0, 0.0)];

        let result = merge_multiple_images(
            [&image, &image, &image],
            [&l1, &l2, &l3],
            &BarycentricWeights::new(0.2, 0.3, 0.5),
            &WarpParams::default(),
        )?;

        for (out, src) in result
            .blended
            .as_slice()
            .iter()
            .zip(image.as_slice().iter())
        {
            assert!((*out as i16 - *src as i16).abs() <= 1);
        }

        Ok(())
    }

    #[test]
    fn merge_unit_weight_reproduces_one_geometry() -> Result<(), MorphError> {
        let image = gradient();
        let lines = diagonal_lines();

        // all geometry identical, weight entirely on the first image
        let result = merge_multiple_images(
            [&image, &image, &image],
            [&lines, &lines, &lines],
            &BarycentricWeights::new(1.0, 0.0, 0.0),
            &WarpParams::default(),
        )?;
        assert_eq!(result.blended.as_slice(), image.as_slice());
        assert_eq!(result.warped[0].as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn merge_zero_weights_rejected() {
        let image = gradient();
        let lines = diagonal_lines();

        assert!(matches!(
            merge_multiple_images(
                [&image, &image, &image],
                [&lines, &lines, &lines],
                &BarycentricWeights::new(0.0, 0.0, 0.0),
                &WarpParams::default(),
            ),
            Err(MorphError::ZeroWeightSum)
        ));
    }
}
