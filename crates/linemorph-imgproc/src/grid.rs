use glam::Vec2;

use crate::error::MorphError;
use crate::lines::{validate_line_pair, FeatureLine};
use crate::warp::{source_position, WarpParams};

/// An ordered sequence of points forming one grid line.
pub type Polyline = Vec<Vec2>;

/// Number of sample points per grid line.
pub const GRID_SAMPLES_PER_LINE: usize = 20;

/// Generate a regular grid of horizontal and vertical polylines.
///
/// Lines are placed every `spacing` pixels starting at the image origin and
/// each line carries [`GRID_SAMPLES_PER_LINE`] evenly spaced sample points
/// across the image extent. The grid is intended as input for
/// [`warp_grid_points`] to visualize a deformation field; it never feeds back
/// into pixel warping.
///
/// A zero `spacing` is treated as one pixel; an empty extent yields an empty
/// grid.
pub fn generate_grid(width: usize, height: usize, spacing: usize) -> Vec<Polyline> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let spacing = spacing.max(1);
    let max_x = (width - 1) as f32;
    let max_y = (height - 1) as f32;
    let last = (GRID_SAMPLES_PER_LINE - 1) as f32;

    let mut grid = Vec::new();

    // horizontal lines, sampled left to right
    for y in (0..height).step_by(spacing) {
        let line = (0..GRID_SAMPLES_PER_LINE)
            .map(|i| Vec2::new(i as f32 / last * max_x, y as f32))
            .collect();
        grid.push(line);
    }

    // vertical lines, sampled top to bottom
    for x in (0..width).step_by(spacing) {
        let line = (0..GRID_SAMPLES_PER_LINE)
            .map(|i| Vec2::new(x as f32, i as f32 / last * max_y))
            .collect();
        grid.push(line);
    }

    grid
}

/// Displace grid sample points through the line-field warp.
///
/// Applies exactly the same displacement computation as the pixel warp to
/// every sample point, so the returned polylines visualize the true field
/// rather than an approximation. No color lookup happens and points are not
/// clamped to the canvas.
///
/// # Errors
///
/// Returns [`MorphError::LineSetLengthMismatch`] or
/// [`MorphError::DegenerateLine`] for invalid line sets.
pub fn warp_grid_points(
    grid: &[Polyline],
    src_lines: &[FeatureLine],
    dst_lines: &[FeatureLine],
    params: &WarpParams,
) -> Result<Vec<Polyline>, MorphError> {
    validate_line_pair(src_lines, dst_lines)?;

    Ok(grid
        .iter()
        .map(|line| {
            line.iter()
                .map(|&pt| source_position(pt, src_lines, dst_lines, params))
                .collect()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_covers_extent() {
        let grid = generate_grid(100, 60, 30);

        // horizontal lines at y = 0, 30; vertical lines at x = 0, 30, 60, 90
        assert_eq!(grid.len(), 2 + 4);
        for line in &grid {
            assert_eq!(line.len(), GRID_SAMPLES_PER_LINE);
        }

        let first = &grid[0];
        assert_eq!(first[0], Vec2::new(0.0, 0.0));
        assert_eq!(first[GRID_SAMPLES_PER_LINE - 1], Vec2::new(99.0, 0.0));
    }

    #[test]
    fn empty_extent_yields_empty_grid() {
        assert!(generate_grid(0, 60, 30).is_empty());
        assert!(generate_grid(100, 0, 30).is_empty());
    }

    #[test]
    fn identical_geometry_leaves_grid_in_place() -> Result<(), MorphError> {
        let grid = generate_grid(40, 40, 20);
        let lines = vec![FeatureLine::from_coords(5.0, 5.0, 30.0, 20.0)];

        let warped = warp_grid_points(&grid, &lines, &lines, &WarpParams::default())?;

        assert_eq!(warped.len(), grid.len());
        for (warped_line, line) in warped.iter().zip(grid.iter()) {
            for (w, g) in warped_line.iter().zip(line.iter()) {
                assert!((*w - *g).length() < 1e-3);
            }
        }

        Ok(())
    }

    #[test]
    fn grid_warp_validates_lines() {
        let grid = generate_grid(10, 10, 5);
        let one = vec![FeatureLine::from_coords(0.0, 0.0, 5.0, 0.0)];

        assert!(matches!(
            warp_grid_points(&grid, &one, &[], &WarpParams::default()),
            Err(MorphError::LineSetLengthMismatch(1, 0))
        ));
    }
}
