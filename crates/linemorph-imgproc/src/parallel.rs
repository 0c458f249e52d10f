use rayon::prelude::*;

use linemorph_image::Image;

/// Apply a function to each destination pixel and its (x, y) coordinate,
/// processing rows in parallel.
///
/// Each pixel's result depends only on its own coordinates, so rows can be
/// written concurrently with no synchronization beyond the buffer split.
pub fn par_iter_rows_xy<T, const C: usize>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, usize, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let cols = dst.cols();
    if cols == 0 {
        return;
    }
    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .enumerate()
        .for_each(|(y, dst_row)| {
            dst_row
                .chunks_exact_mut(C)
                .enumerate()
                .for_each(|(x, dst_pixel)| {
                    f(x, y, dst_pixel);
                });
        });
}

/// Apply a function to each element of two source images and the destination
/// image in parallel.
pub fn par_iter_rows_val_two<T, const C: usize>(
    src1: &Image<T, C>,
    src2: &Image<T, C>,
    dst: &mut Image<T, C>,
    f: impl Fn(&T, &T, &mut T) + Send + Sync,
) where
    T: Send + Sync,
{
    let cols = src1.cols();
    if cols == 0 {
        return;
    }
    src1.as_slice()
        .par_chunks_exact(C * cols)
        .zip(src2.as_slice().par_chunks_exact(C * cols))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C * cols))
        .for_each(|((src1_chunk, src2_chunk), dst_chunk)| {
            src1_chunk
                .iter()
                .zip(src2_chunk.iter())
                .zip(dst_chunk.iter_mut())
                .for_each(|((src1_pixel, src2_pixel), dst_pixel)| {
                    f(src1_pixel, src2_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each element of three source images and the
/// destination image in parallel.
pub fn par_iter_rows_val_three<T, const C: usize>(
    src1: &Image<T, C>,
    src2: &Image<T, C>,
    src3: &Image<T, C>,
    dst: &mut Image<T, C>,
    f: impl Fn(&T, &T, &T, &mut T) + Send + Sync,
) where
    T: Send + Sync,
{
    let cols = src1.cols();
    if cols == 0 {
        return;
    }
    src1.as_slice()
        .par_chunks_exact(C * cols)
        .zip(src2.as_slice().par_chunks_exact(C * cols))
        .zip(src3.as_slice().par_chunks_exact(C * cols))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C * cols))
        .for_each(|(((src1_chunk, src2_chunk), src3_chunk), dst_chunk)| {
            src1_chunk
                .iter()
                .zip(src2_chunk.iter())
                .zip(src3_chunk.iter())
                .zip(dst_chunk.iter_mut())
                .for_each(|(((src1_pixel, src2_pixel), src3_pixel), dst_pixel)| {
                    f(src1_pixel, src2_pixel, src3_pixel, dst_pixel);
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use linemorph_image::ImageSize;

    #[test]
    fn rows_xy_visits_every_pixel() {
        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0).unwrap();
        par_iter_rows_xy(&mut dst, |x, y, pixel| {
            pixel[0] = (y * 10 + x) as f32;
        });
        assert_eq!(dst.as_slice(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn val_two_zips_elements() {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let a = Image::<f32, 1>::new(size, vec![1.0, 2.0]).unwrap();
        let b = Image::<f32, 1>::new(size, vec![10.0, 20.0]).unwrap();
        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0).unwrap();
        par_iter_rows_val_two(&a, &b, &mut dst, |&x, &y, out| *out = x + y);
        assert_eq!(dst.as_slice(), &[11.0, 22.0]);
    }

    #[test]
    fn val_three_zips_elements() {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let a = Image::<f32, 1>::new(size, vec![1.0, 2.0]).unwrap();
        let b = Image::<f32, 1>::new(size, vec![10.0, 20.0]).unwrap();
        let c = Image::<f32, 1>::new(size, vec![100.0, 200.0]).unwrap();
        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0).unwrap();
        par_iter_rows_val_three(&a, &b, &c, &mut dst, |&x, &y, &z, out| *out = x + y + z);
        assert_eq!(dst.as_slice(), &[111.0, 222.0]);
    }
}
