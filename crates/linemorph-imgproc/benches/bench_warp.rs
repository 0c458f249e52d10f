use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use linemorph_image::Image;
use linemorph_imgproc::interpolation::InterpolationMode;
use linemorph_imgproc::lines::FeatureLine;
use linemorph_imgproc::warp::{warp_image_with_lines, WarpParams};

fn bench_warp_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpLines");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        // input image
        let image_size = [*width, *height].into();
        let image = Image::<u8, 3>::new(image_size, vec![0u8; width * height * 3]).unwrap();

        // output image
        let output = Image::<u8, 3>::from_size_val(image_size, 0).unwrap();

        let (w, h) = (*width as f32, *height as f32);
        let src_lines = vec![
            FeatureLine::from_coords(w * 0.2, h * 0.3, w * 0.8, h * 0.3),
            FeatureLine::from_coords(w * 0.5, h * 0.1, w * 0.5, h * 0.9),
        ];
        let dst_lines = vec![
            FeatureLine::from_coords(w * 0.2, h * 0.4, w * 0.8, h * 0.35),
            FeatureLine::from_coords(w * 0.45, h * 0.1, w * 0.55, h * 0.9),
        ];

        group.bench_with_input(
            BenchmarkId::new("rayon_rows", &parameter_string),
            &(&image, &output),
            |b, i| {
                let (src, mut dst) = (i.0.clone(), i.1.clone());
                b.iter(|| {
                    warp_image_with_lines(
                        black_box(&src),
                        black_box(&mut dst),
                        black_box(&src_lines),
                        black_box(&dst_lines),
                        black_box(&WarpParams::default()),
                        black_box(InterpolationMode::Bilinear),
                    )
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_warp_lines);
criterion_main!(benches);
