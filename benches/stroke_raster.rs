use criterion::{criterion_group, criterion_main, Criterion};
use doctor_panel::capture::{
    CaptureConfig, CaptureSurface, Contact, PointerKind, RegionSize, Tool,
};

fn scribble(surface: &mut CaptureSurface, id: u32) {
    let pen = Contact::new(id, PointerKind::Pen, (10.0, 10.0));
    surface.on_contact_down(&pen);
    for step in 0..200 {
        let t = step as f32 * 0.05;
        let at = (300.0 + t.cos() * 250.0, 200.0 + t.sin() * 150.0);
        surface.on_contact_move(&pen.moved_to(at));
    }
    surface.on_contact_up(&pen);
}

fn bench_stroke_raster(c: &mut Criterion) {
    let mut surface = CaptureSurface::new(RegionSize::new(600, 400), CaptureConfig::default());
    c.bench_function("pen_stroke_200_segments", |b| {
        b.iter(|| scribble(&mut surface, 1))
    });

    surface.set_tool(Tool::Eraser);
    c.bench_function("eraser_stroke_200_segments", |b| {
        b.iter(|| scribble(&mut surface, 2))
    });
}

fn bench_resize_restore(c: &mut Criterion) {
    let mut surface = CaptureSurface::new(RegionSize::new(600, 400), CaptureConfig::default());
    scribble(&mut surface, 1);
    let mut wide = false;
    c.bench_function("resize_with_restore", |b| {
        b.iter(|| {
            wide = !wide;
            let size = if wide {
                RegionSize::new(640, 400)
            } else {
                RegionSize::new(600, 400)
            };
            surface.resize(size)
        })
    });
}

criterion_group!(benches, bench_stroke_raster, bench_resize_restore);
criterion_main!(benches);
