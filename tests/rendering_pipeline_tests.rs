// End-to-end tests for the render pipeline: cube rendering, face removal,
// sort-strategy equivalence and culling modes.

use polymesh::prelude::*;
use std::collections::HashSet;

const WIDTH: u32 = 160;
const HEIGHT: u32 = 120;
const CUBE_COLORS: [Color; 6] = [2, 4, 5, 7, 8, 10];

fn rotated_context() -> RenderContext {
    let mut ctx = RenderContext::new();
    ctx.set_angle(Axis::Y, 0.6).set_angle(Axis::X, 0.4);
    ctx
}

fn draw(mesh: &Mesh, ctx: &RenderContext) -> (Image, FrameStats) {
    let mut screen = Image::new(WIDTH, HEIGHT);
    let stats = render(mesh, &mut screen, ctx).expect("mesh indices are valid");
    (screen, stats)
}

fn colors_in(image: &Image) -> HashSet<Color> {
    image.pixels().iter().copied().filter(|&c| c != TRANSPARENT).collect()
}

/// Deterministic triangle soup with no two faces at the same average depth.
fn triangle_soup(count: usize) -> Mesh {
    let mut state = 2024u32;
    let mut next = move |range: f32| {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        ((state >> 8) as f32 / (1u32 << 24) as f32 - 0.5) * range
    };

    let mut mesh = Mesh::default();
    for i in 0..count {
        let center = Vec3::new(next(80.0), next(60.0), next(80.0));
        let a = mesh.push_vertex(center + Vec3::new(next(30.0), next(30.0), next(10.0)));
        let b = mesh.push_vertex(center + Vec3::new(next(30.0), next(30.0), next(10.0)));
        let c = mesh.push_vertex(center + Vec3::new(next(30.0), next(30.0), next(10.0)));
        mesh.push_face(Face::triangle(a, b, c, (1 + i % 15) as Color));
    }
    mesh
}

#[test]
fn test_rotated_cube_draws_every_face() {
    let mesh = Mesh::cube(20.0, CUBE_COLORS);
    let (screen, stats) = draw(&mesh, &rotated_context());

    assert_eq!(stats.faces, 6);
    assert_eq!(stats.drawn, 6);
    assert_eq!(stats.depth_culled + stats.offscreen_culled, 0);

    // Three sides face the viewer; the other three are painted over.
    let visible: Vec<Color> = CUBE_COLORS
        .iter()
        .copied()
        .filter(|&color| screen.pixels().iter().filter(|&&c| c == color).count() > 20)
        .collect();
    assert_eq!(visible.len(), 3, "visible colors: {visible:?}");
    assert!(colors_in(&screen).iter().all(|c| CUBE_COLORS.contains(c)));
}

#[test]
fn test_removing_a_face_only_changes_its_own_region() {
    let ctx = rotated_context();
    let full = Mesh::cube(20.0, CUBE_COLORS);
    let (before, _) = draw(&full, &ctx);

    for (index, &color) in CUBE_COLORS.iter().enumerate() {
        let mut mesh = full.clone();
        mesh.remove_face(index).expect("face exists");
        let (after, stats) = draw(&mesh, &ctx);

        assert_eq!(stats.drawn, 5);
        assert!(!colors_in(&after).contains(&color), "face {index} still visible");
        for (i, (&was, &now)) in before.pixels().iter().zip(after.pixels()).enumerate() {
            if was != color {
                assert_eq!(was, now, "pixel {i} changed after removing face {index}");
            }
        }
    }
}

#[test]
fn test_sort_methods_render_identical_frames() {
    let mesh = triangle_soup(200);
    let ctx = rotated_context();

    let frames: Vec<Vec<Color>> = SortMethod::ALL
        .iter()
        .map(|&method| {
            let mut ctx = ctx;
            ctx.set_sort_method(method);
            draw(&mesh, &ctx).0.pixels().to_vec()
        })
        .collect();

    assert!(frames[0].iter().any(|&c| c != TRANSPARENT));
    assert_eq!(frames[0], frames[1], "Stable vs Quicksort");
    assert_eq!(frames[0], frames[2], "Stable vs IterativeQuicksort");
}

#[test]
fn test_inner_mode_shows_the_far_wall_from_inside() {
    let mesh = Mesh::cube(60.0, CUBE_COLORS);

    // Outer mode: the near wall's corners all project off-surface, so the
    // approximate bounds test drops it even though it covers the view.
    let (_, outer) = draw(&mesh, &RenderContext::new());
    assert_eq!(outer.offscreen_culled, 1);
    assert_eq!(outer.drawn, 5);

    // Inner mode with a threshold at the eye keeps only faces entirely
    // beyond it: the back wall.
    let mut ctx = RenderContext::new();
    ctx.set_inner(true).set_depth_threshold(0.0);
    let (screen, inner) = draw(&mesh, &ctx);
    assert_eq!(inner.drawn, 1);
    assert_eq!(inner.depth_culled, 5);
    assert_eq!(colors_in(&screen), HashSet::from([CUBE_COLORS[1]]));
}

#[test]
fn test_invalid_face_index_is_reported() {
    let mut mesh = Mesh::cube(20.0, CUBE_COLORS);
    mesh.set_face(2, Face::quad(0, 1, 2, 42, 9));

    let mut screen = Image::new(WIDTH, HEIGHT);
    let err = render(&mesh, &mut screen, &rotated_context()).unwrap_err();
    assert_eq!(
        err,
        polymesh::RenderError::IndexOutOfRange {
            face: 2,
            index: 42,
            vertex_count: 8,
        }
    );
    assert!(colors_in(&screen).is_empty());
}

#[test]
fn test_camera_zoom_enlarges_the_drawing() {
    let mesh = Mesh::cube(10.0, CUBE_COLORS);
    let count = |zoom: f32| {
        let mut ctx = rotated_context();
        ctx.set_zoom(zoom);
        let (screen, _) = draw(&mesh, &ctx);
        screen.pixels().iter().filter(|&&c| c != TRANSPARENT).count()
    };

    let small = count(1.0);
    let large = count(2.0);
    assert!(large > 3 * small, "zoomed {large} vs {small}");
}
