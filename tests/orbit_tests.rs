// Host-side tests for the orbit camera controls.

use sonogrid_core::*;

fn undamped() -> OrbitControls {
    let mut c = OrbitControls::default();
    c.enable_damping = false;
    c
}

#[test]
fn starts_at_default_eye() {
    let c = OrbitControls::default();
    let eye = c.camera().eye;
    assert_eq!((eye.x, eye.y, eye.z), (20.0, 10.0, 0.0));
    assert!((c.distance() - 500.0f32.sqrt()).abs() < 1e-4);
}

#[test]
fn dolly_out_stops_at_max_distance() {
    let mut c = undamped();
    for _ in 0..200 {
        c.dolly_by_wheel(100.0);
        c.update();
    }
    assert!((c.distance() - ORBIT_MAX_DISTANCE).abs() < 1e-3);
}

#[test]
fn dolly_in_moves_closer() {
    let mut c = undamped();
    let before = c.distance();
    c.dolly_by_wheel(-100.0);
    assert!(c.update());
    assert!(c.distance() < before);
}

#[test]
fn polar_angle_never_flips() {
    let mut c = undamped();
    c.rotate_up(10.0);
    c.update();
    let eye = c.camera().eye;
    assert!(eye.y > 0.0 && eye.x >= 0.0, "eye {eye:?}");

    c.rotate_up(-20.0);
    c.update();
    let eye = c.camera().eye;
    assert!(eye.y < 0.0 && eye.x >= 0.0, "eye {eye:?}");
    assert!(eye.is_finite());
}

#[test]
fn damping_spreads_rotation_over_frames() {
    let mut c = OrbitControls::default();
    c.rotate_left(1.0);
    let mut frames = 0;
    while c.update() {
        frames += 1;
        assert!(frames < 1000, "never settled");
    }
    assert!(frames > 10);
    assert!(!c.update());
}

#[test]
fn drag_rotation_scales_with_viewport() {
    let mut a = undamped();
    let mut b = undamped();
    a.rotate_by_pixels(100.0, 0.0, 400.0);
    b.rotate_by_pixels(100.0, 0.0, 800.0);
    a.update();
    b.update();
    let start = OrbitControls::default().camera().eye;
    let moved_a = (a.camera().eye - start).length();
    let moved_b = (b.camera().eye - start).length();
    assert!(moved_a > moved_b);
    assert!((a.distance() - b.distance()).abs() < 1e-3);
}
