// Host-side tests for the grid layout and the magnitude → visual mapping.

use sonogrid_core::*;

fn buffer_of(values: &[u8]) -> ScrollBuffer {
    ScrollBuffer::from(values.to_vec())
}

#[test]
fn index_and_cell_are_inverse() {
    let layout = GridLayout::new(7);
    for (i, x, y) in layout.cells() {
        assert_eq!(layout.index_of(x, y), Some(i));
        assert_eq!(layout.cell_of(i), Some((x, y)));
    }
    assert_eq!(layout.index_of(7, 0), None);
    assert_eq!(layout.cell_of(49), None);
}

#[test]
fn cells_are_row_major_in_x() {
    let layout = GridLayout::new(3);
    let order: Vec<(u32, u32)> = layout.cells().map(|(_, x, y)| (x, y)).collect();
    assert_eq!(order[0], (0, 0));
    assert_eq!(order[1], (0, 1));
    assert_eq!(order[3], (1, 0));
    assert_eq!(order.len(), 9);
}

#[test]
fn positions_are_centered_and_spaced() {
    let layout = GridLayout::new(2);
    assert_eq!(layout.offset(), 0.5);
    let p = layout.position(0, 0, 0.0);
    assert_eq!((p.x, p.y, p.z), (0.125, 0.0, 0.125));
    let p = layout.position(1, 1, 2.0);
    assert_eq!((p.x, p.y, p.z), (-0.125, 2.0, -0.125));

    let big = GridLayout::new(256);
    let first = big.position(0, 0, 0.0);
    let last = big.position(255, 255, 0.0);
    assert!((first.x + last.x).abs() < 1e-5);
    assert!((first.z + last.z).abs() < 1e-5);
}

#[test]
fn heights_follow_buffer_over_scale() {
    let config = VizConfig::default().with_amount(Some(2));
    let layout = GridLayout::new(config.amount);
    let mapper = GridMapper::new(&config);
    let buffer = buffer_of(&[10, 20, 30, 40]);

    let heights: Vec<f32> = mapper
        .map(&layout, &buffer)
        .map(|(_, cell)| cell.position.y)
        .collect();
    assert_eq!(heights, vec![0.3125, 0.625, 0.9375, 1.25]);
}

#[test]
fn silent_cells_are_black_and_loud_cells_white() {
    let mapper = GridMapper::new(&VizConfig::default());
    assert_eq!(mapper.height(0), 0.0);
    assert_eq!(mapper.color(0), [0.0, 0.0, 0.0]);
    assert_eq!(mapper.color(255), [1.0, 1.0, 1.0]);
}

#[test]
fn mid_values_stay_in_gamut() {
    for preset in [Preset::Ocean, Preset::Ember] {
        let mapper = GridMapper::new(&VizConfig::from_preset(preset));
        for v in 0..=255u8 {
            let rgb = mapper.color(v);
            assert!(
                rgb.iter().all(|c| c.is_finite() && (0.0..=1.0).contains(c)),
                "{preset:?} value {v} gave {rgb:?}"
            );
        }
    }
}

#[test]
fn short_buffer_reads_as_zero() {
    let config = VizConfig::default().with_amount(Some(2));
    let layout = GridLayout::new(config.amount);
    let mapper = GridMapper::new(&config);
    let buffer = buffer_of(&[64]);
    let heights: Vec<f32> = mapper
        .map(&layout, &buffer)
        .map(|(_, cell)| cell.position.y)
        .collect();
    assert_eq!(heights, vec![2.0, 0.0, 0.0, 0.0]);
}

#[test]
fn instance_store_starts_flat_and_white() {
    let layout = GridLayout::new(4);
    let store = InstanceStore::new(&layout, SPHERE_SCALE);
    assert_eq!(store.len(), 16);
    assert!(store.dirty().any());
    for raw in store.as_slice() {
        assert_eq!(raw.position[1], 0.0);
        assert_eq!(raw.scale, SPHERE_SCALE);
        assert_eq!(raw.color, [1.0, 1.0, 1.0, 1.0]);
    }
}
