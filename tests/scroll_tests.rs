// Host-side tests for the fixed-length scroll buffer.

use sonogrid_core::ScrollBuffer;

#[test]
fn new_buffer_is_zeroed() {
    let buf = ScrollBuffer::new(16);
    assert_eq!(buf.len(), 16);
    assert!(buf.iter().all(|v| v == 0));
}

#[test]
fn window_lands_in_last_slots() {
    let mut buf = ScrollBuffer::new(8);
    buf.push_window(&[1, 2, 3, 4]);
    assert_eq!(buf.to_vec(), vec![0, 0, 0, 0, 1, 2, 3, 4]);
    buf.push_window(&[5, 6, 7, 8]);
    assert_eq!(buf.to_vec(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn length_never_changes() {
    let mut buf = ScrollBuffer::new(9);
    for frame in 0..50u8 {
        buf.push_window(&[frame, frame, frame]);
        assert_eq!(buf.len(), 9);
    }
    assert_eq!(buf.to_vec(), vec![47, 47, 47, 48, 48, 48, 49, 49, 49]);
}

#[test]
fn oversized_window_keeps_its_tail() {
    let mut buf = ScrollBuffer::new(3);
    buf.push_window(&[1, 2, 3, 4, 5]);
    assert_eq!(buf.to_vec(), vec![3, 4, 5]);
}

#[test]
fn out_of_range_reads_zero() {
    let mut buf = ScrollBuffer::new(2);
    buf.fill(9);
    assert_eq!(buf.get(1), 9);
    assert_eq!(buf.get(2), 0);
}

#[test]
fn slices_cover_the_buffer_in_order() {
    let mut buf = ScrollBuffer::new(6);
    buf.push_window(&[1, 2, 3, 4]);
    buf.push_window(&[5, 6]);
    let (head, tail) = buf.as_slices();
    assert_eq!(head.len() + tail.len(), 6);
    let joined: Vec<u8> = head.iter().chain(tail).copied().collect();
    assert_eq!(joined, vec![1, 2, 3, 4, 5, 6]);
}
