use std::collections::VecDeque;

/// Fixed-length FIFO of magnitude samples.
///
/// Every frame one window of `amount` values is appended and the same number
/// of oldest values is dropped, so the length never changes. The grid mapper
/// reads it randomly by index.
#[derive(Clone, Debug)]
pub struct ScrollBuffer {
    values: VecDeque<u8>,
    len: usize,
}

impl ScrollBuffer {
    /// All-zero buffer of `len` samples.
    pub fn new(len: usize) -> Self {
        Self {
            values: std::iter::repeat(0).take(len).collect(),
            len,
        }
    }

    /// Append `samples` in index order, then drop as many of the oldest values.
    ///
    /// A window longer than the buffer keeps only its trailing `len` values.
    pub fn push_window(&mut self, samples: &[u8]) {
        let take = samples.len().min(self.len);
        let window = &samples[samples.len() - take..];
        self.values.drain(..take);
        self.values.extend(window.iter().copied());
        debug_assert_eq!(self.values.len(), self.len);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample at `i`, oldest first. Zero when out of range.
    #[inline]
    pub fn get(&self, i: usize) -> u8 {
        self.values.get(i).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = u8> + '_ {
        self.values.iter().copied()
    }

    /// Contents as the ring's two contiguous halves, oldest first.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        self.values.as_slices()
    }

    pub fn fill(&mut self, value: u8) {
        self.values.iter_mut().for_each(|v| *v = value);
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.values.iter().copied().collect()
    }
}

impl From<Vec<u8>> for ScrollBuffer {
    fn from(values: Vec<u8>) -> Self {
        let len = values.len();
        Self {
            values: values.into(),
            len,
        }
    }
}
