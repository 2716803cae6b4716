/// A fixed-capacity circular buffer that always holds exactly `N` slots.
///
/// Slots start out as `T::default()` and are overwritten in order; the write
/// position wraps back to slot 0 after slot `N - 1`. Reads always see all `N`
/// slots, written or not.
#[derive(Debug, Clone)]
pub struct RingBuffer<T: Copy, const N: usize> {
    buffer: [T; N],
    index: usize,
}

impl<T: Copy + Default, const N: usize> RingBuffer<T, N> {
    pub fn new() -> Self {
        Self {
            buffer: [T::default(); N],
            index: 0,
        }
    }
}

impl<T: Copy + Default, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, const N: usize> RingBuffer<T, N> {
    pub const fn new_filled(fill: T) -> Self {
        Self {
            buffer: [fill; N],
            index: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Slot the next [`push`](Self::push) will overwrite.
    pub fn write_index(&self) -> usize {
        self.index
    }

    /// Overwrite the slot at the write index and advance it.
    pub fn push(&mut self, val: T) {
        self.buffer[self.index] = val;
        self.index = (self.index + 1) % N;
    }

    /// All `N` slots in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }
}

impl<const N: usize> RingBuffer<f32, N> {
    /// Arithmetic mean over every slot, recomputed from scratch.
    pub fn mean(&self) -> f32 {
        self.iter().sum::<f32>() / N as f32
    }
}
