/// Byte buffers handed to the VM by one frame.
///
/// Buffers are only ever appended; they are all released together when the owning
/// frame is dropped.
#[derive(Debug, Default)]
pub struct ScratchBuffers {
    buffers: Vec<Vec<u8>>,
}

impl ScratchBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies `bytes` into a new buffer owned by the frame.
    pub fn alloc(&mut self, bytes: &[u8]) -> &[u8] {
        let index = self.buffers.len();
        self.buffers.push(bytes.to_vec());
        &self.buffers[index]
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Total bytes held.
    pub fn bytes(&self) -> usize {
        self.buffers.iter().map(Vec::len).sum()
    }
}
