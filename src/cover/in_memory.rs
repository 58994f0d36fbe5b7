use std::collections::HashMap;
use std::io;
use std::mem;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use super::{cover_name, ImageStore, ImageWriter};

type Images = Arc<RwLock<HashMap<String, Vec<u8>>>>;

/// Keeps covers in memory. Intended for tests.
///
/// A writer publishes its bytes when released, whether or not the upload
/// finished, the same way a closed file keeps whatever was written to it.
#[derive(Clone, Default)]
pub struct InMemoryImageStore {
    images: Images,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored for the cover `id` + `image_type`.
    pub fn get(&self, id: &str, image_type: &str) -> Option<Vec<u8>> {
        let images = self.images.read().unwrap_or_else(PoisonError::into_inner);
        images.get(&cover_name(id, image_type)).cloned()
    }

    pub fn len(&self) -> usize {
        let images = self.images.read().unwrap_or_else(PoisonError::into_inner);
        images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn create(&self, id: &str, image_type: &str) -> io::Result<Box<dyn ImageWriter>> {
        Ok(Box::new(BufferWriter {
            name: cover_name(id, image_type),
            buffer: Vec::new(),
            images: Arc::clone(&self.images),
        }))
    }
}

struct BufferWriter {
    name: String,
    buffer: Vec<u8>,
    images: Images,
}

#[async_trait]
impl ImageWriter for BufferWriter {
    async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(chunk);
        Ok(chunk.len())
    }

    async fn finish(self: Box<Self>) -> io::Result<()> {
        // Publishing happens in Drop.
        Ok(())
    }

    fn location(&self) -> String {
        format!("memory://{}", self.name)
    }
}

impl Drop for BufferWriter {
    fn drop(&mut self) {
        let mut images = self.images.write().unwrap_or_else(PoisonError::into_inner);
        images.insert(mem::take(&mut self.name), mem::take(&mut self.buffer));
    }
}
