//! Cover images - scoped output resources for uploaded chunk data.
//!
//! An [`ImageStore`] opens one [`ImageWriter`] per upload, named by the
//! cellphone id and the declared image type. A writer is released when it
//! is dropped, so every exit path of an upload closes it.

mod disk;
mod in_memory;

pub use disk::DiskImageStore;
pub use in_memory::InMemoryImageStore;

use std::io;

use async_trait::async_trait;

/// File name for a cover: the id followed by the image type, e.g.
/// `<uuid>.png`.
pub fn cover_name(id: &str, image_type: &str) -> String {
    format!("{id}{image_type}")
}

/// Opens writers for cover images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn create(&self, id: &str, image_type: &str) -> io::Result<Box<dyn ImageWriter>>;
}

/// Sink for the chunks of one cover image.
#[async_trait]
pub trait ImageWriter: Send {
    /// Append `chunk`, returning the number of bytes written.
    async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<usize>;

    /// Flush buffered bytes and release the resource.
    async fn finish(self: Box<Self>) -> io::Result<()>;

    /// Where the image ends up, for logging.
    fn location(&self) -> String;
}
