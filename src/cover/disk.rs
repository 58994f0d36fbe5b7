use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use super::{cover_name, ImageStore, ImageWriter};

/// Writes covers as files under a directory, created on first use.
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    dir: PathBuf,
}

impl DiskImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, id: &str, image_type: &str) -> PathBuf {
        self.dir.join(cover_name(id, image_type))
    }
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn create(&self, id: &str, image_type: &str) -> io::Result<Box<dyn ImageWriter>> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(id, image_type);
        let file = File::create(&path).await?;
        Ok(Box::new(FileWriter { path, file }))
    }
}

struct FileWriter {
    path: PathBuf,
    file: File,
}

#[async_trait]
impl ImageWriter for FileWriter {
    async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<usize> {
        self.file.write_all(chunk).await?;
        Ok(chunk.len())
    }

    async fn finish(mut self: Box<Self>) -> io::Result<()> {
        self.file.flush().await
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
