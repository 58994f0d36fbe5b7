use std::pin::pin;

use tokio_stream::{Stream, StreamExt};
use tonic::Status;
use tracing::{debug, info};

use super::CellphoneServer;
use crate::config::MAX_COVER_IMAGE_BYTES;
use crate::cover::ImageWriter;
use crate::error::ServiceError;
use crate::pb::upload_cellphone_cover_request::Data;
use crate::pb::{CoverMetaInfo, UploadCellphoneCoverRequest, UploadCellphoneCoverResponse};
use crate::validation::CallContext;

/// Progress of one cover upload.
///
/// `AwaitingMeta -> ReceivingChunks -> Done`. Any error ends the upload
/// instead; the open writer is dropped, which releases it.
enum UploadState {
    AwaitingMeta,
    ReceivingChunks(ChunkSink),
    Done(UploadCellphoneCoverResponse),
}

/// Open writer plus running byte count for an upload in progress.
struct ChunkSink {
    id: String,
    writer: Box<dyn ImageWriter>,
    written: u64,
}

impl UploadState {
    fn name(&self) -> &'static str {
        match self {
            UploadState::AwaitingMeta => "awaiting meta",
            UploadState::ReceivingChunks(_) => "receiving chunks",
            UploadState::Done(_) => "done",
        }
    }
}

impl CellphoneServer {
    /// Receive a cover image: exactly one meta info message, then any number
    /// of chunks until the client half-closes.
    ///
    /// The declared size is checked against [`MAX_COVER_IMAGE_BYTES`] before
    /// any chunk is accepted. The response reports bytes actually written.
    pub async fn upload<S>(
        &self,
        ctx: &CallContext,
        inbound: S,
    ) -> Result<UploadCellphoneCoverResponse, ServiceError>
    where
        S: Stream<Item = Result<UploadCellphoneCoverRequest, Status>> + Send,
    {
        let mut inbound = pin!(inbound);
        let mut state = UploadState::AwaitingMeta;

        loop {
            if let UploadState::Done(response) = state {
                return Ok(response);
            }

            let message = match ctx.run(inbound.next()).await? {
                Some(Ok(message)) => Some(message),
                Some(Err(status)) => {
                    debug!(state = state.name(), %status, "upload stream failed");
                    return Err(ServiceError::Stream(status));
                }
                None => None,
            };
            state = self.advance(state, message).await?;
        }
    }

    /// One transition. `message` is `None` once the client has half-closed.
    async fn advance(
        &self,
        state: UploadState,
        message: Option<UploadCellphoneCoverRequest>,
    ) -> Result<UploadState, ServiceError> {
        let data = message.map(|m| m.data);

        match (state, data) {
            (UploadState::AwaitingMeta, Some(Some(Data::Meta(meta)))) => {
                let sink = self.open_cover(meta).await?;
                Ok(UploadState::ReceivingChunks(sink))
            }
            (UploadState::AwaitingMeta, None) => Err(ServiceError::InvalidArgument(
                "stream closed before cover meta info".into(),
            )),
            (UploadState::AwaitingMeta, Some(_)) => Err(ServiceError::InvalidArgument(
                "first upload message must carry cover meta info".into(),
            )),

            (UploadState::ReceivingChunks(mut sink), Some(Some(Data::Block(chunk)))) => {
                self.check_received(&sink, chunk.len())?;
                let n = sink.writer.write_chunk(&chunk).await?;
                sink.written += n as u64;
                debug!(n, location = %sink.writer.location(), "chunk written");
                Ok(UploadState::ReceivingChunks(sink))
            }
            (UploadState::ReceivingChunks(sink), None) => {
                let ChunkSink {
                    id,
                    writer,
                    written,
                } = sink;
                let location = writer.location();
                writer.finish().await?;
                info!(%id, written, %location, "cover uploaded");
                Ok(UploadState::Done(UploadCellphoneCoverResponse { id, size: written }))
            }
            (UploadState::ReceivingChunks(_), Some(Some(Data::Meta(_)))) => Err(
                ServiceError::InvalidArgument("cover meta info sent twice".into()),
            ),
            (UploadState::ReceivingChunks(_), Some(None)) => Err(ServiceError::InvalidArgument(
                "upload message carries neither meta info nor chunk".into(),
            )),

            (UploadState::Done(response), _) => Ok(UploadState::Done(response)),
        }
    }

    async fn open_cover(&self, meta: CoverMetaInfo) -> Result<ChunkSink, ServiceError> {
        self.ensure_known(&meta.id)?;

        if u64::from(meta.size) > MAX_COVER_IMAGE_BYTES {
            info!(id = %meta.id, size = meta.size, "declared cover size too large");
            return Err(ServiceError::OutOfRange(format!(
                "provided cover image is larger than {MAX_COVER_IMAGE_BYTES} bytes"
            )));
        }
        if meta.image_type.contains(['/', '\\']) || meta.image_type.contains("..") {
            return Err(ServiceError::InvalidArgument(format!(
                "invalid image type {:?}",
                meta.image_type
            )));
        }

        let writer = self.covers.create(&meta.id, &meta.image_type).await?;
        debug!(id = %meta.id, location = %writer.location(), "cover opened");
        Ok(ChunkSink {
            id: meta.id,
            writer,
            written: 0,
        })
    }

    fn check_received(&self, sink: &ChunkSink, incoming: usize) -> Result<(), ServiceError> {
        if self.upload.enforce_received_size
            && sink.written + incoming as u64 > MAX_COVER_IMAGE_BYTES
        {
            info!(id = %sink.id, "received cover bytes exceed limit");
            return Err(ServiceError::OutOfRange(format!(
                "received cover image is larger than {MAX_COVER_IMAGE_BYTES} bytes"
            )));
        }
        Ok(())
    }
}
