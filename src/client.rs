//! Client helpers over the generated `CellphoneServiceClient`.
//!
//! ## Example
//!
//! ```ignore
//! let mut client = CellphoneClient::connect("http://127.0.0.1:9527").await?;
//! let id = client.create(sample::new_cellphone()).await?;
//! let found = client.search(FilterCondition::default()).await?;
//! ```

use std::io;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::transport::Channel;
use tonic::{Request, Status};
use tracing::{debug, warn};

use crate::pb::{
    BuyCellphoneRequest, BuyCellphoneResponse, Cellphone, CellphoneServiceClient, CoverMetaInfo,
    CreateCellphoneRequest, FilterCondition, UploadCellphoneCoverRequest,
    UploadCellphoneCoverResponse,
};

/// Size of each cover chunk sent by [`CellphoneClient::upload_cover`].
pub const CHUNK_SIZE: usize = 4096;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct CellphoneClient {
    inner: CellphoneServiceClient<Channel>,
    timeout: Duration,
}

impl CellphoneClient {
    /// Dial `target`, e.g. `http://127.0.0.1:9527`.
    pub async fn connect(target: impl Into<String>) -> Result<Self, tonic::transport::Error> {
        let inner = CellphoneServiceClient::connect(target.into()).await?;
        Ok(Self::new(inner))
    }

    pub fn new(inner: CellphoneServiceClient<Channel>) -> Self {
        Self {
            inner,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Deadline sent with every call (`grpc-timeout`).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn request<T>(&self, message: T) -> Request<T> {
        let mut request = Request::new(message);
        request.set_timeout(self.timeout);
        request
    }

    /// Create `cellphone`, returning the id the server stored it under.
    pub async fn create(&mut self, cellphone: Cellphone) -> Result<String, Status> {
        let request = self.request(CreateCellphoneRequest {
            cellphone: Some(cellphone),
        });
        let response = self.inner.create_cellphone(request).await?.into_inner();
        debug!(id = %response.id, "cellphone created");
        Ok(response.id)
    }

    /// Collect every cellphone the server streams back for `condition`.
    pub async fn search(&mut self, condition: FilterCondition) -> Result<Vec<Cellphone>, Status> {
        let request = self.request(condition);
        let mut stream = self.inner.search_cellphone(request).await?.into_inner();

        let mut found = Vec::new();
        while let Some(cellphone) = stream.message().await? {
            found.push(cellphone);
        }
        Ok(found)
    }

    /// Upload a cover: meta info first, then `reader` in [`CHUNK_SIZE`]
    /// chunks.
    ///
    /// `size` is the declared size the server checks against its cap. A read
    /// error ends the upload early and is reported as `Internal`.
    pub async fn upload_cover<R>(
        &mut self,
        id: &str,
        image_type: &str,
        size: u32,
        reader: R,
    ) -> Result<UploadCellphoneCoverResponse, Status>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(8);
        let meta = UploadCellphoneCoverRequest::meta(CoverMetaInfo {
            id: id.to_string(),
            image_type: image_type.to_string(),
            size,
        });

        let feeder = tokio::spawn(feed_cover(tx, meta, reader));

        let request = self.request(ReceiverStream::new(rx));
        let response = match self.inner.upload_cellphone_cover(request).await {
            Ok(response) => response.into_inner(),
            Err(status) => {
                // The server answered early; nobody reads the rest.
                feeder.abort();
                return Err(status);
            }
        };

        match feeder.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                warn!(error = %err, "reading cover failed");
                return Err(Status::internal(format!("can not read cover: {err}")));
            }
            Err(err) => return Err(Status::internal(format!("cover reader panicked: {err}"))),
        }

        Ok(response)
    }

    /// Send every purchase on one bidirectional call and collect the running
    /// averages, one per purchase, in order.
    pub async fn buy(
        &mut self,
        purchases: Vec<BuyCellphoneRequest>,
    ) -> Result<Vec<BuyCellphoneResponse>, Status> {
        let request = self.request(tokio_stream::iter(purchases));
        let mut stream = self.inner.buy_cellphone(request).await?.into_inner();

        let mut averages = Vec::new();
        while let Some(response) = stream.message().await? {
            averages.push(response);
        }
        Ok(averages)
    }
}

/// Push `meta`, then `reader` in chunks, into the upload request stream.
/// Stops quietly if the server stops listening.
async fn feed_cover<R>(
    tx: mpsc::Sender<UploadCellphoneCoverRequest>,
    meta: UploadCellphoneCoverRequest,
    mut reader: R,
) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    if tx.send(meta).await.is_err() {
        return Ok(());
    }

    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        if tx
            .send(UploadCellphoneCoverRequest::block(&buf[..n]))
            .await
            .is_err()
        {
            return Ok(());
        }
    }
}
