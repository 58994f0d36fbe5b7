//! gRPC transport - maps `cellphone.CellphoneService` calls onto
//! `CellphoneServer` operations.
//!
//! Server-push streams are fed by a spawned task through a bounded channel.
//! When the client drops the stream, the task's call context is canceled and
//! the operation stops at its next send.

use std::future::Future;
use std::net::SocketAddr;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status, Streaming};
use tracing::{info, warn};

use super::CellphoneServer;
use crate::config::ServerConfig;
use crate::error::ServiceError;
use crate::pb::{
    BuyCellphoneRequest, BuyCellphoneResponse, Cellphone, CellphoneService,
    CellphoneServiceServer, CreateCellphoneRequest, CreateCellphoneResponse, FilterCondition,
    UploadCellphoneCoverRequest, UploadCellphoneCoverResponse,
};
use crate::validation::CallContext;

#[tonic::async_trait]
impl CellphoneService for CellphoneServer {
    type SearchCellphoneStream = ReceiverStream<Result<Cellphone, Status>>;
    type BuyCellphoneStream = ReceiverStream<Result<BuyCellphoneResponse, Status>>;

    async fn create_cellphone(
        &self,
        request: Request<CreateCellphoneRequest>,
    ) -> Result<Response<CreateCellphoneResponse>, Status> {
        let ctx = CallContext::from_metadata(request.metadata());
        let response = self.create(&ctx, request.into_inner())?;
        Ok(Response::new(response))
    }

    async fn search_cellphone(
        &self,
        request: Request<FilterCondition>,
    ) -> Result<Response<Self::SearchCellphoneStream>, Status> {
        let ctx = CallContext::from_metadata(request.metadata());
        ctx.check()?;
        let condition = request.into_inner();
        let server = self.clone();

        let stream = spawn_stream("search", ctx, self.stream_buffer, |ctx, out| async move {
            server.search(&ctx, &condition, &out).await
        });
        Ok(Response::new(stream))
    }

    async fn upload_cellphone_cover(
        &self,
        request: Request<Streaming<UploadCellphoneCoverRequest>>,
    ) -> Result<Response<UploadCellphoneCoverResponse>, Status> {
        let ctx = CallContext::from_metadata(request.metadata());
        let response = self.upload(&ctx, request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn buy_cellphone(
        &self,
        request: Request<Streaming<BuyCellphoneRequest>>,
    ) -> Result<Response<Self::BuyCellphoneStream>, Status> {
        let ctx = CallContext::from_metadata(request.metadata());
        ctx.check()?;
        let inbound = request.into_inner();
        let server = self.clone();

        let stream = spawn_stream("buy", ctx, self.stream_buffer, |ctx, out| async move {
            server.buy(&ctx, inbound, &out).await
        });
        Ok(Response::new(stream))
    }
}

/// Run `handler` on its own task, feeding the returned stream. A handler
/// error becomes the final stream item.
fn spawn_stream<T, F, Fut>(
    operation: &'static str,
    ctx: CallContext,
    buffer: usize,
    handler: F,
) -> ReceiverStream<Result<T, Status>>
where
    T: Send + 'static,
    F: FnOnce(CallContext, mpsc::Sender<Result<T, Status>>) -> Fut,
    Fut: Future<Output = Result<usize, ServiceError>> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(buffer);
    let run = handler(ctx.clone(), tx.clone());

    tokio::spawn(async move {
        let result = tokio::select! {
            result = run => result,
            _ = tx.closed() => {
                ctx.cancel();
                Err(ServiceError::Canceled)
            }
        };

        match result {
            Ok(sent) => info!(operation, sent, "stream completed"),
            Err(err) => {
                warn!(operation, error = %err, "stream aborted");
                // Fails only if the client is already gone.
                let _ = tx.send(Err(err.into())).await;
            }
        }
    });

    ReceiverStream::new(rx)
}

/// Create a `CellphoneServiceServer` from a `CellphoneServer`.
pub fn grpc_server(server: CellphoneServer) -> CellphoneServiceServer<CellphoneServer> {
    CellphoneServiceServer::new(server)
}

/// Bind `config.listen_addr` and serve until `shutdown` resolves.
pub async fn serve(
    config: &ServerConfig,
    shutdown: impl Future<Output = ()> + Send,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr: SocketAddr = config.listen_addr.parse()?;
    let server = CellphoneServer::from_config(config);

    info!(%addr, cover_dir = %config.cover_dir.display(), "cellphone service listening");
    tonic::transport::Server::builder()
        .trace_fn(|request| tracing::info_span!("grpc", path = %request.uri().path()))
        .add_service(grpc_server(server))
        .serve_with_shutdown(addr, shutdown)
        .await?;
    Ok(())
}
