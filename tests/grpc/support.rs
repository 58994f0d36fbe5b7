use std::net::SocketAddr;

use cellphone_service::cover::ImageStore;
use cellphone_service::service::grpc_server;
use cellphone_service::{CellphoneClient, CellphoneServer};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;

/// Serve `server` on an ephemeral loopback port for the rest of the test.
pub async fn spawn(server: CellphoneServer) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(grpc_server(server))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });
    addr
}

/// In-memory server with covers in `covers`, plus a connected client.
pub async fn connect(covers: impl ImageStore + 'static) -> (CellphoneServer, CellphoneClient) {
    let server = CellphoneServer::in_memory(covers);
    let addr = spawn(server.clone()).await;
    let client = CellphoneClient::connect(format!("http://{addr}"))
        .await
        .unwrap();
    (server, client)
}
