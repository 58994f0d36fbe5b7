use cellphone_service::cover::InMemoryImageStore;
use cellphone_service::pb::{Cellphone, CreateCellphoneRequest, CellphoneServiceClient};
use cellphone_service::sample;
use tonic::Code;
use uuid::Uuid;

use crate::support::{connect, spawn};

#[tokio::test]
async fn create_returns_client_id() {
    let (server, mut client) = connect(InMemoryImageStore::new()).await;
    let cellphone = sample::new_cellphone();

    let id = client.create(cellphone.clone()).await.unwrap();

    assert_eq!(id, cellphone.id);
    assert_eq!(server.store().find(&id), Some(cellphone));
}

#[tokio::test]
async fn create_assigns_id_when_empty() {
    let (server, mut client) = connect(InMemoryImageStore::new()).await;
    let cellphone = Cellphone {
        id: String::new(),
        ..sample::new_cellphone()
    };

    let id = client.create(cellphone).await.unwrap();

    assert!(Uuid::try_parse(&id).is_ok());
    assert!(server.store().exists(&id));
}

#[tokio::test]
async fn create_status_codes() {
    let (_, mut client) = connect(InMemoryImageStore::new()).await;
    let cellphone = sample::new_cellphone();
    client.create(cellphone.clone()).await.unwrap();

    let duplicate = client.create(cellphone).await.unwrap_err();
    assert_eq!(duplicate.code(), Code::AlreadyExists);

    let malformed = Cellphone {
        id: "abc".into(),
        ..sample::new_cellphone()
    };
    let invalid = client.create(malformed).await.unwrap_err();
    assert_eq!(invalid.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn missing_cellphone_is_invalid_argument() {
    let (server, _) = connect(InMemoryImageStore::new()).await;
    let addr = spawn(server).await;
    let mut raw = CellphoneServiceClient::connect(format!("http://{addr}"))
        .await
        .unwrap();

    let status = raw
        .create_cellphone(CreateCellphoneRequest { cellphone: None })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
}
