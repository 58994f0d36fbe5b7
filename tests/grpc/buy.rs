use cellphone_service::cover::InMemoryImageStore;
use cellphone_service::pb::BuyCellphoneRequest;
use cellphone_service::sample;
use tonic::Code;
use uuid::Uuid;

use crate::support::connect;

fn purchase(id: &str, price: f64) -> BuyCellphoneRequest {
    BuyCellphoneRequest {
        id: id.to_string(),
        price,
    }
}

#[tokio::test]
async fn buy_streams_running_averages() {
    let (_, mut client) = connect(InMemoryImageStore::new()).await;
    let a = client.create(sample::new_cellphone()).await.unwrap();
    let b = client.create(sample::new_cellphone()).await.unwrap();

    let responses = client
        .buy(vec![
            purchase(&a, 1000.0),
            purchase(&b, 500.0),
            purchase(&a, 2000.0),
            purchase(&b, 700.0),
        ])
        .await
        .unwrap();

    let averages: Vec<(&str, f64)> = responses
        .iter()
        .map(|r| (r.id.as_str(), r.avg))
        .collect();
    assert_eq!(
        averages,
        vec![
            (a.as_str(), 1000.0),
            (b.as_str(), 500.0),
            (a.as_str(), 1500.0),
            (b.as_str(), 600.0)
        ]
    );
}

#[tokio::test]
async fn ledger_persists_across_calls() {
    let (server, mut client) = connect(InMemoryImageStore::new()).await;
    let id = client.create(sample::new_cellphone()).await.unwrap();

    client.buy(vec![purchase(&id, 10.0)]).await.unwrap();
    let second = client.buy(vec![purchase(&id, 30.0)]).await.unwrap();

    assert_eq!(second[0].avg, 20.0);
    assert_eq!(server.orders().get(&id).unwrap().count, 2);
}

#[tokio::test]
async fn unknown_cellphone_ends_stream_with_not_found() {
    let (server, mut client) = connect(InMemoryImageStore::new()).await;
    let unknown = Uuid::new_v4().to_string();

    let status = client
        .buy(vec![purchase(&unknown, 10.0)])
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::NotFound);
    assert_eq!(server.orders().get(&unknown), None);
}
