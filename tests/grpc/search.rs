use cellphone_service::cover::InMemoryImageStore;
use cellphone_service::pb::{
    Battery, Cellphone, CellphoneServiceClient, Cpu, FilterCondition, Ram, Storage, Unit,
};
use cellphone_service::sample;
use tokio_stream::StreamExt;

use crate::support::{connect, spawn};

fn phone(brand: &str, cores: u32, ram: u32, storage: u32, battery: u32) -> Cellphone {
    Cellphone {
        brand: brand.to_string(),
        cpu: Some(Cpu {
            cores,
            ..Default::default()
        }),
        ram: Some(Ram {
            value: ram,
            unit: Unit::Gb.into(),
            ..Default::default()
        }),
        storage: Some(Storage {
            value: storage,
            unit: Unit::Gb.into(),
            ..Default::default()
        }),
        battery: Some(Battery { capacity: battery }),
        ..sample::new_cellphone()
    }
}

#[tokio::test]
async fn search_streams_matches() {
    let (_, mut client) = connect(InMemoryImageStore::new()).await;
    let strong = phone("Pixel", 8, 12, 256, 4500);
    let weak = phone("Pixel", 4, 4, 64, 3000);
    let other_brand = phone("Nokia", 8, 16, 512, 5000);
    for cellphone in [&strong, &weak, &other_brand] {
        client.create(cellphone.clone()).await.unwrap();
    }

    let found = client
        .search(FilterCondition {
            min_cpu_core: 8,
            min_ram_size: 8,
            min_storage_size: 128,
            min_battery_capacity: 4000,
            brands: vec!["Pixel".into(), "Xiaomi".into()],
        })
        .await
        .unwrap();

    assert_eq!(found, vec![strong]);
}

#[tokio::test]
async fn empty_search_ends_cleanly() {
    let (_, mut client) = connect(InMemoryImageStore::new()).await;
    client.create(phone("Pixel", 2, 2, 32, 1000)).await.unwrap();

    let found = client
        .search(FilterCondition {
            min_cpu_core: 64,
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn client_can_stop_reading_early() {
    let (server, mut client) = connect(InMemoryImageStore::new()).await;
    for _ in 0..200 {
        client.create(sample::new_cellphone()).await.unwrap();
    }

    let addr = spawn(server.clone()).await;
    let mut raw = CellphoneServiceClient::connect(format!("http://{addr}"))
        .await
        .unwrap();
    let mut stream = raw
        .search_cellphone(FilterCondition::default())
        .await
        .unwrap()
        .into_inner();

    let first = stream.next().await.unwrap().unwrap();
    assert!(server.store().exists(&first.id));
    drop(stream);

    // The server keeps serving after the abandoned stream.
    let found = client.search(FilterCondition::default()).await.unwrap();
    assert_eq!(found.len(), 200);
}
