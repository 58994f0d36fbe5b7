use std::io::Cursor;

use cellphone_service::cover::DiskImageStore;
use cellphone_service::{sample, MAX_COVER_IMAGE_BYTES};
use tonic::Code;
use uuid::Uuid;

use crate::support::connect;

#[tokio::test]
async fn cover_lands_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let covers = DiskImageStore::new(dir.path());
    let (_, mut client) = connect(covers.clone()).await;
    let id = client.create(sample::new_cellphone()).await.unwrap();
    let image: Vec<u8> = (0..20_000u32).map(|i| (i * 7 % 256) as u8).collect();

    let response = client
        .upload_cover(&id, ".jpg", image.len() as u32, Cursor::new(image.clone()))
        .await
        .unwrap();

    assert_eq!(response.id, id);
    assert_eq!(response.size, image.len() as u64);
    let stored = std::fs::read(covers.path_for(&id, ".jpg")).unwrap();
    assert_eq!(stored, image);
}

#[tokio::test]
async fn oversize_cover_is_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let covers = DiskImageStore::new(dir.path());
    let (_, mut client) = connect(covers.clone()).await;
    let id = client.create(sample::new_cellphone()).await.unwrap();

    let status = client
        .upload_cover(
            &id,
            ".png",
            MAX_COVER_IMAGE_BYTES as u32 + 1,
            Cursor::new(vec![1u8; 64]),
        )
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::OutOfRange);
    assert!(!covers.path_for(&id, ".png").exists());
}

#[tokio::test]
async fn cover_for_unknown_cellphone_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (_, mut client) = connect(DiskImageStore::new(dir.path())).await;

    let status = client
        .upload_cover(
            &Uuid::new_v4().to_string(),
            ".png",
            3,
            Cursor::new(b"abc".to_vec()),
        )
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}
