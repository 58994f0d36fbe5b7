use std::time::Duration;

use cellphone_service::pb::FilterCondition;
use cellphone_service::{CallContext, CellphoneStore};
use tokio::sync::mpsc;
use tonic::Code;

use crate::support::{create_sample, server};

#[tokio::test]
async fn sends_one_message_per_match() {
    let (server, _) = server();
    let created: Vec<String> = (0..5).map(|_| create_sample(&server).id).collect();
    let (tx, mut rx) = mpsc::channel(16);

    let sent = server
        .search(&CallContext::new(), &FilterCondition::default(), &tx)
        .await
        .unwrap();
    drop(tx);

    let mut received = Vec::new();
    while let Some(item) = rx.recv().await {
        received.push(item.unwrap().id);
    }
    assert_eq!(sent, 5);
    assert_eq!(received, created);
}

#[tokio::test]
async fn no_match_is_an_empty_success() {
    let (server, _) = server();
    create_sample(&server);
    let (tx, mut rx) = mpsc::channel(16);

    let condition = FilterCondition {
        min_cpu_core: 1_000,
        ..Default::default()
    };
    let sent = server
        .search(&CallContext::new(), &condition, &tx)
        .await
        .unwrap();
    drop(tx);

    assert_eq!(sent, 0);
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn cancel_mid_stream_stops_sending() {
    let (server, _) = server();
    for _ in 0..10 {
        create_sample(&server);
    }
    assert_eq!(server.store().size(), 10);

    let (tx, mut rx) = mpsc::channel(1);
    let ctx = CallContext::new();
    let task = {
        let server = server.clone();
        let ctx = ctx.clone();
        tokio::spawn(async move { server.search(&ctx, &FilterCondition::default(), &tx).await })
    };

    // First message arrives, then the client walks away.
    assert!(rx.recv().await.unwrap().is_ok());
    ctx.cancel();

    let err = task.await.unwrap().unwrap_err();
    assert_eq!(err.code(), Code::Cancelled);

    let mut delivered = 1;
    while rx.try_recv().is_ok() {
        delivered += 1;
    }
    assert!(delivered < 10);
}

#[tokio::test]
async fn dropped_receiver_is_canceled() {
    let (server, _) = server();
    create_sample(&server);
    let (tx, rx) = mpsc::channel(1);
    drop(rx);

    let err = server
        .search(&CallContext::new(), &FilterCondition::default(), &tx)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::Cancelled);
}

#[tokio::test]
async fn deadline_while_blocked_on_send() {
    let (server, _) = server();
    for _ in 0..3 {
        create_sample(&server);
    }
    // Nobody reads: the second send blocks until the deadline.
    let (tx, _rx) = mpsc::channel(1);
    let ctx = CallContext::with_timeout(Duration::from_millis(20));

    let err = server
        .search(&ctx, &FilterCondition::default(), &tx)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::DeadlineExceeded);
}
