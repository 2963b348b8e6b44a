//! Storage facade behaviour against the in-memory collaborator.

use cloudops_core::{BucketConfiguration, FacadeConfig, FaultKind};
use cloudops_facade::StorageFacade;
use cloudops_provider::InMemoryCollaborator;

const BUCKET: &str = "test-bucket";

#[tokio::test]
async fn create_bucket_succeeds_once() {
    let mem = InMemoryCollaborator::new();
    let config = FacadeConfig::default();
    let storage = StorageFacade::new(&mem, &config);

    assert!(storage.create_bucket(BUCKET).await.unwrap());
    assert!(storage.bucket_exists(BUCKET).await.unwrap());

    let err = storage.create_bucket(BUCKET).await.unwrap_err();
    let fault = err.as_client_fault().unwrap();
    assert_eq!(fault.kind(), FaultKind::AlreadyExists);
    assert_eq!(fault.operation, "CreateBucket");
}

#[tokio::test]
async fn invalid_bucket_name_is_rejected_remotely() {
    let mem = InMemoryCollaborator::new();
    let config = FacadeConfig::default();
    let storage = StorageFacade::new(&mem, &config);

    let err = storage
        .create_bucket("Invalid Bucket Name")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("InvalidBucketName"), "{err}");
    // The request still reached the collaborator.
    assert_eq!(mem.calls(), vec!["CreateBucket"]);
}

#[tokio::test]
async fn uploads_round_trip() {
    let mem = InMemoryCollaborator::new();
    let config = FacadeConfig::default();
    let storage = StorageFacade::new(&mem, &config);
    storage.create_bucket(BUCKET).await.unwrap();

    for (key, content) in [
        ("test1.txt", b"Hello World".to_vec()),
        ("test2.txt", b"Python Testing".to_vec()),
    ] {
        assert!(storage.upload_file(BUCKET, key, content.clone()).await.unwrap());
        let object = storage.read_object(BUCKET, key).await.unwrap();
        assert_eq!(object.body, content);
    }
}

#[tokio::test]
async fn empty_upload_reads_back_zero_bytes() {
    let mem = InMemoryCollaborator::new();
    let config = FacadeConfig::default();
    let storage = StorageFacade::new(&mem, &config);
    storage.create_bucket(BUCKET).await.unwrap();

    assert!(storage
        .upload_file(BUCKET, "empty.txt", Vec::new())
        .await
        .unwrap());

    let object = storage.read_object(BUCKET, "empty.txt").await.unwrap();
    assert_eq!(object.content_length, 0);
    assert!(object.body.is_empty());
}

#[tokio::test]
async fn large_upload_is_byte_identical() {
    let mem = InMemoryCollaborator::new();
    let config = FacadeConfig::default();
    let storage = StorageFacade::new(&mem, &config);
    storage.create_bucket(BUCKET).await.unwrap();

    // 6 MiB of non-uniform bytes.
    let payload: Vec<u8> = (0..6 * 1024 * 1024).map(|i| (i % 251) as u8).collect();
    assert!(storage
        .upload_file(BUCKET, "large_file.bin", payload.clone())
        .await
        .unwrap());

    let object = storage.read_object(BUCKET, "large_file.bin").await.unwrap();
    assert_eq!(object.content_length, payload.len() as u64);
    assert!(object.body == payload, "payload changed in transit");
    // One PutObject, no chunking.
    assert_eq!(
        mem.calls(),
        vec!["CreateBucket", "PutObject", "GetObject"]
    );
}

#[tokio::test]
async fn upload_to_missing_bucket_propagates() {
    let mem = InMemoryCollaborator::new();
    let config = FacadeConfig::default();
    let storage = StorageFacade::new(&mem, &config);

    let err = storage
        .upload_file("no-such-bucket", "k", b"data".to_vec())
        .await
        .unwrap_err();

    assert_eq!(err.as_client_fault().unwrap().code, "NoSuchBucket");
}

#[tokio::test]
async fn missing_key_is_not_found() {
    let mem = InMemoryCollaborator::new();
    let config = FacadeConfig::default();
    let storage = StorageFacade::new(&mem, &config);
    storage.create_bucket(BUCKET).await.unwrap();

    let err = storage.read_object(BUCKET, "absent").await.unwrap_err();

    assert_eq!(err.as_client_fault().unwrap().kind(), FaultKind::NotFound);
}

#[tokio::test]
async fn bucket_exists_is_false_for_unknown_bucket() {
    let mem = InMemoryCollaborator::new();
    let config = FacadeConfig::default();
    let storage = StorageFacade::new(&mem, &config);

    assert!(!storage.bucket_exists("never-created").await.unwrap());
}

#[tokio::test]
async fn regional_config_sends_location_constraint() {
    let mem = InMemoryCollaborator::new();
    let config = FacadeConfig::new().with_region("eu-central-1");
    let storage = StorageFacade::new(&mem, &config);

    assert!(storage.create_bucket("regional-bucket").await.unwrap());
    let sent = mem.last_create_bucket().unwrap();
    assert_eq!(sent.bucket, "regional-bucket");
    assert_eq!(
        sent.create_bucket_configuration,
        Some(BucketConfiguration {
            location_constraint: "eu-central-1".into(),
        })
    );
}

#[tokio::test]
async fn us_east_1_and_unset_region_send_no_configuration() {
    for config in [
        FacadeConfig::new().with_region("us-east-1"),
        FacadeConfig::new(),
    ] {
        let mem = InMemoryCollaborator::new();
        let storage = StorageFacade::new(&mem, &config);

        assert!(storage.create_bucket("plain-bucket").await.unwrap());
        let sent = mem.last_create_bucket().unwrap();
        assert_eq!(sent.create_bucket_configuration, None, "region {:?}", config.region);
    }
}
