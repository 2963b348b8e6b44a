//! Live smoke tests -- require AWS credentials and a region.
//!
//! Run: `CLOUDOPS_LIVE_REGION=us-east-1 cargo test -p cloudops-facade -- --ignored`

use cloudops_core::FacadeConfig;
use cloudops_facade::{ModelFacade, StorageFacade};
use cloudops_provider::AwsCollaborator;

fn live_config() -> FacadeConfig {
    let region =
        std::env::var("CLOUDOPS_LIVE_REGION").expect("Set CLOUDOPS_LIVE_REGION to run live tests");
    FacadeConfig::new().with_region(region)
}

#[tokio::test]
#[ignore]
async fn list_models_smoke() {
    let config = live_config();
    let aws = AwsCollaborator::connect(&config)
        .await
        .expect("Failed to configure AWS clients");
    let models = ModelFacade::new(&aws, &config)
        .list_available_models()
        .await
        .expect("listing should degrade, not fail");

    eprintln!("[live] {} foundation models visible", models.len());
}

#[tokio::test]
#[ignore]
async fn bucket_upload_smoke() {
    let config = live_config();
    let bucket = std::env::var("CLOUDOPS_LIVE_BUCKET").expect("Set CLOUDOPS_LIVE_BUCKET");
    let aws = AwsCollaborator::connect(&config)
        .await
        .expect("Failed to configure AWS clients");
    let storage = StorageFacade::new(&aws, &config);

    assert!(storage.bucket_exists(&bucket).await.expect("HeadBucket failed"));
    assert!(storage
        .upload_file(&bucket, "cloudops-smoke/empty.txt", Vec::new())
        .await
        .expect("PutObject failed"));
    let object = storage
        .read_object(&bucket, "cloudops-smoke/empty.txt")
        .await
        .expect("GetObject failed");
    assert_eq!(object.content_length, 0);
}
