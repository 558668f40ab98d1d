//! End-to-end draft flow over the local storage backend: upload photos,
//! fill slots, and assemble the listing. No database required.

use std::sync::Arc;

use tempfile::tempdir;

use autolot_core::draft::{assemble, Gallery, SlotAssignments};
use autolot_core::models::{CarFields, PhotoRole};
use rust_decimal::Decimal;

use autolot_storage::{ImageGateway, LocalStorage};

fn allowed_content_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/gif".to_string(),
        "image/webp".to_string(),
    ]
}

fn listing_fields() -> CarFields {
    CarFields {
        title: "VW Golf Trendline".to_string(),
        price: Decimal::new(1459000, 2),
        year: 2019,
        km: 61000,
        transmission: "Manual".to_string(),
        fuel: "Nafta".to_string(),
        description: None,
    }
}

async fn build_gateway(dir: &tempfile::TempDir) -> ImageGateway {
    let storage = LocalStorage::new(
        dir.path(),
        "http://localhost:4000/car-images".to_string(),
    )
    .await
    .unwrap();

    ImageGateway::new(
        Arc::new(storage),
        "car-images".to_string(),
        5 * 1024 * 1024,
        allowed_content_types(),
    )
}

#[tokio::test]
async fn upload_assign_and_assemble_full_draft() {
    let dir = tempdir().unwrap();
    let gateway = build_gateway(&dir).await;

    let mut slots = SlotAssignments::new();

    // Upload one photo per required slot, draft-scoped.
    for role in PhotoRole::ALL {
        slots.begin_upload(role).unwrap();
        let uploaded = gateway
            .upload_image(vec![0xAB; 2 * 1024 * 1024], "image/jpeg", None)
            .await
            .unwrap();
        slots.finish_upload(role);
        slots.assign(role, uploaded.url);
    }

    assert!(slots.missing(&PhotoRole::ALL).is_empty());

    // Two extra gallery shots.
    let mut gallery = Gallery::new();
    for _ in 0..2 {
        let uploaded = gateway
            .upload_image(vec![0xCD; 512 * 1024], "image/webp", None)
            .await
            .unwrap();
        gallery.append(uploaded.url);
    }

    let insert = assemble(listing_fields(), &slots, &gallery, &PhotoRole::ALL).unwrap();

    // Slot images first in canonical order, then the gallery.
    assert_eq!(insert.images.len(), 10);
    assert_eq!(insert.images[0].role, Some(PhotoRole::Front));
    assert_eq!(insert.images[0].is_primary, Some(true));
    assert_eq!(insert.images[8].order, Some(0));
    assert_eq!(insert.images[9].order, Some(1));

    // Every stored URL is draft-scoped under the bucket.
    for image in &insert.images {
        assert!(image.url.contains("/car-images/temp/"));
    }
}

#[tokio::test]
async fn partial_draft_is_rejected_with_missing_labels() {
    let dir = tempdir().unwrap();
    let gateway = build_gateway(&dir).await;

    let mut slots = SlotAssignments::new();
    let uploaded = gateway
        .upload_image(vec![0xAB; 1024], "image/jpeg", None)
        .await
        .unwrap();
    slots.assign(PhotoRole::Front, uploaded.url);

    let err = assemble(
        listing_fields(),
        &slots,
        &Gallery::new(),
        &PhotoRole::ALL,
    )
    .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("Rear"));
    assert!(message.contains("Trunk"));
    assert!(!message.contains("Front,"));
}

#[tokio::test]
async fn uploaded_image_can_be_deleted_by_address() {
    let dir = tempdir().unwrap();
    let gateway = build_gateway(&dir).await;

    let uploaded = gateway
        .upload_image(vec![0xAB; 1024], "image/png", None)
        .await
        .unwrap();

    gateway.delete_image(&uploaded.url).await.unwrap();

    // Deleting again is a no-op on the local backend.
    gateway.delete_image(&uploaded.url).await.unwrap();
}

#[tokio::test]
async fn oversized_and_foreign_payloads_are_rejected_before_storage() {
    let dir = tempdir().unwrap();
    let gateway = build_gateway(&dir).await;

    let result = gateway
        .upload_image(vec![0u8; 5 * 1024 * 1024 + 1], "image/jpeg", None)
        .await;
    assert!(result.is_err());

    let result = gateway.upload_image(vec![0u8; 1024], "text/html", None).await;
    assert!(result.is_err());

    let result = gateway
        .delete_image("https://elsewhere.example.com/photo.jpg")
        .await;
    assert!(result.is_err());
}
