use std::io;
use std::time::Duration;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream;

use intake::application::ports::{StorageArea, StorageAreaError};
use intake::domain::StorageKey;
use intake::infrastructure::storage::LocalStorageArea;

async fn create_test_store() -> (tempfile::TempDir, LocalStorageArea) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalStorageArea::new(dir.path().join("uploads"));
    store.ensure().await.unwrap();
    (dir, store)
}

fn chunks(parts: &[&'static str]) -> Vec<Result<Bytes, io::Error>> {
    parts.iter().map(|p| Ok(Bytes::from_static(p.as_bytes()))).collect()
}

#[tokio::test]
async fn given_missing_root_when_ensuring_then_directory_is_created() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path().join("nested").join("uploads");
    let store = LocalStorageArea::new(&root);

    assert!(!root.exists());
    store.ensure().await.unwrap();
    assert!(root.is_dir());

    store.ensure().await.unwrap();
    assert!(root.is_dir());
}

#[tokio::test]
async fn given_file_at_root_path_when_ensuring_then_returns_unavailable() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path().join("uploads");
    std::fs::write(&root, b"not a directory").unwrap();
    let store = LocalStorageArea::new(&root);

    let result = store.ensure().await;

    assert!(matches!(result, Err(StorageAreaError::Unavailable(_))));
}

#[tokio::test]
async fn given_valid_stream_when_storing_then_file_is_persisted() {
    let (_dir, store) = create_test_store().await;
    let key = StorageKey::generate("test.txt");

    let byte_stream = stream::iter(chunks(&["hello ", "world"])).boxed();

    let size = store.store(&key, byte_stream, None).await.unwrap();
    assert_eq!(size, 11);
    assert_eq!(store.fetch(&key).await.unwrap(), b"hello world");
}

#[tokio::test]
async fn given_small_write_chunks_when_storing_large_payload_then_bytes_match() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalStorageArea::with_write_chunk_bytes(dir.path().join("uploads"), 7);
    store.ensure().await.unwrap();
    let key = StorageKey::generate("blob.bin");

    let payload: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
    let parts: Vec<Result<Bytes, io::Error>> = payload
        .chunks(1000)
        .map(|c| Ok(Bytes::copy_from_slice(c)))
        .collect();

    let size = store
        .store(&key, stream::iter(parts).boxed(), Some(payload.len() as u64))
        .await
        .unwrap();

    assert_eq!(size, payload.len() as u64);
    assert_eq!(store.fetch(&key).await.unwrap(), payload);
}

#[tokio::test]
async fn given_existing_object_when_storing_same_key_then_returns_already_exists() {
    let (_dir, store) = create_test_store().await;
    let key = StorageKey::generate("test.txt");

    store
        .store(&key, stream::iter(chunks(&["original"])).boxed(), None)
        .await
        .unwrap();

    let result = store
        .store(&key, stream::iter(chunks(&["replacement"])).boxed(), None)
        .await;

    assert!(matches!(result, Err(StorageAreaError::AlreadyExists(_))));
    assert_eq!(store.fetch(&key).await.unwrap(), b"original");
}

#[tokio::test]
async fn given_stream_error_when_storing_then_partial_object_is_removed() {
    let (_dir, store) = create_test_store().await;
    let key = StorageKey::generate("test.txt");

    let parts: Vec<Result<Bytes, io::Error>> = vec![
        Ok(Bytes::from("partial")),
        Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "network drop",
        )),
    ];

    let result = store.store(&key, stream::iter(parts).boxed(), None).await;

    assert!(matches!(result, Err(StorageAreaError::WriteFailed(_))));
    assert!(!store.object_path(&key).exists());
}

#[tokio::test]
async fn given_short_stream_when_length_was_declared_then_write_fails_and_is_removed() {
    let (_dir, store) = create_test_store().await;
    let key = StorageKey::generate("test.txt");

    let result = store
        .store(&key, stream::iter(chunks(&["abc"])).boxed(), Some(10))
        .await;

    assert!(matches!(result, Err(StorageAreaError::WriteFailed(_))));
    assert!(!store.object_path(&key).exists());
}

#[tokio::test]
async fn given_abandoned_stream_when_store_is_cancelled_then_partial_object_is_removed() {
    let (_dir, store) = create_test_store().await;
    let key = StorageKey::generate("test.txt");

    let stalled = stream::iter(chunks(&["first chunk"]))
        .chain(stream::pending())
        .boxed();

    let result = tokio::time::timeout(
        Duration::from_millis(100),
        store.store(&key, stalled, None),
    )
    .await;

    assert!(result.is_err());
    assert!(!store.object_path(&key).exists());
}

#[tokio::test]
async fn given_stored_file_when_head_then_returns_size() {
    let (_dir, store) = create_test_store().await;
    let key = StorageKey::generate("test.txt");

    store
        .store(&key, stream::iter(chunks(&["hello world"])).boxed(), None)
        .await
        .unwrap();

    assert_eq!(store.head(&key).await.unwrap(), 11);
}

#[tokio::test]
async fn given_stored_file_when_deleting_then_fetch_returns_not_found() {
    let (_dir, store) = create_test_store().await;
    let key = StorageKey::generate("test.txt");

    store
        .store(&key, stream::iter(chunks(&["data"])).boxed(), None)
        .await
        .unwrap();
    store.delete(&key).await.unwrap();

    let result = store.fetch(&key).await;
    assert!(matches!(result, Err(StorageAreaError::NotFound(_))));
}

#[tokio::test]
async fn given_nonexistent_key_when_reading_then_returns_not_found() {
    let (_dir, store) = create_test_store().await;
    let key = StorageKey::generate("nonexistent.txt");

    assert!(matches!(
        store.fetch(&key).await,
        Err(StorageAreaError::NotFound(_))
    ));
    assert!(matches!(
        store.head(&key).await,
        Err(StorageAreaError::NotFound(_))
    ));
    assert!(matches!(
        store.delete(&key).await,
        Err(StorageAreaError::NotFound(_))
    ));
}
