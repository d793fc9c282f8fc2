use docrepo::{
    chrono::{DateTime, Duration, TimeZone, Utc},
    memory::InMemoryStore,
    prelude::*,
};
use serde_json::json;

fn t1() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

fn t2() -> DateTime<Utc> {
    t1() + Duration::days(1)
}

async fn new_store() -> DocumentStore<InMemoryStore> {
    DocumentStore::new(InMemoryStore::builder().build().await.unwrap())
}

/// Stores A ("Hello World", "foo", a1, T1) then B ("Goodbye", "foobar", a2, T2).
async fn seeded_store() -> (DocumentStore<InMemoryStore>, Document, Document) {
    let store = new_store().await;

    let a = store
        .save(
            Document::builder()
                .with_title("Hello World")
                .with_content("foo")
                .with_author(Author::new("a1", "Alice"))
                .with_created(t1())
                .build(),
        )
        .await
        .unwrap();

    let b = store
        .save(
            Document::builder()
                .with_title("Goodbye")
                .with_content("foobar")
                .with_author(Author::new("a2", "Bob"))
                .with_created(t2())
                .build(),
        )
        .await
        .unwrap();

    (store, a, b)
}

#[tokio::test]
async fn test_save_generates_unused_id() {
    let (store, _, _) = seeded_store().await;
    let before = store.list().await.unwrap();
    assert_eq!(before.len(), 2);

    let saved = store.save(Document::builder().with_title("New").build()).await.unwrap();

    let id = saved.id().unwrap();
    assert!(!id.is_empty());
    assert!(before.iter().all(|doc| doc.id() != Some(id)));
    assert_eq!(store.count().await.unwrap(), 3);
    assert_eq!(store.find_by_id(id).await.unwrap(), Some(saved.clone()));
}

#[tokio::test]
async fn test_save_upsert_replaces_existing_document() {
    let (store, a, b) = seeded_store().await;

    let revised = Document {
        title: Some("Hello Again".to_string()),
        content: Some("revised".to_string()),
        ..a.clone()
    };
    let saved = store.save(revised.clone()).await.unwrap();

    assert_eq!(saved, revised);

    let all = store.list().await.unwrap();
    let matching: Vec<_> = all.iter().filter(|doc| doc.id == a.id).collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].title.as_deref(), Some("Hello Again"));
    assert_eq!(matching[0].created, Some(t1()));

    // The replaced document moves to the end of the store order
    assert_eq!(all, vec![b, revised]);
}

#[tokio::test]
async fn test_save_does_not_merge_fields() {
    let (store, a, _) = seeded_store().await;

    let bare = Document::builder().with_id(a.id().unwrap()).build();
    store.save(bare.clone()).await.unwrap();

    assert_eq!(store.find_by_id(a.id()).await.unwrap(), Some(bare));
}

#[tokio::test]
async fn test_save_rejects_absent_document() {
    let (store, _, _) = seeded_store().await;
    let before = store.list().await.unwrap();

    let err = store.save(None::<Document>).await.unwrap_err();

    assert!(matches!(err, DocumentStoreError::InvalidArgument(_)));
    assert_eq!(store.list().await.unwrap(), before);
}

#[tokio::test]
async fn test_find_by_id_round_trip() {
    let (store, a, b) = seeded_store().await;

    assert_eq!(store.find_by_id(a.id()).await.unwrap(), Some(a));
    assert_eq!(store.find_by_id(b.id()).await.unwrap(), Some(b));
}

#[tokio::test]
async fn test_find_by_id_trims_whitespace() {
    let (store, a, _) = seeded_store().await;
    let padded = format!("  {}\t", a.id().unwrap());

    assert_eq!(store.find_by_id(padded.as_str()).await.unwrap(), Some(a));
}

#[tokio::test]
async fn test_find_by_id_miss() {
    let (store, _, _) = seeded_store().await;

    assert_eq!(store.find_by_id("no-such-id").await.unwrap(), None);
    assert_eq!(store.find_by_id(None::<&str>).await.unwrap(), None);
}

#[tokio::test]
async fn test_search_by_title_prefix_is_case_insensitive() {
    let (store, a, _) = seeded_store().await;

    let request = SearchRequest::builder().title_prefix("hel").build();

    assert_eq!(store.search(request).await.unwrap(), vec![a]);
}

#[tokio::test]
async fn test_search_by_content() {
    let (store, _, b) = seeded_store().await;

    let request = SearchRequest::builder().contains_content("bar").build();

    assert_eq!(store.search(request).await.unwrap(), vec![b]);
}

#[tokio::test]
async fn test_search_by_author() {
    let (store, _, b) = seeded_store().await;

    let request = SearchRequest::builder().author_id("a2").build();

    assert_eq!(store.search(request).await.unwrap(), vec![b]);
}

#[tokio::test]
async fn test_search_by_created_range() {
    let (store, a, b) = seeded_store().await;

    let from_t2 = SearchRequest::builder().created_from(t2()).build();
    assert_eq!(store.search(from_t2).await.unwrap(), vec![b.clone()]);

    let to_t1 = SearchRequest::builder().created_to(t1()).build();
    assert_eq!(store.search(to_t1).await.unwrap(), vec![a.clone()]);

    let both = SearchRequest::builder()
        .created_from(t1())
        .created_to(t2())
        .build();
    assert_eq!(store.search(both).await.unwrap(), vec![a, b]);
}

#[tokio::test]
async fn test_search_criteria_combine_conjunctively() {
    let (store, _, _) = seeded_store().await;

    let request = SearchRequest::builder()
        .title_prefix("hel")
        .author_id("a2")
        .build();

    assert!(store.search(request).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_values_within_criterion_combine_disjunctively() {
    let (store, a, b) = seeded_store().await;

    let request = SearchRequest::builder().author_ids(["a1", "a2"]).build();

    assert_eq!(store.search(request).await.unwrap(), vec![a, b]);
}

#[tokio::test]
async fn test_search_absent_request_returns_nothing() {
    let (store, _, _) = seeded_store().await;

    assert!(store.search(None::<SearchRequest>).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_empty_request_returns_everything_in_store_order() {
    let (store, a, b) = seeded_store().await;

    assert_eq!(store.search(SearchRequest::new()).await.unwrap(), vec![a, b]);
}

#[tokio::test]
async fn test_search_aborts_on_missing_searched_field() {
    let (store, _, _) = seeded_store().await;
    let untitled = store
        .save(Document::builder().with_content("no title here").build())
        .await
        .unwrap();

    let err = store
        .search(SearchRequest::builder().title_prefix("hel").build())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DocumentStoreError::MissingField {
            id: untitled.id.unwrap(),
            field: "title",
        }
    );

    // Criteria that do not inspect the title still work
    let hits = store
        .search(SearchRequest::builder().contains_content("title").build())
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn test_search_aborts_on_missing_content_or_created() {
    let store = new_store().await;
    store
        .save(Document::builder().with_id("x").with_title("t").build())
        .await
        .unwrap();

    let by_content = store
        .search(SearchRequest::builder().contains_content("a").build())
        .await
        .unwrap_err();
    assert_eq!(
        by_content,
        DocumentStoreError::MissingField { id: "x".to_string(), field: "content" }
    );

    let by_created = store
        .search(SearchRequest::builder().created_from(t1()).build())
        .await
        .unwrap_err();
    assert_eq!(
        by_created,
        DocumentStoreError::MissingField { id: "x".to_string(), field: "created" }
    );
}

#[tokio::test]
async fn test_search_results_are_independent_copies() {
    let (store, a, _) = seeded_store().await;

    let mut hits = store.search(SearchRequest::new()).await.unwrap();
    hits[0].title = Some("mutated".to_string());

    assert_eq!(store.find_by_id(a.id()).await.unwrap(), Some(a));
}

#[tokio::test]
async fn test_delete_and_count() {
    let (store, a, b) = seeded_store().await;

    let removed = store.delete(a.id().unwrap()).await.unwrap();

    assert_eq!(removed, Some(a.clone()));
    assert_eq!(store.count().await.unwrap(), 1);
    assert_eq!(store.list().await.unwrap(), vec![b]);
    assert_eq!(store.find_by_id(a.id()).await.unwrap(), None);
}

#[tokio::test]
async fn test_dynamic_store_round_trip() {
    let dyn_store = new_store().await.into_dyn();

    let saved = dyn_store
        .save(Document::builder().with_title("Dynamic").build())
        .await
        .unwrap();
    assert_eq!(dyn_store.find_by_id(saved.id()).await.unwrap(), Some(saved.clone()));
    assert!(dyn_store.save(None::<Document>).await.is_err());

    let store = dyn_store
        .into_static::<InMemoryStore>()
        .expect("backend should be an InMemoryStore");
    assert_eq!(store.list().await.unwrap(), vec![saved]);

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_search_request_from_json() {
    let (store, _, b) = seeded_store().await;

    let request: SearchRequest = serde_json::from_value(json!({
        "containsContents": ["BAR"],
        "authorIds": ["a2"],
    }))
    .unwrap();

    assert_eq!(store.search(request).await.unwrap(), vec![b]);
}

#[tokio::test]
async fn test_document_json_round_trip_through_store() {
    let (store, a, _) = seeded_store().await;

    let value = a.to_json().unwrap();
    assert_eq!(value["author"]["id"], "a1");

    let restored = Document::from_json(value).unwrap();
    store.save(restored.clone()).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 2);
    assert_eq!(store.find_by_id(a.id()).await.unwrap(), Some(restored));
}
