//! Behaviour every `PostStore` must show. Each check expects an empty store.

use std::collections::HashSet;

use blog_pages::{
    db::{PostStore, StoreError},
    domain::{PageQuery, PostDraft},
};

fn draft(title: &str, content: &str) -> PostDraft {
    PostDraft::parse(title, content).unwrap()
}

fn page(page: i64, limit: i64) -> PageQuery {
    PageQuery::normalized(Some(page), Some(limit), None, 12)
}

pub async fn create_read_update_delete(store: &impl PostStore) {
    let id = store.create(&draft("Hello", "World")).await.unwrap();

    let post = store.find_by_id(id).await.unwrap();
    assert_eq!(post.title, "Hello");
    assert_eq!(post.content, "World");
    assert!(!post.was_updated());

    let updated = store.update(id, &draft("Hello again", "World")).await.unwrap();
    assert_eq!(updated.id, id);
    assert_eq!(updated.title, "Hello again");
    assert!(updated.updated_at >= updated.created_at);
    assert_eq!(store.find_by_id(id).await.unwrap(), updated);

    store.delete(id).await.unwrap();
    assert!(matches!(store.find_by_id(id).await, Err(StoreError::NotFound(_))));
}

pub async fn missing_posts(store: &impl PostStore) {
    assert!(matches!(
        store.find_by_id(12345).await,
        Err(StoreError::NotFound(12345))
    ));
    assert!(matches!(
        store.update(12345, &draft("Title", "Body")).await,
        Err(StoreError::NotFound(12345))
    ));
    store.delete(12345).await.unwrap();
}

pub async fn pages_partition_the_posts(store: &impl PostStore) {
    for i in 0..27 {
        store
            .create(&draft(&format!("Post {i}"), "Body"))
            .await
            .unwrap();
    }

    let mut seen = HashSet::new();
    let mut sizes = Vec::new();
    for number in 1..=3 {
        let result = store.find_paginated(&page(number, 10)).await.unwrap();
        assert_eq!(result.total, 27);
        sizes.push(result.posts.len());
        for post in result.posts {
            assert!(seen.insert(post.id), "post {} listed twice", post.id);
        }
    }
    assert_eq!(sizes, vec![10, 10, 7]);
    assert_eq!(seen.len(), 27);

    let past_the_end = store.find_paginated(&page(10, 10)).await.unwrap();
    assert!(past_the_end.posts.is_empty());
    assert_eq!(past_the_end.total, 27);

    let newest = store.find_paginated(&page(1, 1)).await.unwrap();
    assert_eq!(newest.posts[0].title, "Post 26");
}

pub async fn keyword_search_is_literal_and_case_insensitive(store: &impl PostStore) {
    for (title, content) in [
        ("Learning RUST", "ownership"),
        ("Cooking", "a rusty pan"),
        ("Discounts", "100% off"),
        ("Numbers", "1000 items"),
    ] {
        store.create(&draft(title, content)).await.unwrap();
    }

    let query = PageQuery::normalized(None, None, Some("  rust "), 12);
    let result = store.find_paginated(&query).await.unwrap();
    assert_eq!(result.total, 2);
    assert!(result.posts.iter().all(|p| p.title != "Discounts"));

    let query = PageQuery::normalized(None, None, Some("100%"), 12);
    let result = store.find_paginated(&query).await.unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.posts[0].title, "Discounts");

    let query = PageQuery::normalized(None, None, Some("nothing like it"), 12);
    let result = store.find_paginated(&query).await.unwrap();
    assert_eq!(result.total, 0);
    assert!(result.posts.is_empty());
}
