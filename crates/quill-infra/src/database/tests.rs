#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use uuid::Uuid;

    use quill_core::domain::Post;
    use quill_core::ports::{
        BaseRepository, BookmarkRepository, CommentRepository, LikeRepository, TagRepository,
        UserRepository,
    };

    use crate::database::entity::{comment, like, post, tag, user};
    use crate::database::postgres_repo::{
        PostgresBookmarkRepository, PostgresCommentRepository, PostgresLikeRepository,
        PostgresPostRepository, PostgresTagRepository, PostgresUserRepository,
    };

    fn post_model(id: Uuid, author_id: Uuid) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id,
            author_id,
            title: "Test Post".to_owned(),
            content: "<p>hello world</p>".to_owned(),
            excerpt: Some("hello world".to_owned()),
            cover_image: None,
            published_at: Some(now.into()),
            read_time: 1,
            is_draft: false,
            seo_title: None,
            seo_description: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = Uuid::new_v4();
        let author_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_model(post_id, author_id)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.read_time, 1);
    }

    #[tokio::test]
    async fn test_save_post_roundtrips_through_returning() {
        let author_id = Uuid::new_v4();
        let domain_post = Post::new(
            author_id,
            "Test Post".to_string(),
            "<p>hello world</p>".to_string(),
            None,
            None,
            None,
            false,
        );

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_model(domain_post.id, author_id)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let saved: Post = repo.save(domain_post.clone()).await.unwrap();
        assert_eq!(saved.id, domain_post.id);
        assert_eq!(saved.title, "Test Post");
    }

    #[tokio::test]
    async fn test_find_user_by_email() {
        let user_id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user::Model {
                id: user_id,
                name: "Ada".to_owned(),
                email: "ada@example.com".to_owned(),
                password_hash: "hash".to_owned(),
                avatar: None,
                bio: None,
                verification_code: None,
                verification_sent_at: None,
                is_verified: true,
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let user = repo.find_by_email("ada@example.com").await.unwrap();
        assert!(user.is_some());
        assert_eq!(user.unwrap().id, user_id);
    }

    #[tokio::test]
    async fn test_find_or_create_returns_existing_tag() {
        let tag_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![tag::Model {
                id: tag_id,
                name: "rust".to_owned(),
            }]])
            .into_connection();

        let repo = PostgresTagRepository::new(db);

        let tags = repo.find_or_create(&["rust".to_string()]).await.unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].id, tag_id);
        assert_eq!(tags[0].name, "rust");
    }

    #[tokio::test]
    async fn test_toggle_like_inserts_when_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // No existing like for this (post, user) pair
            .append_query_results([Vec::<like::Model>::new()])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            // Recount after commit
            .append_query_results([vec![count_row(1)]])
            .into_connection();

        let repo = PostgresLikeRepository::new(db);

        let (is_liked, count) = repo.toggle(Uuid::new_v4(), Uuid::new_v4()).await.unwrap();
        assert!(is_liked);
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_toggle_like_deletes_when_present() {
        let post_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![like::Model {
                id: Uuid::new_v4(),
                post_id,
                user_id,
                created_at: now.into(),
            }]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![count_row(0)]])
            .into_connection();

        let repo = PostgresLikeRepository::new(db);

        let (is_liked, count) = repo.toggle(post_id, user_id).await.unwrap();
        assert!(!is_liked);
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_remove_bookmark_is_idempotent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresBookmarkRepository::new(db);

        // Nothing to delete is still a success
        let result = repo.remove(Uuid::new_v4(), Uuid::new_v4()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_list_comments_for_post() {
        let post_id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                comment::Model {
                    id: Uuid::new_v4(),
                    content: "newest".to_owned(),
                    post_id,
                    author_id: Uuid::new_v4(),
                    created_at: now.into(),
                    updated_at: now.into(),
                },
                comment::Model {
                    id: Uuid::new_v4(),
                    content: "older".to_owned(),
                    post_id,
                    author_id: Uuid::new_v4(),
                    created_at: (now - chrono::TimeDelta::minutes(5)).into(),
                    updated_at: (now - chrono::TimeDelta::minutes(5)).into(),
                },
            ]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let comments = repo.list_for_post(post_id).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].content, "newest");
    }

    #[tokio::test]
    async fn test_like_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(7)]])
            .into_connection();

        let repo = PostgresLikeRepository::new(db);

        let count = repo.count(Uuid::new_v4()).await.unwrap();
        assert_eq!(count, 7);
    }
}
