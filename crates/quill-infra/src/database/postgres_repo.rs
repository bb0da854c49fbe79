//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::NullOrdering;
use sea_orm::{
    ColumnTrait, DbConn, DbErr, EntityTrait, JoinType, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use quill_core::domain::{Bookmark, Comment, Like, Post, Tag, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    BookmarkRepository, CommentRepository, LikeRepository, Page, PostFilter, PostRepository,
    TagRepository, UserRepository,
};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::entity::{bookmark, like, post_tag, tag};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self, filter: PostFilter, page: Page) -> Result<(Vec<Post>, u64), RepoError> {
        // Public feed defaults to published posts only
        let mut query = PostEntity::find().filter(post::Column::IsDraft.eq(filter.draft.unwrap_or(false)));

        if let Some(author_id) = filter.author_id {
            query = query.filter(post::Column::AuthorId.eq(author_id));
        }

        let total = query.clone().count(&self.db).await.map_err(map_db_err)?;

        // Drafts (null published_at) sort after published posts
        let rows = query
            .order_by_with_nulls(post::Column::PublishedAt, Order::Desc, NullOrdering::Last)
            .order_by_desc(post::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.page_size)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        page: Page,
    ) -> Result<(Vec<Post>, u64), RepoError> {
        let query = PostEntity::find().filter(post::Column::AuthorId.eq(author_id));

        let total = query.clone().count(&self.db).await.map_err(map_db_err)?;

        let rows = query
            .order_by_desc(post::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.page_size)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    async fn replace_tags(&self, post_id: Uuid, tag_ids: &[Uuid]) -> Result<(), RepoError> {
        // Full replace, not merge: clear the old set and link the new one in
        // a single transaction so no reader observes a half-applied state.
        let txn = self.db.begin().await.map_err(map_db_err)?;

        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if !tag_ids.is_empty() {
            let links: Vec<post_tag::ActiveModel> = tag_ids
                .iter()
                .map(|tag_id| post_tag::ActiveModel {
                    post_id: sea_orm::Set(post_id),
                    tag_id: sea_orm::Set(*tag_id),
                })
                .collect();

            post_tag::Entity::insert_many(links)
                .exec(&txn)
                .await
                .map_err(map_db_err)?;
        }

        txn.commit().await.map_err(map_db_err)
    }

    async fn tag_names(&self, post_id: Uuid) -> Result<Vec<String>, RepoError> {
        let tags = tag::Entity::find()
            .join(JoinType::InnerJoin, tag::Relation::PostTag.def())
            .filter(post_tag::Column::PostId.eq(post_id))
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(tags.into_iter().map(|t| t.name).collect())
    }
}

/// PostgreSQL tag repository - lookup-or-create with race absorption.
pub struct PostgresTagRepository {
    db: DbConn,
}

impl PostgresTagRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        let result = tag::Entity::find()
            .filter(tag::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_or_create(&self, names: &[String]) -> Result<Vec<Tag>, RepoError> {
        let mut tags = Vec::with_capacity(names.len());

        for name in names {
            if let Some(existing) = self.find_by_name(name).await? {
                tags.push(existing);
                continue;
            }

            let tag = Tag::new(name.clone());
            match tag::Entity::insert(tag::ActiveModel::from(tag.clone()))
                .exec(&self.db)
                .await
            {
                Ok(_) => tags.push(tag),
                Err(e) if is_unique_violation(&e) => {
                    // Another request created the tag first; use theirs.
                    tracing::debug!(tag = %name, "Tag creation raced, re-querying");
                    let existing = self
                        .find_by_name(name)
                        .await?
                        .ok_or_else(|| RepoError::Query(format!("tag '{}' vanished", name)))?;
                    tags.push(existing);
                }
                Err(e) => return Err(map_db_err(e)),
            }
        }

        Ok(tags)
    }
}

/// PostgreSQL like repository - the toggle engine for likes.
pub struct PostgresLikeRepository {
    db: DbConn,
}

impl PostgresLikeRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn toggle(&self, post_id: Uuid, user_id: Uuid) -> Result<(bool, u64), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = like::Entity::find()
            .filter(like::Column::PostId.eq(post_id))
            .filter(like::Column::UserId.eq(user_id))
            .one(&txn)
            .await
            .map_err(map_db_err)?;

        let is_liked = match existing {
            Some(row) => {
                like::Entity::delete_by_id(row.id)
                    .exec(&txn)
                    .await
                    .map_err(map_db_err)?;
                txn.commit().await.map_err(map_db_err)?;
                false
            }
            None => {
                let active = like::ActiveModel::from(Like::new(post_id, user_id));
                match like::Entity::insert(active).exec(&txn).await {
                    Ok(_) => {
                        txn.commit().await.map_err(map_db_err)?;
                    }
                    Err(e) if is_unique_violation(&e) => {
                        // Lost a double-insert race; the pair is already
                        // liked, which is the state we wanted.
                        txn.rollback().await.map_err(map_db_err)?;
                    }
                    Err(e) => return Err(map_db_err(e)),
                }
                true
            }
        };

        // Fresh recount after commit, not an incremented counter
        let count = self.count(post_id).await?;
        Ok((is_liked, count))
    }

    async fn find(&self, post_id: Uuid, user_id: Uuid) -> Result<Option<Like>, RepoError> {
        let result = like::Entity::find()
            .filter(like::Column::PostId.eq(post_id))
            .filter(like::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn remove(&self, post_id: Uuid, user_id: Uuid) -> Result<(), RepoError> {
        // Idempotent: deleting an absent like is not an error
        like::Entity::delete_many()
            .filter(like::Column::PostId.eq(post_id))
            .filter(like::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn count(&self, post_id: Uuid) -> Result<u64, RepoError> {
        like::Entity::find()
            .filter(like::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}

/// PostgreSQL bookmark repository - same toggle shape, no aggregate exposed.
pub struct PostgresBookmarkRepository {
    db: DbConn,
}

impl PostgresBookmarkRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookmarkRepository for PostgresBookmarkRepository {
    async fn toggle(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = bookmark::Entity::find()
            .filter(bookmark::Column::PostId.eq(post_id))
            .filter(bookmark::Column::UserId.eq(user_id))
            .one(&txn)
            .await
            .map_err(map_db_err)?;

        let is_bookmarked = match existing {
            Some(row) => {
                bookmark::Entity::delete_by_id(row.id)
                    .exec(&txn)
                    .await
                    .map_err(map_db_err)?;
                txn.commit().await.map_err(map_db_err)?;
                false
            }
            None => {
                let active = bookmark::ActiveModel::from(Bookmark::new(post_id, user_id));
                match bookmark::Entity::insert(active).exec(&txn).await {
                    Ok(_) => {
                        txn.commit().await.map_err(map_db_err)?;
                    }
                    Err(e) if is_unique_violation(&e) => {
                        txn.rollback().await.map_err(map_db_err)?;
                    }
                    Err(e) => return Err(map_db_err(e)),
                }
                true
            }
        };

        Ok(is_bookmarked)
    }

    async fn find(&self, post_id: Uuid, user_id: Uuid) -> Result<Option<Bookmark>, RepoError> {
        let result = bookmark::Entity::find()
            .filter(bookmark::Column::PostId.eq(post_id))
            .filter(bookmark::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn remove(&self, post_id: Uuid, user_id: Uuid) -> Result<(), RepoError> {
        bookmark::Entity::delete_many()
            .filter(bookmark::Column::PostId.eq(post_id))
            .filter(bookmark::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_desc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}
