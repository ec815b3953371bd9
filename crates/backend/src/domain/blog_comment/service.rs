use std::collections::HashMap;

use contracts::domain::blog::comment::{Comment, CommentDto, CommentNode};
use contracts::domain::common::AggregateId;
use uuid::Uuid;

use super::repository;
use crate::domain::blog_post;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use crate::shared::request_meta::RequestMeta;

/// Приём комментария из публичной формы. Создаётся всегда неодобренным,
/// наружу уходит только подтверждение приёма.
pub async fn submit(dto: CommentDto, meta: RequestMeta) -> Result<(), AppError> {
    let post_id = Uuid::parse_str(&dto.post_id)
        .map_err(|_| AppError::BadRequest("invalid post_id".into()))?;
    let post = blog_post::repository::get_by_id(post_id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !post.allow_comments {
        return Err(AppError::Validation {
            field: "post_id".into(),
            message: "comments are disabled for this post".into(),
        });
    }

    if let Some(parent_id) = &dto.parent_id {
        let parent_id = Uuid::parse_str(parent_id)
            .map_err(|_| AppError::BadRequest("invalid parent_id".into()))?;
        let parent = repository::get_by_id(parent_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if parent.post_id != dto.post_id {
            return Err(AppError::Validation {
                field: "parent_id".into(),
                message: "parent comment belongs to another post".into(),
            });
        }
    }

    let comment = Comment::new_for_insert(&dto, meta.ip_address, meta.user_agent);
    comment.validate()?;
    repository::insert(&comment).await?;
    Ok(())
}

/// Дерево видимых комментариев поста: корни — новые раньше, ответы — в
/// порядке появления.
pub async fn list_tree_for_post(post_id: &str) -> Result<Vec<CommentNode>, AppError> {
    let comments = repository::list_visible_for_post(post_id).await?;
    Ok(build_tree(comments))
}

/// Сборка дерева из плоского среза видимых комментариев. Ответ, чей
/// родитель не попал в срез (не одобрен или неактивен), не попадает
/// в выдачу вместе со своим поддеревом.
fn build_tree(comments: Vec<Comment>) -> Vec<CommentNode> {
    let mut children: HashMap<String, Vec<Comment>> = HashMap::new();
    let mut roots: Vec<Comment> = Vec::new();

    for comment in comments {
        match comment.parent_id.clone() {
            None => roots.push(comment),
            Some(parent_id) => children.entry(parent_id).or_default().push(comment),
        }
    }

    // Корневые — новые раньше; внутри веток сохраняется хронология
    roots.sort_by(|a, b| b.timestamps.created_at.cmp(&a.timestamps.created_at));

    roots
        .into_iter()
        .map(|comment| build_node(comment, &mut children))
        .collect()
}

fn build_node(comment: Comment, children: &mut HashMap<String, Vec<Comment>>) -> CommentNode {
    let replies = children
        .remove(&comment.id.as_string())
        .unwrap_or_default()
        .into_iter()
        .map(|reply| build_node(reply, children))
        .collect();

    CommentNode {
        id: comment.id.as_string(),
        author_name: comment.author_name,
        author_email: comment.author_email,
        author_website: comment.author_website,
        content: comment.content,
        created_at: comment.timestamps.created_at,
        replies,
    }
}

pub async fn list_admin(
    pending_only: bool,
    params: PageParams,
) -> Result<Paginated<Comment>, AppError> {
    let (items, total) =
        repository::list_admin(pending_only, params.page_index(), params.page_size()).await?;
    Ok(Paginated::new(items, total, params))
}

/// Явное действие модерации
pub async fn approve(id: Uuid) -> Result<(), AppError> {
    if repository::set_approved(id, true).await? {
        Ok(())
    } else {
        Err(AppError::NotFound)
    }
}

pub async fn reject(id: Uuid) -> Result<(), AppError> {
    if repository::set_active(id, false).await? {
        Ok(())
    } else {
        Err(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::blog::comment::CommentId;
    use contracts::domain::common::Timestamps;

    fn visible(id: &str, parent: Option<&str>, minutes: i64) -> Comment {
        let created = chrono::Utc::now() + chrono::Duration::minutes(minutes);
        Comment {
            id: CommentId::new(Uuid::new_v4()),
            post_id: "post".into(),
            parent_id: parent.map(|s| s.to_string()),
            author_name: format!("author-{id}"),
            author_email: format!("{id}@example.com"),
            author_website: String::new(),
            content: id.to_string(),
            is_approved: true,
            is_active: true,
            ip_address: None,
            user_agent: String::new(),
            timestamps: Timestamps {
                created_at: created,
                updated_at: created,
            },
        }
    }

    fn with_id(mut comment: Comment, id: Uuid) -> Comment {
        comment.id = CommentId::new(id);
        comment
    }

    #[test]
    fn test_tree_nests_replies_under_parents() {
        let root_id = Uuid::new_v4();
        let reply_id = Uuid::new_v4();
        let root = with_id(visible("root", None, 0), root_id);
        let reply = with_id(visible("reply", Some(&root_id.to_string()), 1), reply_id);
        let nested = visible("nested", Some(&reply_id.to_string()), 2);

        let tree = build_tree(vec![root, reply, nested]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].replies.len(), 1);
        assert_eq!(tree[0].replies[0].replies.len(), 1);
        assert_eq!(tree[0].replies[0].replies[0].content, "nested");
    }

    #[test]
    fn test_orphaned_subtree_is_dropped() {
        // Родитель не одобрен и в срез не попал: его одобренный ответ
        // не должен всплыть ни корнем, ни веткой
        let missing_parent = Uuid::new_v4().to_string();
        let orphan = visible("orphan", Some(&missing_parent), 0);
        let root = visible("root", None, 1);

        let tree = build_tree(vec![orphan, root]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].content, "root");
        assert!(tree[0].replies.is_empty());
    }

    #[test]
    fn test_roots_are_newest_first_replies_chronological() {
        let old_root_id = Uuid::new_v4();
        let old_root = with_id(visible("old-root", None, 0), old_root_id);
        let new_root = visible("new-root", None, 10);
        let parent = old_root_id.to_string();
        let first_reply = visible("first-reply", Some(&parent), 1);
        let second_reply = visible("second-reply", Some(&parent), 2);

        let tree = build_tree(vec![old_root, new_root, first_reply, second_reply]);
        assert_eq!(tree[0].content, "new-root");
        assert_eq!(tree[1].content, "old-root");
        assert_eq!(tree[1].replies[0].content, "first-reply");
        assert_eq!(tree[1].replies[1].content, "second-reply");
    }
}
