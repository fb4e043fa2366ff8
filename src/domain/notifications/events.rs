//! Forum events that trigger category notifications.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, PostId, TopicId, UserId};

/// Event type for a topic created in a category.
pub const TOPIC_POSTED: &str = "topic.posted.v1";

/// Event type for a reply posted to a topic.
pub const POST_REPLIED: &str = "post.replied.v1";

/// Event type for a deleted user account.
pub const USER_DELETED: &str = "user.deleted.v1";

/// The user who wrote the topic or reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub uid: UserId,
    /// Display name.
    pub username: String,
    pub userslug: String,
    /// Avatar URL, if the user has one.
    #[serde(default)]
    pub picture: Option<String>,
}

/// A new topic in a category, with its main post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEvent {
    pub category_id: CategoryId,
    pub category_name: String,
    pub category_slug: String,
    pub topic_id: TopicId,
    pub topic_title: String,
    pub topic_slug: String,
    pub main_post_id: PostId,
    pub main_post_content: String,
    pub author: PostAuthor,
}

/// A reply to an existing topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyEvent {
    pub category_id: CategoryId,
    pub topic_id: TopicId,
    pub topic_title: String,
    pub topic_slug: String,
    pub post_id: PostId,
    pub post_content: String,
    pub author: PostAuthor,
}

/// Payload of a `user.deleted` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDeleted {
    pub uid: UserId,
}

/// Either kind of post event, as seen by the dispatchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Topic(TopicEvent),
    Reply(ReplyEvent),
}

impl NotificationEvent {
    /// Category the post belongs to.
    pub fn category_id(&self) -> CategoryId {
        match self {
            NotificationEvent::Topic(t) => t.category_id,
            NotificationEvent::Reply(r) => r.category_id,
        }
    }

    pub fn author(&self) -> &PostAuthor {
        match self {
            NotificationEvent::Topic(t) => &t.author,
            NotificationEvent::Reply(r) => &r.author,
        }
    }

    pub fn topic_id(&self) -> TopicId {
        match self {
            NotificationEvent::Topic(t) => t.topic_id,
            NotificationEvent::Reply(r) => r.topic_id,
        }
    }

    /// The post being announced: the main post for topics.
    pub fn post_id(&self) -> PostId {
        match self {
            NotificationEvent::Topic(t) => t.main_post_id,
            NotificationEvent::Reply(r) => r.post_id,
        }
    }

    pub fn topic_title(&self) -> &str {
        match self {
            NotificationEvent::Topic(t) => &t.topic_title,
            NotificationEvent::Reply(r) => &r.topic_title,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            NotificationEvent::Topic(t) => &t.main_post_content,
            NotificationEvent::Reply(r) => &r.post_content,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationEvent::Topic(_) => "topic",
            NotificationEvent::Reply(_) => "reply",
        }
    }
}

impl From<TopicEvent> for NotificationEvent {
    fn from(event: TopicEvent) -> Self {
        NotificationEvent::Topic(event)
    }
}

impl From<ReplyEvent> for NotificationEvent {
    fn from(event: ReplyEvent) -> Self {
        NotificationEvent::Reply(event)
    }
}
