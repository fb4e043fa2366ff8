//! Notification and email payloads built from forum events.
//!
//! Payload text uses the forum's translation key syntax (`[[ns:key, args]]`);
//! rendering is the notification and email services' job.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PostId, TopicId, UserId};

use super::events::{NotificationEvent, ReplyEvent, TopicEvent};

/// Email template used for new topics.
pub const TOPIC_EMAIL_TEMPLATE: &str = "categoryNotifications_topic";

/// Email template used for replies.
pub const REPLY_EMAIL_TEMPLATE: &str = "categoryNotifications_post";

/// Request to create an in-app notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub body_short: String,
    pub body_long: String,
    /// Deduplication key; identical for repeated deliveries of one post.
    pub nid: String,
    /// Deep link to the post.
    pub path: String,
    pub pid: PostId,
    pub tid: TopicId,
    /// The acting user.
    pub from: UserId,
}

impl NotificationPayload {
    /// Builds the payload for any post event.
    pub fn from_event(event: &NotificationEvent) -> Self {
        match event {
            NotificationEvent::Topic(topic) => Self::for_topic(topic),
            NotificationEvent::Reply(reply) => Self::for_reply(reply),
        }
    }

    fn for_topic(topic: &TopicEvent) -> Self {
        Self {
            body_short: format!(
                "[[notifications:user_posted_topic, {}, {}]]",
                topic.author.username, topic.topic_title
            ),
            body_long: topic.main_post_content.clone(),
            nid: topic_nid(topic.topic_id, topic.author.uid),
            path: post_path(topic.main_post_id),
            pid: topic.main_post_id,
            tid: topic.topic_id,
            from: topic.author.uid,
        }
    }

    fn for_reply(reply: &ReplyEvent) -> Self {
        Self {
            body_short: format!(
                "[[notifications:user_posted_to, {}, {}]]",
                reply.author.username, reply.topic_title
            ),
            body_long: reply.post_content.clone(),
            nid: reply_nid(reply.topic_id, reply.post_id, reply.author.uid),
            path: post_path(reply.post_id),
            pid: reply.post_id,
            tid: reply.topic_id,
            from: reply.author.uid,
        }
    }
}

fn topic_nid(tid: TopicId, uid: UserId) -> String {
    format!("tid:{}:uid:{}", tid, uid)
}

fn reply_nid(tid: TopicId, pid: PostId, uid: UserId) -> String {
    format!("tid:{}:pid:{}:uid:{}", tid, pid, uid)
}

fn post_path(pid: PostId) -> String {
    format!("/post/{}", pid)
}

/// A notification materialized by the notification service, ready to push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub nid: String,
    pub payload: NotificationPayload,
}

/// Site-level values every email carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteInfo {
    pub title: String,
    /// Base URL used to build links in the template.
    pub url: String,
}

/// Category block of the topic email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCategory {
    pub name: String,
    pub slug: String,
}

/// Author block of an email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailUser {
    pub slug: String,
    pub name: String,
    pub picture: Option<String>,
}

/// Template parameters shared by every recipient of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailParams {
    pub subject: String,
    pub site_title: String,
    pub url: String,
    pub title: String,
    #[serde(rename = "topicSlug")]
    pub topic_slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EmailCategory>,
    pub content: String,
    pub user: EmailUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<PostId>,
}

/// One email, addressed later to each recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailPayload {
    pub template: &'static str,
    pub params: EmailParams,
}

impl EmailPayload {
    /// Builds the shared payload for any post event.
    pub fn from_event(event: &NotificationEvent, site: &SiteInfo) -> Self {
        let author = event.author();
        let user = EmailUser {
            slug: author.userslug.clone(),
            name: author.username.clone(),
            picture: author.picture.clone(),
        };

        match event {
            NotificationEvent::Topic(topic) => Self {
                template: TOPIC_EMAIL_TEMPLATE,
                params: EmailParams {
                    subject: format!(
                        "[[categorynotifications:new-topic-in, {}]]",
                        topic.category_name
                    ),
                    site_title: site.title.clone(),
                    url: site.url.clone(),
                    title: topic.topic_title.clone(),
                    topic_slug: topic.topic_slug.clone(),
                    category: Some(EmailCategory {
                        name: topic.category_name.clone(),
                        slug: topic.category_slug.clone(),
                    }),
                    content: topic.main_post_content.clone(),
                    user,
                    pid: None,
                },
            },
            NotificationEvent::Reply(reply) => Self {
                template: REPLY_EMAIL_TEMPLATE,
                params: EmailParams {
                    subject: format!(
                        "[[categorynotifications:new-reply-in, {}]]",
                        reply.topic_title
                    ),
                    site_title: site.title.clone(),
                    url: site.url.clone(),
                    title: reply.topic_title.clone(),
                    topic_slug: reply.topic_slug.clone(),
                    category: None,
                    content: reply.post_content.clone(),
                    user,
                    pid: Some(reply.post_id),
                },
            },
        }
    }
}

/// Notice sent to the external ticketing endpoint for a new topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketNotice {
    pub username: String,
    #[serde(rename = "ticketName")]
    pub ticket_name: String,
    #[serde(rename = "categoryName")]
    pub category_name: String,
}

impl TicketNotice {
    pub fn for_topic(topic: &TopicEvent) -> Self {
        Self {
            username: topic.author.username.clone(),
            ticket_name: topic.topic_title.clone(),
            category_name: topic.category_name.clone(),
        }
    }
}
