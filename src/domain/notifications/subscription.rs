//! Store key conventions for category subscriptions.

use crate::domain::foundation::CategoryId;

/// Ordered set of every category id on the forum.
pub const CATEGORIES_KEY: &str = "categories:cid";

/// Key of the subscriber set for one category.
///
/// Members are user ids, scored by subscription time in milliseconds.
pub fn subscribers_key(category_id: CategoryId) -> String {
    format!("cid:{}:subscribed:uids", category_id)
}
