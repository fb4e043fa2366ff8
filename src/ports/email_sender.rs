//! EmailSender port - Interface for the forum's templated mailer.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::notifications::EmailParams;

/// Port for sending one templated email to one user.
///
/// The mailer resolves the user's address and language; this crate only
/// names the template and supplies parameters.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(
        &self,
        template: &str,
        recipient: UserId,
        params: &EmailParams,
    ) -> Result<(), DomainError>;
}
