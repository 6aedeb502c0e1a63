use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{id::UserId, ticket::EnrollmentWithTicket};

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    // The ticket is joined in because every eligibility decision needs it
    async fn find_with_ticket_by_user_id(
        &self,
        user_id: UserId,
    ) -> AppResult<Option<EnrollmentWithTicket>>;
}
