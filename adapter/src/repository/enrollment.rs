use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::UserId, ticket::EnrollmentWithTicket};
use kernel::repository::enrollment::EnrollmentRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::ticket::EnrollmentTicketRow, ConnectionPool};

#[derive(new)]
pub struct EnrollmentRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EnrollmentRepository for EnrollmentRepositoryImpl {
    async fn find_with_ticket_by_user_id(
        &self,
        user_id: UserId,
    ) -> AppResult<Option<EnrollmentWithTicket>> {
        let row: Option<EnrollmentTicketRow> = sqlx::query_as(
            r#"
                SELECT
                    e.enrollment_id,
                    e.user_id,
                    t.ticket_id,
                    t.status,
                    t.is_remote,
                    t.includes_hotel
                FROM enrollments AS e
                LEFT JOIN tickets AS t ON t.enrollment_id = e.enrollment_id
                WHERE e.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(EnrollmentWithTicket::try_from).transpose()
    }
}
