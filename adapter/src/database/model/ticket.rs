use kernel::model::{
    id::{EnrollmentId, TicketId, UserId},
    ticket::{EnrollmentWithTicket, Ticket, TicketStatus},
};
use shared::error::AppError;

// Enrollment LEFT JOINed with its ticket; the ticket columns are all NULL
// when no ticket has been issued yet
#[derive(sqlx::FromRow)]
pub struct EnrollmentTicketRow {
    pub enrollment_id: EnrollmentId,
    pub user_id: UserId,
    pub ticket_id: Option<TicketId>,
    pub status: Option<TicketStatus>,
    pub is_remote: Option<bool>,
    pub includes_hotel: Option<bool>,
}

impl TryFrom<EnrollmentTicketRow> for EnrollmentWithTicket {
    type Error = AppError;

    fn try_from(value: EnrollmentTicketRow) -> Result<Self, Self::Error> {
        let EnrollmentTicketRow {
            enrollment_id,
            user_id,
            ticket_id,
            status,
            is_remote,
            includes_hotel,
        } = value;
        let ticket = match ticket_id {
            None => None,
            Some(ticket_id) => {
                let (Some(status), Some(is_remote), Some(includes_hotel)) =
                    (status, is_remote, includes_hotel)
                else {
                    return Err(AppError::ConversionEntityError(format!(
                        "ticket {ticket_id} is missing mandatory columns"
                    )));
                };
                Some(Ticket {
                    ticket_id,
                    status,
                    is_remote,
                    includes_hotel,
                })
            }
        };
        Ok(EnrollmentWithTicket {
            enrollment_id,
            user_id,
            ticket,
        })
    }
}
