use crate::model::id::{EnrollmentId, TicketId, UserId};
use shared::error::{AppError, AppResult};

/// Payment state of an event ticket. Mirrors the `ticket_status` type on the
/// database side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "ticket_status", rename_all = "UPPERCASE")]
pub enum TicketStatus {
    Reserved,
    Paid,
}

#[derive(Debug)]
pub struct Ticket {
    pub ticket_id: TicketId,
    pub status: TicketStatus,
    pub is_remote: bool,
    pub includes_hotel: bool,
}

impl Ticket {
    /// Decides whether this ticket admits its holder to the hotel-booking
    /// module. Rules are evaluated in order and the first violation wins:
    /// the ticket must be paid, must not be remote, and must include hotel
    /// accommodation. All three denials carry the same kind, which the
    /// boundary maps to 402.
    pub fn check_hotel_access(&self) -> AppResult<()> {
        if self.status != TicketStatus::Paid {
            return Err(AppError::IneligibleTicket("ticket is not paid".into()));
        }
        if self.is_remote {
            return Err(AppError::IneligibleTicket("ticket is remote".into()));
        }
        if !self.includes_hotel {
            return Err(AppError::IneligibleTicket(
                "ticket does not include hotel accommodation".into(),
            ));
        }
        Ok(())
    }
}

/// An attendee's enrollment together with its ticket, if one has been issued.
#[derive(Debug)]
pub struct EnrollmentWithTicket {
    pub enrollment_id: EnrollmentId,
    pub user_id: UserId,
    pub ticket: Option<Ticket>,
}

impl EnrollmentWithTicket {
    /// Unwraps the ticket, treating an unissued ticket the same as a missing
    /// enrollment.
    pub fn into_ticket(self) -> AppResult<Ticket> {
        self.ticket
            .ok_or_else(|| AppError::EntityNotFound("no ticket found for enrollment".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(status: TicketStatus, is_remote: bool, includes_hotel: bool) -> Ticket {
        Ticket {
            ticket_id: TicketId::new(),
            status,
            is_remote,
            includes_hotel,
        }
    }

    #[test]
    fn unpaid_ticket_is_denied_regardless_of_other_fields() {
        for is_remote in [false, true] {
            for includes_hotel in [false, true] {
                let res = ticket(TicketStatus::Reserved, is_remote, includes_hotel)
                    .check_hotel_access();
                assert!(matches!(res, Err(AppError::IneligibleTicket(_))));
            }
        }
    }

    #[test]
    fn remote_ticket_is_denied_even_when_paid() {
        let res = ticket(TicketStatus::Paid, true, true).check_hotel_access();
        assert!(matches!(res, Err(AppError::IneligibleTicket(_))));
    }

    #[test]
    fn ticket_without_hotel_is_denied() {
        let res = ticket(TicketStatus::Paid, false, false).check_hotel_access();
        assert!(matches!(res, Err(AppError::IneligibleTicket(_))));
    }

    #[test]
    fn paid_onsite_hotel_ticket_is_admitted() {
        assert!(ticket(TicketStatus::Paid, false, true)
            .check_hotel_access()
            .is_ok());
    }

    #[test]
    fn payment_rule_is_checked_first() {
        // A reserved, remote, hotel-less ticket fails on the payment rule,
        // so the message names the payment problem.
        let res = ticket(TicketStatus::Reserved, true, false).check_hotel_access();
        match res {
            Err(AppError::IneligibleTicket(message)) => {
                assert_eq!(message, "ticket is not paid");
            }
            other => panic!("unexpected verdict: {other:?}"),
        }
    }

    #[test]
    fn enrollment_without_ticket_is_not_found() {
        let enrollment = EnrollmentWithTicket {
            enrollment_id: EnrollmentId::new(),
            user_id: UserId::new(),
            ticket: None,
        };
        assert!(matches!(
            enrollment.into_ticket(),
            Err(AppError::EntityNotFound(_))
        ));
    }
}
