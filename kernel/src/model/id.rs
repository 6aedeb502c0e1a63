use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($id_name:ident, $comment:literal) => {
        #[doc = $comment]
        #[derive(
            Default,
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Serialize,
            Deserialize,
            sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $id_name(uuid::Uuid);

        impl $id_name {
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            pub fn raw(self) -> uuid::Uuid {
                self.0
            }
        }

        impl From<uuid::Uuid> for $id_name {
            fn from(value: uuid::Uuid) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $id_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $id_name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(UserId, "Identifier of a platform attendee.");
define_id!(EnrollmentId, "Identifier of an event enrollment.");
define_id!(TicketId, "Identifier of an event ticket.");
define_id!(HotelId, "Identifier of a hotel.");
define_id!(RoomId, "Identifier of a hotel room.");
define_id!(BookingId, "Identifier of a room booking.");
