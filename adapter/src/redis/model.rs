use std::str::FromStr;

use kernel::model::{auth::AccessToken, id::UserId};
use shared::error::AppError;

pub trait RedisKey {
    type Value: TryFrom<String, Error = AppError>;
    fn inner(&self) -> String;
}

// Session entry written by the event platform: "session:{token}" -> user id
pub struct AuthorizationKey(String);

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedUserId;

    fn inner(&self) -> String {
        format!("session:{}", self.0)
    }
}

impl From<&AccessToken> for AuthorizationKey {
    fn from(value: &AccessToken) -> Self {
        Self(value.0.clone())
    }
}

pub struct AuthorizedUserId(UserId);

impl AuthorizedUserId {
    pub fn into_inner(self) -> UserId {
        self.0
    }
}

impl TryFrom<String> for AuthorizedUserId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UserId::from_str(&value).map(Self).map_err(|e| {
            AppError::ConversionEntityError(format!("failed to parse session value: {e}"))
        })
    }
}
