use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{auth::AccessToken, id::UserId};

#[async_trait]
pub trait AuthRepository: Send + Sync {
    // Sessions are issued by the surrounding event platform; this side only
    // resolves tokens
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>>;
}
