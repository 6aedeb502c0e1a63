use async_trait::async_trait;
use derive_new::new;
use kernel::repository::health::HealthCheckRepository;

use crate::database::ConnectionPool;

#[derive(new)]
pub struct HealthCheckRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl HealthCheckRepository for HealthCheckRepositoryImpl {
    async fn check_db(&self) -> bool {
        sqlx::query("SELECT 1")
            .fetch_one(self.db.inner_ref())
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../migrations")]
    async fn test_check_db_is_ok_with_reachable_database(pool: sqlx::PgPool) {
        let repo = HealthCheckRepositoryImpl::new(ConnectionPool::new(pool));
        assert!(repo.check_db().await);
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_check_db_fails_once_pool_is_closed(pool: sqlx::PgPool) {
        let repo = HealthCheckRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        pool.close().await;
        assert!(!repo.check_db().await);
    }
}
