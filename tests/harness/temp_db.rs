use std::sync::Arc;

use orderhub::adapter::outbound::sqlite::database::connection::{
    create_pool, run_migrations, DbPool,
};
use orderhub::adapter::outbound::sqlite::repository::SqliteOrderRepository;
use tempfile::TempDir;

/// Migrated SQLite database in a temporary directory, removed on drop.
pub struct TempDb {
    _dir: TempDir,
    url: String,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let url = dir.path().join(format!("{name}.db")).display().to_string();

        let pool = create_pool(&url, 4).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        Self {
            _dir: dir,
            url,
            pool,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// A repository over a fresh pool to the same file, as a restarted process would see it.
    pub fn reopen(&self) -> Arc<SqliteOrderRepository> {
        let pool = create_pool(&self.url, 4).expect("reopen sqlite pool");
        Arc::new(SqliteOrderRepository::new(pool))
    }

    pub fn repository(&self) -> Arc<SqliteOrderRepository> {
        Arc::new(SqliteOrderRepository::new(self.pool.clone()))
    }

    pub fn count(&self, table: &str) -> i64 {
        use diesel::prelude::*;
        use diesel::sql_types::BigInt;

        #[derive(QueryableByName)]
        struct Count {
            #[diesel(sql_type = BigInt)]
            n: i64,
        }

        let mut conn = self.pool.get().expect("get sqlite connection");
        diesel::sql_query(format!("SELECT COUNT(*) AS n FROM {table}"))
            .get_result::<Count>(&mut conn)
            .expect("count rows")
            .n
    }
}
