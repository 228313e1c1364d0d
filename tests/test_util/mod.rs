use dotenv::dotenv;
use lazy_static::lazy_static;
use rand::{Rng, thread_rng};
use sqlx::{Connection, PgConnection, PgPool};
use std::env;
use std::future::Future;
use todo_items_api::db;
use tokio::runtime::Runtime;

/// URL for accessing the PostgreSQL server during integration tests (should not contain a database name in the path)
const TEST_DB_URL: &str = "TEST_DB_URL";

lazy_static! {
    static ref TOKIO_RT: Runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Tokio runtime failed to initialize");
}

/// A throwaway database which is dropped along with this struct
struct TestDatabase {
    base_url: String,
    db_name: String,
}

impl TestDatabase {
    async fn create(base_url: &str) -> Result<Self, sqlx::Error> {
        let db_id: u32 = thread_rng().gen_range(10_000..99_999);
        let db_name = format!("test_db_{}", db_id);
        let mut conn = PgConnection::connect(base_url).await?;

        sqlx::query(format!("CREATE DATABASE {}", db_name).as_str())
            .execute(&mut conn)
            .await?;
        conn.close().await?;

        Ok(Self {
            base_url: String::from(base_url),
            db_name,
        })
    }

    fn url(&self) -> String {
        format!("{}/{}", self.base_url, self.db_name)
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        let db_to_drop = self.db_name.clone();
        let conn_str = self.base_url.clone();

        TOKIO_RT.block_on(async move {
            let mut conn = match PgConnection::connect(conn_str.as_str()).await {
                Ok(cxn) => cxn,
                Err(conn_err) => {
                    println!(
                        "Failed to reconnect to database to drop test database {}, please remove it manually. Error: {}",
                        db_to_drop, conn_err
                    );
                    return;
                }
            };

            let drop_result = sqlx::query(format!("DROP DATABASE {}", db_to_drop).as_str())
                .execute(&mut conn)
                .await;
            if let Err(db_err) = drop_result {
                println!(
                    "Failed to drop test database {}, please remove it manually. Error: {}",
                    db_to_drop, db_err
                );
            }
        });
    }
}

/// Creates a temp database with all migrations applied, then runs [test_fn] against a pool
/// connected to it. The database is dropped afterward.
///
/// Expects that the TEST_DB_URL environment variable is populated
pub fn prepare_db_and_test<F, R>(test_fn: F)
where
    F: FnOnce(PgPool) -> R,
    R: Future<Output = ()>,
{
    if dotenv().is_err() {
        println!("Test is running without .env file.");
    }

    let pg_connection_base_url = env::var(TEST_DB_URL).unwrap_or_else(|_| {
        panic!("You must provide the {TEST_DB_URL} environment variable as the base postgres connection string")
    });
    let test_db = TOKIO_RT
        .block_on(TestDatabase::create(&pg_connection_base_url))
        .unwrap_or_else(|db_err| panic!("Failed to start test database: {}", db_err));

    TOKIO_RT.block_on(async {
        let pool = db::connect_sqlx(&test_db.url())
            .await
            .expect("Could not connect to the test database");
        db::run_migrations(&pool)
            .await
            .expect("Could not migrate the test database");

        test_fn(pool.clone()).await;
        pool.close().await;
    });
}
