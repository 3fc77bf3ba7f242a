use log::{error, info};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use diesel::connection::{Connection, SimpleConnection};
use diesel::r2d2::{self, ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::errors::IntoCore;
use pitchdesk_core::errors::{DatabaseError, Error, Result};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

const CONNECTION_PRAGMAS: &str = "
    PRAGMA foreign_keys = ON;
    PRAGMA busy_timeout = 30000;
    PRAGMA synchronous = NORMAL;
";

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub mod write_actor;
pub use write_actor::{spawn_writer, WriteHandle};

/// Prepares the database file: creates its directory and switches it to WAL mode.
pub fn init(db_path: &str) -> Result<String> {
    if let Some(db_dir) = Path::new(db_path).parent() {
        if !db_dir.as_os_str().is_empty() && !db_dir.exists() {
            fs::create_dir_all(db_dir).map_err(|e| {
                Error::Database(DatabaseError::ConnectionFailed(format!(
                    "cannot create {}: {}",
                    db_dir.display(),
                    e
                )))
            })?;
        }
    }

    let mut conn = SqliteConnection::establish(db_path).into_core()?;
    conn.batch_execute("PRAGMA journal_mode = WAL;")
        .into_core()?;
    conn.batch_execute(CONNECTION_PRAGMAS).into_core()?;

    Ok(db_path.to_string())
}

pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = r2d2::Pool::builder()
        .max_size(8)
        .min_idle(Some(1))
        .connection_timeout(Duration::from_secs(30))
        .connection_customizer(Box::new(ConnectionCustomizer))
        .build(manager)
        .map_err(|e| Error::Database(DatabaseError::PoolCreationFailed(e.to_string())))?;
    Ok(Arc::new(pool))
}

pub fn run_migrations(pool: &DbPool) -> Result<()> {
    info!("Running database migrations");
    let mut connection = get_connection(pool)?;

    let applied = connection.run_pending_migrations(MIGRATIONS).map_err(|e| {
        error!("Database migration failed: {}", e);
        Error::Database(DatabaseError::MigrationFailed(e.to_string()))
    })?;

    if applied.is_empty() {
        info!("No pending migrations to apply.");
    } else {
        for version in &applied {
            info!("Applied migration {}", version);
        }
    }

    Ok(())
}

/// Gets a connection from the pool
pub fn get_connection(pool: &Pool<ConnectionManager<SqliteConnection>>) -> Result<DbConnection> {
    pool.get().into_core()
}

#[derive(Debug)]
struct ConnectionCustomizer;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), r2d2::Error> {
        conn.batch_execute(CONNECTION_PRAGMAS)
            .map_err(r2d2::Error::QueryError)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use pitchdesk_core::clients::{Client, ClientRepositoryTrait, NewClient};
    use pitchdesk_core::users::{NewUser, UserRepositoryTrait, UserRole};
    use pitchdesk_core::RecordId;
    use tempfile::TempDir;

    use crate::clients::ClientRepository;
    use crate::users::UserRepository;

    /// A migrated database in a temporary directory. Keep the guard alive
    /// for the duration of the test.
    pub struct TestDb {
        pub pool: Arc<DbPool>,
        pub writer: WriteHandle,
        _dir: TempDir,
    }

    pub fn setup() -> TestDb {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db_path = init(path.to_str().unwrap()).unwrap();
        let pool = create_pool(&db_path).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone()).unwrap();
        TestDb {
            pool,
            writer,
            _dir: dir,
        }
    }

    impl TestDb {
        pub async fn user(&self, email: &str) -> RecordId {
            UserRepository::new(self.pool.clone(), self.writer.clone())
                .create(NewUser {
                    email: email.to_string(),
                    password_hash: "hash".to_string(),
                    name: email.to_string(),
                    role: UserRole::Admin,
                    is_main_user: true,
                    created_by: None,
                })
                .await
                .unwrap()
                .id
        }

        pub async fn client(&self, owner: RecordId, name: &str) -> Client {
            ClientRepository::new(self.pool.clone(), self.writer.clone())
                .create(NewClient {
                    name: name.to_string(),
                    business_name: None,
                    phone_number: "+15550100".to_string(),
                    email: format!("{}@client.test", name.to_lowercase()),
                    social_media: Default::default(),
                    location: Default::default(),
                    tags: Vec::new(),
                    created_by: owner,
                })
                .await
                .unwrap()
        }
    }
}
