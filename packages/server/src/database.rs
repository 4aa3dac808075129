use std::sync::Arc;
use std::time::Duration;

use sea_orm::sea_query::Index;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info};

use crate::config::{AppConfig, DatabaseConfig};
use crate::entity::participant;
use crate::seed;

/// Connect to the database and create any missing tables.
pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.clone());

    // Set connection pool options
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(config.log_queries);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("mergington_server::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync only knows single-column constraints, so the
/// composite unique index on `participant` is created manually.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // One signup per student per workshop:
    // SELECT ... FROM participant WHERE workshop_id = ? AND email = ?
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_participant_workshop_email")
        .table(participant::Entity)
        .col(participant::Column::WorkshopId)
        .col(participant::Column::Email)
        .to_owned();

    let backend = db.get_database_backend();
    if let Err(e) = db.execute_raw(backend.build(&stmt)).await {
        // Existing duplicate signups make the index impossible to build.
        error!(
            "Failed to create index idx_participant_workshop_email: {}",
            e
        );
        return Err(e);
    }

    info!("Ensured index idx_participant_workshop_email exists");
    Ok(())
}

/// Connect, create the schema and indexes, and seed sample data when
/// `seed.on_startup` is set.
pub async fn prepare(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    let db = init_db(&config.database).await?;
    ensure_indexes(&db).await?;

    if config.seed.on_startup {
        seed::seed_sample_data(&db).await?;
    }

    Ok(db)
}

/// Serialises signup and unregister transactions on SQLite.
///
/// A deferred SQLite transaction that reads before it writes cannot upgrade
/// its lock while another connection is writing and fails with "database is
/// locked". `SELECT ... FOR UPDATE` is not available there, so writers in
/// this process queue on a mutex instead. On PostgreSQL the gate is open and
/// the row lock does the work.
#[derive(Clone, Default)]
pub struct WriteGate {
    lock: Option<Arc<Mutex<()>>>,
}

impl WriteGate {
    pub fn for_backend(backend: DbBackend) -> Self {
        match backend {
            DbBackend::Sqlite => Self {
                lock: Some(Arc::new(Mutex::new(()))),
            },
            _ => Self::default(),
        }
    }

    /// Wait for exclusive write access. Returns `None` when the backend
    /// needs no gate.
    pub async fn acquire(&self) -> Option<MutexGuard<'_, ()>> {
        match &self.lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        }
    }

    pub fn is_serialised(&self) -> bool {
        self.lock.is_some()
    }
}
