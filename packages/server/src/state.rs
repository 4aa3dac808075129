use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::config::AppConfig;
use crate::database::WriteGate;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub write_gate: WriteGate,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        let write_gate = WriteGate::for_backend(db.get_database_backend());
        Self {
            db,
            config,
            write_gate,
        }
    }
}
