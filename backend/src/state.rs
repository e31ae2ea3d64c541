use crate::{config::Config, db::connection::DbPool, services::Facade};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
    pub facade: Facade,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config) -> Self {
        Self {
            pool,
            config,
            facade: Facade::new(),
        }
    }
}
