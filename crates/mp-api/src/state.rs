use std::sync::Arc;

use mp_core::PoolSubmitter;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub submitter: Arc<dyn PoolSubmitter>,
    pub config: AppConfig,
}
