use std::sync::Arc;

use crate::design::service::DesignService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DesignService>,
    pub api_key: String,
    pub anthropic_key_set: bool,
    pub mock_mode: bool,
}
