pub mod api_client;
pub mod availability;
pub mod config;
pub mod layout;
pub mod models;
pub mod services;
pub mod session;

use std::sync::Arc;

// Shared state клиентского ядра: конфиг и API-клиент.
// Сессии выбора мест сюда намеренно не входят - они создаются на экран
// выбора и передаются явно (см. session::BookingSession).
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub api: Arc<api_client::ApiClient>,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Arc<Self>, api_client::ApiError> {
        let api = Arc::new(api_client::ApiClient::from_config(&config.api)?);
        Ok(Arc::new(Self { config, api }))
    }

    pub fn booking_service(&self) -> services::BookingService {
        services::BookingService::new(self.api.clone())
    }
}
