//! api_client.rs
//!
//! Клиент REST API кинотеатра. Ядро потребляет два фида и одну операцию
//! коммита; формат на проводе — обычный JSON-over-HTTP:
//! 1.  **getRoomWithSeats** — схема зала (комната -> блоки -> места).
//! 2.  **Поиск сеансов / занятые места** — источник набора броней для сеанса.
//! 3.  **createTickets** — фиксация покупки выбранных мест.
//!
//! Все ответы прогоняются через валидацию на границе: кривой payload
//! отбрасывается здесь и не доходит до нормализатора.

use reqwest::StatusCode;
use thiserror::Error;
use tokio::time::Duration;
use tracing::{error, info};
use validator::Validate;

use crate::config::ApiConfig;
use crate::models::{CreateTicketsRequest, RoomWithSeats, Showtime, ShowtimeQuery, Ticket};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status} from {endpoint}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
    #[error("payload failed validation: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

#[derive(Clone)]
pub struct ApiClient {
    /// Базовый URL API без завершающего слэша.
    base_url: String,
    /// Асинхронный HTTP-клиент с таймаутом на запрос.
    http_client: reqwest::Client,
}

impl ApiClient {
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(ApiClient {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .build()?,
        })
    }

    /// Схема зала с блоками и местами.
    pub async fn get_room_with_seats(&self, room_id: i64) -> Result<RoomWithSeats, ApiError> {
        info!(room_id, "fetching room with seats");

        let response = self
            .http_client
            .get(format!("{}/rooms/{}", self.base_url, room_id))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                endpoint: "rooms",
                status: response.status(),
            });
        }

        let room: RoomWithSeats = response.json().await?;
        room.validate()?;
        Ok(room)
    }

    /// Прямой endpoint занятых мест для известного сеанса.
    pub async fn get_booked_seat_ids(&self, showtime_id: i64) -> Result<Vec<i64>, ApiError> {
        info!(showtime_id, "fetching booked seat ids");

        let response = self
            .http_client
            .get(format!(
                "{}/showtimes/{}/booked-seats",
                self.base_url, showtime_id
            ))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                endpoint: "booked-seats",
                status: response.status(),
            });
        }

        Ok(response.json().await?)
    }

    /// Поиск сеансов по фильму/кинотеатру/дате — непрямой источник броней.
    pub async fn search_showtimes(
        &self,
        query: &ShowtimeQuery,
    ) -> Result<Vec<Showtime>, ApiError> {
        info!(
            movie_id = query.movie_id,
            cinema_id = query.cinema_id,
            date = %query.date,
            "searching showtimes"
        );

        let response = self
            .http_client
            .get(format!("{}/showtimes", self.base_url))
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                endpoint: "showtimes",
                status: response.status(),
            });
        }

        Ok(response.json().await?)
    }

    /// Коммит покупки. Пустой список мест отбрасывается локально, без сети.
    pub async fn create_tickets(
        &self,
        showtime_id: i64,
        seats: &[i64],
    ) -> Result<Vec<Ticket>, ApiError> {
        let request = CreateTicketsRequest {
            showtime_id,
            seats: seats.to_vec(),
        };
        request.validate()?;

        info!(showtime_id, count = seats.len(), "creating tickets");

        let response = self
            .http_client
            .post(format!("{}/tickets", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            error!(status = %response.status(), "ticket creation rejected by server");
            return Err(ApiError::Status {
                endpoint: "tickets",
                status: response.status(),
            });
        }

        Ok(response.json().await?)
    }
}
