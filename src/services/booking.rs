//! booking.rs
//!
//! Оркестрация одной сессии покупки: загрузка раскладки и занятых мест,
//! создание сессии выбора, обновление доступности и коммит билетов.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::api_client::{ApiClient, ApiError};
use crate::availability::{resolve_booked_seats, BookedSeats};
use crate::layout::{normalize, RoomLayout};
use crate::models::{ShowtimeQuery, Ticket};
use crate::session::BookingSession;

#[derive(Debug, Error)]
pub enum BookingError {
    /// Локальный отказ: нечего коммитить, сетевой вызов не делается.
    #[error("selection is empty, nothing to commit")]
    EmptySelection,
    /// Локальный отказ: сеанс неизвестен, коммитить некуда.
    #[error("showtime id is unknown, cannot commit")]
    MissingShowtime,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Clone)]
pub struct BookingService {
    api: Arc<ApiClient>,
}

impl BookingService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        BookingService { api }
    }

    /// Загружает раскладку и занятые места параллельно; порядок завершения
    /// не важен. Падение поиска сеансов не блокирует раскладку: набор броней
    /// деградирует до неразрешённого пустого (fail open).
    pub async fn load_seating(
        &self,
        room_id: i64,
        query: &ShowtimeQuery,
    ) -> Result<(RoomLayout, BookedSeats), BookingError> {
        let (room, showtimes) = futures::future::join(
            self.api.get_room_with_seats(room_id),
            self.api.search_showtimes(query),
        )
        .await;

        let layout = normalize(&room?);
        if layout.is_empty() {
            info!(room_id, "room has no seats, rendering informational empty layout");
        }

        let booked = match showtimes {
            Ok(list) => resolve_booked_seats(None, &list, query),
            Err(e) => {
                warn!(error = %e, "showtime search failed, availability degraded");
                BookedSeats::unresolved()
            }
        };

        Ok((layout, booked))
    }

    /// Новая сессия выбора. Занятые места могут прийти позже — тогда сессия
    /// стартует в деградированном состоянии и обновится через refresh.
    pub fn start_session(
        &self,
        layout: RoomLayout,
        booked: Option<&BookedSeats>,
        showtime_id: Option<i64>,
    ) -> BookingSession {
        let mut session = BookingSession::new(layout, showtime_id);
        if let Some(booked) = booked {
            session.refresh_booked(booked);
        }
        session
    }

    /// Перечитывает занятые места по прямому endpoint'у и вливает их в сессию.
    /// Возвращает id принудительно снятых мест.
    pub async fn refresh_availability(
        &self,
        session: &mut BookingSession,
    ) -> Result<Vec<i64>, BookingError> {
        let showtime_id = session.showtime_id().ok_or(BookingError::MissingShowtime)?;
        let ids = self.api.get_booked_seat_ids(showtime_id).await?;
        Ok(session.refresh_booked(&BookedSeats::explicit(ids)))
    }

    /// Коммит выбора. Пустой выбор и неизвестный сеанс отклоняются локально.
    /// При сетевой ошибке выбор сохраняется, чтобы пользователь мог повторить
    /// без повторного выбора мест; очищается только при успехе.
    pub async fn commit(
        &self,
        session: &mut BookingSession,
    ) -> Result<Vec<Ticket>, BookingError> {
        if session.is_empty() {
            return Err(BookingError::EmptySelection);
        }
        let showtime_id = session.showtime_id().ok_or(BookingError::MissingShowtime)?;

        let seats = session.selected_in_layout_order();
        let tickets = self.api.create_tickets(showtime_id, &seats).await?;

        session.clear();
        info!(showtime_id, count = tickets.len(), "tickets created, selection cleared");
        Ok(tickets)
    }
}
