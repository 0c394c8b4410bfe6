//! session.rs
//!
//! Сессия выбора мест: множество мест, которые пользователь отметил, но ещё
//! не выкупил. Одна сессия на экран выбора, создаётся при входе и умирает
//! при коммите или уходе с экрана. Никакого глобального состояния.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::availability::{merge, BookedSeats, SeatAvailability};
use crate::layout::RoomLayout;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Ошибка программиста: id вне текущей раскладки.
    #[error("seat {0} does not exist in the current room layout")]
    UnknownSeat(i64),
}

/// Результат toggle: занятое место не выбирается никогда, даже если UI
/// не заблокировал контрол (защита на уровне машины состояний).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    RejectedBooked,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSnapshot {
    /// Id выбранных мест в каноническом порядке раскладки.
    pub seat_ids: Vec<i64>,
    /// Метки вида "E4,E5", тоже в каноническом порядке.
    pub labels: String,
    pub count: usize,
}

pub struct BookingSession {
    layout: RoomLayout,
    availability: SeatAvailability,
    selected: HashSet<i64>,
    showtime_id: Option<i64>,
}

impl BookingSession {
    /// Новая сессия. Пока занятые места не пришли, доступность считается
    /// неразрешённой: все места видны как свободные, но с флагом деградации.
    pub fn new(layout: RoomLayout, showtime_id: Option<i64>) -> Self {
        let availability = merge(&layout, &BookedSeats::unresolved());
        BookingSession {
            layout,
            availability,
            selected: HashSet::new(),
            showtime_id,
        }
    }

    pub fn layout(&self) -> &RoomLayout {
        &self.layout
    }

    pub fn availability(&self) -> &SeatAvailability {
        &self.availability
    }

    pub fn showtime_id(&self) -> Option<i64> {
        self.showtime_id
    }

    pub fn set_showtime_id(&mut self, showtime_id: i64) {
        self.showtime_id = Some(showtime_id);
    }

    /// Обновляет занятые места: статусы пересчитываются без повторной
    /// нормализации, а выбранные места, ставшие занятыми, снимаются
    /// принудительно. Возвращает снятые id (в каноническом порядке), чтобы
    /// UI показал пользователю "место из вашего выбора уже занято".
    /// Последующие toggle видят уже обновлённые статусы.
    pub fn refresh_booked(&mut self, booked: &BookedSeats) -> Vec<i64> {
        self.availability = merge(&self.layout, booked);

        let mut evicted: Vec<i64> = self
            .selected
            .iter()
            .copied()
            .filter(|id| self.availability.is_booked(*id))
            .collect();
        for id in &evicted {
            self.selected.remove(id);
        }
        evicted.sort_by_key(|id| self.layout.position_of(*id));

        if !evicted.is_empty() {
            warn!(?evicted, "selected seats became booked and were deselected");
        }
        evicted
    }

    /// Переключает место: выбранное снимается, свободное выбирается,
    /// занятое — no-op с явным результатом.
    pub fn toggle(&mut self, seat_id: i64) -> Result<ToggleOutcome, SessionError> {
        if !self.layout.contains(seat_id) {
            return Err(SessionError::UnknownSeat(seat_id));
        }

        if self.selected.remove(&seat_id) {
            return Ok(ToggleOutcome::Deselected);
        }

        if self.availability.is_booked(seat_id) {
            info!(seat_id, "toggle rejected: seat is already booked");
            return Ok(ToggleOutcome::RejectedBooked);
        }

        self.selected.insert(seat_id);
        Ok(ToggleOutcome::Selected)
    }

    /// Сбрасывает выбор: после успешного коммита или при отмене.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, seat_id: i64) -> bool {
        self.selected.contains(&seat_id)
    }

    /// Выбранные места в каноническом порядке раскладки, а не в порядке тапов:
    /// так отображаемая строка стабильна независимо от того, как тыкал пользователь.
    pub fn selected_in_layout_order(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.selected.iter().copied().collect();
        ids.sort_by_key(|id| self.layout.position_of(*id));
        ids
    }

    pub fn selected_labels(&self) -> String {
        self.selected_in_layout_order()
            .iter()
            .filter_map(|id| self.layout.seat(*id))
            .map(|seat| seat.label())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// unit_price * количество выбранных; неизвестная цена -> 0, не угадываем.
    pub fn total_price(&self, unit_price: Option<f64>) -> f64 {
        unit_price.unwrap_or(0.0) * self.selected.len() as f64
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        let seat_ids = self.selected_in_layout_order();
        SelectionSnapshot {
            labels: self.selected_labels(),
            count: seat_ids.len(),
            seat_ids,
        }
    }
}
