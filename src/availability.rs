//! availability.rs
//!
//! Слияние раскладки с набором занятых мест. Раскладка после нормализации
//! не трогается: при обновлении данных по сеансу пересчитываются только статусы.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::layout::RoomLayout;
use crate::models::{Showtime, ShowtimeQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Booked,
}

/// Откуда получен набор занятых мест. Unresolved означает "не смогли выяснить":
/// набор пуст, но это деградация, а не ноль броней.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookedSource {
    Explicit,
    Showtime,
    Unresolved,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookedSeats {
    ids: HashSet<i64>,
    source: BookedSource,
}

impl BookedSeats {
    /// Явный список от вызывающей стороны, используется как есть.
    pub fn explicit(ids: impl IntoIterator<Item = i64>) -> Self {
        BookedSeats {
            ids: ids.into_iter().collect(),
            source: BookedSource::Explicit,
        }
    }

    /// Пустой набор с пометкой деградации (fail open: UI не блокируем).
    pub fn unresolved() -> Self {
        BookedSeats {
            ids: HashSet::new(),
            source: BookedSource::Unresolved,
        }
    }

    pub fn contains(&self, seat_id: i64) -> bool {
        self.ids.contains(&seat_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn source(&self) -> BookedSource {
        self.source
    }

    pub fn is_degraded(&self) -> bool {
        self.source == BookedSource::Unresolved
    }
}

/// Двухшаговая стратегия получения занятых мест: явный список в приоритете,
/// иначе ищем сеанс по фильму/кинотеатру/дате и читаем его список броней.
/// Нет подходящего сеанса -> Unresolved, чтобы вызывающий отличал
/// "броней действительно ноль" от "не удалось определить".
pub fn resolve_booked_seats(
    explicit: Option<&[i64]>,
    showtimes: &[Showtime],
    query: &ShowtimeQuery,
) -> BookedSeats {
    if let Some(ids) = explicit {
        return BookedSeats::explicit(ids.iter().copied());
    }

    match showtimes.iter().find(|s| s.matches(query)) {
        Some(showtime) => {
            debug!(
                showtime_id = showtime.id,
                booked = showtime.booked_seats.len(),
                "booked seats resolved from showtime search"
            );
            BookedSeats {
                ids: showtime.booked_seats.iter().copied().collect(),
                source: BookedSource::Showtime,
            }
        }
        None => {
            warn!(
                movie_id = query.movie_id,
                cinema_id = query.cinema_id,
                date = %query.date,
                "no matching showtime found, availability degraded to empty booked set"
            );
            BookedSeats::unresolved()
        }
    }
}

/// Статусы занятости поверх неизменной раскладки.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatAvailability {
    statuses: HashMap<i64, SeatStatus>,
    degraded: bool,
}

impl SeatAvailability {
    pub fn status(&self, seat_id: i64) -> Option<SeatStatus> {
        self.statuses.get(&seat_id).copied()
    }

    pub fn is_booked(&self, seat_id: i64) -> bool {
        self.status(seat_id) == Some(SeatStatus::Booked)
    }

    /// true, если набор занятых мест не удалось определить: статусы могут
    /// быть неактуальны, и UI стоит предупредить пользователя.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn booked_count(&self) -> usize {
        self.statuses
            .values()
            .filter(|s| **s == SeatStatus::Booked)
            .count()
    }
}

/// Аннотирует каждое место статусом за O(число мест). Id из набора броней,
/// которых нет в раскладке, молча игнорируются.
pub fn merge(layout: &RoomLayout, booked: &BookedSeats) -> SeatAvailability {
    let statuses = layout
        .seats
        .iter()
        .map(|seat| {
            let status = if booked.contains(seat.id) {
                SeatStatus::Booked
            } else {
                SeatStatus::Available
            };
            (seat.id, status)
        })
        .collect();

    SeatAvailability {
        statuses,
        degraded: booked.is_degraded(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::normalize;
    use crate::models::{RoomSeat, RoomWithSeats, Showtime};
    use chrono::NaiveDate;

    fn flat_room(ids: &[i64]) -> RoomWithSeats {
        RoomWithSeats {
            id: 1,
            name: "Sala 1".to_string(),
            blocks: vec![],
            seats: ids
                .iter()
                .enumerate()
                .map(|(i, id)| RoomSeat {
                    id: *id,
                    seat_row_label: "A".to_string(),
                    seat_column_label: i as u32 + 1,
                    room_block_id: None,
                })
                .collect(),
        }
    }

    fn showtime(id: i64, movie: i64, cinema: i64, date: &str, booked: Vec<i64>) -> Showtime {
        Showtime {
            id,
            movie_id: movie,
            cinema_id: cinema,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            booked_seats: booked,
            ticket_price: Some(2500.0),
        }
    }

    fn query(movie: i64, cinema: i64, date: &str) -> ShowtimeQuery {
        ShowtimeQuery {
            movie_id: movie,
            cinema_id: cinema,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    #[test]
    fn marks_booked_seats_and_leaves_rest_available() {
        let layout = normalize(&flat_room(&[1, 2, 3, 4]));
        let availability = merge(&layout, &BookedSeats::explicit([2, 4]));

        assert_eq!(availability.status(1), Some(SeatStatus::Available));
        assert_eq!(availability.status(2), Some(SeatStatus::Booked));
        assert_eq!(availability.status(4), Some(SeatStatus::Booked));
        assert_eq!(availability.booked_count(), 2);
        assert!(!availability.is_degraded());
    }

    #[test]
    fn unknown_booked_ids_are_ignored() {
        let layout = normalize(&flat_room(&[1, 2]));
        let availability = merge(&layout, &BookedSeats::explicit([2, 999]));

        assert_eq!(availability.booked_count(), 1);
        assert_eq!(availability.status(999), None);
    }

    #[test]
    fn remerge_updates_statuses_without_touching_layout() {
        let layout = normalize(&flat_room(&[1, 2]));
        let first = merge(&layout, &BookedSeats::explicit([1]));
        let second = merge(&layout, &BookedSeats::explicit([2]));

        assert!(first.is_booked(1) && !first.is_booked(2));
        assert!(!second.is_booked(1) && second.is_booked(2));
    }

    #[test]
    fn explicit_list_wins_over_showtime_search() {
        let showtimes = vec![showtime(9, 1, 1, "2026-08-28", vec![5, 6])];
        let booked = resolve_booked_seats(Some(&[7]), &showtimes, &query(1, 1, "2026-08-28"));

        assert_eq!(booked.source(), BookedSource::Explicit);
        assert!(booked.contains(7));
        assert!(!booked.contains(5));
    }

    #[test]
    fn resolves_from_matching_showtime() {
        let showtimes = vec![
            showtime(8, 1, 2, "2026-08-28", vec![1]),
            showtime(9, 1, 1, "2026-08-28", vec![5, 6]),
        ];
        let booked = resolve_booked_seats(None, &showtimes, &query(1, 1, "2026-08-28"));

        assert_eq!(booked.source(), BookedSource::Showtime);
        assert_eq!(booked.len(), 2);
        assert!(booked.contains(5) && booked.contains(6));
    }

    #[test]
    fn missing_showtime_fails_open_as_degraded() {
        let showtimes = vec![showtime(9, 1, 1, "2026-08-27", vec![5])];
        let booked = resolve_booked_seats(None, &showtimes, &query(1, 1, "2026-08-28"));

        assert!(booked.is_degraded());
        assert!(booked.is_empty());

        let layout = normalize(&flat_room(&[5]));
        let availability = merge(&layout, &booked);
        assert_eq!(availability.status(5), Some(SeatStatus::Available));
        assert!(availability.is_degraded());
    }
}
