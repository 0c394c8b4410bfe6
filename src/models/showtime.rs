use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Запись сеанса из поиска: несёт список занятых мест и цену билета.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Showtime {
    pub id: i64,
    pub movie_id: i64,
    pub cinema_id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub booked_seats: Vec<i64>,
    pub ticket_price: Option<f64>,
}

// Ключ поиска сеанса: фильм + кинотеатр + дата.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowtimeQuery {
    pub movie_id: i64,
    pub cinema_id: i64,
    pub date: NaiveDate,
}

impl Showtime {
    pub fn matches(&self, query: &ShowtimeQuery) -> bool {
        self.movie_id == query.movie_id
            && self.cinema_id == query.cinema_id
            && self.date == query.date
    }
}
