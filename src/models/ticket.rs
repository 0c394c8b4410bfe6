use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub showtime_id: i64,
    pub seat_id: i64,
    pub created_at: Option<NaiveDateTime>,
}

// Тело createTickets: сеанс + выбранные места.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateTicketsRequest {
    pub showtime_id: i64,
    #[validate(length(min = 1))]
    pub seats: Vec<i64>,
}
