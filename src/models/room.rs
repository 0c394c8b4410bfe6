use serde::{Deserialize, Serialize};
use validator::Validate;

// Сырой ответ getRoomWithSeats: комната -> блоки -> места.
// Валидация на границе API, чтобы кривой payload не дошёл до нормализатора.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomWithSeats {
    pub id: i64,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    #[validate(nested)]
    pub blocks: Vec<RoomBlock>,
    // Fallback-схема: плоский список мест без блоков
    #[serde(default)]
    #[validate(nested)]
    pub seats: Vec<RoomSeat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomBlock {
    pub id: i64,
    pub room_id: i64,
    // Номинальные размеры блока, описательные (не сверяются с фактическим числом мест)
    pub row_seats: i32,
    pub columns_seats: i32,
    // Позиция блока в сетке блоков, не пиксели
    pub block_row: i32,
    pub block_column: i32,
    #[serde(default)]
    #[validate(nested)]
    pub seats: Vec<RoomSeat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomSeat {
    pub id: i64,
    #[validate(length(min = 1))]
    pub seat_row_label: String,
    #[validate(range(min = 1))]
    pub seat_column_label: u32,
    #[serde(default)]
    pub room_block_id: Option<i64>,
}
