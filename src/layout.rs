//! layout.rs
//!
//! Нормализатор раскладки зала: превращает сырую схему комната -> блоки -> места
//! в канонический вид для рендера. Чистая функция, без I/O и побочных эффектов:
//! одинаковый вход всегда даёт одинаковый порядок сетки.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::{RoomSeat, RoomWithSeats};

/// Место в каноническом порядке раскладки.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatInfo {
    pub id: i64,
    pub row_label: String,
    pub number: u32,
    pub block_id: i64,
}

impl SeatInfo {
    /// Человекочитаемая метка вида "E4".
    pub fn label(&self) -> String {
        format!("{}{}", self.row_label, self.number)
    }
}

/// Один ряд внутри блока: метка ряда + места по возрастанию номера.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatRow {
    pub label: String,
    pub seats: Vec<SeatInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockLayout {
    pub block_id: i64,
    pub block_row: i32,
    pub block_column: i32,
    pub rows: Vec<SeatRow>,
}

/// Горизонтальный ряд блоков с одинаковым block_row, отсортированный по block_column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockRow {
    pub block_row: i32,
    pub blocks: Vec<BlockLayout>,
}

/// Каноническая раскладка зала. Строится заново на каждую загрузку комнаты
/// и дальше не мутируется; статусы занятости живут отдельно (см. availability).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomLayout {
    pub room_id: i64,
    pub room_name: String,
    pub block_rows: Vec<BlockRow>,
    /// Все места в каноническом порядке обхода сетки.
    pub seats: Vec<SeatInfo>,
    /// Уникальные метки рядов, отсортированные лексикографически.
    pub row_labels: Vec<String>,
    #[serde(skip)]
    seat_index: HashMap<i64, usize>,
}

impl RoomLayout {
    fn assemble(room_id: i64, room_name: String, block_rows: Vec<BlockRow>) -> Self {
        let mut seats = Vec::new();
        for block_row in &block_rows {
            for block in &block_row.blocks {
                for row in &block.rows {
                    seats.extend(row.seats.iter().cloned());
                }
            }
        }

        let mut row_labels: Vec<String> = seats.iter().map(|s| s.row_label.clone()).collect();
        row_labels.sort();
        row_labels.dedup();

        let seat_index = seats
            .iter()
            .enumerate()
            .map(|(position, seat)| (seat.id, position))
            .collect();

        RoomLayout {
            room_id,
            room_name,
            block_rows,
            seats,
            row_labels,
            seat_index,
        }
    }

    /// Позиция места в каноническом порядке, O(1).
    pub fn position_of(&self, seat_id: i64) -> Option<usize> {
        self.seat_index.get(&seat_id).copied()
    }

    pub fn seat(&self, seat_id: i64) -> Option<&SeatInfo> {
        self.position_of(seat_id).map(|pos| &self.seats[pos])
    }

    pub fn contains(&self, seat_id: i64) -> bool {
        self.seat_index.contains_key(&seat_id)
    }

    /// Комната без мест: рендерим информационное "мест нет", а не ошибку.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }
}

/// Строит каноническую раскладку из сырого ответа API.
pub fn normalize(room: &RoomWithSeats) -> RoomLayout {
    let block_rows = if !room.blocks.is_empty() {
        normalize_blocks(room)
    } else {
        // Fallback: плоский список мест, один псевдо-блок (row=0, column=0)
        normalize_flat(&room.seats)
    };

    RoomLayout::assemble(room.id, room.name.clone(), block_rows)
}

fn normalize_blocks(room: &RoomWithSeats) -> Vec<BlockRow> {
    // BTreeMap даёт возрастающий порядок block_row без отдельной сортировки
    let mut grid: BTreeMap<i32, Vec<BlockLayout>> = BTreeMap::new();

    for block in &room.blocks {
        let rows = group_rows(&block.seats, block.id);
        if rows.is_empty() {
            // Блок без мест не рендерим
            continue;
        }
        grid.entry(block.block_row).or_default().push(BlockLayout {
            block_id: block.id,
            block_row: block.block_row,
            block_column: block.block_column,
            rows,
        });
    }

    grid.into_iter()
        .map(|(block_row, mut blocks)| {
            blocks.sort_by_key(|b| b.block_column);
            BlockRow { block_row, blocks }
        })
        .collect()
}

fn normalize_flat(seats: &[RoomSeat]) -> Vec<BlockRow> {
    let rows = group_rows(seats, 0);
    if rows.is_empty() {
        return Vec::new();
    }
    vec![BlockRow {
        block_row: 0,
        blocks: vec![BlockLayout {
            block_id: 0,
            block_row: 0,
            block_column: 0,
            rows,
        }],
    }]
}

/// Группирует места по метке ряда (лексикографический порядок),
/// внутри ряда сортирует по номеру. Пустые ряды не попадают в выдачу.
fn group_rows(seats: &[RoomSeat], block_id: i64) -> Vec<SeatRow> {
    let mut groups: BTreeMap<&str, Vec<SeatInfo>> = BTreeMap::new();

    for seat in seats {
        groups
            .entry(seat.seat_row_label.as_str())
            .or_default()
            .push(SeatInfo {
                id: seat.id,
                row_label: seat.seat_row_label.clone(),
                number: seat.seat_column_label,
                block_id,
            });
    }

    groups
        .into_iter()
        .map(|(label, mut seats)| {
            seats.sort_by_key(|s| s.number);
            SeatRow {
                label: label.to_string(),
                seats,
            }
        })
        .collect()
}
