pub mod room;
pub mod showtime;
pub mod ticket;

pub use room::{RoomBlock, RoomSeat, RoomWithSeats};
pub use showtime::{Showtime, ShowtimeQuery};
pub use ticket::{CreateTicketsRequest, Ticket};
