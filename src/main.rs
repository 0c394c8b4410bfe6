use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinema_booking::{config::Config, layout::normalize, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cinema booking smoke check");

    let room_id: i64 = std::env::var("ROOM_ID")
        .unwrap_or_else(|_| "1".to_string())
        .parse()
        .expect("ROOM_ID must be a valid number");

    let state = AppState::new(config).expect("Failed to create API client");

    // Тянем комнату и прогоняем через нормализатор
    match state.api.get_room_with_seats(room_id).await {
        Ok(room) => {
            let layout = normalize(&room);
            if layout.is_empty() {
                info!(room_id, "room has no seats");
            } else {
                info!(
                    room_id,
                    room = %layout.room_name,
                    seats = layout.seat_count(),
                    rows = layout.row_labels.len(),
                    block_rows = layout.block_rows.len(),
                    "room layout normalized"
                );
            }
        }
        Err(e) => error!(room_id, "failed to fetch room: {:?}", e),
    }
}
