//! Connect to a room and log every published table state change.
//!
//! ```sh
//! RUST_LOG=info cargo run --example watch_table -- ws://localhost:8080 my-room 0
//! ```

use guandan_client::{room_url, ClientConfig, GameClient, WsTransport};
use guandan_types::Seat;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let base = args.next().unwrap_or_else(|| "ws://localhost:8080".to_owned());
    let room = args.next().unwrap_or_else(|| "demo".to_owned());
    let seat = args
        .next()
        .and_then(|s| s.parse::<i64>().ok())
        .and_then(Seat::from_index)
        .unwrap_or(Seat::East);

    let url = room_url(&base, &room, seat);
    println!("joining {url} as {seat}");

    let client = GameClient::new(ClientConfig::new(url, seat), WsTransport::new());
    client.connect().await?;

    let mut states = client.subscribe();
    let mut status = client.subscribe_status();
    loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = states.borrow_and_update().clone();
                println!(
                    "v{} status={:?} turn={:?} my_turn={} hand={} cards on table={}",
                    view.state.version,
                    view.state.status,
                    view.state.current_turn(),
                    view.is_my_turn,
                    view.my_hand.len(),
                    view.state
                        .current_deal
                        .as_ref()
                        .and_then(|d| d.table_play.as_ref())
                        .map(|p| p.cards.len())
                        .unwrap_or(0),
                );
            }
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("connection: {:?}", *status.borrow_and_update());
            }
        }
    }
    Ok(())
}
