use crate::domain::ShipInput;
use crate::domain::systems::autopilot::NavTarget;
use crate::interface_adapters::http::ErrorResponse;
use crate::interface_adapters::protocol::{
    ClientMessage, GameOverDto, InitGameDto, ServerMessage, ServerUpdateDto,
};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::rng::rand_id;
use crate::use_cases::{GameEvent, GameOver, PilotControls, PlayerFeed, PlayerLink, WorldHandle};

use axum::{
    Error, Json,
    extract::{
        State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures::SinkExt;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{mpsc, watch};
use tracing::{Instrument, debug, info, info_span, warn};

#[derive(Debug)]
enum NetError {
    // Categorizes connection lifecycle failures so callers can decide policy.
    #[allow(dead_code)]
    Ws(axum::Error),
    #[allow(dead_code)]
    Serialization(serde_json::Error),
    InputClosed,
    WorldClosed,
}

impl From<axum::Error> for NetError {
    fn from(e: axum::Error) -> Self {
        NetError::Ws(e)
    }
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    if state.world.input_tx.is_closed() {
        // Keep unavailable responses consistent with the JSON error schema.
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "world unavailable".to_string(),
            }),
        )
            .into_response();
    }

    let world = state.world.clone();
    ws.on_upgrade(move |socket| {
        let conn_id = rand_id();
        let player_id = rand_id();
        handle_socket(socket, world, player_id)
            .instrument(info_span!("conn", conn_id, player_id))
    })
}

async fn handle_socket(mut socket: WebSocket, world: WorldHandle, player_id: u64) {
    let mut ctx = match bootstrap_connection(&mut socket, &world, player_id).await {
        Ok(ctx) => ctx,
        Err(e) => {
            warn!(error = ?e, "failed to bootstrap connection");
            let _ = socket
                .send(Message::Close(Some(CloseFrame {
                    code: close_code::ERROR,
                    reason: "bootstrap failed".into(),
                })))
                .await;
            let _ = socket.close().await;
            return;
        }
    };

    info!(player_id, "client connected");

    if let Err(e) = run_client_loop(&mut socket, &mut ctx).await {
        warn!(error = ?e, "client loop exited with error");
    }
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<usize, NetError> {
    let txt = serde_json::to_string(msg).map_err(NetError::Serialization)?;
    let bytes = txt.len();
    socket
        .send(Message::Text(txt.into()))
        .await
        .map_err(NetError::Ws)?;
    Ok(bytes)
}

struct ConnCtx {
    pub player_id: u64,
    pub input_tx: mpsc::Sender<GameEvent>,
    pub feed: PlayerFeed,
    // Set once the game-over notice has been forwarded or can no longer arrive.
    pub game_over_done: bool,

    pub msgs_in: u64,
    pub msgs_out: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,

    pub invalid_json: u32,

    pub last_invalid_input_log: Instant,

    pub close_frame: Option<CloseFrame>,
}

async fn bootstrap_connection(
    socket: &mut WebSocket,
    world: &WorldHandle,
    player_id: u64,
) -> Result<ConnCtx, NetError> {
    // The feed exists before Join so the first update cannot be missed.
    let (link, feed) = PlayerLink::channel();

    world
        .input_tx
        .send(GameEvent::Join { player_id, link })
        .await
        .map_err(|_| NetError::InputClosed)?;

    // If anything after Join fails, compensate with Leave to avoid a ghost ship.
    let init = ServerMessage::InitGame(InitGameDto::new(player_id, &world.world));
    let bytes_out = match send_message(socket, &init).await {
        Ok(bytes) => bytes as u64,
        Err(e) => {
            let _ = world.input_tx.send(GameEvent::Leave { player_id }).await;
            return Err(e);
        }
    };

    let now = Instant::now() - LOG_THROTTLE;
    Ok(ConnCtx {
        player_id,
        input_tx: world.input_tx.clone(),
        feed,
        game_over_done: false,

        msgs_in: 0,
        msgs_out: 1,
        bytes_in: 0,
        bytes_out,

        invalid_json: 0,

        last_invalid_input_log: now,

        close_frame: None,
    })
}

enum LoopControl {
    Continue,
    Disconnect,
}

const LOG_THROTTLE: Duration = Duration::from_secs(2);

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

async fn run_client_loop(socket: &mut WebSocket, ctx: &mut ConnCtx) -> Result<(), NetError> {
    let player_id = ctx.player_id;

    // Split borrows so `tokio::select!` can hold them concurrently.
    let ConnCtx {
        input_tx,
        feed,
        game_over_done,
        msgs_in,
        msgs_out,
        bytes_in,
        bytes_out,
        invalid_json,
        last_invalid_input_log,
        close_frame,
        ..
    } = ctx;

    let mut fatal: Option<NetError> = None;

    loop {
        let disconnect: bool = tokio::select! {
            // Incoming Message from Client
            incoming = socket.recv() => {
                match handle_incoming_ws(
                    incoming,
                    player_id,
                    &feed.controls,
                    msgs_in,
                    bytes_in,
                    invalid_json,
                    last_invalid_input_log,
                    close_frame,
                ) {
                    Ok(LoopControl::Continue) => false,
                    Ok(LoopControl::Disconnect) => true,
                    Err(e) => {
                        fatal = Some(e);
                        true
                    }
                }
            }

            // Outgoing per-tick update; only the newest one is ever sent.
            changed = feed.updates.changed() => {
                match changed {
                    Ok(()) => {
                        let latest = feed.updates.borrow_and_update().clone();
                        match latest {
                            Some(update) => {
                                let msg = ServerMessage::ServerUpdate(ServerUpdateDto::from(&*update));
                                match forward_message(&msg, socket, msgs_out, bytes_out).await {
                                    LoopControl::Continue => false,
                                    LoopControl::Disconnect => true,
                                }
                            }
                            None => false,
                        }
                    }
                    Err(_) => {
                        warn!(player_id, "world updates channel closed; disconnecting");
                        fatal = Some(NetError::WorldClosed);
                        true
                    }
                }
            }

            // Death notice, delivered at most once.
            over = &mut feed.game_over, if !*game_over_done => {
                *game_over_done = true;
                match over {
                    Ok(over) => forward_game_over(over, socket, msgs_out, bytes_out).await,
                    // Sender dropped without a death; the update branch reports the closure.
                    Err(_) => false,
                }
            }
        };

        if disconnect {
            if let Some(frame) = close_frame.take() {
                let _ = socket.send(Message::Close(Some(frame))).await;
            }
            if let Err(err) = socket.close().await.map_err(NetError::Ws) {
                debug!(error = ?err, "socket close error");
            }
            break;
        }
    }

    disconnect_cleanup(
        player_id,
        input_tx,
        *msgs_in,
        *msgs_out,
        *bytes_in,
        *bytes_out,
        *invalid_json,
    )
    .await;

    match fatal {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_incoming_ws(
    incoming: Option<Result<Message, Error>>,
    player_id: u64,
    controls: &watch::Sender<PilotControls>,
    msgs_in: &mut u64,
    bytes_in: &mut u64,
    invalid_json: &mut u32,
    last_invalid_input_log: &mut Instant,
    close_frame: &mut Option<CloseFrame>,
) -> Result<LoopControl, NetError> {
    match incoming {
        Some(Ok(msg)) => match msg {
            Message::Text(text) => {
                *msgs_in += 1;
                *bytes_in += text.len() as u64;

                // Only this connection's own pending controls are overwritten; the
                // game loop reads the latest value once per tick.
                match ClientMessage::parse(&text) {
                    Ok(ClientMessage::PlayerInput(input)) => {
                        let keys = ShipInput::from(input);
                        controls.send_modify(|c| c.set_keys(keys));
                    }
                    Ok(ClientMessage::Navigate(target)) => {
                        if !target.x.is_finite() || !target.y.is_finite() {
                            if should_log(last_invalid_input_log) {
                                warn!(player_id, "non-finite navigation target; dropping");
                            }
                            return Ok(LoopControl::Continue);
                        }
                        let target = NavTarget {
                            x: target.x,
                            y: target.y,
                        };
                        controls.send_modify(|c| c.navigate(target));
                    }
                    Ok(ClientMessage::CancelNavigation) => {
                        controls.send_modify(|c| c.cancel_navigation());
                    }
                    Err(parse_err) => {
                        // Malformed messages are tolerated; the previous input stays in effect.
                        *invalid_json += 1;
                        if should_log(last_invalid_input_log) {
                            warn!(
                                player_id,
                                bytes = text.len(),
                                count = *invalid_json,
                                error = %parse_err,
                                "failed to parse client message"
                            );
                        }
                    }
                }

                Ok(LoopControl::Continue)
            }
            Message::Binary(_) => {
                *close_frame = Some(CloseFrame {
                    code: close_code::UNSUPPORTED,
                    reason: "binary messages not supported".into(),
                });
                Ok(LoopControl::Disconnect)
            }
            Message::Ping(_) | Message::Pong(_) => Ok(LoopControl::Continue),
            Message::Close(_) => Ok(LoopControl::Disconnect),
        },
        Some(Err(e)) => {
            warn!(player_id, error = %e, "websocket recv error");
            Ok(LoopControl::Disconnect)
        }
        None => {
            info!(player_id, "websocket closed");
            Ok(LoopControl::Disconnect)
        }
    }
}

async fn forward_message(
    msg: &ServerMessage,
    socket: &mut WebSocket,
    msgs_out: &mut u64,
    bytes_out: &mut u64,
) -> LoopControl {
    match send_message(socket, msg).await {
        Ok(bytes) => {
            *msgs_out += 1;
            *bytes_out += bytes as u64;
            LoopControl::Continue
        }
        Err(err) => {
            // Disconnect follows immediately.
            warn!(error = ?err, "failed to send message");
            LoopControl::Disconnect
        }
    }
}

async fn forward_game_over(
    over: GameOver,
    socket: &mut WebSocket,
    msgs_out: &mut u64,
    bytes_out: &mut u64,
) -> bool {
    info!(reason = over.reason, "sending game over");
    let msg = ServerMessage::GameOver(GameOverDto::from(over));
    matches!(
        forward_message(&msg, socket, msgs_out, bytes_out).await,
        LoopControl::Disconnect
    )
}

async fn disconnect_cleanup(
    player_id: u64,
    input_tx: &mpsc::Sender<GameEvent>,
    msgs_in: u64,
    msgs_out: u64,
    bytes_in: u64,
    bytes_out: u64,
    invalid_json: u32,
) {
    // The world may already be gone during shutdown; nothing left to remove then.
    if input_tx.send(GameEvent::Leave { player_id }).await.is_err() {
        debug!(player_id, "world closed before leave");
    }

    debug!(
        player_id,
        msgs_in, msgs_out, bytes_in, bytes_out, invalid_json, "connection stats"
    );
    info!(player_id, "client disconnected");
}
