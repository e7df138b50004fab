// Wire protocol DTOs and conversions for the game WebSocket.

use crate::domain::{Asteroid, BlackHole, Body, BodyKind, ShipInput, ShipSnapshot, StaticWorld};
use crate::use_cases::{GameOver, PlayerUpdate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Messages the server sends to connected clients over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    // Static world description, sent once right after connecting.
    InitGame(InitGameDto),
    // Per-tick state, filtered to the receiving player's view.
    ServerUpdate(ServerUpdateDto),
    GameOver(GameOverDto),
}

/// Messages the client sends to the server over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    PlayerInput(PlayerInputDto),
    // Engage the server-side autopilot toward a point.
    Navigate(NavigateDto),
    CancelNavigation,
}

impl ClientMessage {
    /// Parses one text frame. Objects without a `type` tag are read as a bare
    /// key-state update, which older clients send.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if value.get("type").is_some() {
            serde_json::from_value(value)
        } else {
            serde_json::from_value::<PlayerInputDto>(value).map(ClientMessage::PlayerInput)
        }
    }
}

/// Held-key state. Missing keys count as released.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerInputDto {
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub down: bool,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
}

impl From<PlayerInputDto> for ShipInput {
    fn from(input: PlayerInputDto) -> Self {
        Self {
            up: input.up,
            down: input.down,
            left: input.left,
            right: input.right,
        }
    }
}

impl From<ShipInput> for PlayerInputDto {
    fn from(input: ShipInput) -> Self {
        Self {
            up: input.up,
            down: input.down,
            left: input.left,
            right: input.right,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NavigateDto {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitGameDto {
    pub id: String,
    pub planets: Vec<BodyDto>,
    pub black_holes: Vec<BlackHoleDto>,
    pub map_limit: f64,
}

impl InitGameDto {
    pub fn new(player_id: u64, world: &StaticWorld) -> Self {
        Self {
            id: player_id.to_string(),
            planets: world.planets.iter().map(BodyDto::from).collect(),
            black_holes: world.black_holes.iter().map(BlackHoleDto::from).collect(),
            map_limit: world.map_limit,
        }
    }
}

fn kind_tag(kind: BodyKind) -> &'static str {
    match kind {
        BodyKind::Star => "star",
        BodyKind::Planet => "planet",
        BodyKind::BlackHole => "blackhole",
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyDto {
    pub name: &'static str,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orbital_radius: Option<f64>,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub color: &'static str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_rings: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ring_color: Option<&'static str>,
}

impl From<&Body> for BodyDto {
    fn from(body: &Body) -> Self {
        Self {
            name: body.name,
            x: body.x,
            y: body.y,
            size: body.radius,
            orbital_radius: body.orbital_radius,
            kind: kind_tag(body.kind),
            color: body.color,
            has_rings: body.has_rings,
            ring_color: body.ring_color,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlackHoleDto {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl From<&BlackHole> for BlackHoleDto {
    fn from(bh: &BlackHole) -> Self {
        Self {
            id: bh.id.clone(),
            x: bh.x,
            y: bh.y,
            size: bh.radius,
            kind: kind_tag(BodyKind::BlackHole),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AsteroidDto {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub rotation: f64,
    pub rot_speed: f64,
    // Outline relative to the centre, as [x, y] pairs.
    pub points: Vec<[f64; 2]>,
}

impl From<&Asteroid> for AsteroidDto {
    fn from(a: &Asteroid) -> Self {
        Self {
            id: a.id,
            x: a.x,
            y: a.y,
            vx: a.vx,
            vy: a.vy,
            size: a.radius,
            rotation: a.rotation,
            rot_speed: a.rotation_speed,
            points: a.outline.iter().map(|p| [p.x, p.y]).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStateDto {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub speed: f64,
    pub inputs: PlayerInputDto,
    pub is_dead: bool,
    pub navigating: bool,
    /// 0 clear, 1 obstacle ahead, 2 inside its safety margin.
    pub nav_threat: u8,
    pub gravity_danger: f64,
}

impl From<&ShipSnapshot> for PlayerStateDto {
    fn from(ship: &ShipSnapshot) -> Self {
        Self {
            id: ship.id.to_string(),
            x: ship.x,
            y: ship.y,
            angle: ship.angle,
            speed: ship.speed,
            inputs: ship.input.into(),
            is_dead: !ship.alive,
            navigating: ship.navigating,
            nav_threat: ship.nav_threat,
            gravity_danger: ship.gravity_danger,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerUpdateDto {
    pub tick: u64,
    pub me: PlayerStateDto,
    /// Every connected player keyed by id, the receiver included.
    pub others: BTreeMap<String, PlayerStateDto>,
    pub asteroids: Vec<AsteroidDto>,
}

impl From<&PlayerUpdate> for ServerUpdateDto {
    fn from(update: &PlayerUpdate) -> Self {
        Self {
            tick: update.tick,
            me: PlayerStateDto::from(&update.me),
            others: update
                .roster
                .iter()
                .map(|ship| (ship.id.to_string(), PlayerStateDto::from(ship)))
                .collect(),
            asteroids: update.asteroids.iter().map(AsteroidDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameOverDto {
    pub reason: &'static str,
}

impl From<GameOver> for GameOverDto {
    fn from(over: GameOver) -> Self {
        Self {
            reason: over.reason,
        }
    }
}
