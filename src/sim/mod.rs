mod components;
mod doors;
mod movement;
mod systems;
mod tic;

pub use components::{Animation, InputCmd, Position, Sprite};
pub use doors::{DOOR_SPEED, DOOR_WAIT, DoorMotion, DoorSystem};
pub use movement::{
    MOVE_SPEED, PLAYER_RADIUS, TURN_RATE, USE_RANGE, fits, player_input, touches, try_move,
    use_target,
};
pub use systems::{animation, collect_billboards, spawn_animated, spawn_billboard};
pub use tic::{DT, SIM_FPS, TicRunner};
