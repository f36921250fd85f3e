pub mod config;
pub mod error;
pub mod event;
pub mod game;
pub mod input;
pub mod logger;
pub mod math;
pub mod render;
pub mod scheduler;
pub mod session_rng;
pub mod state;
pub mod world;

pub use error::{GameError, GeometryError};
pub use game::Game;
pub use input::Direction;
pub use math::{Range, Vector3};
pub use render::{NullRenderer, RenderProvider};
pub use session_rng::SessionRng;
pub use state::{GameState, StateManager};
pub use world::{Food, Snake, SnakeParams, Terrain, World};
