use std::rc::Rc;

use super::{Event, EventCode, EventHandler};
use crate::log;
use crate::state::{GameState, StateManager};

pub struct GameOverHandler {
    code: EventCode,
    state_manager: Rc<StateManager>,
}

impl GameOverHandler {
    pub fn on_wall_collision(state_manager: Rc<StateManager>) -> Self {
        Self {
            code: EventCode::WallCollision,
            state_manager,
        }
    }

    pub fn on_self_collision(state_manager: Rc<StateManager>) -> Self {
        Self {
            code: EventCode::SelfCollision,
            state_manager,
        }
    }
}

impl EventHandler for GameOverHandler {
    fn event_code(&self) -> EventCode {
        self.code
    }

    fn execute(&self, event: &Event) {
        if self.state_manager.state() != GameState::InGame {
            return;
        }
        match event {
            Event::WallCollision { edge, position } => {
                log!("Hit the {:?} wall at {}", edge, position);
            }
            Event::SelfCollision { segment, position } => {
                log!("Head ran into segment {} at {}", segment, position);
            }
            _ => {}
        }
        self.state_manager.set_state(GameState::EndGame);
    }
}
