use std::cell::RefCell;
use std::rc::Rc;

use super::{Event, EventBus, EventCode, EventHandler};
use crate::state::{GameState, StateManager};
use crate::world::World;

pub struct StateChangePublisher {
    events: EventBus,
}

impl StateChangePublisher {
    pub fn attach(state_manager: &StateManager) -> Rc<Self> {
        let publisher = Rc::new(Self {
            events: EventBus::new(),
        });
        let hook = Rc::clone(&publisher);
        state_manager.register_internal_listener(move |state| {
            hook.events.publish(&Event::StateChange { state });
        });
        publisher
    }

    pub fn register_event_handler(&self, handler: Rc<dyn EventHandler>) {
        self.events.register_event_handler(handler);
    }
}

pub struct StateChangeHandler {
    world: Rc<RefCell<World>>,
}

impl StateChangeHandler {
    pub fn new(world: Rc<RefCell<World>>) -> Self {
        Self { world }
    }
}

impl EventHandler for StateChangeHandler {
    fn event_code(&self) -> EventCode {
        EventCode::StateChange
    }

    fn execute(&self, event: &Event) {
        let Event::StateChange { state } = event else {
            return;
        };
        match state {
            GameState::InGame | GameState::PreGame => self.world.borrow_mut().reset(),
            GameState::EndGame => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use crate::world::{Food, Snake, SnakeParams, Terrain};

    fn create_world() -> Rc<RefCell<World>> {
        let snake = Snake::new(&SnakeParams {
            init_length: 3,
            ..SnakeParams::default()
        })
        .unwrap();
        let terrain = Terrain::new(20.0, 20.0).unwrap();
        let food = Food::new(Vector3::new(2.0, 0.0, 2.0), 0.25).unwrap();
        Rc::new(RefCell::new(World::new(snake, terrain, food)))
    }

    fn grow(world: &Rc<RefCell<World>>) {
        let mut world = world.borrow_mut();
        world.snake_mut().eat();
        world.snake_mut().forward();
    }

    #[test]
    fn test_entering_game_resets_world() {
        let manager = StateManager::new(GameState::PreGame);
        let world = create_world();
        let initial = world.borrow().snake().positions().to_vec();
        let publisher = StateChangePublisher::attach(&manager);
        publisher.register_event_handler(Rc::new(StateChangeHandler::new(Rc::clone(&world))));

        grow(&world);
        manager.set_state(GameState::InGame);
        assert_eq!(world.borrow().snake().positions(), initial.as_slice());

        grow(&world);
        manager.set_state(GameState::PreGame);
        assert_eq!(world.borrow().snake().positions(), initial.as_slice());
    }

    #[test]
    fn test_ending_game_keeps_world() {
        let manager = StateManager::new(GameState::InGame);
        let world = create_world();
        let publisher = StateChangePublisher::attach(&manager);
        publisher.register_event_handler(Rc::new(StateChangeHandler::new(Rc::clone(&world))));

        grow(&world);
        manager.set_state(GameState::EndGame);
        assert_eq!(world.borrow().snake().len(), 4);
    }

    #[test]
    fn test_ui_listener_sees_world_before_reset() {
        let manager = StateManager::new(GameState::EndGame);
        let world = create_world();
        let publisher = StateChangePublisher::attach(&manager);
        publisher.register_event_handler(Rc::new(StateChangeHandler::new(Rc::clone(&world))));

        let seen_length = Rc::new(std::cell::Cell::new(0));
        let sink = Rc::clone(&seen_length);
        let observed = Rc::clone(&world);
        manager.register_state_listener(move |_| sink.set(observed.borrow().snake().len()));

        grow(&world);
        manager.set_state(GameState::InGame);
        assert_eq!(seen_length.get(), 4);
        assert_eq!(world.borrow().snake().len(), 3);
    }
}
