use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::{Event, EventBus, EventCode, EventHandler};
use crate::error::GeometryError;
use crate::log;
use crate::math::Range;
use crate::session_rng::SessionRng;
use crate::state::GameState;
use crate::world::World;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthPolicy {
    pub factor: f64,
    pub max_speed: Option<f64>,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            factor: 1.2,
            max_speed: None,
        }
    }
}

impl GrowthPolicy {
    pub fn apply(&self, speed: f64) -> f64 {
        let grown = speed * self.factor;
        match self.max_speed {
            Some(cap) => grown.min(cap),
            None => grown,
        }
    }
}

pub struct FoodCollisionPublisher {
    world: Rc<RefCell<World>>,
    events: EventBus,
    was_touching: Rc<Cell<bool>>,
}

impl FoodCollisionPublisher {
    pub fn new(world: Rc<RefCell<World>>) -> Self {
        Self {
            world,
            events: EventBus::new(),
            was_touching: Rc::new(Cell::new(false)),
        }
    }

    pub fn register_event_handler(&self, handler: Rc<dyn EventHandler>) {
        self.events.register_event_handler(handler);
    }

    pub fn latch_reset_handler(&self) -> Rc<dyn EventHandler> {
        Rc::new(LatchResetHandler {
            was_touching: Rc::clone(&self.was_touching),
        })
    }

    // Edge-triggered on the first tick of contact.
    pub fn check(&self) {
        let (touching, position) = {
            let world = self.world.borrow();
            let snake = world.snake();
            let food = world.food();
            let reach = snake.width() / 2.0 + food.radius();
            (snake.head().distance_to(&food.position()) < reach, food.position())
        };

        let started_touching = touching && !self.was_touching.get();
        self.was_touching.set(touching);
        if started_touching {
            self.events.publish(&Event::FoodCollision { position });
        }
    }
}

struct LatchResetHandler {
    was_touching: Rc<Cell<bool>>,
}

impl EventHandler for LatchResetHandler {
    fn event_code(&self) -> EventCode {
        EventCode::StateChange
    }

    fn execute(&self, event: &Event) {
        if let Event::StateChange {
            state: GameState::InGame | GameState::PreGame,
        } = event
        {
            self.was_touching.set(false);
        }
    }
}

pub struct FoodCollisionHandler {
    world: Rc<RefCell<World>>,
    rng: RefCell<SessionRng>,
    x_range: Range,
    z_range: Range,
    growth: GrowthPolicy,
}

impl FoodCollisionHandler {
    pub fn new(
        world: Rc<RefCell<World>>,
        rng: SessionRng,
        padding: f64,
        growth: GrowthPolicy,
    ) -> Result<Self, GeometryError> {
        let (x_range, z_range) = world.borrow().terrain().padded_ranges(padding)?;
        Ok(Self {
            world,
            rng: RefCell::new(rng),
            x_range,
            z_range,
            growth,
        })
    }
}

impl EventHandler for FoodCollisionHandler {
    fn event_code(&self) -> EventCode {
        EventCode::FoodCollision
    }

    fn execute(&self, _event: &Event) {
        let mut world = self.world.borrow_mut();
        world.snake_mut().eat();

        let food_position = {
            let mut rng = self.rng.borrow_mut();
            world.food_mut().relocate(&self.x_range, &self.z_range, &mut rng)
        };

        let speed = self.growth.apply(world.snake().speed());
        if let Err(e) = world.snake_mut().set_speed(speed) {
            log!("Speed not changed after eating: {}", e);
        }

        log!(
            "Food eaten: length {}, speed {:.3}, food moved to {}",
            world.snake().len(),
            world.snake().speed(),
            food_position
        );
    }
}
