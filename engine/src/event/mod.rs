mod food_collision;
mod game_over;
mod self_collision;
mod state_change;
mod wall_collision;

pub use food_collision::{FoodCollisionHandler, FoodCollisionPublisher, GrowthPolicy};
pub use game_over::GameOverHandler;
pub use self_collision::SelfCollisionPublisher;
pub use state_change::{StateChangeHandler, StateChangePublisher};
pub use wall_collision::{BoundaryProbe, Edge, WallCollisionPublisher};

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::math::Vector3;
use crate::state::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventCode {
    WallCollision,
    SelfCollision,
    FoodCollision,
    StateChange,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    WallCollision { edge: Edge, position: Vector3 },
    SelfCollision { segment: usize, position: Vector3 },
    FoodCollision { position: Vector3 },
    StateChange { state: GameState },
}

impl Event {
    pub fn code(&self) -> EventCode {
        match self {
            Event::WallCollision { .. } => EventCode::WallCollision,
            Event::SelfCollision { .. } => EventCode::SelfCollision,
            Event::FoodCollision { .. } => EventCode::FoodCollision,
            Event::StateChange { .. } => EventCode::StateChange,
        }
    }
}

pub trait EventHandler {
    fn event_code(&self) -> EventCode;

    fn execute(&self, event: &Event);
}

pub struct CallbackHandler<F>
where
    F: Fn(&Event),
{
    code: EventCode,
    callback: F,
}

impl<F> CallbackHandler<F>
where
    F: Fn(&Event),
{
    pub fn new(code: EventCode, callback: F) -> Self {
        Self { code, callback }
    }
}

impl<F> EventHandler for CallbackHandler<F>
where
    F: Fn(&Event),
{
    fn event_code(&self) -> EventCode {
        self.code
    }

    fn execute(&self, event: &Event) {
        (self.callback)(event)
    }
}

#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<HashMap<EventCode, Vec<Rc<dyn EventHandler>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_event_handler(&self, handler: Rc<dyn EventHandler>) {
        self.handlers
            .borrow_mut()
            .entry(handler.event_code())
            .or_default()
            .push(handler);
    }

    // Dispatches over a snapshot, so a handler may publish again.
    pub fn publish(&self, event: &Event) {
        let handlers = match self.handlers.borrow().get(&event.code()) {
            Some(handlers) => handlers.clone(),
            None => return,
        };
        for handler in handlers {
            handler.execute(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder(code: EventCode, log: &Rc<RefCell<Vec<String>>>, name: &str) -> Rc<dyn EventHandler> {
        let log = Rc::clone(log);
        let name = name.to_string();
        Rc::new(CallbackHandler::new(code, move |event: &Event| {
            log.borrow_mut().push(format!("{}:{:?}", name, event.code()));
        }))
    }

    #[test]
    fn test_publish_in_registration_order() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.register_event_handler(recorder(EventCode::FoodCollision, &log, "first"));
        bus.register_event_handler(recorder(EventCode::FoodCollision, &log, "second"));
        bus.register_event_handler(recorder(EventCode::FoodCollision, &log, "third"));

        bus.publish(&Event::FoodCollision { position: Vector3::ZERO });

        assert_eq!(
            *log.borrow(),
            vec!["first:FoodCollision", "second:FoodCollision", "third:FoodCollision"]
        );
    }

    #[test]
    fn test_publish_only_reaches_matching_code() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.register_event_handler(recorder(EventCode::WallCollision, &log, "wall"));
        bus.register_event_handler(recorder(EventCode::SelfCollision, &log, "self"));

        bus.publish(&Event::SelfCollision { segment: 3, position: Vector3::ZERO });

        assert_eq!(*log.borrow(), vec!["self:SelfCollision"]);
    }

    #[test]
    fn test_publish_without_handlers_is_noop() {
        let bus = EventBus::new();
        bus.publish(&Event::StateChange { state: GameState::InGame });
    }

    #[test]
    fn test_same_handler_registered_twice_runs_twice() {
        let bus = EventBus::new();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let handler: Rc<dyn EventHandler> = Rc::new(CallbackHandler::new(EventCode::FoodCollision, move |_: &Event| {
            counter.set(counter.get() + 1);
        }));
        bus.register_event_handler(Rc::clone(&handler));
        bus.register_event_handler(handler);

        bus.publish(&Event::FoodCollision { position: Vector3::ZERO });
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_handler_may_publish_recursively() {
        let bus = Rc::new(EventBus::new());
        let depth = Rc::new(Cell::new(0));

        let inner_bus = Rc::downgrade(&bus);
        let inner_depth = Rc::clone(&depth);
        bus.register_event_handler(Rc::new(CallbackHandler::new(EventCode::FoodCollision, move |event: &Event| {
            inner_depth.set(inner_depth.get() + 1);
            if inner_depth.get() < 3 && let Some(bus) = inner_bus.upgrade() {
                bus.publish(event);
            }
        })));

        bus.publish(&Event::FoodCollision { position: Vector3::ZERO });
        assert_eq!(depth.get(), 3);
    }
}
