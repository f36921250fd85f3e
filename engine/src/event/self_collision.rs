use std::cell::RefCell;
use std::rc::Rc;

use super::{Event, EventBus, EventHandler};
use crate::world::World;

pub struct SelfCollisionPublisher {
    world: Rc<RefCell<World>>,
    events: EventBus,
}

impl SelfCollisionPublisher {
    pub fn new(world: Rc<RefCell<World>>) -> Self {
        Self {
            world,
            events: EventBus::new(),
        }
    }

    pub fn register_event_handler(&self, handler: Rc<dyn EventHandler>) {
        self.events.register_event_handler(handler);
    }

    pub fn check(&self) {
        let hits: Vec<Event> = {
            let world = self.world.borrow();
            let snake = world.snake();
            let head = snake.head();
            snake
                .positions()
                .iter()
                .enumerate()
                .skip(1)
                .filter(|(_, position)| position.distance_to(&head) < snake.width())
                .map(|(segment, position)| Event::SelfCollision {
                    segment,
                    position: *position,
                })
                .collect()
        };

        for event in &hits {
            self.events.publish(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{CallbackHandler, EventCode};
    use crate::math::Vector3;
    use crate::world::{Food, Snake, SnakeParams, Terrain};

    fn create_world(init_length: usize, speed: f64) -> Rc<RefCell<World>> {
        let snake = Snake::new(&SnakeParams {
            position: Vector3::ZERO,
            direction: Vector3::new(1.0, 0.0, 0.0),
            step_size: 1.0,
            init_length,
            speed,
            width: 0.5,
        })
        .unwrap();
        let terrain = Terrain::new(40.0, 40.0).unwrap();
        let food = Food::new(Vector3::new(15.0, 0.0, 15.0), 0.25).unwrap();
        Rc::new(RefCell::new(World::new(snake, terrain, food)))
    }

    fn collect_segments(publisher: &SelfCollisionPublisher) -> Rc<RefCell<Vec<usize>>> {
        let segments = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&segments);
        publisher.register_event_handler(Rc::new(CallbackHandler::new(
            EventCode::SelfCollision,
            move |event: &Event| {
                if let Event::SelfCollision { segment, .. } = event {
                    sink.borrow_mut().push(*segment);
                }
            },
        )));
        segments
    }

    #[test]
    fn test_straight_snake_does_not_collide() {
        let world = create_world(6, 0.5);
        let publisher = SelfCollisionPublisher::new(Rc::clone(&world));
        let segments = collect_segments(&publisher);
        for _ in 0..20 {
            world.borrow_mut().snake_mut().forward();
            publisher.check();
        }
        assert!(segments.borrow().is_empty());
    }

    #[test]
    fn test_head_looping_back_hits_body() {
        let world = create_world(8, 1.0);
        let publisher = SelfCollisionPublisher::new(Rc::clone(&world));
        let segments = collect_segments(&publisher);

        // Right, down, left: a tight U-turn brings the head onto the body.
        let turns = [
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
        ];
        for turn in turns {
            world.borrow_mut().snake_mut().set_direction(turn).unwrap();
            world.borrow_mut().snake_mut().forward();
            publisher.check();
        }

        assert_eq!(*segments.borrow(), vec![2]);
    }
}
