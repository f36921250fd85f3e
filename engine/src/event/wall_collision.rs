use std::cell::RefCell;
use std::rc::Rc;

use super::{Event, EventBus, EventHandler};
use crate::math::Vector3;
use crate::world::{Terrain, World};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    North,
    South,
    West,
    East,
}

impl Edge {
    pub fn outward_normal(&self) -> Vector3 {
        match self {
            Edge::North => Vector3::new(0.0, 0.0, -1.0),
            Edge::South => Vector3::new(0.0, 0.0, 1.0),
            Edge::West => Vector3::new(-1.0, 0.0, 0.0),
            Edge::East => Vector3::new(1.0, 0.0, 0.0),
        }
    }
}

// A ray from one terrain corner along its edge to the next corner.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryProbe {
    edge: Edge,
    origin: Vector3,
    direction: Vector3,
    length: f64,
}

impl BoundaryProbe {
    pub fn around(terrain: &Terrain, y: f64) -> [BoundaryProbe; 4] {
        let w = terrain.half_width();
        let h = terrain.half_height();
        [
            Self::between(Edge::South, Vector3::new(w, y, h), Vector3::new(-w, y, h)),
            Self::between(Edge::West, Vector3::new(-w, y, h), Vector3::new(-w, y, -h)),
            Self::between(Edge::North, Vector3::new(-w, y, -h), Vector3::new(w, y, -h)),
            Self::between(Edge::East, Vector3::new(w, y, -h), Vector3::new(w, y, h)),
        ]
    }

    fn between(edge: Edge, from: Vector3, to: Vector3) -> Self {
        let span = to.minus(&from);
        Self {
            edge,
            origin: from,
            direction: span.normalized(),
            length: span.length(),
        }
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn intersect(&self, head: &Vector3) -> Option<Vector3> {
        let normal = self.edge.outward_normal();
        if head.dot(&normal) < self.origin.dot(&normal) {
            return None;
        }
        let along = head.minus(&self.origin).dot(&self.direction).clamp(0.0, self.length);
        Some(self.origin.plus(&self.direction.scaled(along)))
    }
}

pub struct WallCollisionPublisher {
    world: Rc<RefCell<World>>,
    probes: [BoundaryProbe; 4],
    events: EventBus,
}

impl WallCollisionPublisher {
    pub fn new(world: Rc<RefCell<World>>) -> Self {
        // Probes run at the height of the snake's centre line.
        let probes = {
            let world = world.borrow();
            BoundaryProbe::around(world.terrain(), world.snake().width() / 2.0)
        };
        Self {
            world,
            probes,
            events: EventBus::new(),
        }
    }

    pub fn register_event_handler(&self, handler: Rc<dyn EventHandler>) {
        self.events.register_event_handler(handler);
    }

    pub fn check(&self) {
        let head = self.world.borrow().snake().head();
        let hits: Vec<Event> = self
            .probes
            .iter()
            .filter_map(|probe| {
                probe.intersect(&head).map(|position| Event::WallCollision {
                    edge: probe.edge(),
                    position,
                })
            })
            .collect();

        for event in &hits {
            self.events.publish(event);
        }
    }
}
