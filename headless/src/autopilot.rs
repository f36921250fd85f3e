use snake_engine::{Direction, SessionRng, Vector3, World};

// In step sizes.
const LOOKAHEAD_STEPS: f64 = 1.5;

pub struct Autopilot {
    rng: SessionRng,
}

impl Autopilot {
    pub fn new(rng: SessionRng) -> Self {
        Self { rng }
    }

    pub fn calculate_move(&mut self, world: &World) -> Option<Direction> {
        let snake = world.snake();
        // Reversals are judged against where the body points.
        let heading = Direction::nearest(&snake.raw_direction())?;
        let current = Direction::nearest(&snake.direction()).unwrap_or(heading);
        let head = snake.head();
        let food = world.food().position();

        let mut best_dir = None;
        let mut best_distance = f64::MAX;

        for dir in Self::get_valid_directions(heading) {
            let probe = Self::probe_position(world, head, dir);
            if !Self::is_safe_position(world, probe) {
                continue;
            }
            let mut distance = probe.distance_to(&food);
            // Prefer going straight on ties, so the snake does not jitter.
            if dir == current {
                distance -= snake.step_size() * 0.25;
            }
            if distance < best_distance {
                best_distance = distance;
                best_dir = Some(dir);
            }
        }

        best_dir.or_else(|| self.random_valid_move(heading))
    }

    fn random_valid_move(&mut self, heading: Direction) -> Option<Direction> {
        let valid_directions = Self::get_valid_directions(heading);
        let idx = self.rng.random_range(0..valid_directions.len());
        valid_directions.get(idx).copied()
    }

    fn get_valid_directions(heading: Direction) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&heading))
            .collect()
    }

    fn probe_position(world: &World, head: Vector3, dir: Direction) -> Vector3 {
        let reach = world.snake().step_size() * LOOKAHEAD_STEPS;
        head.plus(&dir.to_vector().scaled(reach))
    }

    fn is_safe_position(world: &World, pos: Vector3) -> bool {
        let terrain = world.terrain();
        let snake = world.snake();
        let margin = snake.width();
        if pos.x.abs() >= terrain.half_width() - margin || pos.z.abs() >= terrain.half_height() - margin {
            return false;
        }
        // The neck is always one step behind the head, so only later segments can block.
        !snake
            .positions()
            .iter()
            .skip(2)
            .any(|segment| segment.distance_to(&pos) < snake.step_size())
    }
}
