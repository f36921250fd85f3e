use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, ensure_non_negative, ensure_positive};
use crate::math::Vector3;

pub const MIN_INIT_LENGTH: usize = 2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeParams {
    pub position: Vector3,
    pub direction: Vector3,
    pub step_size: f64,
    pub init_length: usize,
    pub speed: f64,
    pub width: f64,
}

impl Default for SnakeParams {
    fn default() -> Self {
        Self {
            position: Vector3::ZERO,
            direction: Vector3::new(0.0, 0.0, -1.0),
            step_size: 1.0,
            init_length: MIN_INIT_LENGTH,
            speed: 0.1,
            width: 0.5,
        }
    }
}

impl SnakeParams {
    pub fn validate(&self) -> Result<(), GeometryError> {
        ensure_positive("step_size", self.step_size)?;
        ensure_positive("width", self.width)?;
        ensure_non_negative("speed", self.speed)?;
        if self.init_length < MIN_INIT_LENGTH {
            return Err(GeometryError::InitLengthTooShort {
                found: self.init_length,
                min: MIN_INIT_LENGTH,
            });
        }
        if !self.position.is_finite() {
            return Err(GeometryError::DegenerateVector { name: "position" });
        }
        if self.direction.try_normalized().is_none() {
            return Err(GeometryError::DegenerateVector { name: "direction" });
        }
        // A head closer than `width` to its neighbour would self-collide on every tick.
        if self.width >= self.step_size {
            return Err(GeometryError::WidthNotBelowStepSize {
                width: self.width,
                step_size: self.step_size,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Snake {
    direction: Vector3,
    positions: Vec<Vector3>,
    step_size: f64,
    speed: f64,
    width: f64,
    init_length: usize,
    init_position: Vector3,
    init_direction: Vector3,
    init_speed: f64,
}

impl Snake {
    pub fn new(params: &SnakeParams) -> Result<Self, GeometryError> {
        params.validate()?;
        let direction = params
            .direction
            .try_normalized()
            .ok_or(GeometryError::DegenerateVector { name: "direction" })?;

        let mut snake = Self {
            direction,
            positions: Vec::with_capacity(params.init_length),
            step_size: params.step_size,
            speed: params.speed,
            width: params.width,
            init_length: params.init_length,
            init_position: params.position,
            init_direction: direction,
            init_speed: params.speed,
        };

        // Laid out from the tail forward, then reversed so the head comes first.
        for index in 0..snake.init_length {
            snake.positions.push(snake.seeded_position(index));
        }
        snake.positions.reverse();

        Ok(snake)
    }

    fn seeded_position(&self, index_from_tail: usize) -> Vector3 {
        self.init_position
            .plus(&self.init_direction.scaled(index_from_tail as f64 * self.step_size))
    }

    pub fn positions(&self) -> &[Vector3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn head(&self) -> Vector3 {
        *self.positions.first().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Vector3 {
        *self.positions.last().expect("Snake body should never be empty")
    }

    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    pub fn raw_direction(&self) -> Vector3 {
        self.positions[0]
            .minus(&self.positions[1])
            .try_normalized()
            .unwrap_or(self.direction)
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<(), GeometryError> {
        ensure_non_negative("speed", speed)?;
        self.speed = speed;
        Ok(())
    }

    pub fn init_speed(&self) -> f64 {
        self.init_speed
    }

    pub fn reset_speed(&mut self) {
        self.speed = self.init_speed;
    }

    pub fn init_length(&self) -> usize {
        self.init_length
    }

    /// Accepts any non-zero direction, including a full reversal into the body.
    pub fn set_direction(&mut self, value: Vector3) -> Result<(), GeometryError> {
        self.direction = value
            .try_normalized()
            .ok_or(GeometryError::DegenerateVector { name: "direction" })?;
        Ok(())
    }

    pub fn forward(&mut self) {
        let step = self.direction.scaled(self.speed);
        self.positions[0].add(&step);

        let fallback = self.direction.scaled(-1.0);
        for index in 1..self.positions.len() {
            let leader = self.positions[index - 1];
            let follower = &mut self.positions[index];
            let trailing = follower.minus(&leader).try_normalized().unwrap_or(fallback);
            follower.set_from(&leader).add(&trailing.scaled(self.step_size));
        }
    }

    pub fn eat(&mut self) {
        let tail = self.tail();
        let pre_tail = self.positions[self.positions.len() - 2];
        let trailing = tail
            .minus(&pre_tail)
            .try_normalized()
            .unwrap_or_else(|| self.direction.scaled(-1.0));
        self.positions.push(tail.plus(&trailing.scaled(self.step_size)));
    }

    pub fn reset(&mut self) {
        self.positions.truncate(self.init_length);
        self.direction = self.init_direction;
        let last = self.init_length - 1;
        for slot in 0..self.init_length {
            let seeded = self.seeded_position(last - slot);
            self.positions[slot].set_from(&seeded);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_rng::SessionRng;

    const EPSILON: f64 = 1e-6;

    fn create_snake(init_length: usize, speed: f64) -> Snake {
        Snake::new(&SnakeParams {
            position: Vector3::ZERO,
            direction: Vector3::new(0.0, 0.0, -1.0),
            step_size: 1.0,
            init_length,
            speed,
            width: 0.5,
        })
        .unwrap()
    }

    fn assert_spacing(snake: &Snake) {
        for pair in snake.positions().windows(2) {
            let distance = pair[0].distance_to(&pair[1]);
            assert!(
                (distance - snake.step_size()).abs() < EPSILON,
                "segments {} and {} are {} apart",
                pair[0],
                pair[1],
                distance
            );
        }
    }

    #[test]
    fn test_construction_layout() {
        let snake = create_snake(5, 0.1);
        assert_eq!(
            snake.positions(),
            &[
                Vector3::new(0.0, 0.0, -4.0),
                Vector3::new(0.0, 0.0, -3.0),
                Vector3::new(0.0, 0.0, -2.0),
                Vector3::new(0.0, 0.0, -1.0),
                Vector3::new(0.0, 0.0, 0.0),
            ]
        );
        assert_eq!(snake.head(), Vector3::new(0.0, 0.0, -4.0));
        assert_eq!(snake.tail(), Vector3::ZERO);
    }

    #[test]
    fn test_construction_normalizes_direction() {
        let snake = Snake::new(&SnakeParams {
            direction: Vector3::new(3.0, 0.0, 4.0),
            ..SnakeParams::default()
        })
        .unwrap();
        assert!((snake.direction().length() - 1.0).abs() < EPSILON);
        assert_spacing(&snake);
    }

    #[test]
    fn test_construction_rejects_invalid_params() {
        let too_short = SnakeParams { init_length: 1, ..SnakeParams::default() };
        assert_eq!(
            Snake::new(&too_short).unwrap_err(),
            GeometryError::InitLengthTooShort { found: 1, min: 2 }
        );

        let zero_direction = SnakeParams { direction: Vector3::ZERO, ..SnakeParams::default() };
        assert_eq!(
            Snake::new(&zero_direction).unwrap_err(),
            GeometryError::DegenerateVector { name: "direction" }
        );

        let zero_step = SnakeParams { step_size: 0.0, ..SnakeParams::default() };
        assert!(Snake::new(&zero_step).is_err());

        let negative_speed = SnakeParams { speed: -0.1, ..SnakeParams::default() };
        assert!(Snake::new(&negative_speed).is_err());

        let too_wide = SnakeParams { width: 1.0, step_size: 1.0, ..SnakeParams::default() };
        assert_eq!(
            Snake::new(&too_wide).unwrap_err(),
            GeometryError::WidthNotBelowStepSize { width: 1.0, step_size: 1.0 }
        );
    }

    #[test]
    fn test_forward_moves_head_by_speed() {
        let mut snake = create_snake(3, 0.25);
        snake.forward();
        assert!(snake.head().distance_to(&Vector3::new(0.0, 0.0, -2.25)) < EPSILON);
        assert!(snake.positions()[1].distance_to(&Vector3::new(0.0, 0.0, -1.25)) < EPSILON);
        assert_spacing(&snake);
    }

    #[test]
    fn test_forward_keeps_spacing_while_turning() {
        let mut snake = create_snake(8, 0.3);
        let mut rng = SessionRng::new(2024);
        for tick in 0..400 {
            if tick % 7 == 0 {
                let turn = Vector3::new(
                    rng.random_range(-1.0..1.0),
                    0.0,
                    rng.random_range(-1.0..1.0),
                );
                if turn.try_normalized().is_some() {
                    snake.set_direction(turn).unwrap();
                }
            }
            if tick % 50 == 0 {
                snake.eat();
            }
            snake.forward();
            assert_spacing(&snake);
        }
    }

    #[test]
    fn test_forward_into_own_neighbour_keeps_spacing() {
        let mut snake = create_snake(4, 1.0);
        snake.set_direction(Vector3::new(0.0, 0.0, 1.0)).unwrap();
        snake.forward();
        assert_eq!(snake.head(), Vector3::new(0.0, 0.0, -2.0));
        assert!(snake.positions().iter().all(|p| p.is_finite()));
        assert_spacing(&snake);
    }

    #[test]
    fn test_set_direction_normalizes_and_rejects_zero() {
        let mut snake = create_snake(2, 0.1);
        snake.set_direction(Vector3::new(5.0, 0.0, 0.0)).unwrap();
        assert_eq!(snake.direction(), Vector3::new(1.0, 0.0, 0.0));

        assert!(snake.set_direction(Vector3::ZERO).is_err());
        assert_eq!(snake.direction(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_eat_appends_one_segment_behind_tail() {
        let mut snake = create_snake(5, 0.1);
        for _ in 0..3 {
            snake.forward();
        }
        let before = snake.positions().to_vec();
        snake.eat();

        assert_eq!(snake.len(), before.len() + 1);
        assert_eq!(&snake.positions()[..before.len()], before.as_slice());
        let tail = snake.tail();
        assert!((tail.distance_to(&before[before.len() - 1]) - 1.0).abs() < EPSILON);
        assert!(tail.distance_to(&Vector3::new(0.0, 0.0, 0.7)) < EPSILON);
    }

    #[test]
    fn test_reset_restores_construction_state() {
        let mut snake = create_snake(5, 0.4);
        let initial_positions = snake.positions().to_vec();
        let initial_direction = snake.direction();

        snake.set_direction(Vector3::new(1.0, 0.0, 0.0)).unwrap();
        for _ in 0..10 {
            snake.forward();
        }
        snake.eat();
        snake.eat();
        snake.set_direction(Vector3::new(0.0, 0.0, 1.0)).unwrap();
        snake.forward();

        snake.reset();
        assert_eq!(snake.positions(), initial_positions.as_slice());
        assert_eq!(snake.direction(), initial_direction);
    }

    #[test]
    fn test_reset_keeps_speed_until_reset_speed() {
        let mut snake = create_snake(3, 0.1);
        snake.set_speed(0.5).unwrap();
        snake.reset();
        assert_eq!(snake.speed(), 0.5);
        snake.reset_speed();
        assert_eq!(snake.speed(), 0.1);
    }

    #[test]
    fn test_raw_direction_follows_body() {
        let mut snake = create_snake(3, 0.5);
        snake.set_direction(Vector3::new(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(snake.raw_direction(), Vector3::new(0.0, 0.0, -1.0));
        snake.forward();
        let raw = snake.raw_direction();
        assert!((raw.length() - 1.0).abs() < EPSILON);
        assert!(raw.x > 0.0 && raw.z < 0.0);
    }
}
