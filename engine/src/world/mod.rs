mod food;
mod snake;
mod terrain;

pub use food::Food;
pub use snake::{MIN_INIT_LENGTH, Snake, SnakeParams};
pub use terrain::Terrain;

use crate::log;

#[derive(Clone, Debug)]
pub struct World {
    snake: Snake,
    terrain: Terrain,
    food: Food,
    reset_speed_on_reset: bool,
}

impl World {
    pub fn new(snake: Snake, terrain: Terrain, food: Food) -> Self {
        Self {
            snake,
            terrain,
            food,
            reset_speed_on_reset: false,
        }
    }

    pub fn with_speed_reset(mut self, reset_speed_on_reset: bool) -> Self {
        self.reset_speed_on_reset = reset_speed_on_reset;
        self
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn food_mut(&mut self) -> &mut Food {
        &mut self.food
    }

    pub fn reset(&mut self) {
        self.snake.reset();
        if self.reset_speed_on_reset {
            self.snake.reset_speed();
        }
        log!(
            "World reset: {} segments, head at {}, speed {:.3}",
            self.snake.len(),
            self.snake.head(),
            self.snake.speed()
        );
    }
}
