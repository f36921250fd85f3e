use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::config::{GameConfig, Validate};
use crate::error::GameError;
use crate::event::{
    FoodCollisionHandler, FoodCollisionPublisher, GameOverHandler, SelfCollisionPublisher,
    StateChangeHandler, StateChangePublisher, WallCollisionPublisher,
};
use crate::input::Direction;
use crate::log;
use crate::render::RenderProvider;
use crate::scheduler::{LogicLoop, Loop, RenderLoop};
use crate::session_rng::SessionRng;
use crate::state::{GameState, StateManager};
use crate::world::{Food, Snake, Terrain, World};

pub struct Game<R: RenderProvider + 'static> {
    world: Rc<RefCell<World>>,
    state_manager: Rc<StateManager>,
    renderer: Rc<RefCell<R>>,
    render_loop: RenderLoop,
    logic_loop: LogicLoop,
}

impl<R: RenderProvider + 'static> Game<R> {
    pub fn new(config: &GameConfig, renderer: R, rng: SessionRng) -> Result<Self, GameError> {
        config.validate().map_err(GameError::Config)?;

        let snake = Snake::new(&config.snake)?;
        let terrain = Terrain::new(config.terrain.width, config.terrain.height)?;
        let food = Food::new(config.food.initial_position, config.food.radius)?;
        let world = Rc::new(RefCell::new(
            World::new(snake, terrain, food).with_speed_reset(config.reset_speed_on_reset),
        ));
        let state_manager = Rc::new(StateManager::new(GameState::PreGame));
        let renderer = Rc::new(RefCell::new(renderer));
        let render_loop = RenderLoop::from_frequency(config.loops.render_frequency_hz)?;
        let logic_loop = LogicLoop::from_frequency(config.loops.logic_frequency_hz)?;
        let seed = rng.seed();

        {
            let world = Rc::clone(&world);
            let renderer = Rc::clone(&renderer);
            render_loop.register_executor(Box::new(move || {
                renderer.borrow_mut().render(&world.borrow());
            }));
        }

        {
            let world = Rc::clone(&world);
            let state_manager = Rc::clone(&state_manager);
            logic_loop.register_executor(Box::new(move || {
                if state_manager.state() == GameState::InGame {
                    world.borrow_mut().snake_mut().forward();
                }
            }));
        }

        let wall_collision = WallCollisionPublisher::new(Rc::clone(&world));
        wall_collision.register_event_handler(Rc::new(GameOverHandler::on_wall_collision(
            Rc::clone(&state_manager),
        )));
        logic_loop.register_executor(Box::new(move || wall_collision.check()));

        let self_collision = SelfCollisionPublisher::new(Rc::clone(&world));
        self_collision.register_event_handler(Rc::new(GameOverHandler::on_self_collision(
            Rc::clone(&state_manager),
        )));
        logic_loop.register_executor(Box::new(move || self_collision.check()));

        let food_collision = FoodCollisionPublisher::new(Rc::clone(&world));
        let food_latch_reset = food_collision.latch_reset_handler();
        food_collision.register_event_handler(Rc::new(FoodCollisionHandler::new(
            Rc::clone(&world),
            rng,
            config.food.padding,
            config.growth,
        )?));
        logic_loop.register_executor(Box::new(move || food_collision.check()));

        let state_change = StateChangePublisher::attach(&state_manager);
        state_change.register_event_handler(Rc::new(StateChangeHandler::new(Rc::clone(&world))));
        state_change.register_event_handler(food_latch_reset);

        log!(
            "Game created: terrain {}x{}, snake length {}, seed {}",
            config.terrain.width,
            config.terrain.height,
            config.snake.init_length,
            seed
        );

        Ok(Self {
            world,
            state_manager,
            renderer,
            render_loop,
            logic_loop,
        })
    }

    pub fn start(&mut self) {
        self.logic_loop.start();
        self.render_loop.start();
    }

    pub fn destroy(&mut self) {
        self.logic_loop.destroy();
        self.render_loop.destroy();
        log!("Game destroyed with score {}", self.score());
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.renderer.borrow_mut().resize(width, height);
        log!("Viewport resized to {}x{}", width, height);
    }

    pub fn reset(&self) {
        self.state_manager.set_state(GameState::InGame);
    }

    pub fn score(&self) -> usize {
        let world = self.world.borrow();
        world.snake().len().saturating_sub(world.snake().init_length())
    }

    pub fn state_manager(&self) -> &Rc<StateManager> {
        &self.state_manager
    }

    pub fn world(&self) -> &Rc<RefCell<World>> {
        &self.world
    }

    pub fn logic_period(&self) -> Duration {
        self.logic_loop.period()
    }

    pub fn renderer(&self) -> Ref<'_, R> {
        self.renderer.borrow()
    }

    pub fn tick(&self) {
        self.logic_loop.execute();
    }

    pub fn render(&self) {
        self.render_loop.execute();
    }

    pub fn steer(&self, direction: Direction) -> Result<bool, GameError> {
        let mut world = self.world.borrow_mut();
        let snake = world.snake_mut();
        // Judged against where the body points, not the last input.
        let heading = Direction::nearest(&snake.raw_direction());
        if heading.is_some_and(|heading| heading.is_opposite(&direction)) {
            return Ok(false);
        }
        if Direction::nearest(&snake.direction()) == Some(direction) {
            return Ok(false);
        }
        snake.set_direction(direction.to_vector())?;
        Ok(true)
    }
}
