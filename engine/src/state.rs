use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::log;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    PreGame,
    InGame,
    EndGame,
}

pub type StateListener = Rc<dyn Fn(GameState)>;

pub struct StateManager {
    state: Cell<GameState>,
    listeners: RefCell<Vec<StateListener>>,
    internal_listeners: RefCell<Vec<StateListener>>,
}

impl StateManager {
    pub fn new(initial: GameState) -> Self {
        Self {
            state: Cell::new(initial),
            listeners: RefCell::new(Vec::new()),
            internal_listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn state(&self) -> GameState {
        self.state.get()
    }

    pub fn register_state_listener(&self, listener: impl Fn(GameState) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub(crate) fn register_internal_listener(&self, listener: impl Fn(GameState) + 'static) {
        self.internal_listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn set_state(&self, state: GameState) {
        let previous = self.state.replace(state);
        log!("State {:?} -> {:?}", previous, state);

        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(state);
        }
        let internal = self.internal_listeners.borrow().clone();
        for listener in internal {
            listener(state);
        }
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new(GameState::PreGame)
    }
}
