mod logic_loop;
mod render_loop;

pub use logic_loop::{DEFAULT_LOGIC_FREQUENCY_HZ, LogicLoop};
pub use render_loop::{DEFAULT_RENDER_FREQUENCY_HZ, RenderLoop};

use std::cell::RefCell;
use std::time::Duration;

use crate::error::{GeometryError, ensure_positive};

pub type Executor = Box<dyn FnMut()>;

/// `start` spawns on the current [`tokio::task::LocalSet`] and must be
/// called from inside one.
pub trait Loop {
    fn register_executor(&self, executor: Executor);

    fn execute(&self);

    fn start(&mut self);

    fn stop(&mut self);

    fn destroy(&mut self);

    fn is_running(&self) -> bool;
}

#[derive(Default)]
pub(crate) struct ExecutorList {
    executors: RefCell<Vec<Executor>>,
}

impl ExecutorList {
    pub(crate) fn register(&self, executor: Executor) {
        self.executors.borrow_mut().push(executor);
    }

    /// # Panics
    ///
    /// Panics if an executor registers another executor on the same list
    /// while it runs.
    pub(crate) fn execute(&self) {
        for executor in self.executors.borrow_mut().iter_mut() {
            executor();
        }
    }

    pub(crate) fn clear(&self) {
        self.executors.borrow_mut().clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.executors.borrow().len()
    }
}

pub(crate) fn period_from_frequency(name: &'static str, frequency_hz: f64) -> Result<Duration, GeometryError> {
    ensure_positive(name, frequency_hz)?;
    Duration::try_from_secs_f64(1.0 / frequency_hz)
        .map_err(|_| GeometryError::NonPositive { name, value: frequency_hz })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_executors_run_in_registration_order() {
        let list = ExecutorList::default();
        let order = Rc::new(RefCell::new(Vec::new()));
        for name in ["forward", "wall", "self", "food"] {
            let order = Rc::clone(&order);
            list.register(Box::new(move || order.borrow_mut().push(name)));
        }
        list.execute();
        list.execute();
        assert_eq!(
            *order.borrow(),
            vec!["forward", "wall", "self", "food", "forward", "wall", "self", "food"]
        );
        assert_eq!(list.len(), 4);
        list.clear();
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_period_from_frequency() {
        assert_eq!(period_from_frequency("f", 4.0).unwrap(), Duration::from_millis(250));
        assert!(period_from_frequency("f", 0.0).is_err());
        assert!(period_from_frequency("f", -24.0).is_err());
        assert!(period_from_frequency("f", f64::MIN_POSITIVE / 4.0).is_err());
    }
}
