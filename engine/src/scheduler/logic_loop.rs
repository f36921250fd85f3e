use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use super::{Executor, ExecutorList, Loop, period_from_frequency};
use crate::error::GeometryError;
use crate::log;

pub const DEFAULT_LOGIC_FREQUENCY_HZ: f64 = 24.0;

pub struct LogicLoop {
    executors: Rc<ExecutorList>,
    ticks: Rc<Cell<u64>>,
    period: Duration,
    handle: Option<JoinHandle<()>>,
    destroyed: bool,
}

impl LogicLoop {
    pub fn new(period: Duration) -> Self {
        Self {
            executors: Rc::new(ExecutorList::default()),
            ticks: Rc::new(Cell::new(0)),
            period,
            handle: None,
            destroyed: false,
        }
    }

    pub fn from_frequency(frequency_hz: f64) -> Result<Self, GeometryError> {
        Ok(Self::new(period_from_frequency("logic frequency", frequency_hz)?))
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for LogicLoop {
    fn default() -> Self {
        Self::new(Duration::from_secs_f64(1.0 / DEFAULT_LOGIC_FREQUENCY_HZ))
    }
}

impl Loop for LogicLoop {
    fn register_executor(&self, executor: Executor) {
        self.executors.register(executor);
    }

    fn execute(&self) {
        self.executors.execute();
    }

    fn start(&mut self) {
        if self.destroyed {
            log!("Logic loop was destroyed, not starting");
            return;
        }
        if self.is_running() {
            return;
        }

        let executors = Rc::clone(&self.executors);
        let ticks = Rc::clone(&self.ticks);
        let period = self.period;
        self.handle = Some(tokio::task::spawn_local(async move {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                executors.execute();
                ticks.set(ticks.get() + 1);
            }
        }));
        log!("Logic loop started, one tick every {:?}", period);
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            log!("Logic loop stopped after {} ticks", self.ticks.get());
        }
    }

    fn destroy(&mut self) {
        self.stop();
        if !self.destroyed {
            log!("Logic loop destroyed, releasing {} executors", self.executors.len());
        }
        self.executors.clear();
        self.destroyed = true;
    }

    fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for LogicLoop {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
