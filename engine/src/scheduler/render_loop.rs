use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use super::{Executor, ExecutorList, Loop, period_from_frequency};
use crate::error::GeometryError;
use crate::log;

pub const DEFAULT_RENDER_FREQUENCY_HZ: f64 = 60.0;

struct FrameState {
    executors: ExecutorList,
    active: Cell<bool>,
    frames: Cell<u64>,
}

pub struct RenderLoop {
    shared: Rc<FrameState>,
    frame_period: Duration,
    handle: Option<JoinHandle<()>>,
    destroyed: bool,
}

impl RenderLoop {
    pub fn new(frame_period: Duration) -> Self {
        Self {
            shared: Rc::new(FrameState {
                executors: ExecutorList::default(),
                active: Cell::new(false),
                frames: Cell::new(0),
            }),
            frame_period,
            handle: None,
            destroyed: false,
        }
    }

    pub fn from_frequency(frequency_hz: f64) -> Result<Self, GeometryError> {
        Ok(Self::new(period_from_frequency("render frequency", frequency_hz)?))
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new(Duration::from_secs_f64(1.0 / DEFAULT_RENDER_FREQUENCY_HZ))
    }
}

impl Loop for RenderLoop {
    fn register_executor(&self, executor: Executor) {
        self.shared.executors.register(executor);
    }

    fn execute(&self) {
        self.shared.executors.execute();
    }

    fn start(&mut self) {
        if self.destroyed {
            log!("Render loop was destroyed, not starting");
            return;
        }
        self.shared.active.set(true);
        // A frame task that has not yet seen the stop keeps going.
        if self.is_running() {
            return;
        }

        let shared = Rc::clone(&self.shared);
        let period = self.frame_period;
        self.handle = Some(tokio::task::spawn_local(async move {
            let mut frames = interval(period);
            frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                frames.tick().await;
                if !shared.active.get() {
                    break;
                }
                shared.executors.execute();
                shared.frames.set(shared.frames.get() + 1);
            }
        }));
        log!("Render loop started, one frame every {:?}", period);
    }

    fn stop(&mut self) {
        if self.shared.active.replace(false) {
            log!("Render loop stopped after {} frames", self.shared.frames.get());
        }
    }

    fn destroy(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        if !self.destroyed {
            log!("Render loop destroyed, releasing {} executors", self.shared.executors.len());
        }
        self.shared.executors.clear();
        self.destroyed = true;
    }

    fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
