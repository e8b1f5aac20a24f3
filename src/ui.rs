//! UI thread dispatch
//!
//! Tray callbacks arrive on an OS event thread and must never touch window
//! state directly. They post a [`UiTask`] through [`UiRuntime::run_later`]
//! instead, and the UI thread runs posted tasks in submission order.

use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, PoisonError};

use crate::error::Result;

/// A unit of work to run on the UI thread
pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

/// The UI runtime the platform layer drives
pub trait UiRuntime: Send + Sync {
    /// Queue a task for the UI thread. Tasks run in submission order.
    fn run_later(&self, task: UiTask);

    /// Whether the runtime exits once its last window is gone
    fn set_implicit_exit(&self, implicit_exit: bool);

    fn implicit_exit(&self) -> bool;

    /// Ask the UI runtime to stop cooperatively
    fn exit(&self) -> Result<()>;
}

/// Channel-backed runtime whose tasks are run by calling [`TaskQueue::drain`]
/// from the UI thread
pub struct TaskQueue {
    sender: Sender<UiTask>,
    receiver: Mutex<Receiver<UiTask>>,
    implicit_exit: AtomicBool,
    exit_requested: AtomicBool,
}

impl TaskQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver: Mutex::new(receiver),
            implicit_exit: AtomicBool::new(true),
            exit_requested: AtomicBool::new(false),
        }
    }

    /// Run every queued task on the calling thread, returning how many ran
    pub fn drain(&self) -> usize {
        let receiver = self.receiver.lock().unwrap_or_else(PoisonError::into_inner);
        let mut ran = 0;
        while let Ok(task) = receiver.try_recv() {
            task();
            ran += 1;
        }
        ran
    }

    /// Whether [`UiRuntime::exit`] has been called
    pub fn exit_requested(&self) -> bool {
        self.exit_requested.load(Ordering::SeqCst)
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRuntime for TaskQueue {
    fn run_later(&self, task: UiTask) {
        if self.exit_requested() {
            debug!("UI runtime is exiting, dropping task");
            return;
        }
        // The receiver lives as long as `self`, so sending cannot fail here
        let _ = self.sender.send(task);
    }

    fn set_implicit_exit(&self, implicit_exit: bool) {
        self.implicit_exit.store(implicit_exit, Ordering::SeqCst);
    }

    fn implicit_exit(&self) -> bool {
        self.implicit_exit.load(Ordering::SeqCst)
    }

    fn exit(&self) -> Result<()> {
        self.exit_requested.store(true, Ordering::SeqCst);
        Ok(())
    }
}
