//! # Task Management System
//!
//! Runs a single [`Task`] on a dedicated background thread.
//!
//! ## Architecture Overview
//! - `ChunkUpdateWorker`: owns the thread, its wake channel and its cancel flag
//! - `Task`: the step the worker repeats
//! - `WorkerSignal`: messages from the main thread to the worker
//!
//! ## Worker Lifecycle
//! 1. The worker is spawned with its task
//! 2. It calls `Task::process` while the task reports progress
//! 3. When the task goes idle the worker blocks on its channel
//! 4. `notify()` wakes it after the main thread adds work
//! 5. Dropping the handle raises the cancel flag, sends `Shutdown` and joins
//!
//! The cancel flag is checked between steps, so shutdown waits for at most
//! one step to finish.

pub mod task;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::Context;
use log::{error, info};
use task::{Task, TaskStatus};

/// Messages sent from the main thread to the worker.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WorkerSignal {
    /// New work may be available.
    Wake,
    /// Stop after the current step.
    Shutdown,
}

/// Handle to the background thread running a [`Task`].
#[derive(Debug)]
pub struct ChunkUpdateWorker {
    signal_sender: Sender<WorkerSignal>,
    cancelled: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl ChunkUpdateWorker {
    /// Name given to the worker thread.
    pub const THREAD_NAME: &'static str = "chunk-update";

    /// Spawns the worker thread. It starts by processing `task` immediately.
    ///
    /// # Errors
    /// Fails if the operating system refuses to create the thread.
    pub fn spawn(task: Box<dyn Task>) -> anyhow::Result<Self> {
        let (signal_sender, signal_receiver) = channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let worker_cancelled = cancelled.clone();

        let worker = thread::Builder::new()
            .name(Self::THREAD_NAME.to_owned())
            .spawn(move || run_worker(task, signal_receiver, worker_cancelled))
            .context("failed to spawn the chunk update thread")?;

        info!("Spawned {} worker", Self::THREAD_NAME);
        Ok(ChunkUpdateWorker {
            signal_sender,
            cancelled,
            worker: Some(worker),
        })
    }

    /// Wakes the worker if it is waiting for work.
    pub fn notify(&self) {
        // A send error means the worker has already exited.
        let _ = self.signal_sender.send(WorkerSignal::Wake);
    }

    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|worker| !worker.is_finished())
    }
}

fn run_worker(mut task: Box<dyn Task>, signals: Receiver<WorkerSignal>, cancelled: Arc<AtomicBool>) {
    while !cancelled.load(Ordering::Acquire) {
        match task.process() {
            TaskStatus::Progressed => continue,
            TaskStatus::Idle => match signals.recv() {
                Ok(WorkerSignal::Wake) => {}
                Ok(WorkerSignal::Shutdown) | Err(_) => break,
            },
        }
    }
}

impl Drop for ChunkUpdateWorker {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        let _ = self.signal_sender.send(WorkerSignal::Shutdown);

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("{} worker panicked", Self::THREAD_NAME);
            } else {
                info!("Stopped {} worker", Self::THREAD_NAME);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::{Duration, Instant};

    /// Consumes `budget` units, one per step.
    struct CountingTask {
        budget: Arc<AtomicUsize>,
        done: Arc<AtomicUsize>,
    }

    impl Task for CountingTask {
        fn process(&mut self) -> TaskStatus {
            let taken = self
                .budget
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |left| left.checked_sub(1));
            match taken {
                Ok(_) => {
                    self.done.fetch_add(1, Ordering::AcqRel);
                    TaskStatus::Progressed
                }
                Err(_) => TaskStatus::Idle,
            }
        }
    }

    fn wait_for(done: &AtomicUsize, expected: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while done.load(Ordering::Acquire) < expected && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(done.load(Ordering::Acquire), expected);
    }

    #[test]
    fn worker_drains_work_and_wakes_on_notify() {
        let budget = Arc::new(AtomicUsize::new(3));
        let done = Arc::new(AtomicUsize::new(0));
        let worker = ChunkUpdateWorker::spawn(Box::new(CountingTask {
            budget: budget.clone(),
            done: done.clone(),
        }))
        .unwrap();

        wait_for(&done, 3);
        assert!(worker.is_running());

        budget.store(2, Ordering::Release);
        worker.notify();
        wait_for(&done, 5);
    }

    #[test]
    fn drop_joins_an_idle_worker() {
        let done = Arc::new(AtomicUsize::new(0));
        let worker = ChunkUpdateWorker::spawn(Box::new(CountingTask {
            budget: Arc::new(AtomicUsize::new(0)),
            done: done.clone(),
        }))
        .unwrap();

        drop(worker);
        assert_eq!(done.load(Ordering::Acquire), 0);
    }
}
