/*!
 * Blocking Task Queue
 *
 * The simplest correct concurrent FIFO: a deque behind one mutex. "Blocking"
 * refers to the brief mutual exclusion on the lock; an empty `pop` returns
 * immediately with `None` rather than waiting for a producer.
 */

use parking_lot::Mutex;
use std::collections::VecDeque;

use super::Task;

/// Mutex-guarded FIFO queue of tasks
pub struct BlockingTaskQueue<'a> {
    tasks: Mutex<VecDeque<Task<'a>>>,
}

impl<'a> BlockingTaskQueue<'a> {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(VecDeque::new()),
        }
    }

    /// Append a task to the back of the queue
    #[inline]
    pub fn push(&self, task: Task<'a>) {
        self.tasks.lock().push_back(task);
    }

    /// Remove and return the front task, or `None` if the queue is empty
    #[inline]
    pub fn pop(&self) -> Option<Task<'a>> {
        self.tasks.lock().pop_front()
    }

    /// Number of queued tasks at this instant (racy, for diagnostics)
    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }
}

impl Default for BlockingTaskQueue<'_> {
    fn default() -> Self {
        Self::new()
    }
}
