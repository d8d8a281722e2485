/*!
 * Concurrent Task Queues
 *
 * A task queue is a thread-safe FIFO container of deferred zero-argument
 * actions. One variant exists today (mutex-guarded deque); the enum
 * dispatch mirrors the barrier module so further variants slot in without
 * touching callers.
 *
 * The lifetime parameter lets queued tasks borrow state that outlives the
 * queue (the sorting engine queues closures over its own sort context and
 * drains every queue before that context is torn down). Plain owners can
 * just use `TaskQueue<'static>`.
 */

mod blocking;

pub use blocking::BlockingTaskQueue;

/// A deferred zero-argument action
pub type Task<'a> = Box<dyn FnOnce() + Send + 'a>;

/// Queue variant selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueKind {
    /// FIFO deque behind a single mutex
    #[default]
    Blocking,
}

impl QueueKind {
    /// Parse from a symbolic tag; unknown tags yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blocking" | "queue_blocking" => Some(Self::Blocking),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Blocking => "blocking",
        }
    }
}

/// Thread-safe FIFO of tasks (enum dispatch)
pub enum TaskQueue<'a> {
    Blocking(BlockingTaskQueue<'a>),
}

impl<'a> TaskQueue<'a> {
    pub fn new(kind: QueueKind) -> Self {
        match kind {
            QueueKind::Blocking => Self::Blocking(BlockingTaskQueue::new()),
        }
    }

    /// Append a task to the back of the queue
    #[inline]
    pub fn push(&self, task: Task<'a>) {
        match self {
            Self::Blocking(q) => q.push(task),
        }
    }

    /// Remove and return the front task, or `None` if the queue is empty.
    /// Never waits for producers.
    #[inline]
    pub fn pop(&self) -> Option<Task<'a>> {
        match self {
            Self::Blocking(q) => q.pop(),
        }
    }
}

impl Default for TaskQueue<'_> {
    fn default() -> Self {
        Self::new(QueueKind::default())
    }
}

/// Factory over symbolic tags (`"blocking"`).
///
/// Unknown tags produce `None`, never a panic.
pub fn make_queue<'a>(tag: &str) -> Option<TaskQueue<'a>> {
    QueueKind::parse(tag).map(TaskQueue::new)
}
