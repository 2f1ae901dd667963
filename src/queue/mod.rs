// Command dispatch queue
//
// One global FIFO shared by every agent: the controller appends at the tail,
// whichever agent polls next takes the head. There is no per-target sub-queue;
// an agent that receives a command addressed to someone else discards it on
// its own side.

use crate::command::Command;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

/// Error returned when the queue is at capacity.
///
/// The newest submission is the one rejected; nothing already queued is
/// dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueFull {
    pub capacity: usize,
}

impl fmt::Display for QueueFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "command queue is full (capacity {})", self.capacity)
    }
}

impl std::error::Error for QueueFull {}

/// Bounded FIFO of pending commands.
///
/// All access goes through one mutex, so each enqueue and dequeue is atomic:
/// submission order is preserved across targets, and under concurrent polls
/// a command is handed to exactly one caller. Dequeue on an empty queue
/// returns None immediately — consumption is poll-based, nothing blocks
/// waiting for work to arrive.
pub struct CommandQueue {
    pending: Mutex<VecDeque<Command>>,
    capacity: usize,
}

impl CommandQueue {
    /// Creates a queue holding at most `capacity` pending commands.
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            capacity,
        }
    }

    /// Appends a command at the tail.
    ///
    /// Overflow policy is reject-newest: at capacity the submission fails
    /// with QueueFull and the queue is unchanged.
    pub fn enqueue(&self, cmd: Command) -> Result<(), QueueFull> {
        let mut pending = self.lock();
        if pending.len() >= self.capacity {
            return Err(QueueFull {
                capacity: self.capacity,
            });
        }
        pending.push_back(cmd);
        Ok(())
    }

    /// Appends a batch at the tail under a single lock acquisition.
    ///
    /// All-or-nothing: if the whole batch does not fit, nothing is queued.
    /// Order within the batch is preserved, and no other submission can
    /// interleave into the middle of it.
    pub fn enqueue_many(&self, cmds: Vec<Command>) -> Result<(), QueueFull> {
        let mut pending = self.lock();
        if pending.len() + cmds.len() > self.capacity {
            return Err(QueueFull {
                capacity: self.capacity,
            });
        }
        pending.extend(cmds);
        Ok(())
    }

    /// Removes and returns the head command, or None when the queue is empty.
    ///
    /// An empty queue is a normal outcome for a polling consumer, not an
    /// error.
    pub fn dequeue(&self) -> Option<Command> {
        self.lock().pop_front()
    }

    /// Number of commands currently pending.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Command>> {
        self.pending.lock().expect("command queue lock poisoned")
    }
}
