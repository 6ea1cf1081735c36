// src/quiz/session.rs

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, RwLock},
    time::{Duration, Instant},
};

use tokio::task::AbortHandle;
use uuid::Uuid;

use crate::{
    models::question::Question,
    quiz::engine::{AdvanceTicket, QuizEngine, QuizError, QuizSnapshot, SubmitOutcome},
    utils::sound::{FeedbackSink, SignalQueue, SoundEffect},
};

/// One live quiz run together with its scheduled auto-advance.
///
/// The advance task only holds a weak reference to the engine and is
/// aborted when the session is torn down, so it never touches a disposed run.
pub struct QuizSession {
    id: Uuid,
    engine: Arc<Mutex<QuizEngine>>,
    signals: Arc<SignalQueue>,
    pending_advance: Mutex<Option<AbortHandle>>,
    advance_delay: Duration,
    last_touched: Mutex<Instant>,
}

impl QuizSession {
    pub fn start(questions: &'static [Question], advance_delay: Duration) -> Result<Self, QuizError> {
        let signals = Arc::new(SignalQueue::new());
        let feedback: Arc<dyn FeedbackSink> = signals.clone();
        let engine = QuizEngine::new(questions, feedback)?;

        Ok(Self {
            id: Uuid::new_v4(),
            engine: Arc::new(Mutex::new(engine)),
            signals,
            pending_advance: Mutex::new(None),
            advance_delay,
            last_touched: Mutex::new(Instant::now()),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        lock(&self.engine).snapshot()
    }

    /// Signals emitted since the last call, oldest first.
    pub fn drain_signals(&self) -> Vec<SoundEffect> {
        self.signals.drain()
    }

    /// Answers the current question and schedules the move to the next one.
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, choice_index: usize) -> Result<SubmitOutcome, QuizError> {
        self.touch();
        let outcome = lock(&self.engine).submit(choice_index)?;
        if let SubmitOutcome::Answered { ticket, .. } = outcome {
            self.schedule_advance(ticket);
        }
        Ok(outcome)
    }

    pub fn restart(&self) {
        self.touch();
        self.cancel_pending();
        lock(&self.engine).restart();
    }

    /// Whether an auto-advance is still waiting to fire.
    pub fn has_pending_advance(&self) -> bool {
        lock(&self.pending_advance)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Aborts the scheduled advance, if any.
    pub fn cancel_pending(&self) {
        if let Some(handle) = lock(&self.pending_advance).take() {
            handle.abort();
        }
    }

    /// When the run was last started, played or looked at.
    pub fn last_touched(&self) -> Instant {
        *lock(&self.last_touched)
    }

    fn touch(&self) {
        *lock(&self.last_touched) = Instant::now();
    }

    fn schedule_advance(&self, ticket: AdvanceTicket) {
        let engine = Arc::downgrade(&self.engine);
        let delay = self.advance_delay;
        let session_id = self.id;

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match engine.upgrade() {
                Some(engine) => {
                    let advanced = lock(&engine).advance(ticket);
                    tracing::debug!(%session_id, advanced, "quiz auto-advance fired");
                }
                None => tracing::debug!(%session_id, "quiz session gone, skipping advance"),
            }
        });

        if let Some(previous) = lock(&self.pending_advance).replace(task.abort_handle()) {
            previous.abort();
        }
    }
}

impl Drop for QuizSession {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

impl std::fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("advance_delay", &self.advance_delay)
            .finish_non_exhaustive()
    }
}

/// All quiz runs hosted by this process, bounded by `capacity`.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<QuizSession>>>,
    questions: &'static [Question],
    advance_delay: Duration,
    capacity: usize,
}

impl SessionRegistry {
    pub fn new(questions: &'static [Question], advance_delay: Duration, capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            questions,
            advance_delay,
            capacity: capacity.max(1),
        }
    }

    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }

    /// Starts a new run, evicting the least recently used one when full.
    pub fn start(&self) -> Result<Arc<QuizSession>, QuizError> {
        let session = Arc::new(QuizSession::start(self.questions, self.advance_delay)?);

        let mut sessions = write(&self.sessions);
        while sessions.len() >= self.capacity {
            let Some(oldest) = sessions
                .values()
                .min_by_key(|s| s.last_touched())
                .map(|s| s.id())
            else {
                break;
            };
            if let Some(evicted) = sessions.remove(&oldest) {
                tracing::info!(session_id = %oldest, "evicting idle quiz session");
                evicted.cancel_pending();
            }
        }
        sessions.insert(session.id(), Arc::clone(&session));

        tracing::info!(session_id = %session.id(), "quiz session started");
        Ok(session)
    }

    /// Looks a run up and marks it as in use.
    pub fn get(&self, id: &Uuid) -> Option<Arc<QuizSession>> {
        let session = read(&self.sessions).get(id).cloned()?;
        session.touch();
        Some(session)
    }

    /// Tears a run down. Returns `false` if it did not exist.
    pub fn end(&self, id: &Uuid) -> bool {
        let removed = write(&self.sessions).remove(id);
        match removed {
            Some(session) => {
                session.cancel_pending();
                tracing::info!(session_id = %id, "quiz session ended");
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        read(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn read<T>(rw: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    rw.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(rw: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    rw.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
