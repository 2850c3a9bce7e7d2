//! Per-question countdown.
//!
//! Each question gets a fresh timer. When the countdown reaches zero the
//! timer tries to claim the question's `AdvanceGate`; a manual "Next" tries
//! the same claim. Only the first claim succeeds, so a question is never
//! advanced twice.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU32, Ordering};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

/// Seconds allowed per question.
pub const QUESTION_TIME_BUDGET: u32 = 30;

/// Phase of the advance for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvancePhase {
    Active,
    Advancing,
    Advanced,
}

const ACTIVE: u8 = 0;
const ADVANCING: u8 = 1;
const ADVANCED: u8 = 2;

/// Single-winner guard between timer expiry and manual advance.
#[derive(Debug)]
pub struct AdvanceGate {
    phase: AtomicU8,
}

impl AdvanceGate {
    pub fn new() -> Self {
        Self {
            phase: AtomicU8::new(ACTIVE),
        }
    }

    /// Move `Active → Advancing`. Returns false if someone already did.
    pub fn try_begin(&self) -> bool {
        self.phase
            .compare_exchange(ACTIVE, ADVANCING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn complete(&self) {
        self.phase.store(ADVANCED, Ordering::Release);
    }

    pub fn phase(&self) -> AdvancePhase {
        match self.phase.load(Ordering::Acquire) {
            ACTIVE => AdvancePhase::Active,
            ADVANCING => AdvancePhase::Advancing,
            _ => AdvancePhase::Advanced,
        }
    }
}

impl Default for AdvanceGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Events emitted by a running timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { question: usize, remaining: u32 },
    /// The countdown won the gate; the question must be advanced.
    Expired { question: usize },
}

/// Countdown for one question. Dropping it cancels the countdown.
#[derive(Debug)]
pub struct QuestionTimer {
    question: usize,
    gate: Arc<AdvanceGate>,
    remaining: Arc<AtomicU32>,
    handle: Option<JoinHandle<()>>,
}

impl QuestionTimer {
    /// Start counting down `budget` ticks of length `tick`, reporting to
    /// `events`. Must be called inside a tokio runtime.
    pub fn start<E>(
        question: usize,
        budget: u32,
        tick: Duration,
        events: UnboundedSender<E>,
    ) -> Self
    where
        E: From<TimerEvent> + Send + 'static,
    {
        let gate = Arc::new(AdvanceGate::new());
        let remaining = Arc::new(AtomicU32::new(budget));

        let task_gate = Arc::clone(&gate);
        let task_remaining = Arc::clone(&remaining);
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + tick, tick);
            loop {
                ticker.tick().await;
                let left = task_remaining.load(Ordering::Acquire).saturating_sub(1);
                task_remaining.store(left, Ordering::Release);
                let tick_event = TimerEvent::Tick {
                    question,
                    remaining: left,
                };
                if events.send(tick_event.into()).is_err() {
                    return;
                }
                if left == 0 {
                    if task_gate.try_begin() {
                        let _ = events.send(TimerEvent::Expired { question }.into());
                    }
                    return;
                }
            }
        });

        Self {
            question,
            gate,
            remaining,
            handle: Some(handle),
        }
    }

    pub fn question(&self) -> usize {
        self.question
    }

    pub fn remaining(&self) -> u32 {
        self.remaining.load(Ordering::Acquire)
    }

    pub fn phase(&self) -> AdvancePhase {
        self.gate.phase()
    }

    /// Claim the advance for a manual "Next". False if the timer already
    /// claimed it.
    pub fn claim_manual(&self) -> bool {
        self.gate.try_begin()
    }

    /// Mark the advance as applied.
    pub fn complete(&self) {
        self.gate.complete();
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for QuestionTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
