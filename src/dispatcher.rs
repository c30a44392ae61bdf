//! Single-context event dispatcher.
//!
//! ```text
//!  ┌─────────────┐  poll   ┌───────────┐  drain  ┌──────────────────┐
//!  │ Scheduler   │───────▶ │           │ ──────▶ │ handler(ctx, p)  │
//!  │ Source 0..N │───────▶ │   FIFO    │         │ action(ctx)      │
//!  └─────────────┘         └───────────┘         └──────────────────┘
//! ```
//!
//! Each cycle collects due periodic ticks first, then polls every source
//! once in registration order, then drains the FIFO, delivering each event
//! to its handlers in registration order.  Exactly one handler runs at a
//! time and every handler runs to completion, holds included, before the
//! next event is looked at.  The context `C` is borrowed mutably for the
//! whole drain, so nothing else can touch it: the borrow checker is the
//! locking discipline.
//!
//! A handler that panics takes the station down with it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;
use heapless::{Deque, Vec};
use log::{info, warn};

use crate::app::ports::Clock;
use crate::error::DispatchError;
use crate::events::{Payload, SourceId, StationEvent, TaskId};
use crate::scheduler::{MAX_TASKS, Scheduler, SchedulerDelegate, TaskFn};
use crate::sensors::EventSource;

/// Maximum number of event sources.
pub const MAX_SOURCES: usize = 8;
/// Maximum number of (source, handler) bindings.
pub const MAX_HANDLERS: usize = 16;
/// One cycle enqueues at most one event per source plus one tick per task,
/// and the queue is empty again when the cycle ends.
pub const QUEUE_CAP: usize = MAX_SOURCES + MAX_TASKS;

/// Signature of an event handler.
pub type HandlerFn<C> = fn(&mut C, &Payload);

// ---------------------------------------------------------------------------
// Stop signal
// ---------------------------------------------------------------------------

/// Cloneable flag that ends [`Dispatcher::run`] at the next cycle boundary.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

struct Binding<C> {
    source: SourceId,
    handler: HandlerFn<C>,
}

pub struct Dispatcher<C> {
    sources: Vec<Box<dyn EventSource>, MAX_SOURCES>,
    bindings: Vec<Binding<C>, MAX_HANDLERS>,
    scheduler: Scheduler<C>,
    queue: Deque<StationEvent, QUEUE_CAP>,
    poll_interval_ms: u32,
    stop: StopSignal,
    cycles: u64,
    delivered: u64,
}

impl<C> Dispatcher<C> {
    pub fn new(poll_interval_ms: u32) -> Self {
        Self {
            sources: Vec::new(),
            bindings: Vec::new(),
            scheduler: Scheduler::new(),
            queue: Deque::new(),
            poll_interval_ms,
            stop: StopSignal::new(),
            cycles: 0,
            delivered: 0,
        }
    }

    // ── Registration ──────────────────────────────────────────

    /// Add an event source.  Sources are polled in the order they are added.
    pub fn add_source(&mut self, source: Box<dyn EventSource>) -> Result<SourceId, DispatchError> {
        let id = SourceId(self.sources.len() as u8);
        let name = source.name();
        self.sources
            .push(source)
            .map_err(|_| DispatchError::SourceTableFull)?;
        info!("Dispatcher: source '{}' at slot {}", name, id.index());
        Ok(id)
    }

    /// Bind `handler` to `source`.  Handlers on one source run in the order
    /// they were registered.
    pub fn register(&mut self, source: SourceId, handler: HandlerFn<C>) -> Result<(), DispatchError> {
        if source.index() >= self.sources.len() {
            return Err(DispatchError::UnknownSource(source));
        }
        self.bindings
            .push(Binding { source, handler })
            .map_err(|_| DispatchError::HandlerTableFull)
    }

    /// Run `action` every `interval_ms`.
    pub fn register_periodic(
        &mut self,
        label: &'static str,
        interval_ms: u32,
        action: TaskFn<C>,
    ) -> Result<TaskId, DispatchError> {
        self.scheduler.add(label, interval_ms, action)
    }

    // ── Execution ─────────────────────────────────────────────

    /// Handle that ends [`run`](Self::run) from any thread.
    pub fn stop_handle(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Loop cycles, `poll_interval_ms` apart, until stopped.
    pub fn run(&mut self, ctx: &mut C, clock: &impl Clock, idle: &mut impl DelayNs) {
        info!(
            "Dispatcher running: {} sources, {} handlers, {} periodic tasks, {}ms poll",
            self.sources.len(),
            self.bindings.len(),
            self.scheduler.len(),
            self.poll_interval_ms
        );
        while !self.stop.is_stopped() {
            self.run_cycle(ctx, clock.now_ms());
            idle.delay_ms(self.poll_interval_ms);
        }
        info!(
            "Dispatcher stopped after {} cycles, {} deliveries",
            self.cycles, self.delivered
        );
    }

    /// One collect-and-drain cycle at `now_ms`.  Returns the number of
    /// handler and action invocations.
    pub fn run_cycle(&mut self, ctx: &mut C, now_ms: u64) -> usize {
        self.cycles += 1;
        self.collect(now_ms);
        self.drain(ctx)
    }

    fn collect(&mut self, now_ms: u64) {
        let mut enqueue = Enqueue(&mut self.queue);
        self.scheduler.poll(now_ms, &mut enqueue);

        for (i, source) in self.sources.iter_mut().enumerate() {
            if let Some(payload) = source.poll() {
                enqueue.push(StationEvent::Source {
                    id: SourceId(i as u8),
                    payload,
                });
            }
        }
    }

    fn drain(&mut self, ctx: &mut C) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.queue.pop_front() {
            match event {
                StationEvent::Source { id, payload } => {
                    for binding in self.bindings.iter().filter(|b| b.source == id) {
                        (binding.handler)(ctx, &payload);
                        delivered += 1;
                    }
                }
                StationEvent::Tick(task) => {
                    if let Some(action) = self.scheduler.action(task) {
                        action(ctx);
                        delivered += 1;
                    }
                }
            }
        }
        self.delivered += delivered as u64;
        delivered
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn handler_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn task_count(&self) -> usize {
        self.scheduler.len()
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

/// Scheduler delegate that appends ticks to the FIFO.
struct Enqueue<'a>(&'a mut Deque<StationEvent, QUEUE_CAP>);

impl Enqueue<'_> {
    fn push(&mut self, event: StationEvent) {
        if let Err(event) = self.0.push_back(event) {
            warn!("Dispatcher queue full, dropped {:?}", event);
        }
    }
}

impl SchedulerDelegate for Enqueue<'_> {
    fn on_task_due(&mut self, id: TaskId, _label: &'static str) {
        self.push(StationEvent::Tick(id));
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
