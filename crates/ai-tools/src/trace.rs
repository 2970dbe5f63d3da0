use std::borrow::Cow;
use std::collections::VecDeque;

use ai_core::{Blackboard, Tick};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One recorded decision or navigation event.
///
/// `a`/`b` are tag-specific payloads (cell coordinates, counts, radii in
/// 1/16 tile). `label` carries names such as a behavior being swapped in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: Tick,
    pub tag: Cow<'static, str>,
    pub a: i64,
    pub b: i64,
    pub label: Option<String>,
}

impl TraceEvent {
    pub fn new(tick: Tick, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            a: 0,
            b: 0,
            label: None,
        }
    }

    pub fn with_a(mut self, a: i64) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: i64) -> Self {
        self.b = b;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

/// Fixed-capacity event ring. Once full, each push evicts the oldest event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    capacity: usize,
    events: VecDeque<TraceEvent>,
    dropped: u64,
}

impl TraceLog {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            events: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            dropped: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events evicted since creation.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn push(&mut self, event: TraceEvent) {
        if self.capacity == 0 {
            self.dropped += 1;
            return;
        }
        if self.events.len() >= self.capacity {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter()
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for TraceLog {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

/// Blackboard key for collecting events in-memory.
pub const TRACE_LOG: &str = "__trace.log";
/// Blackboard key for streaming events into a `Box<dyn TraceSink>`.
pub const TRACE_SINK: &str = "__trace.sink";

pub fn emit(blackboard: &mut Blackboard, event: TraceEvent) {
    if let Some(log) = blackboard.get_mut::<TraceLog>(TRACE_LOG) {
        log.push(event.clone());
    }
    if let Some(sink) = blackboard.get_mut::<Box<dyn TraceSink>>(TRACE_SINK) {
        sink.emit(event);
    }
}
