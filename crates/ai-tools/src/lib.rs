//! Trace recording for deterministic bot agents.
//!
//! Events are kept in the agent's blackboard so any node or the controller can
//! record without extra plumbing. Hosts that want live output install a sink.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{
    emit, NullTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink, TRACE_LOG, TRACE_SINK,
};
