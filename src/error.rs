//! Error types shared across the crate.

use crate::event_bus::MessageKind;
use thiserror::Error;

/// Construction and configuration errors.
///
/// Construction variants are returned immediately to the caller. Configuration
/// variants raised while a component handles a phase end up in the validation
/// channel instead (see [`crate::validation`]).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("item list must not be empty")]
    EmptyItems,

    #[error("remove count must be greater than zero")]
    ZeroCount,

    #[error("cannot remove {requested} items from a sequence of {available}")]
    RemoveExceedsCount { requested: usize, available: usize },

    #[error("quadrant must be between 1 and 4, got {0}")]
    InvalidQuadrant(u8),

    #[error("{0:?} dispatched while already dispatching {1:?}")]
    ReentrantDispatch(MessageKind, MessageKind),

    #[error("a component named `{0}` is already registered")]
    DuplicateComponent(String),

    #[error("a data source named `{0}` is already registered")]
    DuplicateDataSource(String),

    #[error("axis `{axis}` referenced by `{component}` is not registered")]
    UnresolvedAxis { component: String, axis: String },

    #[error("data source `{source_name}` referenced by `{component}` is not registered")]
    UnresolvedDataSource {
        component: String,
        source_name: String,
    },

    #[error("operation on `{source_name}` carries `{found}` items, expected `{expected}`")]
    ItemTypeMismatch {
        source_name: String,
        expected: &'static str,
        found: &'static str,
    },
}
