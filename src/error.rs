use thiserror::Error;

use crate::api::LifecycleState;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// `render` ran before any `datum` call bound series data.
    #[error("no data bound: call `datum` before `render`")]
    MissingData,

    /// A chart kind was assembled without a required lifecycle hook.
    #[error("chart kind `{kind}` does not implement the `{hook}` hook")]
    NotImplemented { kind: String, hook: &'static str },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("chart has been disposed")]
    Disposed,

    /// A pass tried a lifecycle step the pipeline never takes.
    #[error("illegal lifecycle transition {from:?} -> {to:?}")]
    IllegalTransition {
        from: LifecycleState,
        to: LifecycleState,
    },
}
