//! Library side of the `referendum` command: logging setup and the pipeline.

pub mod logging;
pub mod pipeline;
