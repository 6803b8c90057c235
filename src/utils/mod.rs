pub mod logger;
pub mod profiler;
