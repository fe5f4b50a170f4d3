pub mod classify;
pub mod horizon;
pub mod interpolate;
pub mod metrics;
pub mod portfolio;
pub mod runs;

pub use classify::{is_interesting, ClassifierParams};
pub use horizon::{Horizon, HorizonMetrics};
pub use interpolate::value_at_time;
pub use metrics::{percent_change, MetricField, RangeMetrics};
pub use portfolio::percent_gain;
pub use runs::{detect_runs, Run, RunParams};
