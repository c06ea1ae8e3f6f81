pub mod event;
pub mod frame;
pub mod ledger;
pub mod segmenter;
pub mod sequence;
pub mod telemetry;
