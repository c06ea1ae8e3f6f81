pub mod config;
pub mod kernel;
pub mod services;
pub mod session;
pub mod vision;

// Entry points most callers need
pub use config::Config;
pub use kernel::segmenter::GestureSegmenter;
pub use services::translate::cascade::TranslationCascade;
pub use session::RecognitionSession;
