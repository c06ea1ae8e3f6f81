pub mod llm;
pub mod translate;
pub mod video_index;
