mod ocr;
pub use ocr::*;

mod llm;
pub use llm::*;

pub mod preprocess;
pub mod prompt;
pub mod summarizer;

pub use summarizer::DiagramSummarizer;
