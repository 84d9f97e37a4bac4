// src/constants.rs

// Preprocessing policy
pub const BINARIZE_THRESHOLD: u8 = 140;
pub const UPSCALE_FACTOR: u32 = 2;
pub const MEDIAN_RADIUS: u32 = 1;
pub const CONTRAST_FACTOR: f32 = 2.0;

pub const OCR_LANGUAGE: &str = "eng";

// Multipart form field carrying the upload
pub const UPLOAD_FIELD: &str = "file";

// Response payload messages
pub const NO_TEXT_ERROR: &str = "No text could be extracted from the image.";
pub const UNEXPECTED_REPLY_ERROR: &str = "Unexpected response from Ollama";

/// Fixed instructions sent ahead of the extracted text. Model output is
/// sensitive to this wording, so it must not be edited casually.
pub const SUMMARY_INSTRUCTIONS: &str = "Please summarize the following text into a Mermaid diagram in the graph TD format.\n\n\
Make sure to use nodes and directional edges with the following structure:\n\n\
graph TD;\n  \
Title-->Header1;\n  \
Header1-->Detail;\n  \
Header1-->Detail;\n  \
Header1-->Detail;\n  \
Title-->Header2;\n  \
Header2-->Detail;\n  \
Title-->Header3;\n  \
Header3-->Detail;\n  \
Header3-->Detail;\n\
* Title Header1 and Detail1 just for the example\n\
* The number of header and detail can be different from the example\n\
* Please make sure it is a valid Mermaid diagram\n";

pub const SUMMARY_TEXT_DELIMITER: &str = "Here is the text to be summarized:";
