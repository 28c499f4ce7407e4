//! Local media tooling driven as subprocesses: manim renders the animation,
//! ffmpeg lays the narration over it and tesseract reads handwritten uploads.

pub mod compose;
pub mod ocr;
pub mod render;

pub use compose::VideoComposer;
pub use ocr::{TesseractOcr, sniff_image_mime};
pub use render::{ManimRenderer, latest_video};
