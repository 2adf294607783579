// Application run orchestration: collects the job inputs, builds the output
// directory, and generates each chosen document.

pub mod pipeline;

pub use pipeline::{run_generation, DocumentChoice, GenerationRequest};
