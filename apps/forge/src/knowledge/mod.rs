// Knowledge tool shim: a read-only record plus the tools an external agent calls
// to pull sections and prompt templates out of it.

pub mod base;
pub mod handlers;
pub mod prompts;
pub mod router;
pub mod tools;
pub mod xml;

pub use base::KnowledgeBase;
