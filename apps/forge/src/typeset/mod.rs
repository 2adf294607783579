// Everything that touches the filesystem or the external compiler.

pub mod compiler;
pub mod paths;

pub use compiler::Compiler;
pub use paths::build_output_dir;
