pub mod init;
pub mod tracing_sink;

pub use init::init_tracing;
pub use tracing_sink::TracingSink;
