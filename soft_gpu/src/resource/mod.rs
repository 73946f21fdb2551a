//! Resource module
//!
//! GPU-style resources owned by the pipeline context: byte buffers, vertex
//! puller tables and shader programs, stored in id-keyed tables.

mod ids;
pub mod buffer;
pub mod vertex_puller;
pub mod program;
mod resource_store;

pub use ids::{BufferId, VertexPullerId, ProgramId, EMPTY_ID};
pub use buffer::Buffer;
pub use vertex_puller::{VertexPuller, Head, Indexing, IndexType};
pub use program::Program;
pub use resource_store::ResourceStore;
