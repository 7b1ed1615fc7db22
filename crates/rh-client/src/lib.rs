pub mod contract;
pub mod descriptor;
pub mod patch;
pub mod registry;

pub use contract::{EmbeddableClient, HostContract};
pub use descriptor::{ClientDescriptor, StateCell};
pub use patch::patch_root_dir;
pub use registry::ClientRegistry;
