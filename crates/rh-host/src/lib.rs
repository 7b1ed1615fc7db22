pub mod adapter;
pub mod params;
pub mod session;
pub mod shell;

pub use adapter::{HostAdapter, SharedAdapter, BASE_LOCATION};
pub use params::{EnvironmentParameters, FixedAnswers, OverrideTable, ParameterSource};
pub use session::{ShutdownCoordinator, StandaloneSession};
pub use shell::{WindowConfig, WindowShell, DEFAULT_HEIGHT, DEFAULT_WIDTH};
