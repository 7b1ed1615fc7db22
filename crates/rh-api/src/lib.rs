use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

use rh_client::{patch_root_dir, ClientRegistry};
use rh_core::{RehostError, RootDir};
use rh_host::{
    EnvironmentParameters, HostAdapter, StandaloneSession, WindowConfig, WindowShell,
    DEFAULT_HEIGHT, DEFAULT_WIDTH,
};

pub const DEFAULT_TITLE: &str = "Legacy Client";

pub struct LaunchOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub root_dir: Option<PathBuf>,
    pub candidates: Vec<String>,
    pub overrides: Option<BTreeMap<String, String>>,
    pub environment: Option<Box<dyn EnvironmentParameters>>,
}

impl LaunchOptions {
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            root_dir: None,
            candidates,
            overrides: None,
            environment: None,
        }
    }
}

// The whole bootstrap, in the order the legacy launcher performed it:
// window first (placeholder at the requested size), then root directory,
// then resolve, patch strictly before construction, wrap, embed, init,
// start. The returned session carries the teardown path.
pub fn launch(
    registry: &ClientRegistry,
    shell: &mut dyn WindowShell,
    options: LaunchOptions,
) -> Result<StandaloneSession, RehostError> {
    let config = WindowConfig {
        title: options.title.clone(),
        width: options.width,
        height: options.height,
    };
    log::info!("creating window with title '{}'", config.title);
    shell.create_window(&config)?;

    let root = match options.root_dir {
        Some(path) => RootDir::new(path)?,
        None => RootDir::from_working_dir()?,
    };

    let descriptor = registry.resolve(&options.candidates)?;
    patch_root_dir(descriptor, &root)?;

    let client = (descriptor.construct)().map_err(|error| {
        RehostError::new(
            "CLIENT_CONSTRUCTION_FAILED",
            format!(
                "Constructing \"{}\" failed: {}",
                descriptor.qualified_name, error
            ),
        )
    })?;

    let adapter = match options.overrides {
        Some(overrides) => HostAdapter::with_overrides(client, overrides),
        None => match options.environment {
            Some(environment) => HostAdapter::with_environment(client, environment),
            None => HostAdapter::new(client),
        },
    };
    let adapter = Rc::new(RefCell::new(adapter));

    shell.set_content(&adapter)?;
    {
        let mut adapter = adapter.borrow_mut();
        adapter.init();
        adapter.start();
    }

    Ok(StandaloneSession::new(
        descriptor.qualified_name,
        root,
        adapter,
    ))
}
