use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Mutex, MutexGuard};

use rh_client::{ClientDescriptor, ClientRegistry, EmbeddableClient, HostContract, StateCell};
use rh_core::{CellType, CellValue, RehostError, Storage, Visibility};

pub const DEMO_CLIENT_NAME: &str = "rehost.demo.DemoClient";
pub const DEMO_CLIENT_LEGACY_NAME: &str = "legacy.demo.DemoClient";

// The private static cell the patcher exists for. The descriptor below is
// the only way anything outside this file reaches it.
static GAME_ROOT: Mutex<Option<PathBuf>> = Mutex::new(None);

static TRANSITIONS: Mutex<Vec<String>> = Mutex::new(Vec::new());

// Serializes tests that touch the process-wide cell or transition log.
static CELL_GUARD: Mutex<()> = Mutex::new(());

pub fn exclusive_cell_access() -> MutexGuard<'static, ()> {
    CELL_GUARD
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn reset_demo_state() {
    if let Ok(mut slot) = GAME_ROOT.lock() {
        *slot = None;
    }
    if let Ok(mut transitions) = TRANSITIONS.lock() {
        transitions.clear();
    }
}

pub fn drain_transitions() -> Vec<String> {
    match TRANSITIONS.lock() {
        Ok(mut transitions) => transitions.drain(..).collect(),
        Err(_) => Vec::new(),
    }
}

fn record_transition(transition: impl Into<String>) {
    if let Ok(mut transitions) = TRANSITIONS.lock() {
        transitions.push(transition.into());
    }
}

fn write_game_root(value: CellValue) -> Result<(), RehostError> {
    let Some(path) = value.as_directory() else {
        return Err(RehostError::new(
            "DEMO_CELL_TYPE",
            format!("Expected a directory value, got {}.", value.type_name()),
        ));
    };
    let mut slot = GAME_ROOT
        .lock()
        .map_err(|_| RehostError::new("DEMO_CELL_LOCK", "Game root cell lock is poisoned."))?;
    *slot = Some(path.to_path_buf());
    Ok(())
}

fn read_game_root() -> Option<CellValue> {
    let slot = GAME_ROOT.lock().ok()?;
    slot.clone().map(CellValue::Directory)
}

pub struct DemoClient {
    root: PathBuf,
    host: Option<Rc<dyn HostContract>>,
    visible: bool,
}

fn construct_demo_client() -> Result<Box<dyn EmbeddableClient>, RehostError> {
    // like the real legacy client, the root is read during construction;
    // this is what makes the patch-before-construct ordering load-bearing
    let slot = GAME_ROOT
        .lock()
        .map_err(|_| RehostError::new("DEMO_CELL_LOCK", "Game root cell lock is poisoned."))?;
    let Some(root) = slot.clone() else {
        return Err(RehostError::new(
            "DEMO_ROOT_UNSET",
            "Game root cell was never patched; refusing to come up without a data root.",
        ));
    };
    record_transition("construct");
    Ok(Box::new(DemoClient {
        root,
        host: None,
        visible: false,
    }))
}

impl EmbeddableClient for DemoClient {
    fn set_host(&mut self, host: Rc<dyn HostContract>) {
        record_transition("set_host");
        self.host = Some(host);
    }

    fn init(&mut self) {
        if let Some(host) = &self.host {
            for name in ["stand-alone", "haspaid", "demo", "fullscreen"] {
                let answer = host.parameter(name).unwrap_or_else(|| "<absent>".to_string());
                log::debug!("demo client saw {}={}", name, answer);
            }
            log::info!(
                "demo client initialized with root '{}' under '{}'",
                self.root.display(),
                host.base_location()
            );
        }
        record_transition("init");
    }

    fn start(&mut self) {
        record_transition("start");
    }

    fn stop(&mut self) {
        record_transition("stop");
    }

    fn destroy(&mut self) {
        record_transition("destroy");
    }

    fn resize(&mut self, width: u32, height: u32) {
        log::debug!("demo client resized to {}x{}", width, height);
        record_transition(format!("resize {}x{}", width, height));
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        record_transition(format!("set_visible {}", visible));
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

pub static DEMO_CLIENT: ClientDescriptor = ClientDescriptor {
    qualified_name: DEMO_CLIENT_NAME,
    parent: None,
    cells: &[StateCell::new(
        "game_root",
        Visibility::Private,
        Storage::Static,
        CellType::Directory,
        write_game_root,
        read_game_root,
    )],
    construct: construct_demo_client,
};

pub fn register_demo_client(registry: &mut ClientRegistry) -> Result<(), RehostError> {
    registry.register(&DEMO_CLIENT)?;
    registry.register_alias(DEMO_CLIENT_LEGACY_NAME, &DEMO_CLIENT)
}
