use std::rc::Rc;

use rh_core::RootDir;

use crate::adapter::SharedAdapter;

// Explicit stand-in for a process shutdown hook: teardown callbacks run
// exactly once, so the close path and the exit path may both reach them.
#[derive(Default)]
pub struct ShutdownCoordinator {
    teardowns: Vec<Box<dyn FnOnce()>>,
    fired: bool,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, teardown: impl FnOnce() + 'static) {
        self.teardowns.push(Box::new(teardown));
    }

    pub fn run(&mut self) {
        if self.fired {
            return;
        }
        self.fired = true;
        for teardown in self.teardowns.drain(..) {
            teardown();
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

// A running standalone host: the embedded client behind its adapter, plus
// the teardown path. Owns the client for the rest of the process.
pub struct StandaloneSession {
    client_name: String,
    root: RootDir,
    adapter: SharedAdapter,
    shutdown: ShutdownCoordinator,
}

impl std::fmt::Debug for StandaloneSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandaloneSession")
            .field("client_name", &self.client_name)
            .finish_non_exhaustive()
    }
}

impl StandaloneSession {
    pub fn new(client_name: impl Into<String>, root: RootDir, adapter: SharedAdapter) -> Self {
        let mut shutdown = ShutdownCoordinator::new();
        let teardown_adapter = Rc::clone(&adapter);
        shutdown.register(move || {
            log::info!("shutting down embedded client");
            let mut adapter = teardown_adapter.borrow_mut();
            adapter.stop();
            adapter.destroy();
        });
        Self {
            client_name: client_name.into(),
            root,
            adapter,
            shutdown,
        }
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn root(&self) -> &RootDir {
        &self.root
    }

    pub fn adapter(&self) -> SharedAdapter {
        Rc::clone(&self.adapter)
    }

    pub fn notify_resized(&self, width: u32, height: u32) {
        self.adapter.borrow_mut().resize(width, height);
    }

    pub fn set_visible(&self, visible: bool) {
        self.adapter.borrow_mut().set_visible(visible);
    }

    pub fn is_visible(&self) -> bool {
        self.adapter.borrow().is_visible()
    }

    pub fn shutdown(&mut self) {
        self.shutdown.run();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.has_fired()
    }
}
