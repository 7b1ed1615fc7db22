use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use rh_client::{EmbeddableClient, HostContract};

use crate::params::{EnvironmentParameters, FixedAnswers, OverrideTable, ParameterSource};

// Well-known legacy download root. Informational only, never fetched; the
// client expects to see it from its container.
pub const BASE_LOCATION: &str = "http://www.minecraft.net/game/";

pub type SharedAdapter = Rc<RefCell<HostAdapter>>;

struct HostState {
    visible: Cell<bool>,
    parameters: Box<dyn ParameterSource>,
}

impl HostContract for HostState {
    fn is_active(&self) -> bool {
        // always active once embedded
        true
    }

    fn base_location(&self) -> String {
        BASE_LOCATION.to_string()
    }

    fn parameter(&self, name: &str) -> Option<String> {
        log::debug!("client asked for '{}' parameter", name);
        self.parameters.resolve(name)
    }
}

// Stands in for the embedding container: sole contract provider for the
// wrapped client, and the pane the client lives in.
pub struct HostAdapter {
    state: Rc<HostState>,
    client: Box<dyn EmbeddableClient>,
}

impl HostAdapter {
    pub fn new(client: Box<dyn EmbeddableClient>) -> Self {
        Self::with_parameter_source(client, Box::new(FixedAnswers::new()))
    }

    pub fn with_environment(
        client: Box<dyn EmbeddableClient>,
        environment: Box<dyn EnvironmentParameters>,
    ) -> Self {
        Self::with_parameter_source(client, Box::new(FixedAnswers::with_environment(environment)))
    }

    pub fn with_overrides(
        client: Box<dyn EmbeddableClient>,
        overrides: BTreeMap<String, String>,
    ) -> Self {
        Self::with_parameter_source(client, Box::new(OverrideTable::new(overrides)))
    }

    pub fn with_parameter_source(
        mut client: Box<dyn EmbeddableClient>,
        parameters: Box<dyn ParameterSource>,
    ) -> Self {
        let state = Rc::new(HostState {
            visible: Cell::new(false),
            parameters,
        });
        // binding makes this adapter the client's sole contract provider,
        // and composes the client into the adapter's pane right away
        client.set_host(Rc::clone(&state) as Rc<dyn HostContract>);
        Self { state, client }
    }

    pub fn init(&mut self) {
        self.client.init();
    }

    pub fn start(&mut self) {
        self.client.start();
    }

    pub fn stop(&mut self) {
        self.client.stop();
    }

    pub fn destroy(&mut self) {
        self.client.destroy();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.client.resize(width, height);
    }

    // Compound by contract: the adapter's own visibility and the client's
    // flip together, never independently.
    pub fn set_visible(&mut self, visible: bool) {
        self.state.visible.set(visible);
        self.client.set_visible(visible);
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible.get()
    }

    pub fn client_is_visible(&self) -> bool {
        self.client.is_visible()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn base_location(&self) -> String {
        self.state.base_location()
    }

    pub fn parameter(&self, name: &str) -> Option<String> {
        self.state.parameter(name)
    }
}
