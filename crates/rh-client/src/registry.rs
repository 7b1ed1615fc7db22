use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use rh_core::RehostError;

use crate::descriptor::ClientDescriptor;

fn qualified_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
            .expect("qualified name pattern should compile")
    })
}

// Maps fully-qualified client names to type descriptors. Populated at
// startup by whichever client ports are linked into the process; stands in
// for the dynamic type registry the legacy container offered.
#[derive(Default)]
pub struct ClientRegistry {
    entries: BTreeMap<String, &'static ClientDescriptor>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: &'static ClientDescriptor) -> Result<(), RehostError> {
        self.register_alias(descriptor.qualified_name, descriptor)
    }

    // Legacy builds shipped the same client under more than one package
    // name; aliases let one descriptor answer to all of them.
    pub fn register_alias(
        &mut self,
        name: &str,
        descriptor: &'static ClientDescriptor,
    ) -> Result<(), RehostError> {
        if !qualified_name_pattern().is_match(name) {
            return Err(RehostError::new(
                "REGISTRY_NAME_INVALID",
                format!("\"{}\" is not a valid qualified client name.", name),
            ));
        }
        if self.entries.contains_key(name) {
            return Err(RehostError::new(
                "REGISTRY_NAME_CONFLICT",
                format!("Client name \"{}\" is already registered.", name),
            ));
        }
        self.entries.insert(name.to_string(), descriptor);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&'static ClientDescriptor> {
        self.entries.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn resolve(&self, candidates: &[String]) -> Result<&'static ClientDescriptor, RehostError> {
        for candidate in candidates {
            if let Some(descriptor) = self.lookup(candidate) {
                log::info!("using '{}' as client class", candidate);
                return Ok(descriptor);
            }
        }
        Err(RehostError::new(
            "LOADER_CLIENT_NOT_FOUND",
            format!(
                "No candidate client resolved; tried [{}].",
                candidates.join(", ")
            ),
        ))
    }
}
