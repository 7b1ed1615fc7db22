use std::io;
use std::path::PathBuf;

use serde::Serialize;
use rh_api::{launch, LaunchOptions};
use rh_client::{ClientDescriptor, ClientRegistry};
use rh_core::{CellType, RehostError, Storage, Visibility};
use rh_test_client::{register_demo_client, DEMO_CLIENT_LEGACY_NAME, DEMO_CLIENT_NAME};

use crate::cli_args::{InspectArgs, LaunchArgs};
use crate::shell_line::{run_line_session, LineShell};
use crate::shell_term::run_window_session;

// Every client port linked into this binary registers here at startup.
pub(crate) fn default_registry() -> Result<ClientRegistry, RehostError> {
    let mut registry = ClientRegistry::new();
    register_demo_client(&mut registry)?;
    Ok(registry)
}

pub(crate) fn candidates_or_default(clients: Vec<String>) -> Vec<String> {
    if clients.is_empty() {
        return vec![
            DEMO_CLIENT_NAME.to_string(),
            DEMO_CLIENT_LEGACY_NAME.to_string(),
        ];
    }
    clients
}

pub(crate) fn run_launch(args: LaunchArgs) -> Result<i32, RehostError> {
    let overrides = crate::params::build_overrides(&args.params, args.params_file.as_deref())?;
    let registry = default_registry()?;

    let mut options = LaunchOptions::new(candidates_or_default(args.clients));
    if let Some(title) = args.title {
        options.title = title;
    }
    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(height) = args.height {
        options.height = height;
    }
    options.root_dir = args.root_dir.map(PathBuf::from);
    options.overrides = overrides;

    let mut shell = LineShell::new();
    let mut session = launch(&registry, &mut shell, options)?;

    if args.headless {
        let stdin = io::stdin();
        let mut reader = stdin.lock();
        let mut writer = io::stdout();
        return run_line_session(&mut session, &shell, &mut reader, &mut writer);
    }
    run_window_session(&mut session, &shell)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CellRecord<'a> {
    pub(crate) name: &'a str,
    pub(crate) visibility: Visibility,
    pub(crate) storage: Storage,
    pub(crate) cell_type: CellType,
    pub(crate) patched: bool,
}

pub(crate) fn inspect_report(descriptor: &ClientDescriptor) -> Result<Vec<String>, RehostError> {
    let mut lines = vec![
        "RESULT:OK".to_string(),
        format!("CLIENT:{}", descriptor.qualified_name),
    ];
    for cell in descriptor.declared_cells() {
        let record = CellRecord {
            name: cell.name(),
            visibility: cell.visibility(),
            storage: cell.storage(),
            cell_type: cell.cell_type(),
            patched: cell.read().is_some(),
        };
        let json = serde_json::to_string(&record).map_err(|error| {
            RehostError::new(
                "CLI_INSPECT_ENCODE",
                format!("Failed to encode cell record: {}", error),
            )
        })?;
        lines.push(format!("CELL_JSON:{}", json));
    }
    Ok(lines)
}

pub(crate) fn run_inspect(args: InspectArgs) -> Result<i32, RehostError> {
    let registry = default_registry()?;
    let candidates = candidates_or_default(args.clients);
    let descriptor = registry.resolve(&candidates)?;
    for line in inspect_report(descriptor)? {
        println!("{}", line);
    }
    Ok(0)
}
