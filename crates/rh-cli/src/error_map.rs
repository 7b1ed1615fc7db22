use rh_core::RehostError;

// Distinct exit status per failure kind; the log line carries the detail.
pub(crate) fn exit_code_for(code: &str) -> i32 {
    match code {
        "LOADER_CLIENT_NOT_FOUND" => 2,
        "PATCH_CELL_NOT_FOUND" => 3,
        "PATCH_CELL_AMBIGUOUS" => 4,
        "CLIENT_CONSTRUCTION_FAILED" => 5,
        _ => 1,
    }
}

pub(crate) fn emit_error(error: RehostError) -> i32 {
    log::error!("{}", error);
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).expect("string json")
    );
    exit_code_for(&error.code)
}

pub(crate) fn map_shell_io(error: std::io::Error) -> RehostError {
    RehostError::new("SHELL_IO", error.to_string())
}

pub(crate) fn map_params_read(path: &str, error: std::io::Error) -> RehostError {
    RehostError::new(
        "CLI_PARAMS_READ",
        format!("Failed to read params file {}: {}", path, error),
    )
}

pub(crate) fn map_params_invalid(path: &str, error: serde_json::Error) -> RehostError {
    RehostError::new(
        "CLI_PARAMS_INVALID",
        format!("Params file {} is not a JSON string map: {}", path, error),
    )
}
