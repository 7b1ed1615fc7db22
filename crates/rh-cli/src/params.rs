use std::collections::BTreeMap;
use std::fs;

use rh_core::RehostError;

use crate::error_map::{map_params_invalid, map_params_read};

pub(crate) fn parse_param_flag(raw: &str) -> Result<(String, String), RehostError> {
    let Some((name, value)) = raw.split_once('=') else {
        return Err(RehostError::new(
            "CLI_PARAM_INVALID",
            format!("Expected name=value, got \"{}\".", raw),
        ));
    };
    if name.is_empty() {
        return Err(RehostError::new(
            "CLI_PARAM_INVALID",
            format!("Parameter name is empty in \"{}\".", raw),
        ));
    }
    Ok((name.to_string(), value.to_string()))
}

pub(crate) fn load_params_file(path: &str) -> Result<BTreeMap<String, String>, RehostError> {
    let contents = fs::read_to_string(path).map_err(|error| map_params_read(path, error))?;
    serde_json::from_str(&contents).map_err(|error| map_params_invalid(path, error))
}

// None means no override table was asked for, which selects the
// fixed-answer adapter variant downstream. Flag entries win over file
// entries.
pub(crate) fn build_overrides(
    params: &[String],
    params_file: Option<&str>,
) -> Result<Option<BTreeMap<String, String>>, RehostError> {
    if params.is_empty() && params_file.is_none() {
        return Ok(None);
    }
    let mut table = match params_file {
        Some(path) => load_params_file(path)?,
        None => BTreeMap::new(),
    };
    for raw in params {
        let (name, value) = parse_param_flag(raw)?;
        table.insert(name, value);
    }
    Ok(Some(table))
}
