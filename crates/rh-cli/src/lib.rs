use rh_core::RehostError;

mod cli_args;
mod error_map;
mod params;
mod session_ops;
mod shell_line;
mod shell_term;

pub use cli_args::Cli;
pub(crate) use cli_args::{LaunchArgs, Mode};
pub(crate) use error_map::emit_error;
pub(crate) use session_ops::{run_inspect, run_launch};

pub fn run(cli: Cli) -> Result<i32, RehostError> {
    match cli.command {
        // zero arguments is the legacy variant: working-directory root,
        // fixed answer table, default candidates
        None => run_launch(LaunchArgs::default()),
        Some(Mode::Launch(args)) => run_launch(args),
        Some(Mode::Inspect(args)) => run_inspect(args),
    }
}

pub fn run_cli(cli: Cli) -> i32 {
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

#[cfg(test)]
mod tests;
