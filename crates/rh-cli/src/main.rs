use clap::Parser;

use rh_cli::{run_cli, Cli};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // top-level boundary: anything the bootstrap did not expect is logged
    // in full before the process dies non-zero
    std::panic::set_hook(Box::new(|info| {
        log::error!("uncaught failure: {}", info);
    }));

    let cli = Cli::parse();
    let exit_code = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| run_cli(cli))) {
        Ok(code) => code,
        Err(_) => 1,
    };

    std::process::exit(exit_code);
}
