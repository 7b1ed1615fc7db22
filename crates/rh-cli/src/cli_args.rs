use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rehost-launcher")]
#[command(about = "Standalone window host for legacy embeddable game clients")]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Mode>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Launch(LaunchArgs),
    Inspect(InspectArgs),
}

#[derive(Debug, Args, Default)]
pub(crate) struct LaunchArgs {
    #[arg(long = "title")]
    pub(crate) title: Option<String>,
    #[arg(long = "width")]
    pub(crate) width: Option<u32>,
    #[arg(long = "height")]
    pub(crate) height: Option<u32>,
    #[arg(long = "root-dir")]
    pub(crate) root_dir: Option<String>,
    #[arg(long = "client")]
    pub(crate) clients: Vec<String>,
    #[arg(long = "param")]
    pub(crate) params: Vec<String>,
    #[arg(long = "params-file")]
    pub(crate) params_file: Option<String>,
    #[arg(long = "headless")]
    pub(crate) headless: bool,
}

#[derive(Debug, Args, Default)]
pub(crate) struct InspectArgs {
    #[arg(long = "client")]
    pub(crate) clients: Vec<String>,
}
