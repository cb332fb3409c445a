use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "truststep-console",
    version,
    about = "Operator console for the TrustStep fraud scoring service"
)]
pub(crate) struct Args {
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Overrides `service.base_url` from the config file.
    #[arg(long)]
    pub(crate) base_url: Option<String>,
    #[arg(long, default_value = "logs")]
    pub(crate) log_dir: PathBuf,
    #[arg(long, default_value_t = false)]
    pub(crate) log_to_stderr: bool,
    /// Analyze this text once, print the assessment and exit.
    #[arg(long)]
    pub(crate) text: Option<String>,
    #[arg(long)]
    pub(crate) context: Option<String>,
    #[arg(long)]
    pub(crate) amount: Option<f64>,
}
