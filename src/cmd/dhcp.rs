//! `emberfly dhcp` - render or recover the DHCP daemon configuration

use super::store;
use clap::{Args, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum DhcpCommand {
    /// Render dhcpd.conf from the system settings
    Render(RenderArgs),

    /// Recover network settings from an existing dhcpd.conf
    Parse(ParseArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// System settings file
    #[arg(long, default_value = "/opt/emberfly/config/system.json")]
    pub settings: PathBuf,

    /// Write to this file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Existing daemon configuration file
    #[arg(long, default_value = "/etc/dhcp/dhcpd.conf")]
    pub config: PathBuf,

    /// System settings file supplying the per-field defaults
    #[arg(long, default_value = "/opt/emberfly/config/system.json")]
    pub settings: PathBuf,
}

pub fn run(command: DhcpCommand) -> Result<()> {
    match command {
        DhcpCommand::Render(args) => render(args),
        DhcpCommand::Parse(args) => parse(args),
    }
}

fn render(args: RenderArgs) -> Result<()> {
    let settings = store::load_settings(&args.settings)?;
    settings.network.validate()?;

    let conf = emberfly_dhcp::render(&settings.network);
    match &args.out {
        Some(path) => {
            fs::write(path, conf)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote DHCP configuration");
        }
        None => print!("{conf}"),
    }
    Ok(())
}

fn parse(args: ParseArgs) -> Result<()> {
    let text = fs::read_to_string(&args.config)
        .wrap_err_with(|| format!("failed to read {}", args.config.display()))?;
    let defaults = store::load_settings(&args.settings)?;

    let recovered = emberfly_dhcp::parse(&text, &defaults.network);
    println!("{}", serde_json::to_string_pretty(&recovered)?);
    Ok(())
}
