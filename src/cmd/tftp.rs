//! `emberfly tftp` - render or recover the TFTP daemon configuration

use super::store;
use clap::{Args, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum TftpCommand {
    /// Render /etc/default/tftpd-hpa from the system settings
    Render(RenderArgs),

    /// Recover TFTP settings from an existing daemon configuration
    Parse(ParseArgs),

    /// List the boot loader binaries in the TFTP root
    Files(FilesArgs),
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
    #[arg(long, default_value = "/etc/default/tftpd-hpa")]
    pub config: PathBuf,

    /// System settings file supplying the per-field defaults
    #[arg(long, default_value = "/opt/emberfly/config/system.json")]
    pub settings: PathBuf,
}

#[derive(Args, Debug)]
pub struct FilesArgs {
    /// TFTP root directory; defaults to the one in the settings file
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// System settings file
    #[arg(long, default_value = "/opt/emberfly/config/system.json")]
    pub settings: PathBuf,
}

pub fn run(command: TftpCommand) -> Result<()> {
    match command {
        TftpCommand::Render(args) => render(args),
        TftpCommand::Parse(args) => parse(args),
        TftpCommand::Files(args) => files(args),
    }
}

fn render(args: RenderArgs) -> Result<()> {
    let settings = store::load_settings(&args.settings)?;

    let conf = emberfly_tftp::render(&settings.tftp);
    match &args.out {
        Some(path) => {
            fs::write(path, conf)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote TFTP configuration");
        }
        None => print!("{conf}"),
    }
    Ok(())
}

fn parse(args: ParseArgs) -> Result<()> {
    let text = fs::read_to_string(&args.config)
        .wrap_err_with(|| format!("failed to read {}", args.config.display()))?;
    let defaults = store::load_settings(&args.settings)?;

    let recovered = emberfly_tftp::parse(&text, &defaults.tftp);
    println!("{}", serde_json::to_string_pretty(&recovered)?);
    Ok(())
}

fn files(args: FilesArgs) -> Result<()> {
    let root = match args.root {
        Some(root) => root,
        None => store::load_settings(&args.settings)?.tftp.root,
    };

    let files = emberfly_tftp::list_boot_files(&root)
        .wrap_err_with(|| format!("failed to list {}", root.display()))?;
    for file in &files {
        println!("{:<30} {:>10}  {}", file.name, file.size, file.kind.as_str());
    }
    Ok(())
}
