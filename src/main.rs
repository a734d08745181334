use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::io::stderr;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

mod cmd;

#[derive(Parser, Debug)]
#[command(author, version, about = "Emberfly netboot configuration engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output - shows more detailed logs
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the iPXE menu forest from the image catalog
    Menus(cmd::menus::MenusArgs),

    /// Render or recover the DHCP daemon configuration
    #[command(subcommand)]
    Dhcp(cmd::dhcp::DhcpCommand),

    /// Render or recover the TFTP daemon configuration
    #[command(subcommand)]
    Tftp(cmd::tftp::TftpCommand),
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let default_directives = if cli.verbose {
        "emberfly=debug,emberfly_ipxe=debug,emberfly_dhcp=debug,emberfly_tftp=debug"
    } else {
        "emberfly=info,emberfly_ipxe=info,emberfly_dhcp=info,emberfly_tftp=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    registry()
        .with(filter)
        .with(fmt::layer().with_writer(stderr))
        .init();

    match cli.command {
        Commands::Menus(args) => cmd::menus::run(args),
        Commands::Dhcp(command) => cmd::dhcp::run(command),
        Commands::Tftp(command) => cmd::tftp::run(command),
    }
}
