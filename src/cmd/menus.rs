//! `emberfly menus` - generate the iPXE menu forest

use super::store;
use clap::Args;
use color_eyre::eyre::{Result, WrapErr};
use emberfly_ipxe::MenuBuilder;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct MenusArgs {
    /// Image catalog file
    #[arg(long, default_value = "/opt/emberfly/config/images.yaml")]
    pub catalog: PathBuf,

    /// System settings file
    #[arg(long, default_value = "/opt/emberfly/config/system.json")]
    pub settings: PathBuf,

    /// Directory the menu files are written into
    #[arg(long, default_value = "/opt/emberfly/config/menus")]
    pub output_dir: PathBuf,

    /// Override the boot server address from the settings file
    #[arg(long)]
    pub server: Option<String>,

    /// Also write the chainload entry script to this path
    #[arg(long)]
    pub entry: Option<PathBuf>,
}

pub fn run(args: MenusArgs) -> Result<()> {
    let images = store::load_catalog(&args.catalog)?;
    let settings = store::load_settings(&args.settings)?;

    let server = args
        .server
        .unwrap_or_else(|| settings.server.ip.to_string());
    let builder = MenuBuilder::new(server);

    let menus = builder.render(&images)?;

    fs::create_dir_all(&args.output_dir)
        .wrap_err_with(|| format!("failed to create {}", args.output_dir.display()))?;
    for (name, content) in &menus {
        let path = args.output_dir.join(name);
        fs::write(&path, content)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        info!(menu = %path.display(), "generated");
    }

    if let Some(entry) = &args.entry {
        fs::write(entry, builder.entry_script())
            .wrap_err_with(|| format!("failed to write {}", entry.display()))?;
        info!(entry = %entry.display(), "generated");
    }

    println!(
        "Generated {} menu file(s) in {}",
        menus.len(),
        args.output_dir.display()
    );
    Ok(())
}
