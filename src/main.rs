use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use srcver::config;
use srcver::resolve;
use srcver::ui;
use srcver::VersionInfo;

#[derive(clap::Parser)]
#[command(
    name = "srcver",
    about = "Resolve a source tree's version from git metadata, archive keywords, or its directory name"
)]
struct Args {
    #[arg(help = "Root of the source tree to resolve", default_value = ".")]
    root: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Override the configured tag prefix")]
    tag_prefix: Option<String>,

    #[arg(long, help = "Override the configured parent-directory prefix")]
    parentdir_prefix: Option<String>,

    #[arg(long, help = "Print only the full commit identifier")]
    full_only: bool,

    #[arg(short, long, help = "Print resolver diagnostics to stderr")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    if let Some(tag_prefix) = args.tag_prefix {
        config.tag_prefix = tag_prefix;
    }
    if let Some(parentdir_prefix) = args.parentdir_prefix {
        config.parentdir_prefix = parentdir_prefix;
    }

    // a missing or inaccessible root leaves only the embedded keywords and
    // the default to fall back on
    let root = args.root.canonicalize().ok();
    if root.is_none() && args.verbose {
        ui::note(&format!("unable to resolve root '{}'", args.root.display()));
    }

    let info = resolve::get_versions(&config, root.as_deref(), &VersionInfo::unknown(), args.verbose);

    if args.full_only {
        println!("{}", info.full);
    } else {
        println!("version: {}", info.version);
        println!("full: {}", info.full);
    }
    Ok(())
}
