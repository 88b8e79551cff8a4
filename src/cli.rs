//! canopy — administration CLI over a file-backed namespace.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapter::StoreAdapter;
use crate::config::CanopyConfig;
use crate::consts::ROOT_PATH;
use crate::folder::Folder;
use crate::path;
use crate::store::FileStore;

#[derive(Parser, Debug)]
#[command(
    name = "canopy",
    version,
    about = "Hierarchical folder namespace over a single-file store",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Initialize a store root directory.
    Init {
        #[arg(long)]
        path: PathBuf,
    },
    /// Create a folder (missing ancestors are created too).
    Mkdir {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        folder: String,
    },
    /// Delete one leaf folder.
    Rmdir {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        folder: String,
    },
    /// List the immediate children of a folder.
    Ls {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value = "\\")]
        folder: String,
        #[arg(long)]
        json: bool,
    },
    /// Print store status.
    Stat {
        #[arg(long)]
        path: PathBuf,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Init { path } => cmd_init(&path),
        Cmd::Mkdir { path, folder } => cmd_mkdir(&path, &folder),
        Cmd::Rmdir { path, folder } => cmd_rmdir(&path, &folder),
        Cmd::Ls { path, folder, json } => cmd_ls(&path, &folder, json),
        Cmd::Stat { path } => cmd_stat(&path),
    }
}

fn open_adapter(root: &Path) -> Result<StoreAdapter> {
    let cfg = CanopyConfig::from_env();
    let store = FileStore::open_with_config(root, &cfg)?;
    Ok(StoreAdapter::new(Arc::new(store)))
}

fn cmd_init(root: &Path) -> Result<()> {
    FileStore::init(root)?;
    println!("initialized store at {}", root.display());
    Ok(())
}

fn cmd_mkdir(root: &Path, folder: &str) -> Result<()> {
    let adapter = open_adapter(root)?;
    let created = Folder::create(adapter, ROOT_PATH, folder)?;
    println!("created {}", created.path());
    Ok(())
}

fn cmd_rmdir(root: &Path, folder: &str) -> Result<()> {
    let adapter = open_adapter(root)?;
    let full = path::join(ROOT_PATH, folder)?;
    let name = path::leaf(&full);
    let parent = &full[..full.len() - name.len()];
    let parent_folder = Folder::open(adapter, parent, "")?;
    parent_folder.delete_subfolder(name, 0)?;
    println!("deleted {}", full);
    Ok(())
}

#[derive(serde::Serialize)]
struct Listing<'a> {
    path: &'a str,
    count: usize,
    children: &'a [String],
}

fn cmd_ls(root: &Path, folder: &str, json: bool) -> Result<()> {
    let adapter = open_adapter(root)?;
    let target = if folder == ROOT_PATH {
        Folder::root(adapter)?
    } else {
        Folder::open(adapter, ROOT_PATH, folder)?
    };
    let children = target.subfolders(0)?;

    if json {
        let listing = Listing {
            path: target.path(),
            count: children.count(),
            children: children.names(),
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        for name in children.names() {
            println!("{}", name);
        }
    }
    Ok(())
}

fn cmd_stat(root: &Path) -> Result<()> {
    let cfg = CanopyConfig::from_env();
    let store = FileStore::open_with_config(root, &cfg)?;
    println!("root:       {}", root.display());
    println!("config:     {}", cfg);
    println!("containers: {}", store.container_count());
    Ok(())
}
