//! Query commands against a records file

use clap::{Args, Subcommand};
use treestore_core::{ItemId, TreeStore};

use crate::output::{format_ids, format_items, format_stats};
use crate::AppContext;

#[derive(Args)]
pub struct IdArg {
    /// Item id (numeric ids are tried first, then text ids)
    pub id: String,
}

impl IdArg {
    fn item_id(&self, store: &TreeStore) -> ItemId {
        store.key_for(&self.id)
    }
}

#[derive(Subcommand)]
pub enum QueryCommands {
    /// Print every record in file order
    All,
    /// Print one record
    Item(IdArg),
    /// Print the direct children of an item
    Children(IdArg),
    /// Print children followed by grandchildren
    AllChildren(IdArg),
    /// Print the ancestors of an item, nearest first
    Parents(IdArg),
    /// Print the subtree below an item, breadth first
    Descendants {
        #[command(flatten)]
        target: IdArg,
        /// Levels to descend (default from config)
        #[arg(short, long)]
        depth: Option<u32>,
    },
    /// Print top-level records
    Roots,
    /// Print ids referenced as parents but missing from the file
    Dangling,
    /// Print index statistics
    Stats,
}

fn emit(output: String) {
    if !output.is_empty() {
        println!("{}", output);
    }
}

pub fn run(command: &QueryCommands, ctx: &AppContext) -> anyhow::Result<()> {
    let store = &ctx.store;
    let format = ctx.format;

    match command {
        QueryCommands::All => {
            let items: Vec<_> = store.all().iter().collect();
            emit(format_items(&items, format));
        }
        QueryCommands::Item(arg) => {
            let item = store.item(&arg.item_id(store))?;
            emit(format_items(&[item], format));
        }
        QueryCommands::Children(arg) => {
            emit(format_items(&store.children(&arg.item_id(store))?, format));
        }
        QueryCommands::AllChildren(arg) => {
            emit(format_items(&store.all_children(&arg.item_id(store))?, format));
        }
        QueryCommands::Parents(arg) => {
            emit(format_items(&store.all_parents(&arg.item_id(store))?, format));
        }
        QueryCommands::Descendants { target, depth } => {
            let depth = depth.unwrap_or(ctx.config.max_depth);
            tracing::debug!("Descendants of {} to depth {}", target.id, depth);
            emit(format_items(&store.descendants(&target.item_id(store), depth)?, format));
        }
        QueryCommands::Roots => {
            emit(format_items(&store.roots(), format));
        }
        QueryCommands::Dangling => {
            let dangling = store.dangling();
            if !dangling.is_empty() {
                tracing::warn!("{} parent ids have no record", dangling.len());
            }
            emit(format_ids(&dangling, format));
        }
        QueryCommands::Stats => {
            emit(format_stats(&store.stats(), format));
        }
    }

    Ok(())
}
