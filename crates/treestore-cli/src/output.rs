//! Output formatting utilities

use clap::ValueEnum;
use serde::Serialize;
use treestore_core::{Item, ItemId, StoreStats};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

fn to_json<T: Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "null".to_string())
}

/// One line per record: id, parent, then extra fields as compact JSON
pub fn format_items(items: &[&Item], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(items),
        OutputFormat::Table => items
            .iter()
            .map(|item| {
                if item.payload.is_empty() {
                    format!("{}\t{}", item.id, item.parent)
                } else {
                    let extra = serde_json::to_string(&item.payload)
                        .unwrap_or_else(|_| "{}".to_string());
                    format!("{}\t{}\t{}", item.id, item.parent, extra)
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn format_ids(ids: &[&ItemId], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(ids),
        OutputFormat::Table => ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn format_stats(stats: &StoreStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(stats),
        OutputFormat::Table => format!(
            "records:      {}\nentries:      {}\nroots:        {}\ndangling:     {}\nmax_children: {}",
            stats.records, stats.entries, stats.roots, stats.dangling, stats.max_children
        ),
    }
}
