pub mod bias;
pub mod cli;
pub mod config;
pub mod data;
pub mod database;
pub mod domain;
pub mod errors;
pub mod services;
pub mod vectors;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::cli::Cli;
use crate::config::settings::AppConfig;
use crate::domain::{ItemId, UserId};
use crate::services::{ImportService, ScoringService};

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn handle_import(config: AppConfig, path: &Path) -> Result<()> {
    let service = ImportService::new(config);
    service.run(path).map(|_| ())
}

pub fn handle_score(config: &AppConfig, user: UserId, items: &[ItemId], top: Option<usize>) -> Result<()> {
    let service = ScoringService::new(config)?;
    let ranked = service.rank(user, items, top)?;

    println!("{}", format!("item\tscore (user {})", user).bold());
    for scored in ranked {
        println!("{}\t{:.4}", scored.item_id, scored.score);
    }
    Ok(())
}
