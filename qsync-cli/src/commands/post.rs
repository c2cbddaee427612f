//! `qsync post`: create a new private article.

use std::io::{self, BufRead, Write};

use anyhow::{Context as _, Result};
use clap::Args;
use qsync_core::Tag;
use qsync_sync::{post_new, validate::parse_tag, Draft};

use super::Context;

/// Arguments for `qsync post`. Missing fields are prompted for on stdin.
#[derive(Args, Debug)]
pub struct PostArgs {
    /// Article title.
    #[arg(long)]
    pub title: Option<String>,

    /// Tag, optionally with versions; repeat for more tags.
    #[arg(long = "tag", value_name = "NAME[:V1,V2]", value_parser = parse_tag_arg)]
    pub tags: Vec<Tag>,
}

impl PostArgs {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let (settings, client) = ctx.connect()?;

        let stdin = io::stdin();
        let mut input = stdin.lock();
        let title = match self.title {
            Some(title) => title,
            None => prompt("Title", &mut input)?,
        };
        let tags = if self.tags.is_empty() {
            prompt_tags(&mut input)?
        } else {
            self.tags
        };

        let written = post_new(&client, &settings.local_root, &Draft { title, tags })
            .context("could not create article")?;
        println!("✓ created {}", written.path().display());
        Ok(())
    }
}

fn parse_tag_arg(arg: &str) -> Result<Tag, String> {
    parse_tag(arg).map_err(|e| e.to_string())
}

fn prompt(label: &str, input: &mut impl BufRead) -> Result<String> {
    eprint!("{label}: ");
    io::stderr().flush().context("could not write prompt")?;
    let mut line = String::new();
    input.read_line(&mut line).context("could not read stdin")?;
    Ok(line.trim().to_string())
}

/// Whitespace-separated tag arguments on one line.
fn prompt_tags(input: &mut impl BufRead) -> Result<Vec<Tag>> {
    let line = prompt("Tags (name[:v1,v2] ...)", input)?;
    line.split_whitespace()
        .map(|arg| parse_tag(arg).map_err(anyhow::Error::from))
        .collect()
}
