use std::{
  path::Path,
  sync::Arc,
  time::Duration,
};

use anyhow::{
  Context,
  Result,
};
use clap::Parser;
use lazy_combo::{
  ComboConfig,
  ComboHandle,
  ComboSnapshot,
  FetchParams,
  LazyCombo,
  OptionSource,
  ScrollMetrics,
  StaticSource,
  source_fn,
};
use tokio::io::AsyncReadExt;

use crate::script::Command;

mod catalogue;
mod cli;
mod logging;
mod script;

/// Fake list geometry used to turn `scroll-end` into scroll metrics.
const ROW_HEIGHT: f64 = 32.0;
const VIEWPORT_HEIGHT: f64 = 320.0;

/// Options printed per `show`, the rest are summarized.
const SHOWN_OPTIONS: usize = 10;

#[tokio::main]
async fn main() -> Result<()> {
  let args = cli::Args::parse();
  logging::setup(args.verbosity, args.log_file.as_deref())
    .context("failed to initialize logging")?;

  let mut config = match &args.config_file {
    Some(path) => {
      ComboConfig::load(path)
        .with_context(|| format!("failed to load config from {}", path.display()))?
    },
    None => ComboConfig::default(),
  };
  if args.multi {
    config.multi_select = true;
  }
  if let Some(placeholder) = &args.placeholder {
    config.placeholder.clone_from(placeholder);
  }

  let catalogue = match &args.options_file {
    Some(path) => catalogue::load(path)?,
    None => catalogue::generate(args.items),
  };
  log::info!("serving {} options", catalogue.len());
  let source = delayed(catalogue, Duration::from_millis(args.latency_ms));

  let combo = LazyCombo::new(config, None).on_change(|value| {
    match serde_json::to_string(&value) {
      Ok(json) => println!("change {json}"),
      Err(err) => log::error!("failed to encode selection: {err}"),
    }
  });
  let handle = ComboHandle::spawn(combo, source);

  let text = read_script(args.script.as_deref()).await?;
  for (index, line) in text.lines().enumerate() {
    let command =
      script::parse_line(line).with_context(|| format!("invalid script line {}", index + 1))?;
    if let Some(command) = command {
      run(&handle, command, args.json).await?;
    }
  }

  handle.shutdown().await;
  Ok(())
}

/// Serves `catalogue`, answering each page after `latency`.
fn delayed(catalogue: StaticSource, latency: Duration) -> Arc<dyn OptionSource> {
  let catalogue = Arc::new(catalogue);
  Arc::new(source_fn(move |params: FetchParams| {
    let catalogue = catalogue.clone();
    async move {
      if !latency.is_zero() {
        tokio::time::sleep(latency).await;
      }
      catalogue.fetch_options(params).await
    }
  }))
}

async fn read_script(path: Option<&Path>) -> Result<String> {
  match path {
    Some(path) => {
      tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read script {}", path.display()))
    },
    None => {
      let mut text = String::new();
      tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("failed to read script from stdin")?;
      Ok(text)
    },
  }
}

async fn run(handle: &ComboHandle, command: Command, json: bool) -> Result<()> {
  match command {
    Command::Open => handle.open(),
    Command::Close => handle.close(),
    Command::Click => handle.click(),
    Command::Focus => handle.focus(),
    Command::Blur => handle.blur(),
    Command::Type(text) => handle.keystroke(text),
    Command::Wait(duration) => tokio::time::sleep(duration).await,
    Command::Scroll(metrics) => handle.scroll(metrics),
    Command::ScrollEnd => {
      let snapshot = current(handle).await?;
      let height = snapshot.options.len() as f64 * ROW_HEIGHT;
      handle.scroll(ScrollMetrics::at_bottom(height, VIEWPORT_HEIGHT));
    },
    Command::Toggle(value) => handle.toggle(value),
    Command::Clear => handle.clear(),
    Command::Show => {
      let snapshot = current(handle).await?;
      if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
      } else {
        print_snapshot(&snapshot);
      }
    },
  }
  Ok(())
}

async fn current(handle: &ComboHandle) -> Result<ComboSnapshot> {
  handle.snapshot().await.context("combo stopped unexpectedly")
}

fn print_snapshot(snapshot: &ComboSnapshot) {
  let state = if snapshot.is_open { "open" } else { "closed" };
  println!("[{state}] {}", snapshot.display_text);
  println!(
    "  search {:?} (settled {:?})",
    snapshot.raw_search_term, snapshot.settled_search_term
  );
  println!(
    "  {} loaded, more: {}, loading: {}",
    snapshot.options.len(),
    snapshot.has_more,
    snapshot.is_loading
  );
  for entry in snapshot.options.iter().take(SHOWN_OPTIONS) {
    let mark = if entry.is_selected { 'x' } else { ' ' };
    println!("  [{mark}] {} ({})", entry.option.label, entry.option.value);
  }
  if snapshot.options.len() > SHOWN_OPTIONS {
    println!("  ... {} more", snapshot.options.len() - SHOWN_OPTIONS);
  }
}
