use std::path::{Path, PathBuf};
use std::sync::Arc;

use acas_dispatch::{Dispatcher, Function, TxContext};
use acas_protocol::Response;
use acas_server::{AcasServer, ServerConfig};
use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::json;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Serve(args) => cmd_serve(args, cli.data_dir),
        Command::Put(args) => cmd_put(&*open(cli.data_dir)?, args, format),
        Command::Get(args) => cmd_get(&*open(cli.data_dir)?, args, format),
        Command::Anchor(args) => cmd_anchor(&*open(cli.data_dir)?, args, format),
        Command::AnchorBatch(args) => cmd_anchor_batch(&*open(cli.data_dir)?, args, format),
        Command::Anchors => cmd_anchors(&*open(cli.data_dir)?, format),
        Command::Warmup => cmd_warmup(&*open(cli.data_dir)?, format),
    }
}

fn config_for(data_dir: Option<PathBuf>) -> ServerConfig {
    let mut config = ServerConfig::default();
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    config
}

/// Open the dispatcher over the on-disk store and ledger.
fn open(data_dir: Option<PathBuf>) -> anyhow::Result<Arc<Dispatcher>> {
    let config = config_for(data_dir);
    let server = AcasServer::open(config.clone())
        .with_context(|| format!("opening data directory {}", config.data_dir.display()))?;
    Ok(Arc::clone(server.dispatcher()))
}

/// Invoke `function` and fail unless the envelope is OK.
fn call(dispatcher: &Dispatcher, function: Function, args: Vec<Vec<u8>>) -> anyhow::Result<Response> {
    let mut all = vec![function.name().as_bytes().to_vec()];
    all.extend(args);
    let response = dispatcher.invoke(&TxContext::generate(), &all);
    if !response.is_ok() {
        bail!("{} ({})", response.message, response.status.code());
    }
    Ok(response)
}

fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn payload_text(response: &Response) -> String {
    response
        .payload
        .as_deref()
        .map(|p| String::from_utf8_lossy(p).into_owned())
        .unwrap_or_default()
}

fn cmd_serve(args: ServeArgs, data_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    if let Some(bind) = &args.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind}"))?;
    }
    println!(
        "ACAS server on {} (data: {})",
        config.bind_addr.to_string().bold(),
        config.data_dir.display()
    );
    let server = AcasServer::open(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_put(dispatcher: &Dispatcher, args: PutArgs, format: OutputFormat) -> anyhow::Result<()> {
    let content = read_file(&args.file)?;
    let size = content.len();
    let response = call(dispatcher, Function::WriteContent, vec![content])?;
    let address = payload_text(&response);
    match format {
        OutputFormat::Text => println!("{} {} ({} bytes)", "✓".green().bold(), address.yellow(), size),
        OutputFormat::Json => println!("{}", json!({ "address": address, "size": size })),
    }
    Ok(())
}

fn cmd_get(dispatcher: &Dispatcher, args: GetArgs, format: OutputFormat) -> anyhow::Result<()> {
    let response = call(
        dispatcher,
        Function::ReadContent,
        vec![args.address.clone().into_bytes()],
    )?;
    let content = response.payload.unwrap_or_default();
    match &args.output {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("writing {}", path.display()))?;
            match format {
                OutputFormat::Text => println!(
                    "{} {} bytes written to {}",
                    "✓".green(),
                    content.len(),
                    path.display()
                ),
                OutputFormat::Json => println!(
                    "{}",
                    json!({ "address": args.address, "size": content.len(), "output": path })
                ),
            }
        }
        None => {
            use std::io::Write;
            std::io::stdout().write_all(&content)?;
        }
    }
    Ok(())
}

fn cmd_anchor(dispatcher: &Dispatcher, args: AnchorArgs, format: OutputFormat) -> anyhow::Result<()> {
    call(
        dispatcher,
        Function::WriteAnchor,
        vec![args.address.clone().into_bytes()],
    )?;
    match format {
        OutputFormat::Text => println!("{} Anchored {}", "✓".green().bold(), args.address.yellow()),
        OutputFormat::Json => println!("{}", json!({ "anchored": args.address })),
    }
    Ok(())
}

fn cmd_anchor_batch(
    dispatcher: &Dispatcher,
    args: AnchorBatchArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let batch = read_file(&args.batch_file)?;
    let anchor = read_file(&args.anchor_file)?;
    call(dispatcher, Function::AnchorBatch, vec![batch, anchor.clone()])?;

    // Re-writing identical content is a no-op that yields the address.
    let address = payload_text(&call(dispatcher, Function::WriteContent, vec![anchor])?);
    match format {
        OutputFormat::Text => println!("{} Batch anchored at {}", "✓".green().bold(), address.yellow()),
        OutputFormat::Json => println!("{}", json!({ "anchored": address })),
    }
    Ok(())
}

fn cmd_anchors(dispatcher: &Dispatcher, format: OutputFormat) -> anyhow::Result<()> {
    let anchors = dispatcher.anchors().anchors()?;
    match format {
        OutputFormat::Text if anchors.is_empty() => println!("No anchors."),
        OutputFormat::Text => {
            for address in &anchors {
                println!("{}", address.as_str().yellow());
            }
        }
        OutputFormat::Json => {
            let list: Vec<&str> = anchors.iter().map(|a| a.as_str()).collect();
            println!("{}", json!({ "anchors": list }));
        }
    }
    Ok(())
}

fn cmd_warmup(dispatcher: &Dispatcher, format: OutputFormat) -> anyhow::Result<()> {
    call(dispatcher, Function::Warmup, Vec::new())?;
    match format {
        OutputFormat::Text => println!("{} Ready.", "✓".green().bold()),
        OutputFormat::Json => println!("{}", json!({ "status": "ok" })),
    }
    Ok(())
}
