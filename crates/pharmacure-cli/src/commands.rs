use anyhow::Context;
use colored::Colorize;
use serde_json::json;

use pharmacure_client::{CartCache, CartClient};
use pharmacure_server::{CartServer, ServerConfig};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Show(args) => {
            let mut client = CartClient::new(args.server.server);
            print_cart(client.fetch()?, &cli.format)
        }
        Command::Add(args) => {
            let mut client = CartClient::new(args.server.server);
            let cache = client.add(&args.product, args.price)?;
            if matches!(cli.format, OutputFormat::Text) {
                println!("{} {} added to cart", "✓".green().bold(), args.product.bold());
            }
            print_cart(cache, &cli.format)
        }
        Command::Remove(args) => {
            let mut client = CartClient::new(args.server.server);
            let cache = client.remove(&args.product)?;
            if matches!(cli.format, OutputFormat::Text) {
                println!("{} {} removed from cart", "✓".green().bold(), args.product.bold());
            }
            print_cart(cache, &cli.format)
        }
    }
}

/// Config file first, then command-line overrides.
pub fn resolve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(cart) = &args.cart {
        config.cart_path = cart.clone();
    }
    if let Some(dir) = &args.static_dir {
        config.static_dir = Some(dir.clone());
    }
    Ok(config)
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    tracing::debug!(?config, "resolved server config");
    println!(
        "Pharmacure cart server on {} (cart: {})",
        config.bind_addr.to_string().bold(),
        config.cart_path.display()
    );
    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(CartServer::new(config).serve())?;
    Ok(())
}

fn print_cart(cache: &CartCache, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let summary = json!({
                "lines": cache.cart(),
                "total_items": cache.total_items(),
                "total_price": cache.total_price(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            if cache.is_empty() {
                println!("Your cart is empty.");
                return Ok(());
            }
            for line in cache.lines() {
                println!(
                    "  {} (x{}) - ₹{:.2}",
                    line.product.bold(),
                    line.quantity,
                    line.subtotal()
                );
            }
            println!(
                "Items: {}  Total: {}",
                cache.total_items().to_string().cyan(),
                format!("₹{:.2}", cache.total_price()).yellow().bold()
            );
        }
    }
    Ok(())
}
