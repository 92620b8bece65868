use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pharmacure",
    about = "Pharmacure storefront cart: server and client",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the cart server
    Serve(ServeArgs),
    /// Show the current cart
    Show(ShowArgs),
    /// Add one unit of a product to the cart
    Add(AddArgs),
    /// Remove one unit of a product from the cart
    Remove(RemoveArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// File the cart is persisted to
    #[arg(long)]
    pub cart: Option<PathBuf>,
    /// Directory of static storefront pages to serve
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ServerArgs {
    /// Base URL of a running cart server
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    pub server: String,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub server: ServerArgs,
}

#[derive(Args)]
pub struct AddArgs {
    pub product: String,
    pub price: f64,
    #[command(flatten)]
    pub server: ServerArgs,
}

#[derive(Args)]
pub struct RemoveArgs {
    pub product: String,
    #[command(flatten)]
    pub server: ServerArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve_defaults() {
        let cli = Cli::try_parse_from(["pharmacure", "serve"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert!(args.config.is_none());
            assert!(args.bind.is_none());
            assert!(args.cart.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "pharmacure", "serve", "--bind", "0.0.0.0:8080", "--cart", "/tmp/cart.json",
            "--static-dir", "public",
        ])
        .unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, Some("0.0.0.0:8080".parse().unwrap()));
            assert_eq!(args.cart, Some(PathBuf::from("/tmp/cart.json")));
            assert_eq!(args.static_dir, Some(PathBuf::from("public")));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_serve_rejects_bad_bind() {
        assert!(Cli::try_parse_from(["pharmacure", "serve", "--bind", "nowhere"]).is_err());
    }

    #[test]
    fn parse_add() {
        let cli = Cli::try_parse_from(["pharmacure", "add", "Cough Syrup", "42.5"]).unwrap();
        if let Command::Add(args) = cli.command {
            assert_eq!(args.product, "Cough Syrup");
            assert_eq!(args.price, 42.5);
            assert_eq!(args.server.server, "http://127.0.0.1:3000");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_remove_with_server() {
        let cli = Cli::try_parse_from([
            "pharmacure", "remove", "Aspirin", "--server", "http://shop:3000",
        ])
        .unwrap();
        if let Command::Remove(args) = cli.command {
            assert_eq!(args.product, "Aspirin");
            assert_eq!(args.server.server, "http://shop:3000");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_show_json() {
        let cli = Cli::try_parse_from(["pharmacure", "--format", "json", "show"]).unwrap();
        assert!(matches!(cli.command, Command::Show(_)));
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["pharmacure", "show", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }
}
