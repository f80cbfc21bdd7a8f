//! artprint: render artwork mockups and keep the shop's products in sync.

use artprint_commerce::{ApiError, TransportKind};
use artprint_core::config::{Anchor, OutputFormat};
use artprint_core::error::exit_codes;
use artprint_telemetry::{LogFormat, TelemetryConfig};
use clap::{ArgAction, Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::{products, render, shadow};

/// Mockup rendering and product sync for Artprint
#[derive(Parser)]
#[command(name = "artprint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log line format (compact, json)
    #[arg(long, global = true, default_value = "compact", env = "ARTPRINT_LOG_FORMAT")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every configured job (or the selected ones)
    Render {
        /// Path to the render config (default: artprint.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only render the job with this id (repeatable)
        #[arg(short, long = "job")]
        jobs: Vec<String>,
    },

    /// Render a single artwork file without a config
    RenderOne(RenderOneArgs),

    /// Print the layered drop shadow as CSS or JSON
    Shadow(ShadowArgs),

    /// Manage products in the shop
    Products {
        /// Admin API to use
        #[arg(short, long, default_value = "rest")]
        transport: TransportKind,

        /// Write the response to this JSON file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Args, Debug, Clone)]
struct RenderOneArgs {
    /// Artwork image file
    file: PathBuf,

    /// Physical width in inches
    #[arg(long)]
    width_in: f64,

    /// Physical height in inches
    #[arg(long)]
    height_in: f64,

    /// Artwork id used in the output file name (default: file stem)
    #[arg(long)]
    id: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "jpeg")]
    format: OutputFormat,

    /// Output directory
    #[arg(short, long, default_value = "static/output-images")]
    output_dir: PathBuf,

    /// Output file prefix; files are named <name>-<id>.<ext>
    #[arg(long)]
    output_name: Option<String>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 2048)]
    canvas_width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 2048)]
    canvas_height: u32,

    /// Wall texture to place the artwork on
    #[arg(long, requires = "wall_height_in", conflicts_with = "transparent")]
    wall: Option<PathBuf>,

    /// Real-world height of the wall texture in inches
    #[arg(long)]
    wall_height_in: Option<f64>,

    /// Render on a transparent canvas
    #[arg(long)]
    transparent: bool,

    /// Where to anchor the artwork
    #[arg(long, default_value = "center")]
    position: Anchor,

    /// Horizontal offset in pixels
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    x_offset: i32,

    /// Vertical offset in pixels
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    y_offset: i32,

    /// Size limit in bytes
    #[arg(long, default_value_t = artprint_core::config::DEFAULT_MAX_FILE_SIZE)]
    max_size: u64,

    /// Number of shadow layers
    #[arg(long, default_value_t = 7)]
    shadow_layers: usize,
}

#[derive(Args, Debug, Clone)]
struct ShadowArgs {
    /// Number of layers
    #[arg(short = 'n', long, default_value_t = 7)]
    layers: usize,

    /// Light angle in degrees
    #[arg(long, default_value_t = 40.0)]
    angle: f64,

    /// Distance of the last layer in pixels
    #[arg(long, default_value_t = 150.0)]
    length: f64,

    /// Blur radius of the last layer
    #[arg(long, default_value_t = 100.0)]
    final_blur: f64,

    /// Spread added to every layer
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    spread: f64,

    /// Opacity of the last layer
    #[arg(long, default_value_t = 0.2)]
    final_transparency: f64,

    /// Print the layers as JSON instead of CSS
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum ProductAction {
    /// List every product, following pagination (REST only)
    List {
        /// Products per page
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },

    /// Fetch one product
    Get {
        /// Product id
        id: String,
    },

    /// Create a product from a JSON file
    Create {
        /// JSON file with the product fields
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Update a product from a JSON file
    Update {
        /// Product id
        id: String,

        /// JSON file with the fields to change
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },

    /// Attach rendered images to a product (REST only)
    UploadImages {
        /// Product id
        id: String,

        /// Image files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory relative file names are resolved against
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry =
        TelemetryConfig::from_verbosity(cli.verbose, cli.quiet).with_format(cli.log_format);
    if let Err(e) = artprint_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    let result = match cli.command {
        Commands::Render { config, jobs } => render::run(config.as_deref(), &jobs),
        Commands::RenderOne(args) => render::run_one(&args),
        Commands::Shadow(args) => shadow::run(&args),
        Commands::Products {
            transport,
            output,
            action,
        } => products::run(transport, output.as_deref(), action).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

/// Configuration problems exit with a distinct code.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    let code = if let Some(core) = err.downcast_ref::<artprint_core::Error>() {
        core.exit_code()
    } else if matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::Config(_) | ApiError::MissingEnvVar(_))
    ) {
        exit_codes::CONFIG_ERROR
    } else {
        exit_codes::FAILURE
    };
    u8::try_from(code).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_jobs() {
        let argv = ["artprint", "render", "--job", "lemons", "--job", "pears", "-v"];
        let cli = Cli::try_parse_from(argv).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Render { config, jobs } => {
                assert!(config.is_none());
                assert_eq!(jobs, vec!["lemons", "pears"]);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_parse_render_one() {
        let cli = Cli::try_parse_from([
            "artprint", "render-one", "art/lemons.jpg", "--width-in", "31", "--height-in", "30",
            "--position", "bottom-right", "--x-offset", "-20", "--format", "png",
        ])
        .unwrap();
        let Commands::RenderOne(args) = cli.command else {
            panic!("expected render-one");
        };
        assert_eq!(args.position, Anchor::BottomRight);
        assert_eq!(args.x_offset, -20);
        assert_eq!(args.format, OutputFormat::Png);
        assert_eq!(args.max_size, 19 * 1024 * 1024);
    }

    #[test]
    fn test_wall_requires_height() {
        assert!(Cli::try_parse_from([
            "artprint",
            "render-one",
            "a.jpg",
            "--width-in",
            "1",
            "--height-in",
            "1",
            "--wall",
            "wall.jpg",
        ])
        .is_err());
    }

    #[test]
    fn test_parse_products() {
        let cli = Cli::try_parse_from([
            "artprint",
            "products",
            "--transport",
            "graphql",
            "-o",
            "out.json",
            "get",
            "8074394992832",
        ])
        .unwrap();
        match cli.command {
            Commands::Products { transport, output, action } => {
                assert_eq!(transport, TransportKind::Graphql);
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert!(matches!(action, ProductAction::Get { ref id } if id == "8074394992832"));
            }
            _ => panic!("expected products"),
        }
        let soap = ["artprint", "products", "--transport", "soap", "list"];
        assert!(Cli::try_parse_from(soap).is_err());
    }

    #[test]
    fn test_exit_codes() {
        let config = anyhow::Error::new(artprint_core::Error::config_not_found("artprint.toml"));
        assert_eq!(exit_code_for(&config), 3);

        let missing = anyhow::Error::new(ApiError::missing_env("SHOPIFY_ACCESS_TOKEN"));
        assert_eq!(exit_code_for(&missing), 3);

        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), 1);
    }
}
