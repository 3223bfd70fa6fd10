use clap::{Parser, Subcommand};
use iconsmith::imaging::Quality;
use iconsmith::plan::SizePolicy;
use iconsmith::request::{AssetKind, Dimension, GenerationRequest, OutputFormat, Platform};
use iconsmith::{config, generate, output};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "iconsmith")]
#[command(about = "Generate platform icon and image asset sets from a single source image")]
#[command(long_about = "\
Generate platform icon and image asset sets from a single source image

One source image in, a complete asset set out: the platform's required
variants are enumerated from an embedded template, resized from a single
decode, and written next to the manifest the platform tooling expects.

Output layout:

  assets/
  ├── AppIcon.appiconset/          # kind = icon (ios, watchos, macos)
  │   ├── logo-40.png              # one file per catalog size
  │   ├── logo-1024.png
  │   └── Contents.json            # annotated manifest
  ├── logo.imageset/               # kind = image
  │   ├── logo@1x.png              # one file per scale
  │   ├── logo@2x.png
  │   ├── logo@3x.png
  │   └── Contents.json
  └── ...                          # platform = web writes favicons,
                                   # apple-touch-icons, manifest.json and
                                   # link-tags.html into the output dir

Dimensions: icon catalogs are fixed by the platform. For image sets,
--width/--height give the @1x size; leave both at \"auto\" to derive the
@1x width from the source (treated as the @3x master), or give one to
preserve the aspect ratio for the other.

Defaults come from iconsmith.toml if present ('iconsmith gen-config'
prints a documented stock file); flags always win.")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Source image file
    input: PathBuf,

    /// Output directory
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Asset kind: icon, iconset, image, imageset
    #[arg(long, short)]
    kind: Option<String>,

    /// Target platform: ios, watchos, macos, web (device aliases accepted)
    #[arg(long, short)]
    platform: Option<String>,

    /// Explicit @1x width in pixels, or "auto" (image kinds only)
    #[arg(long)]
    width: Option<String>,

    /// Explicit @1x height in pixels, or "auto" (image kinds only)
    #[arg(long)]
    height: Option<String>,

    /// Output format: bmp, gif, jpeg, png, tiff, source
    #[arg(long, short)]
    format: Option<String>,

    /// JPEG quality (1-100)
    #[arg(long)]
    quality: Option<u32>,

    /// Fail when an icon source is smaller than 1024x1024 instead of warning
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Generate an asset set from a source image
    Generate(GenerateArgs),
    /// List the embedded platform templates and their variants
    Templates,
    /// Print a stock iconsmith.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => {
            let defaults = config::load(Path::new("."))?;

            let request = GenerationRequest {
                kind: AssetKind::from_alias_or_default(
                    args.kind.as_deref().unwrap_or(&defaults.kind),
                ),
                platform: Platform::from_alias_or_default(
                    args.platform.as_deref().unwrap_or(&defaults.platform),
                ),
                width: Dimension::from_arg(args.width.as_deref().unwrap_or(&defaults.width)),
                height: Dimension::from_arg(args.height.as_deref().unwrap_or(&defaults.height)),
                format: OutputFormat::from_alias_or_default(
                    args.format.as_deref().unwrap_or(&defaults.format),
                ),
                quality: Quality::new(args.quality.unwrap_or(defaults.quality)),
            };
            let policy = if args.strict || defaults.strict {
                SizePolicy::Strict
            } else {
                SizePolicy::Lenient
            };
            let output_dir = args
                .output
                .unwrap_or_else(|| PathBuf::from(&defaults.output));

            let report = generate::generate(&args.input, &output_dir, &request, policy)?;
            output::print_report(&report);
        }
        Command::Templates => {
            output::print_template_listing();
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
