use clap::{Parser, Subcommand};
use hexbot::catalog::DirCatalog;
use hexbot::digest::Sha512Generator;
use hexbot::postprocess::RenderOptions;
use hexbot::output;
use hexbot::render::{Armada, Avatar, AvatarRenderer, DEFAULT_SIZE, RenderRequest};
use rayon::prelude::*;
use std::path::PathBuf;

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
#[command(name = "hexbot")]
#[command(about = "Deterministic robot avatar generator")]
#[command(long_about = "\
Deterministic robot avatar generator

Hash a token, get a robot: the same token always renders the same avatar,
different tokens render visually distinct ones. Artwork comes from a catalog
directory laid out like this:

  assets/
  ├── sets/                        # part sets
  │   ├── robots/                  # first set = canonical, has color variants
  │   │   └── blue/
  │   │       ├── 000#01body/      # one directory per anatomical layer
  │   │       │   └── 000#01body-round.png
  │   │       └── 001#02eyes/
  │   └── squids/                  # other sets hold layer directories directly
  └── backgrounds/                 # background sets, flat file lists
      └── plain/

Artwork names carry two keys around '#': the prefix pins enumeration order
across operating systems, the rest decides stacking order when layers are
drawn. Pass --set/--background/--color to steer a render, or the literal
\"any\" to let the hash decide.")]
#[command(version = version_string())]
struct Cli {
    /// Artwork catalog directory (contains sets/ and backgrounds/)
    #[arg(long, default_value = "assets", global = true)]
    assets: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Style flags shared by every rendering command.
#[derive(clap::Args, Clone)]
struct StyleArgs {
    /// Part set name, or "any" to let the hash choose
    #[arg(long)]
    set: Option<String>,

    /// Background set name, "any", or a literal #RRGGBB / #AARRGGBB fill
    #[arg(long)]
    background: Option<String>,

    /// Color variant (applies to the canonical part set only)
    #[arg(long)]
    color: Option<String>,

    /// Output width in pixels
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    width: u32,

    /// Output height in pixels
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    height: u32,

    /// Desaturate the finished image
    #[arg(long)]
    grayscale: bool,

    /// Box-blur the finished image
    #[arg(long)]
    blur: bool,
}

impl StyleArgs {
    fn to_request(&self) -> RenderRequest {
        RenderRequest {
            part_set: self.set.clone(),
            background: self.background.clone(),
            color: self.color.clone(),
            width: self.width,
            height: self.height,
            options: RenderOptions {
                grayscale: self.grayscale,
                blur: self.blur,
            },
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Render one avatar to a PNG file
    Render {
        /// Input token (any text)
        token: String,

        /// Output file (default: <token>.png)
        #[arg(long, short)]
        out: Option<PathBuf>,

        #[command(flatten)]
        style: StyleArgs,
    },
    /// Render a three-robot armada scene to a PNG file
    Armada {
        /// Input token (any text)
        token: String,

        /// Output file (default: <token>.armada.png)
        #[arg(long, short)]
        out: Option<PathBuf>,

        #[command(flatten)]
        style: StyleArgs,
    },
    /// Render many tokens in parallel into a directory
    Batch {
        /// Input tokens
        #[arg(required = true)]
        tokens: Vec<String>,

        /// Output directory
        #[arg(long, default_value = "avatars")]
        out_dir: PathBuf,

        /// Render armada scenes instead of single avatars
        #[arg(long)]
        armada: bool,

        #[command(flatten)]
        style: StyleArgs,
    },
    /// List the part sets, colors and background sets of a catalog
    Catalog {
        /// Emit JSON instead of the human-readable listing
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Render { token, out, style } => {
            let catalog = DirCatalog::open(&cli.assets)?;
            let path = out.unwrap_or_else(|| PathBuf::from(format!("{}.png", file_stem(&token))));
            render_to(&token, false, &catalog, &style.to_request(), &path)?;
            println!(
                "{}",
                output::format_render_line(&token, style.width, style.height, &path)
            );
        }
        Command::Armada { token, out, style } => {
            let catalog = DirCatalog::open(&cli.assets)?;
            let path =
                out.unwrap_or_else(|| PathBuf::from(format!("{}.armada.png", file_stem(&token))));
            render_to(&token, true, &catalog, &style.to_request(), &path)?;
            println!(
                "{}",
                output::format_render_line(&token, style.width, style.height, &path)
            );
        }
        Command::Batch {
            tokens,
            out_dir,
            armada,
            style,
        } => {
            let catalog = DirCatalog::open(&cli.assets)?;
            std::fs::create_dir_all(&out_dir)?;
            let request = style.to_request();

            let suffix = if armada { ".armada.png" } else { ".png" };
            let results: Vec<_> = tokens
                .par_iter()
                .map(|token| {
                    let path = out_dir.join(format!("{}{}", file_stem(token), suffix));
                    let result = render_to(token, armada, &catalog, &request, &path);
                    (token, path, result)
                })
                .collect();

            let mut failed = 0;
            for (token, path, result) in &results {
                match result {
                    Ok(()) => println!(
                        "{}",
                        output::format_render_line(token, style.width, style.height, path)
                    ),
                    Err(err) => {
                        failed += 1;
                        eprintln!("{token}: {err}");
                    }
                }
            }
            println!(
                "{}",
                output::format_batch_summary(results.len() - failed, failed)
            );
            if failed > 0 {
                return Err(format!("{failed} renders failed").into());
            }
        }
        Command::Catalog { json } => {
            let catalog = DirCatalog::open(&cli.assets)?;
            let summary = output::catalog_summary(&catalog);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                for line in output::format_catalog(&summary) {
                    println!("{line}");
                }
            }
        }
    }

    Ok(())
}

/// Render one token with the strategy picked here at the call site.
fn render_to(
    token: &str,
    armada: bool,
    catalog: &DirCatalog,
    request: &RenderRequest,
    path: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let digests = Sha512Generator::new();
    let image = if armada {
        Armada::from_text(token, &digests)?.render(catalog, request)?
    } else {
        Avatar::from_text(token, &digests)?.render(catalog, request)?
    };
    image.save(path)?;
    Ok(())
}

/// Make a token safe to use as a file stem.
fn file_stem(token: &str) -> String {
    token
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
