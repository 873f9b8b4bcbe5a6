use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use titan_ai::{
    logger::{self, LogLevel, LoggerConfig},
    media::{self, DEFAULT_DOWNLOAD_NAME},
    storage,
    studio::TerminalRenderer,
    AspectRatio, Config, ContentView, GeminiClient, GenerationForm, ImageClient, Quality,
    ReferencePhoto, Session, Studio, Style,
};

#[derive(Parser)]
#[command(name = "titan-ai", version, about = "TITAN AI image studio")]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// Generate an image from a prompt, optionally guided by a reference photo
    Generate(GenerateArgs),
    /// List the models used for each mode
    Models,
}

#[derive(Subcommand)]
enum KeyAction {
    Set { key: String },
    Show,
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(short, long, default_value = "")]
    prompt: String,

    /// Reference photo; switches to edit mode
    #[arg(short, long)]
    reference: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = AspectRatio::Square)]
    aspect_ratio: AspectRatio,

    #[arg(short, long, value_enum, default_value_t = Style::Photorealistic)]
    style: Style,

    #[arg(short, long, value_enum, default_value_t = Quality::Standard)]
    quality: Quality,

    /// Save the result; defaults to titan-ai-generated-image.png
    #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_DOWNLOAD_NAME)]
    download: Option<PathBuf>,

    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let cli = Cli::parse();

    let config = Config::from_env();
    let mut logger_config = LoggerConfig::from_config(&config);
    if cli.verbose {
        logger_config = logger_config.with_level(LogLevel::Debug);
    }
    logger::init_with_config(logger_config)?;

    logger::log_startup_info("TITAN AI", env!("CARGO_PKG_VERSION"));
    if dotenv_loaded {
        log::debug!("✅ .env file loaded");
    }
    logger::log_config_info(&config);

    let store = storage::open_store(&config)?;

    match cli.command {
        Command::Key { action } => match action {
            KeyAction::Set { key } => {
                let mut session = Session::default();
                match session.save_credential(store.as_ref(), &key).await {
                    Ok(confirmation) => println!("{}", confirmation),
                    Err(e) => {
                        eprintln!("{}", e);
                        std::process::exit(1);
                    }
                }
            }
            KeyAction::Show => match store.get().await? {
                Some(credential) => println!("API key: {}", credential.masked()),
                None => println!("Belum ada API key tersimpan."),
            },
        },
        Command::Models => {
            for model in ImageClient::supported_models() {
                println!(
                    "{} - {} ({}) {:?}: {}",
                    model.id, model.name, model.provider, model.category, model.description
                );
            }
        }
        Command::Generate(args) => {
            let session = Session::load(store.as_ref(), &config.gemini).await?;
            let client = GeminiClient::new(config.gemini.clone())?;
            let mut studio = Studio::new(session, Arc::new(client.image().clone()))
                .with_renderer(Arc::new(TerminalRenderer::new(!args.no_color)));

            let mut form = GenerationForm::new(args.prompt)
                .with_aspect_ratio(args.aspect_ratio)
                .with_style(args.style)
                .with_quality(args.quality);
            if let Some(path) = args.reference {
                form = form.with_reference_photo(ReferencePhoto::File(path));
            }

            match studio.generate(&form).await {
                ContentView::Rendered(image) => {
                    if let Some(path) = args.download {
                        media::save_data_uri(image.download_href(), &path).await?;
                    }
                }
                ContentView::Error { .. } => std::process::exit(1),
                _ => {}
            }
        }
    }

    Ok(())
}
