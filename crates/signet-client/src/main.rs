//! `signet` – command line front-end for the signature registry.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use signet_client::config::{DEFAULT_API_BASE_URL, DEFAULT_PROCESSOR_BASE_URL};
use signet_client::{
    ClientConfig, Dashboard, Entered, GallerySlot, ImageUpload, Level, Notification, Notifier,
    RegistrationForm, Route, SignatureGallery, SubmitOutcome, VerificationForm,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "signet")]
#[command(about = "Browse registered signatures and submit new ones for processing")]
#[command(version)]
struct Cli {
    /// Query layer base URL (including `/api/v1`).
    #[arg(long, env = "SIGNET_API_BASE_URL", default_value = DEFAULT_API_BASE_URL, global = true)]
    api_url: String,

    /// External processor base URL.
    #[arg(long, env = "SIGNET_PROCESSOR_BASE_URL", default_value = DEFAULT_PROCESSOR_BASE_URL, global = true)]
    processor_url: String,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered signatures, newest first.
    Signatures {
        /// Case-insensitive filter on name or id.
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show one signature with its derived images and verifications.
    Signature {
        id: String,

        /// Print only one image: original, contour, roi or normalized.
        #[arg(long)]
        zoom: Option<GallerySlot>,
    },

    /// List verification attempts, newest first.
    Verifications {
        /// Case-insensitive filter on id.
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show one verification and the baseline it was compared against.
    Verification { id: String },

    /// Register a new baseline signature.
    Register {
        /// Signatory's full legal name.
        #[arg(short, long, default_value = "")]
        name: String,

        /// Signature image (.jpeg, .jpg or .png).
        #[arg(short, long)]
        image: Option<PathBuf>,
    },

    /// Check a candidate signature against the registry.
    Verify {
        /// Signature image (.jpeg, .jpg or .png).
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
}

/// Prints notifications on stderr so stdout stays parseable.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, n: Notification) {
        match n.level {
            Level::Loading => eprintln!("… {}", n.message),
            Level::Success => eprintln!("✓ {}", n.message),
            Level::Error => eprintln!("✗ {}", n.message),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("SIGNET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = ClientConfig::new(cli.api_url, cli.processor_url);
    let dashboard = Dashboard::new(&config, StderrNotifier);
    let json = cli.json;

    match cli.command {
        Command::Signatures { search } => match dashboard.enter_signatures(&search).await? {
            Entered::Show(list) if json => print_json(&list)?,
            Entered::Show(list) => {
                if list.is_empty() {
                    println!("No signatures matching \"{search}\".");
                }
                for s in &list {
                    println!("{}  {}  {}", s.id, s.created_at.to_rfc3339(), s.name);
                }
            }
            Entered::Redirect(route) => redirect_hint(&route),
        },

        Command::Signature { id, zoom } => {
            let detail = dashboard.signature(&id).await?;
            let gallery = SignatureGallery::from_detail(&detail);
            if let Some(slot) = zoom {
                match gallery.image(slot) {
                    Some(url) => println!("{url}"),
                    None => bail!("signature {id} has no {slot} image"),
                }
            } else if json {
                print_json(&*detail)?;
            } else {
                println!("{}  {}", detail.signature.id, detail.signature.name);
                println!("registered {}", detail.signature.created_at.to_rfc3339());
                for (slot, url) in gallery.slots() {
                    println!("  {:<20} {}", slot.label(), url.unwrap_or("(not available)"));
                }
                println!("verifications: {}", detail.verifications.len());
                for v in &detail.verifications {
                    println!("  {}  {}", v.id, verdict(v.is_authentic, v.similarity_score));
                }
            }
        }

        Command::Verifications { search } => match dashboard.enter_verifications(&search).await? {
            Entered::Show(list) if json => print_json(&list)?,
            Entered::Show(list) => {
                if list.is_empty() {
                    println!("No verifications matching \"{search}\".");
                }
                for v in &list {
                    println!(
                        "{}  {}  {}",
                        v.id,
                        v.created_at.to_rfc3339(),
                        verdict(v.is_authentic, v.similarity_score)
                    );
                }
            }
            Entered::Redirect(route) => redirect_hint(&route),
        },

        Command::Verification { id } => {
            let detail = dashboard.verification(&id).await?;
            if json {
                print_json(&*detail)?;
            } else {
                let v = &detail.verification;
                println!("{}  {}", v.id, verdict(v.is_authentic, v.similarity_score));
                println!("query image  {}", v.query_image_url);
                match &detail.signature {
                    Some(s) => println!("baseline     {} ({})  {}", s.name, s.id, s.image_url),
                    None => println!("baseline     (deleted)"),
                }
            }
        }

        Command::Register { name, image } => {
            let image = load_image(image).await?;
            let outcome = dashboard
                .submit_registration(&RegistrationForm::new(name, image))
                .await;
            finish(outcome)?;
        }

        Command::Verify { image } => {
            let image = load_image(image).await?;
            let outcome = dashboard
                .submit_verification(&VerificationForm::new(image))
                .await;
            finish(outcome)?;
        }
    }

    Ok(())
}

async fn load_image(path: Option<PathBuf>) -> anyhow::Result<Option<ImageUpload>> {
    match path {
        Some(path) => {
            let upload = ImageUpload::from_path(&path)
                .await
                .with_context(|| format!("failed to load {}", path.display()))?;
            Ok(Some(upload))
        }
        None => Ok(None),
    }
}

fn finish(outcome: SubmitOutcome) -> anyhow::Result<()> {
    match outcome {
        SubmitOutcome::Navigate(route) => {
            println!("{route}");
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            for e in &errors {
                eprintln!("{}: {}", e.field, e.message);
            }
            bail!("form is incomplete")
        }
        SubmitOutcome::Stay => bail!("submission failed"),
    }
}

fn redirect_hint(route: &Route) {
    match route {
        Route::Register => eprintln!("No signatures registered yet. Run `signet register` to add one."),
        Route::Verify => eprintln!("No verifications yet. Run `signet verify` to check a signature."),
        other => eprintln!("See {other}"),
    }
}

fn verdict(authentic: bool, score: f64) -> String {
    let label = if authentic { "authentic" } else { "not authentic" };
    format!("{label} ({:.1}%)", score * 100.0)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
