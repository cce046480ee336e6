use std::process::ExitCode;

use clap::{Parser, Subcommand};
use repository::{init_repository, BackendConfig, PostStore as _};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use util::{load_config, load_env};
use view::{
    suggest, CategoryFilter, DetailView, Effect, FallbackImages, ListingView,
    NewPostForm,
};

mod render;

#[derive(Parser)]
#[command(name = "blogfront", about = "Browse, write and edit blog posts")]
struct Cli {
    /// Config file, resolved against the working directory then the
    /// workspace root.
    #[arg(long, default_value = "Config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Latest posts, grouped by category
    List {
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
    },
    /// Every category in use, or suggestions for a partially typed one
    Categories {
        #[arg(long = "match")]
        input: Option<String>,
    },
    /// One post in full
    Show { id: String },
    /// Publish a new post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: String,
        /// HTML body
        #[arg(long)]
        content: String,
        #[arg(long = "image-url")]
        image_urls: Vec<String>,
    },
    /// Change the content or category of a post you own
    Edit {
        id: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a post you own
    Delete { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    let secrets = load_env()?;
    let backend = BackendConfig::from_toml(&config, &secrets)?;
    let fallbacks = FallbackImages::from_config(&config);

    let repository = init_repository(&backend)?;
    let session = repository.auth.current_session().await?;
    info!(task = "start blogfront", signed_in = session.user().is_some());

    let effect = match cli.command {
        Command::List { category } => {
            let mut listing = ListingView::new(repository.post);
            let effect = listing.load().await;
            listing.set_filter(category);
            render::listing(&listing, &fallbacks);
            effect
        }
        Command::Categories { input: None } => {
            let mut listing = ListingView::new(repository.post);
            let effect = listing.load().await;
            render::categories(&listing.categories());
            effect
        }
        Command::Categories { input: Some(input) } => {
            match repository.post.find_categories().await {
                Ok(existing) => {
                    render::suggestions(&suggest(&existing, &input));
                    Effect::none()
                }
                Err(e) => {
                    error!(task = "load categories", err = e.to_string());
                    Effect::posts_load_failed()
                }
            }
        }
        Command::Show { id } => {
            match DetailView::load(repository.post, session, &id).await {
                Ok(detail) => {
                    render::detail(&detail, &fallbacks);
                    Effect::none()
                }
                Err(effect) => effect,
            }
        }
        Command::Create {
            title,
            category,
            content,
            image_urls,
        } => {
            let mut form = NewPostForm {
                title,
                category,
                content,
                image_urls,
            };
            let mut listing = ListingView::new(repository.post);
            listing.create(&mut form, &session).await
        }
        Command::Edit {
            id,
            content,
            category,
        } => match DetailView::load(repository.post, session, &id).await {
            Ok(mut detail) => match detail.begin_edit() {
                Ok(()) => {
                    if let Some(content) = content {
                        detail.set_draft_content(&content);
                    }
                    if let Some(category) = category {
                        detail.set_draft_category(&category);
                    }
                    detail.save().await
                }
                Err(effect) => effect,
            },
            Err(effect) => effect,
        },
        Command::Delete { id } => {
            match DetailView::load(repository.post, session, &id).await {
                Ok(mut detail) => detail.delete().await,
                Err(effect) => effect,
            }
        }
    };

    render::effect(&effect);

    if effect.is_error() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
