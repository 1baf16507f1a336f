mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use cli::{Cli, Commands, FeedArgs};
use nyt_viewer::{translate, Article, ArticleListController, Config, NytClient};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("nyt_viewer={filter_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Url(target) => {
            let base = Url::parse(&config.base_url).with_context(|| format!("invalid base url: {}", config.base_url))?;
            let url = translate(&target.selector()?).url(&base, None)?;
            println!("{url}");
        }
        Commands::Sections => {
            let controller = controller(&config)?;
            controller.reload_content();
            controller.settled().await;
            for section in controller.current_sections() {
                println!("{:<24} {}", section.slug(), section.display_name());
            }
        }
        Commands::Feed(args) => {
            let controller = controller(&config)?;
            run_feed(&controller, &args, config.debounce()).await?;
        }
    }
    Ok(())
}

fn controller(config: &Config) -> Result<ArticleListController> {
    if config.api_key.is_none() {
        warn!("no api key configured; set NYT_VIEWER_API_KEY or api_key in the config file");
    }
    let client = NytClient::new(config)?;
    Ok(ArticleListController::new(Arc::new(client), config.debounce()))
}

async fn run_feed(controller: &ArticleListController, args: &FeedArgs, debounce: Duration) -> Result<()> {
    let selector = args.target.selector()?;
    info!(%selector, "selecting feed");
    controller.set_selector(selector);

    if !args.follow {
        controller.settled().await;
        let articles = controller.current_articles();
        if articles.is_empty() {
            eprintln!("No articles loaded.");
        }
        return print_articles(&articles, args.json);
    }

    // interval() panics on a zero period
    let mut ticker = tokio::time::interval(debounce.max(Duration::from_secs(1)));
    ticker.tick().await;
    let mut updates = Box::pin(controller.article_updates());
    loop {
        tokio::select! {
            next = updates.next() => match next {
                Some(articles) if !articles.is_empty() => print_articles(&articles, args.json)?,
                Some(_) => {}
                None => return Ok(()),
            },
            _ = ticker.tick() => controller.reload_content(),
        }
    }
}

fn print_articles(articles: &[Article], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(articles)?);
        return Ok(());
    }
    for (i, article) in articles.iter().enumerate() {
        println!("{:>3}. {}", i + 1, article.title);
        if let Some(byline) = article.byline.as_deref().filter(|b| !b.is_empty()) {
            println!("     {byline}");
        }
        println!("     {} ({} media)", article.url, article.media.len());
    }
    Ok(())
}
