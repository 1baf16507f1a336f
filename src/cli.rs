use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use nyt_viewer::{ArticleSection, ContentSelector, LatestSection, ParseSelectorError, ShareType};

/// Browse New York Times article feeds from the terminal
#[derive(Parser)]
#[command(name = "nyt-viewer", version)]
#[command(about = "Fetch, cache and print NYT article feeds", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log requests and cache decisions
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a feed and print its articles
    Feed(FeedArgs),
    /// Print the section catalog used by the latest feed
    Sections,
    /// Print the request URL for a feed without fetching it
    Url(SelectorArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FeedKind {
    Top,
    Latest,
    Viewed,
    Shared,
}

#[derive(Args, Debug)]
pub struct SelectorArgs {
    pub kind: FeedKind,

    /// Section for top stories (e.g. `world`) or latest news (a catalog slug or `all`)
    #[arg(short, long)]
    pub section: Option<String>,

    /// Share channel for the most shared feed
    #[arg(long)]
    pub share: Option<String>,
}

impl SelectorArgs {
    pub fn selector(&self) -> Result<ContentSelector, ParseSelectorError> {
        Ok(match self.kind {
            FeedKind::Top => match &self.section {
                Some(s) => ContentSelector::top(s.parse::<ArticleSection>()?),
                None => ContentSelector::default(),
            },
            FeedKind::Latest => match self.section.as_deref().map(str::trim) {
                None | Some("") => ContentSelector::latest(LatestSection::All),
                Some(s) if s.eq_ignore_ascii_case("all") => ContentSelector::latest(LatestSection::All),
                // the catalog display name is not known here
                Some(s) => ContentSelector::latest(LatestSection::section(s, s)),
            },
            FeedKind::Viewed => ContentSelector::MostViewed,
            FeedKind::Shared => match &self.share {
                Some(s) => ContentSelector::most_shared(s.parse::<ShareType>()?),
                None => ContentSelector::most_shared(ShareType::All),
            },
        })
    }
}

#[derive(Args, Debug)]
pub struct FeedArgs {
    #[command(flatten)]
    pub target: SelectorArgs,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Keep running: reload every debounce interval and print each new list
    #[arg(long)]
    pub follow: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli { Cli::try_parse_from(std::iter::once("nyt-viewer").chain(args.iter().copied())).unwrap() }

    fn feed_selector(args: &[&str]) -> Result<ContentSelector, ParseSelectorError> {
        match parse(args).command {
            Commands::Feed(f) => f.target.selector(),
            _ => panic!("expected feed"),
        }
    }

    #[test]
    fn feed_selectors() {
        assert_eq!(feed_selector(&["feed", "top"]).unwrap(), ContentSelector::top(ArticleSection::Home));
        assert_eq!(feed_selector(&["feed", "top", "-s", "ny region"]).unwrap(), ContentSelector::top(ArticleSection::Nyregion));
        assert_eq!(feed_selector(&["feed", "latest"]).unwrap(), ContentSelector::latest(LatestSection::All));
        assert_eq!(
            feed_selector(&["feed", "latest", "--section", "world"]).unwrap(),
            ContentSelector::latest(LatestSection::section("world", "world"))
        );
        assert_eq!(feed_selector(&["feed", "viewed"]).unwrap(), ContentSelector::MostViewed);
        assert_eq!(feed_selector(&["feed", "shared", "--share", "twitter"]).unwrap(), ContentSelector::most_shared(ShareType::Twitter));
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(matches!(feed_selector(&["feed", "top", "-s", "weather"]), Err(ParseSelectorError::UnknownSection(_))));
        assert!(matches!(feed_selector(&["feed", "shared", "--share", "myspace"]), Err(ParseSelectorError::UnknownShareType(_))));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["sections", "-v", "--config", "/tmp/c.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/c.toml")));
        assert!(matches!(cli.command, Commands::Sections));
    }

    #[test]
    fn feed_flags() {
        match parse(&["feed", "viewed", "--json", "--follow"]).command {
            Commands::Feed(f) => assert!(f.json && f.follow && f.target.kind == FeedKind::Viewed),
            _ => panic!("expected feed"),
        }
    }
}
