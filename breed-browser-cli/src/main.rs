use breed_browser_core::{
    BrowserConfig, ChannelDispatcher, DogApiClient, FetchStatus, PAGE_SIZE, PageController,
    SettleOutcome, render_markers,
};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

type Controller = PageController<ChannelDispatcher<DogApiClient>>;

#[derive(Parser)]
#[command(name = "breed-browser-cli")]
#[command(about = "Browse the dog breed directory page by page")]
struct Cli {
    /// Listing endpoint (overrides config file and BREED_BROWSER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a single page of breeds
    Page {
        /// 1-based page number
        #[arg(default_value = "1", allow_negative_numbers = true)]
        number: i64,
    },
    /// Interactive pager reading commands from stdin
    Browse,
}

/// One line of input in browse mode.
#[derive(Debug, PartialEq)]
enum BrowseCommand {
    Next,
    Prev,
    First,
    Retry,
    Jump(String),
    Quit,
    Help,
}

impl BrowseCommand {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        match line {
            "" => None,
            "n" | "next" => Some(BrowseCommand::Next),
            "p" | "prev" => Some(BrowseCommand::Prev),
            "f" | "first" => Some(BrowseCommand::First),
            "r" | "retry" => Some(BrowseCommand::Retry),
            "q" | "quit" => Some(BrowseCommand::Quit),
            "h" | "help" | "?" => Some(BrowseCommand::Help),
            _ => {
                let target = line
                    .strip_prefix("g ")
                    .or_else(|| line.strip_prefix("goto "))
                    .unwrap_or(line);
                Some(BrowseCommand::Jump(target.to_string()))
            }
        }
    }
}

const BROWSE_HELP: &str =
    "Commands: n(ext), p(rev), f(irst), r(etry), <number> or g <number> to jump, q(uit)";

/// Wait until the fetch for the current page lands, skipping stale results.
async fn settle_current(controller: &mut Controller) {
    while controller.state().status == FetchStatus::Loading {
        let Some((page, result)) = controller.dispatcher_mut().recv_settled().await else {
            break;
        };
        if controller.on_fetch_settled(page, result) == SettleOutcome::Stale {
            log::debug!("Skipped stale result for page {}", page);
        }
    }
}

fn print_page(controller: &Controller) {
    let state = controller.state();

    if state.status == FetchStatus::Error {
        let title = controller.error_kind().map(|kind| kind.title()).unwrap_or("Error");
        println!("{}", title);
        if let Some(message) = &state.error_message {
            println!("  {}", message);
        }
        return;
    }

    let offset = u64::from(state.current_page - 1) * PAGE_SIZE;
    for (i, record) in state.items.iter().enumerate() {
        let photo = if record.image_url.is_some() { "" } else { " (no photo)" };
        println!("  {:>4}. {}{}", offset + i as u64 + 1, record.label, photo);
    }
    if state.items.is_empty() {
        println!("  No breeds on this page.");
    }

    println!();
    println!("  {}", render_markers(&controller.markers(), state.current_page));
    if let Some((start, end)) = controller.showing_range() {
        println!("  Showing {}-{} of {} breeds", start, end, state.total_items);
    }
}

async fn browse(controller: &mut Controller) -> Result<(), Box<dyn std::error::Error>> {
    controller.mount();
    settle_current(controller).await;
    print_page(controller);
    println!("{}", BROWSE_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = BrowseCommand::parse(&line) else {
            continue;
        };

        let navigation = match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => {
                println!("{}", BROWSE_HELP);
                continue;
            }
            BrowseCommand::Next => controller.next_page(),
            BrowseCommand::Prev => controller.prev_page(),
            BrowseCommand::First => controller.first_page(),
            BrowseCommand::Retry => controller.retry(),
            BrowseCommand::Jump(raw) => controller.jump_to_page(&raw),
        };

        match navigation {
            Ok(page) => {
                println!("Loading page {}...", page);
                settle_current(controller).await;
                print_page(controller);
            }
            Err(e) => println!("{}", e),
        }
    }

    controller.dispatcher().shutdown();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = BrowserConfig::load()?;
    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url;
    }

    let client = Arc::new(DogApiClient::new(&config)?);
    let mut controller = PageController::new(ChannelDispatcher::new(client));

    match cli.command {
        Commands::Page { number } => {
            if let Err(e) = controller.request_page(number) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
            settle_current(&mut controller).await;
            print_page(&controller);
            if controller.state().status == FetchStatus::Error {
                std::process::exit(1);
            }
        }
        Commands::Browse => {
            browse(&mut controller).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_browse_commands() {
        assert_eq!(BrowseCommand::parse("  "), None);
        assert_eq!(BrowseCommand::parse("n"), Some(BrowseCommand::Next));
        assert_eq!(BrowseCommand::parse("prev"), Some(BrowseCommand::Prev));
        assert_eq!(BrowseCommand::parse("q\n"), Some(BrowseCommand::Quit));
        assert_eq!(
            BrowseCommand::parse("g 7"),
            Some(BrowseCommand::Jump("7".to_string()))
        );
        assert_eq!(
            BrowseCommand::parse("12"),
            Some(BrowseCommand::Jump("12".to_string()))
        );
        assert_eq!(
            BrowseCommand::parse("abc"),
            Some(BrowseCommand::Jump("abc".to_string()))
        );
    }

    #[test]
    fn test_cli_parses_global_api_url() {
        let cli = Cli::parse_from([
            "breed-browser-cli",
            "--api-url",
            "http://x/api/dogs",
            "page",
            "3",
        ]);
        assert_eq!(cli.api_url.as_deref(), Some("http://x/api/dogs"));
        assert!(matches!(cli.command, Commands::Page { number: 3 }));
    }
}
