//! Blog Dash CLI
//!
//! Terminal front end for the dashboard:
//! - List posts
//! - Show a post with its comments
//! - Open any route through the navigation guard
//! - Interactive shell with login/logout and retry

use anyhow::Context;
use blogdash::render::{render_navbar, render_screen};
use blogdash::{
    generate_default_config, App, Config, Credentials, Navigation, Page, PostId, Route, Screen,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "blogdash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse blog posts and comments from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Username for the mock login
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Password for the mock login (6+ characters)
    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the first page of posts
    Posts,

    /// Show a post and its comments
    Post {
        /// Post ID
        id: PostId,
    },

    /// Open a route by path (e.g. /dashboard/post/3)
    Open {
        /// Route path
        path: String,
    },

    /// Interactive session
    Shell,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config warnings go through a temporary subscriber until `init` runs.
    let config = tracing::subscriber::with_default(blogdash::logging::bootstrap(), || {
        match &cli.config {
            Some(path) => Config::load_with_env(path),
            None => Ok(Config::load_default()),
        }
    })?;
    blogdash::logging::init(&config.logging);

    let requested = match cli.command {
        Commands::Config { output } => return write_config(output),
        Commands::Shell => {
            let app = App::new(config)?;
            return run_shell(&app, &cli.format).await;
        }
        Commands::Posts => Route::Dashboard,
        Commands::Post { id } => Route::PostDetail(id),
        Commands::Open { path } => Route::parse(&path)?,
    };

    let app = App::new(config)?;
    if cli.username.is_some() || cli.password.is_some() {
        let credentials = Credentials::new(
            cli.username.unwrap_or_default(),
            cli.password.unwrap_or_default(),
        );
        if let Err(e) = app.session().submit(credentials) {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }

    let mut navigator = app.navigator();
    let navigation = navigator.navigate(requested);
    report_redirect(&navigation);

    let page = app.open(navigation.resolved);
    let screen = page.settled().await;
    print_screen(&app, &screen, &cli.format)?;

    let login_required = requested.is_protected() && navigation.resolved == Route::Login;
    if login_required {
        eprintln!();
        eprintln!("Log in with --username and --password to view {}", requested);
    }
    if login_required || is_failure(&screen) {
        std::process::exit(1);
    }

    Ok(())
}

fn write_config(output: Option<PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &content).with_context(|| format!("writing {path:?}"))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

async fn run_shell(app: &App, format: &str) -> anyhow::Result<()> {
    let mut navigator = app.navigator();
    let mut page = app.open(navigator.current());
    print_shell_help();
    show(app, &page, format)?;
    // Set while the current page still has a screen to print once it settles
    let mut pending = true;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        // Commands stay available while a request is in flight.
        let line = if pending {
            tokio::select! {
                screen = page.settled() => {
                    pending = false;
                    print_screen(app, &screen, format)?;
                    continue;
                }
                line = lines.next_line() => line?,
            }
        } else {
            lines.next_line().await?
        };
        let Some(line) = line else {
            break;
        };

        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command {
            "login" => {
                let credentials = Credentials::new(
                    words.next().unwrap_or_default(),
                    words.next().unwrap_or_default(),
                );
                match app.session().submit(credentials) {
                    Ok(profile) => {
                        println!("Logged in as {} <{}>", profile.username, profile.email);
                        match navigator.refresh() {
                            Some(navigation) => {
                                report_redirect(&navigation);
                                page = app.open(navigation.resolved);
                            }
                            None => continue,
                        }
                    }
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                }
            }
            "logout" => {
                let navigation = navigator.logout();
                page = app.open(navigation.resolved);
            }
            "open" => {
                let Some(path) = words.next() else {
                    println!("usage: open <path>");
                    continue;
                };
                match navigator.navigate_path(path) {
                    Ok(navigation) => {
                        report_redirect(&navigation);
                        page = app.open(navigation.resolved);
                    }
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                }
            }
            "back" => {
                let navigation = navigator.back();
                if navigation.resolved != page.route() {
                    page = app.open(navigation.resolved);
                }
            }
            "retry" => page.retry(),
            "whoami" => {
                match app.session().session() {
                    Some(session) => println!(
                        "{} <{}>, logged in at {}",
                        session.profile.username,
                        session.profile.email,
                        session.since.format("%Y-%m-%d %H:%M:%S UTC")
                    ),
                    None => println!("Not logged in"),
                }
                continue;
            }
            "help" => {
                print_shell_help();
                continue;
            }
            "quit" | "exit" => break,
            other => {
                println!("Unknown command: {}", other);
                continue;
            }
        }

        show(app, &page, format)?;
        pending = true;
    }

    Ok(())
}

/// Print the loading screen right away; settled screens are printed by the
/// shell loop once they arrive.
fn show(app: &App, page: &Page, format: &str) -> anyhow::Result<()> {
    let screen = page.screen();
    if is_loading(&screen) {
        print_screen(app, &screen, format)?;
    }
    Ok(())
}

fn print_shell_help() {
    println!("{}", shell_help());
}

fn shell_help() -> &'static str {
    "
Commands:
  login <username> <password>
  logout
  open <path>      e.g. /dashboard or /dashboard/post/3
  back
  retry            also works while a screen is loading
  whoami
  help
  quit | exit"
}

fn print_screen(app: &App, screen: &Screen, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(screen)?),
        _ => {
            if app.session().is_authenticated() {
                println!("{}", render_navbar(&app.navbar()));
                println!("{}", "-".repeat(60));
            }
            println!("{}", render_screen(screen));
        }
    }
    Ok(())
}

fn report_redirect(navigation: &Navigation) {
    if navigation.redirected() {
        eprintln!(
            "Redirected from {} to {}",
            navigation.requested, navigation.resolved
        );
    }
}

fn is_loading(screen: &Screen) -> bool {
    use blogdash::{DetailScreen, ListScreen};

    matches!(
        screen,
        Screen::List(ListScreen::Loading) | Screen::Detail(DetailScreen::Loading)
    )
}

fn is_failure(screen: &Screen) -> bool {
    use blogdash::{DetailScreen, ListScreen};

    matches!(
        screen,
        Screen::List(ListScreen::Error { .. })
            | Screen::Detail(DetailScreen::Error { .. } | DetailScreen::NotFound)
    )
}
