//! PantryChef, a pantry-driven recipe generator client.
//!
//! With the `gui` feature, opens the recipe page in a native webview window.
//! Without it, runs the same recipe board from the command line.

#[cfg(feature = "gui")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    pantrychef::ui::webview_app::run()
}

#[cfg(not(feature = "gui"))]
use clap::{Parser, Subcommand};

#[cfg(not(feature = "gui"))]
#[derive(Parser)]
#[command(name = "pantrychef", version, about = "Generate recipes from what is in your pantry")]
struct Cli {
    /// Database file (defaults to the platform data directory)
    #[arg(long, global = true)]
    db: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[cfg(not(feature = "gui"))]
#[derive(Subcommand)]
enum Command {
    /// Ask the server for recipes
    Generate {
        /// Ingredients, e.g. "chicken, rice"
        pantry: String,
        /// Dietary constraint, e.g. "vegan"
        #[arg(long, default_value = "")]
        diet: String,
    },
    /// Sign in to the recipe server; the session is kept for later commands
    Login {
        username: String,
        /// Read from standard input when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Show past queries
    History {
        /// Forget all past queries
        #[arg(long)]
        clear: bool,
    },
}

#[cfg(not(feature = "gui"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use pantrychef::app::App;
    use pantrychef::managers::history_manager::HistoryManagerTrait;
    use pantrychef::types::recipe::{GenerateForm, GenerateOutcome, LoginRequest};

    env_logger::init();
    let cli = Cli::parse();

    let db_path = match cli.db {
        Some(path) => path,
        None => {
            let dir = pantrychef::platform::get_data_dir();
            std::fs::create_dir_all(&dir)?;
            dir.join("pantrychef.db")
        }
    };
    let mut app = App::new(&db_path.to_string_lossy(), None)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Command::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => {
                    eprint!("Password: ");
                    let mut line = String::new();
                    std::io::stdin().read_line(&mut line)?;
                    line.trim_end_matches(['\r', '\n']).to_string()
                }
            };
            let mut view = app.view();
            let result = runtime.block_on(app.board.login(&mut view, &LoginRequest { username, password }));
            for message in view.notifications() {
                println!("» {}", message);
            }
            result?;
        }
        Command::Generate { pantry, diet } => {
            let mut view = app.view();
            let outcome = runtime.block_on(app.board.generate(&mut view, &GenerateForm::new(&pantry, &diet)));
            for message in view.notifications() {
                println!("» {}", message);
            }
            match outcome {
                GenerateOutcome::Rendered { total, rendered } => {
                    for card in app.board.cards() {
                        println!();
                        println!("  {}. {}", card.index + 1, card.title);
                        if !card.summary.is_empty() {
                            println!("     {}", card.summary);
                        }
                        println!("     {}", card.open_url());
                    }
                    if total > rendered {
                        println!();
                        println!("  ({} more not shown)", total - rendered);
                    }
                }
                GenerateOutcome::NoRecipes => println!("No recipes returned."),
                GenerateOutcome::SessionExpired => println!("Run `pantrychef login <username>` first."),
                _ => {}
            }
        }
        Command::History { clear } => {
            if clear {
                let mut view = app.view();
                app.board.clear_history(&mut view)?;
                for message in view.notifications() {
                    println!("» {}", message);
                }
                return Ok(());
            }
            let entries = app.board.history().load();
            if entries.is_empty() {
                println!("{}", pantrychef::services::history_view::EMPTY_HISTORY_TEXT);
            }
            for entry in entries {
                println!("  {}  ({} recipes)", entry.label(), entry.results.len());
            }
        }
    }

    Ok(())
}
