use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButtonKind, InlineKeyboardMarkup};

use campusbot::cli::{Cli, Commands};
use campusbot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, TelegramMessenger};
use campusbot::{Action, MessagePolicy, PageSettings, Pages, RouteOutcome, Router};
use campuscore::core::{config, init_logger};
use campuscore::{CsvPreferenceStore, PreferenceStore, UniversityApi, UniversityApiClient};

/// Main entry point for the campus bot
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, backend URL, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present, before config is touched
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        None | Some(Commands::Run) => run_bot().await,
        Some(Commands::Preview { user, action }) => run_preview(user, &action).await,
        Some(Commands::Status { user }) => run_status(user).await,
    }
}

fn build_api() -> Result<Arc<dyn UniversityApi>> {
    let client = UniversityApiClient::new(&config::UNIVERSITY_API_URL)?;
    log::info!("University API: {}", client.base_url());
    Ok(Arc::new(client))
}

fn build_pages(api: Arc<dyn UniversityApi>) -> Pages {
    let preferences: Arc<dyn PreferenceStore> =
        Arc::new(CsvPreferenceStore::new(config::SUBGROUP_SETTINGS_PATH.as_str()));
    Pages::new(api, preferences, PageSettings::from_config())
}

async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");

    let api = build_api()?;
    let router = Router::new(build_pages(Arc::clone(&api)));

    let bot = create_bot()?;
    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let messenger = Arc::new(TelegramMessenger::new(bot.clone()));
    let policy = MessagePolicy::from_config();
    log::info!("Message policy: {}", policy);

    let dispatcher = campusbot::Dispatcher::new(api, router, messenger, policy);
    let handler = schema(HandlerDeps::new(Arc::new(dispatcher)));

    use teloxide::update_listeners::Polling;

    // Create polling listener that drops pending updates on start
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    Dispatcher::builder(bot, handler)
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}

async fn run_preview(user_id: i64, token: &str) -> Result<()> {
    let router = Router::new(build_pages(build_api()?));
    let action = Action::parse(token);
    let today = chrono::Local::now().date_naive();

    match router.route(user_id, &action, today).await {
        RouteOutcome::Render(page) => {
            println!("{}\n", page.text);
            print_keyboard(&page.keyboard);
        }
        RouteOutcome::Notify(Some(text)) => println!("notification: {}", text),
        RouteOutcome::Notify(None) => println!("(silent callback answer)"),
    }
    Ok(())
}

fn print_keyboard(keyboard: &InlineKeyboardMarkup) {
    for row in &keyboard.inline_keyboard {
        let buttons: Vec<String> = row
            .iter()
            .map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => format!("[{} -> {}]", button.text, data),
                InlineKeyboardButtonKind::Url(url) => format!("[{} -> {}]", button.text, url),
                _ => format!("[{}]", button.text),
            })
            .collect();
        println!("{}", buttons.join(" "));
    }
}

async fn run_status(user_id: i64) -> Result<()> {
    let status = build_api()?.get_student_status(user_id).await?;
    if status.is_linked {
        println!(
            "user {} is linked (email: {}, since: {})",
            user_id,
            status.student_email.as_deref().unwrap_or("-"),
            status.linked_at.as_deref().unwrap_or("-")
        );
    } else {
        println!("user {} is not linked", user_id);
    }
    Ok(())
}
