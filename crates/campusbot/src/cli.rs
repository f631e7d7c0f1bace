use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "campusbot")]
#[command(author, version, about = "Telegram assistant for university students: schedule, services, profile", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (long polling)
    Run,

    /// Render one page against the live backend and print it
    Preview {
        /// User id the page is rendered for
        #[arg(short, long)]
        user: i64,

        /// Button token to route, e.g. `schedule_tomorrow` or `teacher_page_А_1`
        #[arg(short, long, default_value = "open_main")]
        action: String,
    },

    /// Print whether a user's account is linked
    Status {
        /// User id to check
        #[arg(short, long)]
        user: i64,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
