use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use rolo::book::AddressBook;
use rolo::config::{self, Config};
use rolo::form::RawFormInput;
use rolo::logging::{self, LogTarget};
use rolo::notify::TerminalAction;
use rolo::submit;
use rolo::ui::app::App;

#[derive(Parser, Debug)]
#[command(name = "rolo", version, about = "Terminal address book")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a person non-interactively and print the outcome
    Add(AddArgs),
    /// Print every person in the book
    List,
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    phone: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    address: String,

    /// Comma-separated tag labels
    #[arg(long, default_value = "")]
    tags: String,
}

impl From<AddArgs> for RawFormInput {
    fn from(args: AddArgs) -> Self {
        RawFormInput {
            name: args.name,
            phone: args.phone,
            email: args.email,
            address: args.address,
            tags: args.tags,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    let target = match cli.command {
        Some(_) => LogTarget::Stderr,
        None => LogTarget::File,
    };
    logging::init(&config, target)?;
    log::debug!("loaded configuration from {}", config.config_path.display());

    let mut book = seed_book(&config);

    match cli.command {
        Some(Command::Add(args)) => Ok(handle_add(&mut book, args.into())),
        Some(Command::List) => {
            handle_list(&book);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let mut app = App::new(book, &config);
            app.run()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Build the book from the contacts listed in the config. Entries that do
/// not make it through the add pipeline are logged and skipped.
fn seed_book(config: &Config) -> AddressBook {
    let mut book = AddressBook::with_tag_colors(&config.tag_colors);
    for contact in &config.contacts {
        let report = submit::submit_form(&mut book, contact);
        if report.added().is_none() {
            log::warn!(
                "skipping configured contact `{}`: {}",
                contact.name(),
                report.notification.body
            );
        }
    }
    book
}

fn handle_add(book: &mut AddressBook, input: RawFormInput) -> ExitCode {
    let report = submit::submit_form(book, &input);
    let notification = &report.notification;

    println!("{}", notification.title);
    println!("{}", notification.header);
    println!("{}", notification.body);

    match notification.action {
        TerminalAction::Close => ExitCode::SUCCESS,
        TerminalAction::KeepOpen => ExitCode::FAILURE,
    }
}

fn handle_list(book: &AddressBook) {
    if book.is_empty() {
        println!("No contacts");
        return;
    }
    for person in book.persons() {
        println!("{}", person.snapshot());
    }
}
