//! Terminal adapter for the contact directory.
//!
//! # Responsibility
//! - Map command-line input onto `contactbook_core` directory operations.
//! - Own user-facing confirmation and status messages.

use clap::{Args, Parser, Subcommand};
use contactbook_core::{
    core_version, default_log_level, init_logging, Contact, ContactFields, Directory,
    JsonFileStore, LoadSource, SaveKind, StoreConfig, DEFAULT_DATA_FILE_NAME,
};
use log::debug;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "contactbook", version, about = "Manage a local contact directory")]
struct Cli {
    /// Contact data file.
    #[arg(long, env = "CONTACTBOOK_FILE", default_value = DEFAULT_DATA_FILE_NAME, global = true)]
    file: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "CONTACTBOOK_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Write the data file without indentation.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all contacts.
    List,
    /// List contacts whose name contains QUERY (case-insensitive).
    Search { query: String },
    /// Show every field of one contact.
    Show { index: usize },
    /// Add a new contact.
    Add(NewContact),
    /// Edit a contact; omitted fields keep their current value.
    Update {
        index: usize,
        #[command(flatten)]
        changes: ContactChanges,
    },
    /// Delete a contact after confirmation.
    Delete {
        index: usize,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
struct NewContact {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    address: String,
}

#[derive(Debug, Args)]
struct ContactChanges {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    address: Option<String>,
}

impl ContactChanges {
    fn apply_to(self, mut fields: ContactFields) -> ContactFields {
        if let Some(name) = self.name {
            fields.name = name;
        }
        if let Some(phone) = self.phone {
            fields.phone = phone;
        }
        if let Some(email) = self.email {
            fields.email = email;
        }
        if let Some(address) = self.address {
            fields.address = address;
        }
        fields
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir.to_string_lossy())?;
    }
    debug!(
        "event=cli_start module=cli version={} file={}",
        core_version(),
        cli.file.display()
    );

    let store = JsonFileStore::from_config(StoreConfig {
        path: cli.file,
        pretty: !cli.compact,
    });
    let report = store.load_report()?;
    if report.source == LoadSource::RecoveredFromCorruption {
        eprintln!(
            "warning: `{}` could not be parsed; starting with an empty directory",
            store.path().display()
        );
    }
    let mut directory = Directory::with_contacts(store, report.contacts);

    match cli.command {
        Command::List => print_hits(directory.search("")),
        Command::Search { query } => print_hits(directory.search(&query)),
        Command::Show { index } => print_details(directory.select(index)?),
        Command::Add(new) => {
            let outcome = directory.save_or_update(ContactFields {
                name: new.name,
                phone: new.phone,
                email: new.email,
                address: new.address,
            })?;
            report_saved(outcome.kind, &outcome.contact);
        }
        Command::Update { index, changes } => {
            let current = directory.select(index)?.fields();
            let outcome = directory.save_or_update(changes.apply_to(current))?;
            directory.clear_selection();
            report_saved(outcome.kind, &outcome.contact);
        }
        Command::Delete { index, yes } => {
            let name = directory.select(index)?.name.clone();
            if !yes && !confirm(&format!("Delete {name}?"))? {
                directory.clear_selection();
                println!("Kept {name}");
                return Ok(());
            }
            let removed = directory.delete_selected()?;
            println!("Deleted {}", removed.name);
        }
    }
    Ok(())
}

fn print_hits<'a>(hits: impl Iterator<Item = (usize, &'a Contact)>) {
    let mut count = 0usize;
    for (index, contact) in hits {
        println!("{index:>4}  {}", contact.name);
        count += 1;
    }
    if count == 0 {
        println!("No contacts");
    }
}

fn print_details(contact: &Contact) {
    println!("name:    {}", contact.name);
    println!("phone:   {}", contact.phone);
    println!("email:   {}", contact.email);
    println!("address: {}", contact.address);
    println!("id:      {}", contact.id);
}

fn report_saved(kind: SaveKind, contact: &Contact) {
    match kind {
        SaveKind::Created => println!("Added {}", contact.name),
        SaveKind::Updated => println!("Updated {}", contact.name),
    }
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
