mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use roomcal_core::{AuthPolicy, Backend, Frontdesk, LocalStore, RoomCalConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roomcal")]
#[command(about = "Guesthouse booking-availability calendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month availability grid
    Status {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Only show this room
        #[arg(short, long)]
        room: Option<String>,
    },
    /// Book nights for a room (interactive when no dates are given)
    Book {
        /// Room name (exact or unique prefix)
        room: Option<String>,

        /// First night (YYYY-MM-DD)
        from: Option<NaiveDate>,

        /// Last night (YYYY-MM-DD), defaults to FROM for a single night
        to: Option<NaiveDate>,

        /// Guest name
        #[arg(short, long)]
        guest: Option<String>,

        /// Free-form note (phone, details…)
        #[arg(short, long)]
        note: Option<String>,

        /// Act as this identity (defaults to $ROOMCAL_EMAIL)
        #[arg(long)]
        email: Option<String>,
    },
    /// Change guest/note of one booked night
    Edit {
        room: String,
        date: NaiveDate,

        #[arg(short, long)]
        guest: Option<String>,

        #[arg(short, long)]
        note: Option<String>,

        /// Act as this identity (defaults to $ROOMCAL_EMAIL)
        #[arg(long)]
        email: Option<String>,
    },
    /// Cancel one booked night
    Cancel {
        room: String,
        date: NaiveDate,

        /// Act as this identity (defaults to $ROOMCAL_EMAIL)
        #[arg(long)]
        email: Option<String>,
    },
    /// Export all bookings as CSV
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = RoomCalConfig::load()?;

    // Backend is picked once here; everything downstream only sees the
    // SyncAdapter.
    let adapter = match config.backend {
        Backend::Local => LocalStore::new(config.data_path()),
    };
    let auth = AuthPolicy::new(config.admin_email.clone());
    let mut desk = Frontdesk::new(adapter, auth);

    match cli.command {
        Commands::Status { month, room } => {
            commands::status::run(&mut desk, &config, month, room).await
        }
        Commands::Book {
            room,
            from,
            to,
            guest,
            note,
            email,
        } => {
            let identity = commands::identity(email);
            commands::book::run(&mut desk, &config, identity, room, from, to, guest, note).await
        }
        Commands::Edit {
            room,
            date,
            guest,
            note,
            email,
        } => {
            let identity = commands::identity(email);
            commands::edit::run(&mut desk, &config, identity, room, date, guest, note).await
        }
        Commands::Cancel { room, date, email } => {
            let identity = commands::identity(email);
            commands::cancel::run(&mut desk, &config, identity, room, date).await
        }
        Commands::Export { out } => commands::export::run(&mut desk, out).await,
    }
}
