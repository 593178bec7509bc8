//! TableTalk CLI
//!
//! Console booking assistant and administration commands for a running
//! TableTalk server.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use domain::entities::Booking;
use presentation_cli::{ApiClient, TalkSession, is_quit};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// TableTalk CLI
#[derive(Parser)]
#[command(name = "tabletalk-cli")]
#[command(author, version, about = "TableTalk restaurant booking CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Server URL
    #[arg(short, long, global = true, env = "TABLETALK_URL", default_value = "http://localhost:3001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Book a table by talking to the assistant
    ///
    /// Each typed line is one answer. With --audio, each file is
    /// transcribed by the server and used as the answer instead.
    /// Example: tabletalk-cli talk --audio name.webm --audio city.webm
    Talk {
        /// Recorded answers, in order
        #[arg(long)]
        audio: Vec<PathBuf>,
    },

    /// Manage bookings
    #[command(subcommand)]
    Bookings(BookingCommands),

    /// Forecast and seating suggestion for a visit
    Weather {
        /// Day of the visit (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,

        /// City
        #[arg(short, long)]
        location: String,
    },

    /// Seats left in the hour slot of a date and time
    Availability {
        /// Day of the visit (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,

        /// Time as spoken, e.g. "7 pm"
        #[arg(short, long)]
        time: String,
    },

    /// Check server readiness
    Health,
}

#[derive(Subcommand)]
enum BookingCommands {
    /// Most recent bookings first
    List {
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show one booking
    Get { id: String },
    /// Cancel a booking
    Cancel { id: String },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn print_booking(booking: &Booking) {
    println!(
        "{}  {:<10} {} {:<8} {:>2} guest(s)  {:<10} {}",
        booking.booking_id,
        booking.status.to_string(),
        booking.booking_date.format("%Y-%m-%d"),
        booking.booking_time,
        booking.number_of_guests,
        booking.seating_preference.to_string(),
        booking.customer_name,
    );
}

async fn talk(client: ApiClient, audio: Vec<PathBuf>) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let mut session = TalkSession::new(client.clone(), today);
    println!("🤖 {}", TalkSession::greeting());

    if !audio.is_empty() {
        for path in audio {
            let transcript = client.transcribe(&path).await?;
            println!("🎤 {}", transcript.text);
            for line in session.respond(&transcript.text).await {
                println!("🤖 {line}");
            }
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if is_quit(&line) {
            break;
        }
        for reply in session.respond(&line).await {
            println!("🤖 {reply}");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = ApiClient::new(cli.url);

    match cli.command {
        Commands::Talk { audio } => talk(client, audio).await?,

        Commands::Bookings(BookingCommands::List { limit }) => {
            let bookings = client.list_bookings(limit).await?;
            if bookings.is_empty() {
                println!("No bookings yet.");
            }
            for booking in &bookings {
                print_booking(booking);
            }
        },

        Commands::Bookings(BookingCommands::Get { id }) => {
            let booking = client.get_booking(&id).await?;
            println!("{}", serde_json::to_string_pretty(&booking)?);
        },

        Commands::Bookings(BookingCommands::Cancel { id }) => {
            let booking = client.cancel_booking(&id).await?;
            println!("✅ Booking cancelled");
            print_booking(&booking);
        },

        Commands::Weather { date, location } => {
            let advice = client.weather(date, &location).await?;
            println!("🌦️  {location} on {date}: {}", advice.condition);
            println!("{}", advice.suggestion);
        },

        Commands::Availability { date, time } => {
            let slot = client.availability(date, &time).await?;
            match slot.slot {
                Some(hour) => println!(
                    "{date} {hour}: {} of {} seats available ({} booked)",
                    slot.available, slot.total, slot.booked
                ),
                None => println!("'{time}' names no hour; bookings at it are not capacity-checked"),
            }
        },

        Commands::Health => match client.ready().await {
            Ok((status, _)) if status.is_success() => {
                println!("✅ Healthy");
            },
            Ok((status, report)) => {
                println!("❌ Unhealthy: HTTP {status}");
                println!("{}", serde_json::to_string_pretty(&report)?);
                std::process::exit(1);
            },
            Err(e) => {
                println!("❌ Unhealthy: {e}");
                std::process::exit(1);
            },
        },
    }

    Ok(())
}
