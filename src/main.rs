//! Prices one hotel for a season and books a room for one guest.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use hotel_fuzzy::config;
use hotel_fuzzy::guest::Guest;
use hotel_fuzzy::hotel::{Hotel, HotelDistribution, Stars};
use hotel_fuzzy::pricing::{Location, PricePercentage, PricingConfig, RoomType, Season};
use hotel_fuzzy::Result;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hotel-fuzzy", version, about = "Fuzzy room pricing demo")]
struct Cli {
    /// Season code: 0 low, 1 medium, 2 high
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(0..=2))]
    season: u8,

    /// Hotel star rating
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(3..=5))]
    stars: u8,

    /// Location code: 0 rural, 1 city, 2 sea
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(0..=2))]
    location: u8,

    /// Room type the guest asks for
    #[arg(long, value_enum, default_value_t = RoomArg::Suite)]
    room_type: RoomArg,

    #[arg(long, default_value_t = 7)]
    nights: u32,

    #[arg(long, default_value = "Marta")]
    guest: String,

    /// TOML pricing table replacing the bundled one
    #[arg(long)]
    pricing_table: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoomArg {
    Double,
    Deluxe,
    Suite,
}

impl From<RoomArg> for RoomType {
    fn from(arg: RoomArg) -> Self {
        match arg {
            RoomArg::Double => Self::Double,
            RoomArg::Deluxe => Self::Deluxe,
            RoomArg::Suite => Self::Suite,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let pricing = match &cli.pricing_table {
        Some(path) => PricePercentage::from_config(config::load::<PricingConfig>(path)?)?,
        None => PricePercentage::new()?,
    };

    let distribution = HotelDistribution::new(
        "Hotel Fuzzy",
        Stars::try_from(cli.stars)?,
        Location::try_from(cli.location)?,
        2,
    );
    let mut hotel = distribution.room_pricing(&pricing, Season::try_from(cli.season)?)?;
    let guest = Guest::new("086429", cli.guest, cli.nights, cli.room_type.into());

    println!("Rooms available before reservations:");
    print_summary(&hotel);

    match guest.total_guest_price(hotel.rooms()) {
        Some(price) => println!("Total for {} nights: {price:.2}", guest.nights_at_hotel),
        None => println!("Room type {} is not available", guest.room_type),
    }

    match guest.book_room(&mut hotel) {
        Ok(room) => println!("{} booked {} room {room}", guest.name, guest.room_type),
        Err(e) => println!("{e}"),
    }

    println!("Rooms available after reservations:");
    print_summary(&hotel);

    Ok(())
}

fn print_summary(hotel: &Hotel) {
    for (room_type, available) in hotel.available_rooms_summary(None) {
        println!("  {room_type}: {available}");
    }
}
