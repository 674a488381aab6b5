//! Room inventory priced through [`PricePercentage`].

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::pricing::{Location, PricePercentage, RoomType, Season};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RoomId(pub usize);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub room_type: RoomType,
    pub price: f64,
    pub available: bool,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Stars {
    Three,
    Four,
    Five,
}

impl Stars {
    pub fn count(self) -> u8 {
        match self {
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }

    /// Rooms and base nightly price per room type.
    fn room_table(self) -> [(RoomType, usize, f64); 3] {
        match self {
            Self::Three => [
                (RoomType::Double, 10, 30.),
                (RoomType::Deluxe, 7, 50.),
                (RoomType::Suite, 3, 70.),
            ],
            Self::Four => [
                (RoomType::Double, 20, 70.),
                (RoomType::Deluxe, 10, 100.),
                (RoomType::Suite, 5, 150.),
            ],
            Self::Five => [
                (RoomType::Double, 30, 100.),
                (RoomType::Deluxe, 15, 150.),
                (RoomType::Suite, 10, 200.),
            ],
        }
    }
}

impl TryFrom<u8> for Stars {
    type Error = Error;

    fn try_from(stars: u8) -> Result<Self> {
        match stars {
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            5 => Ok(Self::Five),
            code => Err(Error::InvalidCode { kind: "star rating", code }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Hotel {
    name: String,
    stars: Stars,
    location: Location,
    capacity: u32,
    rooms: Vec<Room>,
}

impl Hotel {
    /// Expands `(quantity, price)` per room type into individual available rooms.
    pub fn new(
        name: impl Into<String>,
        stars: Stars,
        rooms_quantity: &BTreeMap<RoomType, (usize, f64)>,
        location: Location,
        capacity: u32,
    ) -> Self {
        let rooms = rooms_quantity
            .iter()
            .flat_map(|(room_type, (quantity, price))| {
                (0..*quantity).map(move |_| (*room_type, *price))
            })
            .enumerate()
            .map(|(i, (room_type, price))| Room {
                id: RoomId(i + 1),
                room_type,
                price,
                available: true,
            })
            .collect();

        Self {
            name: name.into(),
            stars,
            location,
            capacity,
            rooms,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stars(&self) -> Stars {
        self.stars
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Marks the first available room of `room_type` as taken.
    pub fn get_room(&mut self, room_type: RoomType) -> Result<RoomId> {
        let room = self
            .rooms
            .iter_mut()
            .find(|r| r.room_type == room_type && r.available)
            .ok_or(Error::RoomUnavailable { room_type })?;

        room.available = false;
        info!(hotel = %self.name, room = %room.id, %room_type, "room taken");

        Ok(room.id)
    }

    /// Available rooms per type, optionally restricted to one type.
    pub fn available_rooms_summary(&self, filter: Option<RoomType>) -> BTreeMap<RoomType, usize> {
        let mut summary = BTreeMap::new();

        for room in &self.rooms {
            if filter.is_some_and(|t| t != room.room_type) {
                continue;
            }

            let count = summary.entry(room.room_type).or_insert(0);

            if room.available {
                *count += 1;
            }
        }

        summary
    }
}

/// Hotel template priced per season at construction time.
#[derive(Clone, Debug)]
pub struct HotelDistribution {
    pub name: String,
    pub stars: Stars,
    pub location: Location,
    pub capacity: u32,
}

impl HotelDistribution {
    pub fn new(name: impl Into<String>, stars: Stars, location: Location, capacity: u32) -> Self {
        Self {
            name: name.into(),
            stars,
            location,
            capacity,
        }
    }

    pub fn room_pricing(&self, pricing: &PricePercentage, season: Season) -> Result<Hotel> {
        let mut rooms_quantity = BTreeMap::new();

        for (room_type, quantity, base_price) in self.stars.room_table() {
            let price = pricing.calculated_price(season, room_type, self.location, base_price)?;

            rooms_quantity.insert(room_type, (quantity, price));
        }

        debug!(hotel = %self.name, stars = self.stars.count(), ?season, ?rooms_quantity, "priced rooms");

        Ok(Hotel::new(
            self.name.clone(),
            self.stars,
            &rooms_quantity,
            self.location,
            self.capacity,
        ))
    }
}
