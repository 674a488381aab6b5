use tracing::{info, warn};

use crate::error::Result;
use crate::hotel::{Hotel, Room, RoomId};
use crate::math::round2;
use crate::pricing::RoomType;

#[derive(Clone, Debug, PartialEq)]
pub struct Guest {
    pub id: String,
    pub name: String,
    pub nights_at_hotel: u32,
    pub room_type: RoomType,
}

impl Guest {
    pub fn new(id: impl Into<String>, name: impl Into<String>, nights_at_hotel: u32, room_type: RoomType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nights_at_hotel,
            room_type,
        }
    }

    pub fn book_room(&self, hotel: &mut Hotel) -> Result<RoomId> {
        match hotel.get_room(self.room_type) {
            Ok(room) => {
                info!(guest = %self.name, %room, room_type = %self.room_type, "booked");
                Ok(room)
            },
            Err(e) => {
                warn!(guest = %self.name, room_type = %self.room_type, "booking failed: {e}");
                Err(e)
            },
        }
    }

    /// Price of the whole stay in the first available room of the requested type.
    ///
    /// `None` when no such room is available.
    pub fn total_guest_price(&self, rooms: &[Room]) -> Option<f64> {
        rooms
            .iter()
            .find(|r| r.room_type == self.room_type && r.available)
            .map(|r| round2(r.price * f64::from(self.nights_at_hotel)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::hotel::Stars;
    use crate::pricing::Location;
    use std::collections::BTreeMap;

    fn hotel(suites: usize) -> Hotel {
        let rooms = BTreeMap::from([(RoomType::Double, (2, 30.)), (RoomType::Suite, (suites, 45.55))]);

        Hotel::new("Mirador", Stars::Three, &rooms, Location::Rural, 10)
    }

    #[test]
    fn test_total_guest_price() {
        let guest = Guest::new("086429", "Marta", 7, RoomType::Suite);

        assert_eq!(guest.total_guest_price(hotel(1).rooms()), Some(318.85));
        assert_eq!(Guest::new("1", "Ana", 3, RoomType::Double).total_guest_price(hotel(1).rooms()), Some(90.));
    }

    #[test]
    fn test_no_price_without_room() {
        let guest = Guest::new("086429", "Marta", 7, RoomType::Deluxe);

        assert_eq!(guest.total_guest_price(hotel(1).rooms()), None);

        let guest = Guest::new("086429", "Marta", 7, RoomType::Suite);
        let mut hotel = hotel(1);

        guest.book_room(&mut hotel).unwrap();

        assert_eq!(guest.total_guest_price(hotel.rooms()), None);
        assert!(matches!(guest.book_room(&mut hotel), Err(Error::RoomUnavailable { .. })));
    }
}
