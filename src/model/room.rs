use std::fmt;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RoomId(pub String);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        RoomId(id.to_owned())
    }
}

/// Room category label such as `SINGLE_AC`. Labels are free-form and are
/// never validated against the inventory.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RoomType(pub String);

impl RoomType {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomType {
    fn from(label: &str) -> Self {
        RoomType(label.to_owned())
    }
}

#[derive(Clone, Debug)]
pub struct Room {
    pub id: RoomId,
    pub room_type: RoomType,
    pub capacity: i64,
}

impl Room {
    #[cfg(test)]
    pub fn new(id: impl Into<RoomId>, room_type: impl Into<RoomType>, capacity: i64) -> Room {
        Room {
            id: id.into(),
            room_type: room_type.into(),
            capacity,
        }
    }

    /// Number of assignable slots in this room. A non-positive capacity
    /// gives none.
    pub fn slots(&self) -> usize {
        usize::try_from(self.capacity).unwrap_or(0)
    }
}
