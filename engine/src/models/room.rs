//! Room model.
//!
//! Rooms carry an environmental pathogen load that staff pick up and
//! deposit during visits. Rooms are created once by the world builder and
//! never destroyed.

use serde::{Deserialize, Serialize};

/// Ward room category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    Single,
    Double,
    Corridor,
    Isolation,
    NursingStation,
}

/// A ward room with its accumulated environmental load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier (e.g. "R_01").
    pub id: String,
    /// Room category; ISOLATION rooms boost hygiene compliance.
    pub room_type: RoomType,
    /// Pathogen load on surfaces, always >= 0.
    pub environmental_load: f64,
}

impl Room {
    /// New room with a clean surface.
    pub fn new(id: impl Into<String>, room_type: RoomType) -> Self {
        Self {
            id: id.into(),
            room_type,
            environmental_load: 0.0,
        }
    }

    /// Whether hygiene checks in this room get the isolation boost.
    pub fn is_isolation(&self) -> bool {
        self.room_type == RoomType::Isolation
    }
}
