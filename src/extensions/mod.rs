pub mod events;

pub use events::{EventPlacementConfig, PlacedEvent, place_events_on_line};
