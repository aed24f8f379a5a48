pub mod art_tile;
pub mod progress_bar;
pub mod transport;
