pub mod feed;
pub mod frankfurter;
pub mod nbrb;
pub mod notion;
pub mod open_meteo;
