mod facility;

pub use facility::*;
