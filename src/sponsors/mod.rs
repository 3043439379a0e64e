//! # Sponsors Module
//!
//! Everything on the sponsors page: the elliptical orbit catalog and its
//! drawn rings, the orbiting sponsor tokens with their hover cross-fade,
//! the floating heading banner, and the central fest logo.

mod heading;
mod logo;
mod orbits;
mod token;

pub use heading::{Heading, HeadingConfig, HeadingMotion};
pub use logo::{CentralLogo, CentralLogoConfig};
pub use orbits::{orbit_position, Orbit, OrbitCatalog};
pub use token::{SponsorConfig, SponsorEntry, SponsorToken, TokenMotion};

/// The festival's sponsor roster: eight tokens spread over three orbits.
pub fn roster() -> Vec<SponsorEntry> {
    vec![
        SponsorEntry::new("Sponsor 1", 0, 0.0),
        SponsorEntry::new("Sponsor 2", 0, 120.0),
        SponsorEntry::new("Sponsor 3", 0, 240.0),
        SponsorEntry::new("Sponsor 4", 1, 60.0),
        SponsorEntry::new("Sponsor 5", 1, 180.0),
        SponsorEntry::new("Sponsor 6", 1, 300.0),
        SponsorEntry::new("Sponsor 7", 2, 45.0),
        SponsorEntry::new("Sponsor 8", 2, 135.0),
    ]
}
