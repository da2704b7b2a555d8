//! Bidder integrations and their registration.

use std::sync::Arc;

use crate::bidder::Bidder;
use crate::settings::Settings;

pub mod flipp;

/// Type alias for bidder builder functions.
type BidderBuilder = fn(&Settings) -> Vec<Arc<dyn Bidder>>;

/// Returns the list of all available bidder builder functions.
///
/// Each builder checks the settings for its own configuration and returns
/// any enabled bidders.
fn bidder_builders() -> &'static [BidderBuilder] {
    &[flipp::register_bidders]
}

/// Build every bidder enabled in `settings`.
#[must_use]
pub fn register_bidders(settings: &Settings) -> Vec<Arc<dyn Bidder>> {
    let bidders: Vec<Arc<dyn Bidder>> = bidder_builders()
        .iter()
        .flat_map(|builder| builder(settings))
        .collect();

    log::info!("Registered {} bidders", bidders.len());
    bidders
}
