//! HTTP handlers, grouped by resource.

pub mod health;
pub mod inventory;
pub mod metrics;
pub mod orders;

use tokio::sync::Mutex;

use crate::station::Station;

/// Shared application state accessible from all handlers.
///
/// Every handler goes through the one lock, so the station sees a single
/// caller at a time.
pub struct AppState<R> {
    pub station: Mutex<Station<R>>,
}

impl<R> AppState<R> {
    pub fn new(station: Station<R>) -> Self {
        Self {
            station: Mutex::new(station),
        }
    }
}
