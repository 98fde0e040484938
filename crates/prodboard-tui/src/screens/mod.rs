//! Screen implementations. Each screen is a top-level Component.

pub mod overview;
pub mod products;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create screen components in sidebar order.
pub fn create_screens(page_size: usize) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Products,
            Box::new(products::ProductsScreen::new(page_size)),
        ),
        (ScreenId::Overview, Box::new(overview::OverviewScreen::new())),
    ]
}
