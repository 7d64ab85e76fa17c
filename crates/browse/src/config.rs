use std::time::Duration;

/// Quiet period before a search keystroke triggers the pipeline.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Upper end of the price slider (also its reset position).
pub const DEFAULT_PRICE_SLIDER_MAX: f64 = 1000.0;

/// Browsing session settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrowseConfig {
    pub search_debounce: Duration,
    pub price_slider_max: f64,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            price_slider_max: DEFAULT_PRICE_SLIDER_MAX,
        }
    }
}

impl BrowseConfig {
    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }
}
