//! Display Preferences Model
//!
//! Calendar rendering preferences (colors, font, visibility toggles) as an
//! explicit value object owned by the settings endpoint and broadcast over
//! the sync bus on change, instead of untyped page-wide events.

use serde::{Deserialize, Serialize};

/// Calendar display preferences, one row per store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayPreferences {
    /// Card color for BO bookings
    pub booked_color: String,
    /// Card color for CI bookings
    pub occupied_color: String,
    /// Cell color for `Kotor` days
    pub dirty_color: String,
    /// Cell color for `Aktif` (ready) days
    pub ready_color: String,
    pub font_family: String,
    pub font_size: u8,
    /// Show the guest's phone number on booking cards
    pub show_phone: bool,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            booked_color: "#fbbf24".to_string(),
            occupied_color: "#34d399".to_string(),
            dirty_color: "#f87171".to_string(),
            ready_color: "#a7f3d0".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 13,
            show_phone: false,
        }
    }
}
