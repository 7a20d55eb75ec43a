//! Launch-time context overrides

use serde::{Deserialize, Serialize};

/// Root element name of a context descriptor
pub const ROOT_ELEMENT: &str = "Context";

/// Root attribute holding the background processor delay (seconds)
pub const BACKGROUND_PROCESSOR_DELAY_ATTR: &str = "backgroundProcessorDelay";

/// Root attribute holding the reload flag
pub const RELOADABLE_ATTR: &str = "reloadable";

/// Delay value meaning "background processing disabled"
pub const DISABLED_DELAY: i32 = -1;

/// Attributes forced onto the context descriptor for one launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextOverrides {
    /// Seconds between background processor runs; `-1` disables it
    pub background_processor_delay: i32,
    /// Reload the application when its classes change
    pub reloadable: bool,
}

impl Default for ContextOverrides {
    fn default() -> Self {
        Self {
            background_processor_delay: DISABLED_DELAY,
            reloadable: false,
        }
    }
}

impl ContextOverrides {
    /// Create overrides
    #[inline]
    #[must_use]
    pub fn new(background_processor_delay: i32, reloadable: bool) -> Self {
        Self {
            background_processor_delay,
            reloadable,
        }
    }

    /// Attribute value for the delay
    #[inline]
    #[must_use]
    pub fn delay_value(&self) -> String {
        self.background_processor_delay.to_string()
    }

    /// Attribute value for the reload flag (`"true"` / `"false"`)
    #[inline]
    #[must_use]
    pub fn reloadable_value(&self) -> &'static str {
        if self.reloadable {
            "true"
        } else {
            "false"
        }
    }
}
