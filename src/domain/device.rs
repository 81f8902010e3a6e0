//! Device classification of visiting clients.
//!
//! The redirect handler receives a [`DeviceClassifier`] through application
//! state and uses it to label each visit. Only [`DeviceType::Bot`] has an effect
//! on click accounting.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Coarse classification of a visiting client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Desktop,
    Phone,
    Tablet,
    Tv,
    Bot,
    Unknown,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Desktop => "desktop",
            DeviceType::Phone => "phone",
            DeviceType::Tablet => "tablet",
            DeviceType::Tv => "tv",
            DeviceType::Bot => "bot",
            DeviceType::Unknown => "unknown",
        }
    }

    pub fn is_bot(&self) -> bool {
        matches!(self, DeviceType::Bot)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized device type.
#[derive(Debug, thiserror::Error)]
#[error("unknown device type: {0}")]
pub struct ParseDeviceTypeError(String);

impl FromStr for DeviceType {
    type Err = ParseDeviceTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(DeviceType::Desktop),
            "phone" => Ok(DeviceType::Phone),
            "tablet" => Ok(DeviceType::Tablet),
            "tv" => Ok(DeviceType::Tv),
            "bot" => Ok(DeviceType::Bot),
            "unknown" => Ok(DeviceType::Unknown),
            other => Err(ParseDeviceTypeError(other.to_string())),
        }
    }
}

/// Classifies a request's client from its user-agent.
///
/// # Implementations
///
/// - [`crate::infrastructure::device::WootheeClassifier`] - woothee-based parser
pub trait DeviceClassifier: Send + Sync {
    fn classify(&self, user_agent: Option<&str>) -> DeviceType;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_type_str_round_trip() {
        for device in [
            DeviceType::Desktop,
            DeviceType::Phone,
            DeviceType::Tablet,
            DeviceType::Tv,
            DeviceType::Bot,
            DeviceType::Unknown,
        ] {
            assert_eq!(device.as_str().parse::<DeviceType>().unwrap(), device);
        }
    }

    #[test]
    fn test_parse_unknown_device_type_fails() {
        let err = "toaster".parse::<DeviceType>().unwrap_err();
        assert!(err.to_string().contains("toaster"));
    }

    #[test]
    fn test_only_bot_is_bot() {
        assert!(DeviceType::Bot.is_bot());
        assert!(!DeviceType::Desktop.is_bot());
        assert!(!DeviceType::Unknown.is_bot());
    }
}
