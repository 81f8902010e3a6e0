//! woothee-based device classification.

use woothee::parser::Parser;

use crate::domain::device::{DeviceClassifier, DeviceType};

/// Classifies clients by parsing the user-agent with woothee.
///
/// Category mapping:
/// - `crawler` → [`DeviceType::Bot`]
/// - `pc` → [`DeviceType::Desktop`]
/// - `smartphone`, `mobilephone` → [`DeviceType::Phone`], or
///   [`DeviceType::Tablet`] for iPads and Android devices without `Mobile`
/// - `appliance` → [`DeviceType::Tv`]
/// - anything else, including a missing user-agent → [`DeviceType::Unknown`]
pub struct WootheeClassifier {
    parser: Parser,
}

impl WootheeClassifier {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }
}

impl Default for WootheeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceClassifier for WootheeClassifier {
    fn classify(&self, user_agent: Option<&str>) -> DeviceType {
        let ua = match user_agent {
            Some(s) if !s.trim().is_empty() => s,
            _ => return DeviceType::Unknown,
        };

        let Some(result) = self.parser.parse(ua) else {
            return DeviceType::Unknown;
        };

        match result.category {
            "crawler" => DeviceType::Bot,
            "pc" => DeviceType::Desktop,
            "smartphone" | "mobilephone" => {
                if result.os == "iPad" || (result.os == "Android" && !ua.contains("Mobile")) {
                    DeviceType::Tablet
                } else {
                    DeviceType::Phone
                }
            }
            "appliance" => DeviceType::Tv,
            _ => DeviceType::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(ua: &str) -> DeviceType {
        WootheeClassifier::new().classify(Some(ua))
    }

    #[test]
    fn test_crawler_is_bot() {
        assert_eq!(
            classify("Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)"),
            DeviceType::Bot
        );
    }

    #[test]
    fn test_desktop_browser() {
        assert_eq!(
            classify(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
            ),
            DeviceType::Desktop
        );
    }

    #[test]
    fn test_iphone_is_phone() {
        assert_eq!(
            classify(
                "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1"
            ),
            DeviceType::Phone
        );
    }

    #[test]
    fn test_ipad_is_tablet() {
        assert_eq!(
            classify(
                "Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.0 Mobile/15E148 Safari/604.1"
            ),
            DeviceType::Tablet
        );
    }

    #[test]
    fn test_missing_user_agent_is_unknown() {
        let classifier = WootheeClassifier::new();

        assert_eq!(classifier.classify(None), DeviceType::Unknown);
        assert_eq!(classifier.classify(Some("")), DeviceType::Unknown);
    }
}
