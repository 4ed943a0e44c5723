//! Relay information document (NIP-11)

use serde::{Deserialize, Serialize};

/// Metadata a relay serves about itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hex public key of the operator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubkey: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub supported_nips: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limitation: Option<Limitation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payments_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<Fees>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl RelayInfo {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn supports(&self, nip: u32) -> bool {
        self.supported_nips.contains(&nip)
    }

    /// Whether the relay asks for payment or authentication before use
    pub fn is_restricted(&self) -> bool {
        self.limitation.as_ref().is_some_and(|limitation| {
            limitation.payment_required == Some(true) || limitation.auth_required == Some(true)
        })
    }
}

/// Server-imposed limits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limitation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_message_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_event_tags: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_subscriptions: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_required: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fees {
    #[serde(default)]
    pub subscription: Vec<Fee>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Seconds covered by one payment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "name": "JellyFish",
        "description": "Stay Immortal!",
        "pubkey": "bf2bee5281149c7c350f5d12ae32f514c7864ff10805182f4178538c2c421007",
        "contact": "hi@dtonon.com",
        "supported_nips": [1, 2, 4, 9, 11, 22, 28, 40, 70, 77],
        "software": "https://github.com/hoytech/strfry",
        "version": "1.0.4",
        "limitation": {
            "payment_required": true,
            "max_message_length": 70000,
            "max_event_tags": 3000,
            "max_subscriptions": 350,
            "restricted_writes": true
        },
        "payments_url": "https://jellyfish.land/relay",
        "fees": {
            "subscription": [{"amount": 3000, "unit": "sats", "period": 2628003}]
        },
        "icon": "https://jellyfish.land/jellyfish.png"
    }"#;

    #[test]
    fn test_parse_full_document() {
        let info = RelayInfo::from_json(SAMPLE).unwrap();

        assert_eq!(info.name.as_deref(), Some("JellyFish"));
        assert!(info.supports(11));
        assert!(!info.supports(42));
        assert!(info.is_restricted());

        let limitation = info.limitation.as_ref().unwrap();
        assert_eq!(limitation.max_message_length, Some(70000));
        assert_eq!(limitation.auth_required, None);

        let fee = &info.fees.as_ref().unwrap().subscription[0];
        assert_eq!(fee.amount, Some(3000));
        assert_eq!(fee.unit.as_deref(), Some("sats"));
        assert_eq!(fee.period, Some(2628003));
    }

    #[test]
    fn test_missing_fields_default() {
        let info = RelayInfo::from_json("{}").unwrap();
        assert_eq!(info, RelayInfo::default());
        assert!(info.supported_nips.is_empty());
        assert!(!info.is_restricted());
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let info = RelayInfo {
            name: Some("test".to_string()),
            supported_nips: vec![1],
            ..Default::default()
        };
        assert_eq!(
            info.to_json().unwrap(),
            r#"{"name":"test","supported_nips":[1]}"#
        );
    }
}
