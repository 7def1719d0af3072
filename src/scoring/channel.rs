use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A social platform scored independently by FibboScore.
///
/// Declaration order is the UI order, so `Ord` and `ALL_CHANNELS` agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Instagram,
    Tiktok,
    Youtube,
    Linkedin,
    Twitter,
    Facebook,
}

/// Every channel, in stable display order.
pub const ALL_CHANNELS: [Channel; 6] = [
    Channel::Instagram,
    Channel::Tiktok,
    Channel::Youtube,
    Channel::Linkedin,
    Channel::Twitter,
    Channel::Facebook,
];

impl Channel {
    /// Key used in persisted documents and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Channel::Instagram => "instagram",
            Channel::Tiktok => "tiktok",
            Channel::Youtube => "youtube",
            Channel::Linkedin => "linkedin",
            Channel::Twitter => "twitter",
            Channel::Facebook => "facebook",
        }
    }

    /// Human-facing name.
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Instagram => "Instagram",
            Channel::Tiktok => "TikTok",
            Channel::Youtube => "YouTube",
            Channel::Linkedin => "LinkedIn",
            Channel::Twitter => "X (Twitter)",
            Channel::Facebook => "Facebook",
        }
    }

    /// Icon identifier used by the dashboard.
    pub fn icon(&self) -> &'static str {
        match self {
            Channel::Instagram => "instagram",
            Channel::Tiktok => "music-2",
            Channel::Youtube => "youtube",
            Channel::Linkedin => "linkedin",
            Channel::Twitter => "twitter",
            Channel::Facebook => "facebook",
        }
    }
}

pub fn channel_label(channel: Channel) -> &'static str {
    channel.label()
}

pub fn channel_icon(channel: Channel) -> &'static str {
    channel.icon()
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Channel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        if key == "x" {
            return Ok(Channel::Twitter);
        }
        match ALL_CHANNELS.iter().find(|c| c.key() == key) {
            Some(channel) => Ok(*channel),
            None => {
                let accepted: Vec<&str> = ALL_CHANNELS.iter().map(|c| c.key()).collect();
                bail!("Unknown channel '{}' (expected one of: {})", s, accepted.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_channels_order() {
        let keys: Vec<&str> = ALL_CHANNELS.iter().map(|c| c.key()).collect();
        assert_eq!(
            keys,
            vec!["instagram", "tiktok", "youtube", "linkedin", "twitter", "facebook"]
        );
    }

    #[test]
    fn test_ord_matches_display_order() {
        let mut sorted = ALL_CHANNELS.to_vec();
        sorted.sort();
        assert_eq!(sorted, ALL_CHANNELS.to_vec());
    }

    #[test]
    fn test_labels_and_icons_are_one_to_one() {
        let mut labels: Vec<&str> = ALL_CHANNELS.iter().map(|c| channel_label(*c)).collect();
        let mut icons: Vec<&str> = ALL_CHANNELS.iter().map(|c| channel_icon(*c)).collect();
        labels.sort();
        labels.dedup();
        icons.sort();
        icons.dedup();
        assert_eq!(labels.len(), 6);
        assert_eq!(icons.len(), 6);
        assert_eq!(channel_label(Channel::Twitter), "X (Twitter)");
        assert_eq!(channel_icon(Channel::Tiktok), "music-2");
    }

    #[test]
    fn test_parse_channel() {
        assert_eq!("instagram".parse::<Channel>().unwrap(), Channel::Instagram);
        assert_eq!(" TikTok ".parse::<Channel>().unwrap(), Channel::Tiktok);
        assert_eq!("x".parse::<Channel>().unwrap(), Channel::Twitter);
    }

    #[test]
    fn test_parse_unknown_channel_fails() {
        let err = "myspace".parse::<Channel>().unwrap_err();
        assert!(err.to_string().contains("myspace"));
        assert!(err.to_string().contains("instagram"));
    }

    #[test]
    fn test_serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&Channel::Linkedin).unwrap();
        assert_eq!(json, "\"linkedin\"");
        let parsed: Channel = serde_json::from_str("\"youtube\"").unwrap();
        assert_eq!(parsed, Channel::Youtube);
    }

    #[test]
    fn test_deserialize_unknown_channel_fails() {
        let result: Result<Channel, _> = serde_json::from_str("\"orkut\"");
        assert!(result.is_err());
    }
}
