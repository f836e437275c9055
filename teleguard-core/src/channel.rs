//! Measurement Channels
//!
//! ## Overview
//!
//! A channel is one measurement type the meter reports and the pipeline
//! forwards. The set is closed: teleinfo frames carry dozens of labels, but
//! only these three are validated and published. Everything else is ignored.
//!
//! | Channel | Label | Validation | Topic |
//! |---------|-------|------------|-------|
//! | Instantaneous power (VA) | `SINSTS` | range | `power` |
//! | Total active energy (Wh) | `EAST` | monotonic | `totalenergy` |
//! | Total injection (Wh) | `EASF02` | monotonic | `injection` |
//!
//! The label is resolved to a `Channel` once, right after the frame is
//! split; nothing downstream compares strings.

/// How a channel's values are checked before acceptance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ValidationMode {
    /// Instantaneous reading that must fall inside configured bounds
    Range,
    /// Cumulative counter that must strictly increase
    Monotonic,
}

/// Fixed set of forwarded measurement types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum Channel {
    /// `SINSTS` - instantaneous apparent power
    InstantaneousPower = 0,
    /// `EAST` - total active energy drawn
    TotalEnergy = 1,
    /// `EASF02` - total energy injected (production)
    TotalInjection = 2,
}

impl Channel {
    /// Every channel, in declaration order
    pub const ALL: [Channel; 3] = [
        Channel::InstantaneousPower,
        Channel::TotalEnergy,
        Channel::TotalInjection,
    ];

    /// Resolve a frame label
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "SINSTS" => Some(Self::InstantaneousPower),
            "EAST" => Some(Self::TotalEnergy),
            "EASF02" => Some(Self::TotalInjection),
            _ => None,
        }
    }

    /// Resolve an emission topic suffix (used by configuration overrides)
    pub fn from_topic(topic: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|channel| channel.topic() == topic)
    }

    /// Frame label as sent by the meter
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InstantaneousPower => "SINSTS",
            Self::TotalEnergy => "EAST",
            Self::TotalInjection => "EASF02",
        }
    }

    /// Validation applied before the outlier check
    pub const fn mode(&self) -> ValidationMode {
        match self {
            Self::InstantaneousPower => ValidationMode::Range,
            Self::TotalEnergy | Self::TotalInjection => ValidationMode::Monotonic,
        }
    }

    /// Topic suffix appended to the configured prefix
    pub const fn topic(&self) -> &'static str {
        match self {
            Self::InstantaneousPower => "power",
            Self::TotalEnergy => "totalenergy",
            Self::TotalInjection => "injection",
        }
    }

    /// Human-readable name with unit
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InstantaneousPower => "Instantaneous power (VA)",
            Self::TotalEnergy => "Total active energy (Wh)",
            Self::TotalInjection => "Total injection (Wh)",
        }
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.topic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for channel in Channel::ALL {
            assert_eq!(Channel::from_label(channel.label()), Some(channel));
            assert_eq!(Channel::from_topic(channel.topic()), Some(channel));
        }
    }

    #[test]
    fn unknown_labels_are_not_channels() {
        assert_eq!(Channel::from_label("ADSC"), None);
        assert_eq!(Channel::from_label("sinsts"), None);
        assert_eq!(Channel::from_label(""), None);
    }

    #[test]
    fn validation_modes() {
        assert_eq!(Channel::InstantaneousPower.mode(), ValidationMode::Range);
        assert_eq!(Channel::TotalEnergy.mode(), ValidationMode::Monotonic);
        assert_eq!(Channel::TotalInjection.mode(), ValidationMode::Monotonic);
    }

    #[test]
    fn descriptions_carry_units() {
        assert_eq!(Channel::InstantaneousPower.description(), "Instantaneous power (VA)");
        assert_eq!(Channel::TotalEnergy.description(), "Total active energy (Wh)");
        assert_eq!(Channel::TotalInjection.description(), "Total injection (Wh)");
    }
}
