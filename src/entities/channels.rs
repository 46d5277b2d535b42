//! Channel filter: translate/rotate sub-attribute selection granularity.
//!
//! The filter is process-wide state applied at selection time, not stored
//! per set. With all six channels on (or all off) selection degenerates to
//! whole objects; any other combination selects individual attributes.

use serde::{Deserialize, Serialize};

/// One of the six transform channels the filter can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Tx,
    Ty,
    Tz,
    Rx,
    Ry,
    Rz,
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::Tx,
        Channel::Ty,
        Channel::Tz,
        Channel::Rx,
        Channel::Ry,
        Channel::Rz,
    ];

    /// Attribute suffix as the host scene spells it.
    pub fn suffix(self) -> &'static str {
        match self {
            Channel::Tx => ".tx",
            Channel::Ty => ".ty",
            Channel::Tz => ".tz",
            Channel::Rx => ".rx",
            Channel::Ry => ".ry",
            Channel::Rz => ".rz",
        }
    }

    /// Checkbox label in the channel panel.
    pub fn label(self) -> &'static str {
        match self {
            Channel::Tx => "TX",
            Channel::Ty => "TY",
            Channel::Tz => "TZ",
            Channel::Rx => "RX",
            Channel::Ry => "RY",
            Channel::Rz => "RZ",
        }
    }
}

/// Six boolean flags, all enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelFilter {
    pub tx: bool,
    pub ty: bool,
    pub tz: bool,
    pub rx: bool,
    pub ry: bool,
    pub rz: bool,
}

impl Default for ChannelFilter {
    fn default() -> Self {
        Self {
            tx: true,
            ty: true,
            tz: true,
            rx: true,
            ry: true,
            rz: true,
        }
    }
}

impl ChannelFilter {
    pub fn get(&self, channel: Channel) -> bool {
        match channel {
            Channel::Tx => self.tx,
            Channel::Ty => self.ty,
            Channel::Tz => self.tz,
            Channel::Rx => self.rx,
            Channel::Ry => self.ry,
            Channel::Rz => self.rz,
        }
    }

    pub fn set(&mut self, channel: Channel, on: bool) {
        match channel {
            Channel::Tx => self.tx = on,
            Channel::Ty => self.ty = on,
            Channel::Tz => self.tz = on,
            Channel::Rx => self.rx = on,
            Channel::Ry => self.ry = on,
            Channel::Rz => self.rz = on,
        }
    }

    pub fn set_all(&mut self, on: bool) {
        for channel in Channel::ALL {
            self.set(channel, on);
        }
    }

    /// All on or all off: filtering has no effect and whole objects are
    /// selected instead of attributes.
    pub fn is_uniform(&self) -> bool {
        let flags = Channel::ALL.map(|c| self.get(c));
        flags.iter().all(|&f| f) || !flags.iter().any(|&f| f)
    }

    /// Enabled channels in fixed tx..rz order.
    pub fn enabled(&self) -> Vec<Channel> {
        Channel::ALL.into_iter().filter(|&c| self.get(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_uniform() {
        let filter = ChannelFilter::default();
        assert!(filter.is_uniform());
        assert_eq!(filter.enabled().len(), 6);
    }

    #[test]
    fn test_all_off_is_uniform() {
        let mut filter = ChannelFilter::default();
        filter.set_all(false);
        assert!(filter.is_uniform());
        assert!(filter.enabled().is_empty());
    }

    #[test]
    fn test_partial_filter() {
        let mut filter = ChannelFilter::default();
        filter.set_all(false);
        filter.set(Channel::Tx, true);
        filter.set(Channel::Rz, true);
        assert!(!filter.is_uniform());
        assert_eq!(filter.enabled(), vec![Channel::Tx, Channel::Rz]);
    }

    #[test]
    fn test_partial_json_keeps_missing_flags_on() {
        // Imported documents may carry a subset of flags; unlisted ones
        // stay at their default (enabled).
        let filter: ChannelFilter = serde_json::from_str(r#"{"tx": false}"#).unwrap();
        assert!(!filter.tx);
        assert!(filter.ty && filter.rz);
    }
}
