//! Permission status value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether the host currently allows notifications to be shown.
///
/// The host owns this state; it is queried and translated on demand and
/// never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    /// The user has not decided yet
    #[default]
    Default = 0,
    /// The user explicitly refused
    Denied = 1,
    /// Notifications may be shown
    Granted = 2,
}

impl PermissionStatus {
    /// Key to value mapping of every status, in numeric order
    pub const PERMISSIONS: [(&'static str, PermissionStatus); 3] = [
        ("default", PermissionStatus::Default),
        ("denied", PermissionStatus::Denied),
        ("granted", PermissionStatus::Granted),
    ];

    /// Translate the host's raw permission value.
    ///
    /// Anything other than an exact `"granted"` or `"denied"`, including an
    /// absent value, becomes `Default`.
    pub fn translate(raw: Option<&str>) -> Self {
        match raw {
            Some("granted") => PermissionStatus::Granted,
            Some("denied") => PermissionStatus::Denied,
            _ => PermissionStatus::Default,
        }
    }

    /// The host's string key for this status
    pub const fn as_str(&self) -> &'static str {
        match self {
            PermissionStatus::Default => "default",
            PermissionStatus::Denied => "denied",
            PermissionStatus::Granted => "granted",
        }
    }

    /// Numeric constant for this status
    pub const fn value(&self) -> u8 {
        *self as u8
    }

    pub const fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_known_values() {
        assert_eq!(
            PermissionStatus::translate(Some("granted")),
            PermissionStatus::Granted
        );
        assert_eq!(
            PermissionStatus::translate(Some("denied")),
            PermissionStatus::Denied
        );
        assert_eq!(
            PermissionStatus::translate(Some("default")),
            PermissionStatus::Default
        );
    }

    #[test]
    fn translate_unknown_falls_back_to_default() {
        for raw in ["", "GRANTED", " granted", "prompt", "allowed", "yes"] {
            assert_eq!(
                PermissionStatus::translate(Some(raw)),
                PermissionStatus::Default,
                "raw value {:?} must not translate to a decided status",
                raw
            );
        }
        assert_eq!(PermissionStatus::translate(None), PermissionStatus::Default);
    }

    #[test]
    fn translate_round_trips_host_keys() {
        for (key, status) in PermissionStatus::PERMISSIONS {
            assert_eq!(PermissionStatus::translate(Some(key)), status);
            assert_eq!(status.as_str(), key);
        }
    }

    #[test]
    fn numeric_values() {
        assert_eq!(PermissionStatus::Default.value(), 0);
        assert_eq!(PermissionStatus::Denied.value(), 1);
        assert_eq!(PermissionStatus::Granted.value(), 2);
    }

    #[test]
    fn only_granted_is_granted() {
        assert!(PermissionStatus::Granted.is_granted());
        assert!(!PermissionStatus::Denied.is_granted());
        assert!(!PermissionStatus::Default.is_granted());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&PermissionStatus::Denied).unwrap();
        assert_eq!(json, "\"denied\"");
    }
}
