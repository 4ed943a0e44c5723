//! Event kinds

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Event kind: any `u16`, with names for the kinds this crate knows about
///
/// Unknown values pass through unchanged, so converting to and from the
/// integer never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Kind(u16);

const NAMES: &[(u16, &str)] = &[
    (0, "set_metadata"),
    (1, "text_note"),
    (9, "chat_message"),
    (11, "thread_message"),
    (9000, "group_put_user"),
    (9001, "group_remove_user"),
    (9002, "group_edit_metadata"),
    (9005, "group_delete_event"),
    (9006, "group_edit_group_status"),
    (9007, "group_create"),
    (9008, "group_delete"),
    (9009, "group_create_invite"),
    (9021, "group_join_request"),
    (10009, "group_list"),
    (39000, "group_metadata"),
    (39001, "group_admins"),
    (39002, "group_members"),
    (39003, "group_roles"),
];

/// How relays are expected to store events of a kind (NIP-01)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindClass {
    /// Stored as-is
    Regular,
    /// Latest per pubkey and kind
    Replaceable,
    /// Not stored
    Ephemeral,
    /// Latest per pubkey, kind and `d` tag
    Addressable,
    /// Outside every defined range
    Unknown,
}

impl Kind {
    pub const SET_METADATA: Kind = Kind(0);
    pub const TEXT_NOTE: Kind = Kind(1);
    pub const CHAT_MESSAGE: Kind = Kind(9);
    pub const THREAD_MESSAGE: Kind = Kind(11);
    pub const GROUP_PUT_USER: Kind = Kind(9000);
    pub const GROUP_REMOVE_USER: Kind = Kind(9001);
    pub const GROUP_EDIT_METADATA: Kind = Kind(9002);
    pub const GROUP_DELETE_EVENT: Kind = Kind(9005);
    pub const GROUP_EDIT_GROUP_STATUS: Kind = Kind(9006);
    pub const GROUP_CREATE: Kind = Kind(9007);
    pub const GROUP_DELETE: Kind = Kind(9008);
    pub const GROUP_CREATE_INVITE: Kind = Kind(9009);
    pub const GROUP_JOIN_REQUEST: Kind = Kind(9021);
    pub const GROUP_LIST: Kind = Kind(10009);
    pub const GROUP_METADATA: Kind = Kind(39000);
    pub const GROUP_ADMINS: Kind = Kind(39001);
    pub const GROUP_MEMBERS: Kind = Kind(39002);
    pub const GROUP_ROLES: Kind = Kind(39003);

    pub const fn new(value: u16) -> Self {
        Kind(value)
    }

    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Name of a known kind, `None` for anything else
    pub fn name(self) -> Option<&'static str> {
        NAMES
            .iter()
            .find(|(value, _)| *value == self.0)
            .map(|(_, name)| *name)
    }

    /// Look up a kind by its name
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(value, _)| Kind(*value))
    }

    pub fn is_known(self) -> bool {
        self.name().is_some()
    }

    pub fn class(self) -> KindClass {
        match self.0 {
            1 | 2 | 4..=44 | 1000..=9999 => KindClass::Regular,
            0 | 3 | 10000..=19999 => KindClass::Replaceable,
            20000..=29999 => KindClass::Ephemeral,
            30000..=39999 => KindClass::Addressable,
            _ => KindClass::Unknown,
        }
    }
}

impl From<u16> for Kind {
    fn from(value: u16) -> Self {
        Kind(value)
    }
}

impl From<Kind> for u16 {
    fn from(kind: Kind) -> Self {
        kind.0
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for Kind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(self.0)
    }
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u16::deserialize(deserializer).map(Kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kind_names() {
        assert_eq!(Kind::TEXT_NOTE.name(), Some("text_note"));
        assert_eq!(Kind::new(39003).name(), Some("group_roles"));
        assert_eq!(Kind::from_name("group_list"), Some(Kind::new(10009)));
    }

    #[test]
    fn test_unknown_kind_passes_through() {
        let kind = Kind::from(30023);
        assert_eq!(kind.name(), None);
        assert!(!kind.is_known());
        assert_eq!(u16::from(kind), 30023);
        assert_eq!(kind.to_string(), "30023");
    }

    #[test]
    fn test_serde_is_bare_integer() {
        assert_eq!(serde_json::to_string(&Kind::new(65535)).unwrap(), "65535");
        let kind: Kind = serde_json::from_str("7").unwrap();
        assert_eq!(kind, Kind::new(7));
        assert!(serde_json::from_str::<Kind>("70000").is_err());
        assert!(serde_json::from_str::<Kind>("-1").is_err());
    }

    #[test]
    fn test_kind_classes() {
        assert_eq!(Kind::TEXT_NOTE.class(), KindClass::Regular);
        assert_eq!(Kind::SET_METADATA.class(), KindClass::Replaceable);
        assert_eq!(Kind::GROUP_LIST.class(), KindClass::Replaceable);
        assert_eq!(Kind::new(20001).class(), KindClass::Ephemeral);
        assert_eq!(Kind::GROUP_METADATA.class(), KindClass::Addressable);
        assert_eq!(Kind::new(45).class(), KindClass::Unknown);
    }

    #[test]
    fn test_display_includes_name() {
        assert_eq!(Kind::TEXT_NOTE.to_string(), "text_note (1)");
    }
}
