use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Asset-system list a stylesheet can be a member of.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    AsRefStr,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusList {
    /// Known to the asset system.
    Registered,
    /// Scheduled for output on the current page.
    #[default]
    #[strum(to_string = "enqueued", serialize = "queue")]
    #[serde(alias = "queue")]
    Enqueued,
}

/// Lifecycle state of a registry entry. `Enqueued` implies registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FontStatus {
    Registered,
    Enqueued,
}
