use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A concrete upstream provider.
///
/// This is the closed set of adapters. Data fetched from one adapter is
/// tagged with its `ProviderId`, never with [`Source::Unified`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Tcbs,
    Vci,
}

impl ProviderId {
    /// Every provider, in fan-out order.
    pub const ALL: [ProviderId; 2] = [ProviderId::Tcbs, ProviderId::Vci];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Tcbs => "tcbs",
            ProviderId::Vci => "vci",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tcbs" => Ok(ProviderId::Tcbs),
            "vci" => Ok(ProviderId::Vci),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

/// Source directive attached to a request.
///
/// `Unified` means "ask every provider and merge". It is resolved by the
/// aggregation services and never reaches an adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Tcbs,
    Vci,
    Unified,
}

impl Source {
    /// The single provider this directive names, if any.
    pub fn single(self) -> Option<ProviderId> {
        match self {
            Source::Tcbs => Some(ProviderId::Tcbs),
            Source::Vci => Some(ProviderId::Vci),
            Source::Unified => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Tcbs => "tcbs",
            Source::Vci => "vci",
            Source::Unified => "unified",
        }
    }
}

impl From<ProviderId> for Source {
    fn from(id: ProviderId) -> Self {
        match id {
            ProviderId::Tcbs => Source::Tcbs,
            ProviderId::Vci => Source::Vci,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = String;

    /// Strict parse. `all` is accepted as an alias of `unified`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unified" | "all" => Ok(Source::Unified),
            other => other
                .parse::<ProviderId>()
                .map(Source::from)
                .map_err(|_| format!("unknown source '{}'", s.trim())),
        }
    }
}
