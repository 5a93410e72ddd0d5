use std::fmt;

use serde::{Serialize, Serializer};
use vnstock_market_data::{ProviderId, Source};

/// Which source actually produced a payload.
///
/// `Unified` only appears when more than one provider contributed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceTag {
    Provider(ProviderId),
    Unified,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Provider(provider) => provider.as_str(),
            SourceTag::Unified => Source::Unified.as_str(),
        }
    }
}

impl From<ProviderId> for SourceTag {
    fn from(provider: ProviderId) -> Self {
        SourceTag::Provider(provider)
    }
}

impl From<SourceTag> for Source {
    fn from(tag: SourceTag) -> Self {
        match tag {
            SourceTag::Provider(provider) => provider.into(),
            SourceTag::Unified => Source::Unified,
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SourceTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A payload together with the source that produced it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub data: T,
    pub source: SourceTag,
}

impl<T> Sourced<T> {
    pub fn new(data: T, source: SourceTag) -> Self {
        Self { data, source }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            data: f(self.data),
            source: self.source,
        }
    }
}
