/// Classification of adapter failures.
///
/// Used to pick a log level for swallowed fan-out legs and to map errors
/// onto transport status codes.
///
/// | Class | Typical cause | Fatal inside a fan-out leg? |
/// |-------|---------------|-----------------------------|
/// | `InvalidInput` | bad symbol or parameter | yes, the caller is wrong |
/// | `NotSupported` | provider lacks the endpoint | no |
/// | `Upstream` | HTTP error, bad payload, 429 | no |
/// | `Timeout` | request or leg deadline elapsed | no |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// The request itself is invalid. No provider would accept it.
    InvalidInput,

    /// The chosen provider has no equivalent endpoint.
    NotSupported,

    /// The provider call failed (network, status, or decoding).
    Upstream,

    /// The provider did not answer in time.
    Timeout,
}

impl ErrorClass {
    /// Stable snake_case name, used in transport error payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::InvalidInput => "invalid_input",
            ErrorClass::NotSupported => "not_supported",
            ErrorClass::Upstream => "upstream",
            ErrorClass::Timeout => "timeout",
        }
    }
}
