use std::fmt;

/// Where an operation was initiated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSource {
    /// HTTP endpoint
    API,

    /// CLI command
    CLI,

    /// Start-up and maintenance work
    System,
}

impl fmt::Display for RequestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestSource::API => "api",
            RequestSource::CLI => "cli",
            RequestSource::System => "system",
        };
        f.write_str(name)
    }
}
