/// Log tags identifying the originating subsystem
///
/// Each tag maps to a --debug-<key> command-line flag for selective debug
/// output.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Database,
    Search,
    Shipments,
    Webserver,
}

impl LogTag {
    /// Key used for --debug-<key> flag matching
    pub fn to_debug_key(&self) -> String {
        self.to_plain_string().to_lowercase()
    }

    /// Uncolored name used in file output
    pub fn to_plain_string(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Database => "DATABASE",
            LogTag::Search => "SEARCH",
            LogTag::Shipments => "SHIPMENTS",
            LogTag::Webserver => "WEBSERVER",
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
