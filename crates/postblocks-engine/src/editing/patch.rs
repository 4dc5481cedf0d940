/// Result of applying a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patch {
    /// False when the command was a structural no-op
    pub changed: bool,
    pub version: u64,
}
