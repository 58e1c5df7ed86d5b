/// Configuration options for LALR(1) table construction.
///
/// # Example
///
/// ```rust
/// use parsekit::LalrConfig;
///
/// // Default: conflicts are recorded on the table and the first-written
/// // action wins.
/// let config = LalrConfig::default();
/// assert!(!config.strict);
///
/// // Strict: any conflict fails table construction.
/// let config = LalrConfig { strict: true };
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LalrConfig {
    /// Fail construction when any shift/reduce or reduce/reduce conflict is
    /// recorded, instead of keeping the first-written action and collecting
    /// the conflict as a diagnostic.
    pub strict: bool,
}
