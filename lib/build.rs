use anyhow::Error as Anyhow;

/// Trait for configuration that can be turned into a runtime value.
pub trait Build {
    /// The type this configuration sets up.
    type Output;

    /// Consume this configuration to set up [`Build::Output`].
    fn build(self) -> Result<Self::Output, Anyhow>;
}
