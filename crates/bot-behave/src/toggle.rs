/// Explicit enable state for a behavior.
///
/// Replaces listener-driven observable flags: transitions happen through a
/// single synchronous function on the owning routine, so there are no
/// listener cycles and no re-entrancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Toggle {
    Enabled,
    #[default]
    Disabled,
}

impl Toggle {
    pub fn is_enabled(self) -> bool {
        matches!(self, Toggle::Enabled)
    }
}
