//! Modifier key state carried by pointer events and required by subscriptions.

/// Modifier key state.
///
/// Used both as the state captured from an event and as a subscription's
/// required state. Matching is exact: every flag must be equal. Unspecified
/// flags default to `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn alt() -> Self {
        Self { alt: true, ..Self::default() }
    }

    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    pub fn meta() -> Self {
        Self { meta: true, ..Self::default() }
    }

    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }

    pub fn with_alt(self) -> Self {
        Self { alt: true, ..self }
    }

    pub fn with_ctrl(self) -> Self {
        Self { ctrl: true, ..self }
    }

    pub fn with_meta(self) -> Self {
        Self { meta: true, ..self }
    }

    pub fn with_shift(self) -> Self {
        Self { shift: true, ..self }
    }

    /// True when no modifier is held.
    pub fn is_empty(&self) -> bool {
        *self == Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert!(Modifiers::none().is_empty());
        assert!(Modifiers::ctrl().ctrl);
        assert!(!Modifiers::ctrl().shift);
        assert_eq!(
            Modifiers::ctrl().with_shift(),
            Modifiers { ctrl: true, shift: true, ..Default::default() }
        );
    }

    #[test]
    fn test_exact_equality() {
        // A superset is not a match
        assert_ne!(Modifiers::ctrl(), Modifiers::ctrl().with_alt());
        assert_ne!(Modifiers::meta(), Modifiers::none());
        assert_eq!(Modifiers::alt().with_meta(), Modifiers::meta().with_alt());
    }
}
