use core::fmt::Debug;
use core::hash::Hash;

/// Per-cell payload stored on a board.
///
/// Modification tracking compares elements by value, so two cells holding equal payloads are the same
/// entry in the modified set. Variants that need to tell equal payloads apart should carry an identity
/// (usually the cell position) inside the element.
pub trait ElementData: Clone + Eq + Hash + Debug {}

impl<T> ElementData for T where T: Clone + Eq + Hash + Debug {}

/// Classification policy associated with a board.
///
/// Boards only store the rule. Concrete variants and their collaborators are the ones that consult it.
pub trait CaseRule: Debug + Send + Sync {
    /// Short human-readable name, used by editors and logs. Defaults to the type name.
    fn name(&self) -> &str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use super::*;

    #[derive(Debug)]
    struct UnnamedRule;

    impl CaseRule for UnnamedRule {}

    #[test]
    fn rule_name_defaults_to_type_name() {
        let rule: Arc<dyn CaseRule> = Arc::new(UnnamedRule);

        assert!(rule.name().ends_with("UnnamedRule"));
    }
}
