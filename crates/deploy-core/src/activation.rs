//! Profile activation along requirement edges

use serde::Serialize;

use crate::document::ProfileActivation;

/// An insertion-ordered set of profile names.
///
/// Order is the order profiles were activated in, which is also the order
/// their payload overrides are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProfileSet(Vec<String>);

impl ProfileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `profile`, returning `false` if it was already present.
    pub fn insert(&mut self, profile: impl Into<String>) -> bool {
        let profile = profile.into();
        if self.contains(&profile) {
            return false;
        }
        self.0.push(profile);
        true
    }

    pub fn contains(&self, profile: &str) -> bool {
        self.0.iter().any(|p| p == profile)
    }

    /// Whether any of `profiles` is in this set.
    pub fn intersects<S: AsRef<str>>(&self, profiles: &[S]) -> bool {
        profiles.iter().any(|p| self.contains(p.as_ref()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ProfileSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for profile in iter {
            set.insert(profile);
        }
        set
    }
}

impl std::fmt::Display for ProfileSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Compute the profiles a required config is resolved with.
///
/// `current` is the requiring config's active set. Every rule is checked
/// against that same snapshot, so a profile enabled by one rule never
/// triggers another rule on the same edge. Nothing from `current` carries
/// over unless a rule re-enables it.
pub fn activate(current: &ProfileSet, rules: &[ProfileActivation]) -> ProfileSet {
    let mut next = ProfileSet::new();
    for rule in rules {
        if rule.activated_by.is_empty() || current.intersects(&rule.activated_by) {
            tracing::trace!(profile = %rule.name, "Activating profile");
            next.insert(rule.name.clone());
        } else {
            tracing::trace!(profile = %rule.name, trigger = ?rule.activated_by, "Profile not triggered");
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn set(names: &[&str]) -> ProfileSet {
        names.iter().copied().collect()
    }

    #[test]
    fn no_rules_activate_nothing() {
        assert!(activate(&set(&["pf0"]), &[]).is_empty());
    }

    #[test]
    fn unconditional_rule_always_activates() {
        let rules = [ProfileActivation::always("pf1")];
        assert_eq!(activate(&set(&[]), &rules), set(&["pf1"]));
        assert_eq!(activate(&set(&["pf0"]), &rules), set(&["pf1"]));
    }

    #[rstest]
    #[case(&[], &[])]
    #[case(&["pf0"], &["pf0"])]
    #[case(&["other"], &[])]
    #[case(&["other", "pf2"], &["pf0"])]
    fn conditional_rule_requires_intersection(
        #[case] current: &[&str],
        #[case] expected: &[&str],
    ) {
        let rules = [ProfileActivation::when("pf0", ["pf0", "pf2"])];
        assert_eq!(activate(&set(current), &rules), set(expected));
    }

    #[test]
    fn rules_see_the_same_snapshot() {
        // pf1 is enabled by the first rule but must not trigger the second
        let rules = [
            ProfileActivation::always("pf1"),
            ProfileActivation::when("pf2", ["pf1"]),
        ];
        assert_eq!(activate(&set(&[]), &rules), set(&["pf1"]));
    }

    #[test]
    fn duplicate_activations_collapse() {
        let rules = [
            ProfileActivation::always("pf0"),
            ProfileActivation::when("pf0", ["x"]),
        ];
        assert_eq!(activate(&set(&["x"]), &rules).len(), 1);
    }

    #[test]
    fn profile_set_keeps_insertion_order() {
        let profiles = set(&["b", "a", "b"]);
        assert_eq!(profiles.as_slice(), ["b", "a"]);
        assert_eq!(profiles.to_string(), "[b, a]");
    }
}
