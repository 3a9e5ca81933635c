use super::SparseImage;
use crate::error::{Error, Result};

/// A named pattern to search for
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    name: String,
    pattern: SparseImage,
}

impl Target {
    /// Decode `pattern_text` and pair it with `name`.
    ///
    /// Fails with [`Error::DegenerateTarget`] if the pattern has no on-pixels.
    pub fn new(name: impl Into<String>, pattern_text: &str) -> Result<Self> {
        Self::from_image(name, SparseImage::build(pattern_text))
    }

    /// Wrap an already decoded pattern
    pub fn from_image(name: impl Into<String>, pattern: SparseImage) -> Result<Self> {
        let name = name.into();
        if pattern.is_empty() {
            return Err(Error::DegenerateTarget { name });
        }
        Ok(Self { name, pattern })
    }

    /// Target label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owned pattern image
    pub fn pattern(&self) -> &SparseImage {
        &self.pattern
    }

    pub(crate) fn pattern_mut(&mut self) -> &mut SparseImage {
        &mut self.pattern
    }
}

/// Ordered collection of targets; duplicates by name are allowed
#[derive(Debug, Clone, Default)]
pub struct TargetCatalog {
    targets: Vec<Target>,
}

impl TargetCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a target, preserving insertion order
    pub fn add(&mut self, target: Target) {
        self.targets.push(target);
    }

    /// Targets in insertion order
    pub fn all(&self) -> &[Target] {
        &self.targets
    }

    pub(crate) fn all_mut(&mut self) -> &mut [Target] {
        &mut self.targets
    }

    /// Number of targets
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True when the catalog holds no targets
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl FromIterator<Target> for TargetCatalog {
    fn from_iter<I: IntoIterator<Item = Target>>(iter: I) -> Self {
        Self {
            targets: iter.into_iter().collect(),
        }
    }
}

impl Extend<Target> for TargetCatalog {
    fn extend<I: IntoIterator<Item = Target>>(&mut self, iter: I) {
        self.targets.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_target_rejected() {
        let err = Target::new("ghost", "   \n   ").unwrap_err();
        assert!(matches!(err, Error::DegenerateTarget { ref name } if name == "ghost"));
        assert!(Target::new("empty", "").is_err());
    }

    #[test]
    fn test_catalog_keeps_order_and_duplicates() {
        let mut catalog = TargetCatalog::new();
        catalog.add(Target::new("dot", "+").unwrap());
        catalog.add(Target::new("bar", "++").unwrap());
        catalog.add(Target::new("dot", "+").unwrap());

        let names: Vec<&str> = catalog.all().iter().map(Target::name).collect();
        assert_eq!(names, vec!["dot", "bar", "dot"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_targets_own_their_patterns() {
        let mut catalog: TargetCatalog =
            [Target::new("a", "+").unwrap(), Target::new("b", "+").unwrap()]
                .into_iter()
                .collect();
        catalog.all_mut()[0].pattern_mut().translate_to(5, 5).unwrap();
        assert_eq!(catalog.all()[0].pattern().offset().x, 5);
        assert_eq!(catalog.all()[1].pattern().offset().x, 0);
    }
}
