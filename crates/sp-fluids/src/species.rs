//! Ordered gas-phase species name table.

/// Species names in mechanism order; positions are species indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesTable {
    names: Vec<String>,
}

impl SpeciesTable {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of the first entry equal to `name`.
    ///
    /// Duplicate names are not detected.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.names.iter().map(String::as_str).enumerate()
    }
}

impl<S: Into<String>> FromIterator<S> for SpeciesTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
