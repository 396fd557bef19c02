use std::collections::HashMap;

/// Case-insensitive mapping from header column name to zero-based position.
///
/// When the header repeats a name (ignoring case), the later position wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut positions = HashMap::new();
        for (idx, name) in columns.into_iter().enumerate() {
            positions.insert(fold_case(name.as_ref()), idx);
        }
        Self { positions }
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(&fold_case(column)).copied()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.positions.contains_key(&fold_case(column))
    }

    /// Number of distinct column names.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

fn fold_case(name: &str) -> String {
    name.to_uppercase()
}
