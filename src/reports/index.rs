//! Category index
//!
//! Category is the only join key between budget items, vendors and the
//! initial budget. The index groups records by category once so each
//! report row is a lookup instead of a scan.

use std::collections::BTreeMap;

use crate::models::Category;

/// Records grouped by category, in category order
#[derive(Debug, Clone)]
pub struct CategoryIndex<'a, T> {
    groups: BTreeMap<Category, Vec<&'a T>>,
}

impl<'a, T> CategoryIndex<'a, T> {
    /// Group `records` by the category `key` returns
    ///
    /// Records keep their relative order within a group.
    pub fn build<I, F>(records: I, key: F) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        F: Fn(&T) -> Category,
    {
        let mut groups: BTreeMap<Category, Vec<&'a T>> = BTreeMap::new();
        for record in records {
            groups.entry(key(record)).or_default().push(record);
        }
        Self { groups }
    }

    /// Records in one category (empty if none)
    pub fn get(&self, category: Category) -> &[&'a T] {
        self.groups
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Non-empty groups in category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[&'a T])> + '_ {
        self.groups.iter().map(|(c, records)| (*c, records.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_in_category_order() {
        let records = vec![
            (Category::Contingency, "a"),
            (Category::Catering, "b"),
            (Category::Catering, "c"),
        ];
        let index = CategoryIndex::build(&records, |r: &(Category, &str)| r.0);

        let names: Vec<_> = index.get(Category::Catering).iter().map(|r| r.1).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert!(index.get(Category::Venue).is_empty());

        let order: Vec<_> = index.iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec![Category::Catering, Category::Contingency]);
    }
}
