use crate::{Category, CountryCode, QueryDescriptor, Selection};

/// Fires a top-headlines fetch whenever the selection changes.
///
/// The first call to [`CategoryController::activate`] always fires with the
/// configured default selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryController {
    selection: Selection,
    last_fired: Option<Selection>,
}

impl CategoryController {
    pub fn new(initial: Selection) -> Self {
        Self {
            selection: initial,
            last_fired: None,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Fires once for the current selection; later calls are no-ops.
    pub fn activate(&mut self) -> Option<QueryDescriptor> {
        if self.last_fired.is_some() {
            return None;
        }
        self.fire()
    }

    pub fn observe(&mut self, selection: Selection) -> Option<QueryDescriptor> {
        self.selection = selection;
        if self.last_fired.as_ref() == Some(&self.selection) {
            return None;
        }
        self.fire()
    }

    pub fn select_category(&mut self, category: Category) -> Option<QueryDescriptor> {
        let next = Selection::new(self.selection.country.clone(), category);
        self.observe(next)
    }

    pub fn select_country(&mut self, country: CountryCode) -> Option<QueryDescriptor> {
        let next = Selection::new(country, self.selection.category);
        self.observe(next)
    }

    fn fire(&mut self) -> Option<QueryDescriptor> {
        self.last_fired = Some(self.selection.clone());
        Some(QueryDescriptor::for_selection(&self.selection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn us(category: Category) -> Selection {
        Selection::new(CountryCode::default(), category)
    }

    #[test]
    fn activation_fires_default_once() {
        let mut controller = CategoryController::default();
        assert_eq!(
            controller.activate(),
            Some(QueryDescriptor::Category {
                country: CountryCode::default(),
                category: Category::General,
            })
        );
        assert_eq!(controller.activate(), None);
    }

    #[test]
    fn repeated_selection_does_not_refire() {
        let mut controller = CategoryController::default();
        controller.activate();

        assert_eq!(controller.observe(us(Category::General)), None);
        assert!(controller.select_category(Category::Sports).is_some());
        assert_eq!(controller.select_category(Category::Sports), None);
    }

    #[test]
    fn country_change_fires_with_current_category() {
        let mut controller = CategoryController::new(us(Category::Health));
        controller.activate();

        let gb: CountryCode = "gb".parse().unwrap();
        assert_eq!(
            controller.select_country(gb.clone()),
            Some(QueryDescriptor::Category {
                country: gb,
                category: Category::Health,
            })
        );
    }
}
