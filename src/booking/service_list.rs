//! Ordered list of add-on service rows within one booking form

use chrono::NaiveTime;
use rust_decimal::Decimal;

use super::calculators::service_subtotal;
use super::catalog::Catalog;
use super::time_window::TimeWindow;
use crate::models::ServiceSelection;

/// One editable service row.
///
/// `sub_total` is derived from `service_id` and `quantity` and only changes
/// through the row's own setters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceEntry {
    service_id: Option<String>,
    quantity: Option<u32>,
    window: TimeWindow,
    sub_total: Decimal,
}

impl ServiceEntry {
    pub fn service_id(&self) -> Option<&str> {
        self.service_id.as_deref()
    }

    pub fn quantity(&self) -> Option<u32> {
        self.quantity
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn sub_total(&self) -> Decimal {
        self.sub_total
    }

    fn reprice(&mut self, catalog: &Catalog) {
        self.sub_total = service_subtotal(catalog.price_per_person(self.service_id()), self.quantity);
    }

    /// Wire form of a fully filled row
    pub fn to_selection(&self) -> Option<ServiceSelection> {
        Some(ServiceSelection {
            service_id: self.service_id.clone()?,
            quantity: self.quantity?,
            start_time: self.window.start?,
            end_time: self.window.end?,
            sub_total: self.sub_total,
        })
    }
}

/// Ordered, index-addressed collection of [`ServiceEntry`] rows
#[derive(Debug, Clone, Default)]
pub struct ServiceList {
    entries: Vec<ServiceEntry>,
}

impl ServiceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty row, returning its index
    pub fn add_entry(&mut self) -> usize {
        self.entries.push(ServiceEntry::default());
        self.entries.len() - 1
    }

    /// Remove the row at `index`; out of range is a no-op
    pub fn remove_entry(&mut self, index: usize) -> Option<ServiceEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&ServiceEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceEntry> {
        self.entries.iter()
    }

    /// Set a row's service; returns false when `index` is out of range
    pub fn set_service(&mut self, index: usize, service_id: Option<String>, catalog: &Catalog) -> bool {
        self.update(index, catalog, |entry| entry.service_id = service_id)
    }

    /// Set a row's quantity; returns false when `index` is out of range
    pub fn set_quantity(&mut self, index: usize, quantity: Option<u32>, catalog: &Catalog) -> bool {
        self.update(index, catalog, |entry| entry.quantity = quantity)
    }

    /// Set a row's own time window (does not affect pricing)
    pub fn set_window(&mut self, index: usize, start: Option<NaiveTime>, end: Option<NaiveTime>) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.window = TimeWindow::new(start, end);
                true
            }
            None => false,
        }
    }

    /// Re-resolve every row, e.g. after the catalog finished loading
    pub fn reprice_all(&mut self, catalog: &Catalog) {
        for entry in &mut self.entries {
            entry.reprice(catalog);
        }
    }

    pub fn subtotals(&self) -> Vec<Decimal> {
        self.entries.iter().map(ServiceEntry::sub_total).collect()
    }

    fn update(&mut self, index: usize, catalog: &Catalog, apply: impl FnOnce(&mut ServiceEntry)) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                apply(entry);
                entry.reprice(catalog);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Service;
    use rust_decimal_macros::dec;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![],
            vec![
                Service {
                    id: "s1".to_string(),
                    name: "Catering".to_string(),
                    price_per_person: dec!(12.50),
                },
                Service {
                    id: "s2".to_string(),
                    name: "Audio".to_string(),
                    price_per_person: dec!(3),
                },
            ],
        )
    }

    #[test]
    fn test_add_entry_appends_empty_row() {
        let mut list = ServiceList::new();
        assert!(list.is_empty());
        assert_eq!(list.add_entry(), 0);
        assert_eq!(list.add_entry(), 1);
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1), Some(&ServiceEntry::default()));
    }

    #[test]
    fn test_row_subtotal_follows_its_inputs() {
        let catalog = catalog();
        let mut list = ServiceList::new();
        let row = list.add_entry();

        list.set_service(row, Some("s1".to_string()), &catalog);
        assert_eq!(list.get(row).unwrap().sub_total(), Decimal::ZERO);

        list.set_quantity(row, Some(8), &catalog);
        assert_eq!(list.get(row).unwrap().sub_total(), dec!(100));

        list.set_quantity(row, Some(0), &catalog);
        assert_eq!(list.get(row).unwrap().sub_total(), Decimal::ZERO);

        list.set_service(row, Some("missing".to_string()), &catalog);
        list.set_quantity(row, Some(4), &catalog);
        assert_eq!(list.get(row).unwrap().sub_total(), Decimal::ZERO);
    }

    #[test]
    fn test_editing_one_row_leaves_others_untouched() {
        let catalog = catalog();
        let mut list = ServiceList::new();
        let a = list.add_entry();
        let b = list.add_entry();
        list.set_service(a, Some("s1".to_string()), &catalog);
        list.set_quantity(a, Some(2), &catalog);
        list.set_service(b, Some("s2".to_string()), &catalog);
        list.set_quantity(b, Some(10), &catalog);

        list.set_quantity(b, Some(1), &catalog);
        assert_eq!(list.subtotals(), vec![dec!(25), dec!(3)]);
    }

    #[test]
    fn test_remove_entry_and_out_of_range() {
        let catalog = catalog();
        let mut list = ServiceList::new();
        for (id, qty) in [("s1", 2), ("s2", 5)] {
            let row = list.add_entry();
            list.set_service(row, Some(id.to_string()), &catalog);
            list.set_quantity(row, Some(qty), &catalog);
        }

        assert!(list.remove_entry(5).is_none());
        assert_eq!(list.len(), 2);

        let removed = list.remove_entry(0).unwrap();
        assert_eq!(removed.service_id(), Some("s1"));
        assert_eq!(list.subtotals(), vec![dec!(15)]);
    }

    #[test]
    fn test_setters_out_of_range_return_false() {
        let catalog = catalog();
        let mut list = ServiceList::new();
        assert!(!list.set_quantity(0, Some(1), &catalog));
        assert!(!list.set_window(3, None, None));
    }

    #[test]
    fn test_reprice_all_after_catalog_arrives() {
        let mut list = ServiceList::new();
        let row = list.add_entry();
        list.set_service(row, Some("s2".to_string()), &Catalog::default());
        list.set_quantity(row, Some(6), &Catalog::default());
        assert_eq!(list.get(row).unwrap().sub_total(), Decimal::ZERO);

        list.reprice_all(&catalog());
        assert_eq!(list.get(row).unwrap().sub_total(), dec!(18));
    }

    #[test]
    fn test_to_selection_requires_every_field() {
        let catalog = catalog();
        let mut list = ServiceList::new();
        let row = list.add_entry();
        list.set_service(row, Some("s2".to_string()), &catalog);
        list.set_quantity(row, Some(2), &catalog);
        assert!(list.get(row).unwrap().to_selection().is_none());

        list.set_window(row, NaiveTime::from_hms_opt(9, 0, 0), NaiveTime::from_hms_opt(10, 0, 0));
        let selection = list.get(row).unwrap().to_selection().unwrap();
        assert_eq!(selection.sub_total, dec!(6));
        assert_eq!(selection.quantity, 2);
    }
}
