//! In-memory record store: the single source of truth for lookups.
//!
//! Every mutation bumps [`RecordStore::revision`]; derived views (the search
//! index) compare revisions and rebuild on the next read instead of
//! subscribing to change events.

use super::types::{Contact, Employee, Opportunity, ProductionType, Stage};
use tracing::debug;

/// Name given to contacts created without one.
pub const DEFAULT_CONTACT_NAME: &str = "Neuer Kontakt";

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    employees: Vec<Employee>,
    contacts: Vec<Contact>,
    opportunities: Vec<Opportunity>,
    production_types: Vec<ProductionType>,
    revision: u64,
}

impl RecordStore {
    pub fn new(
        employees: Vec<Employee>,
        contacts: Vec<Contact>,
        opportunities: Vec<Opportunity>,
        production_types: Vec<ProductionType>,
    ) -> Self {
        Self {
            employees,
            contacts,
            opportunities,
            production_types,
            revision: 0,
        }
    }

    /// Store seeded with the demo data set.
    pub fn demo() -> Self {
        Self::new(
            vec![
                Employee::new("APL", "Andreas", "Plumacher", "APL"),
                Employee::new("TPO", "Thierry", "Ponkalo", "TPO"),
            ],
            vec![
                Contact::new("C001", "AB AUTOMOTIVE", "Vilvoorde", "info@ab-automotive.be"),
                Contact::new("C002", "ABAX", "Diegem", "info@abax.com"),
                Contact::new("C003", "AB LEASE NV", "Sint-Pieters-Leeuw", "info@ablease.com"),
            ],
            vec![
                Opportunity {
                    id: "O001".into(),
                    title: "Fleet telematics rollout".into(),
                    owner: "APL".into(),
                    amount: 48000,
                    stage: Stage::Open,
                },
                Opportunity {
                    id: "O002".into(),
                    title: "Lease portfolio renewal".into(),
                    owner: "TPO".into(),
                    amount: 125000,
                    stage: Stage::Qualified,
                },
                Opportunity {
                    id: "O003".into(),
                    title: "Workshop equipment".into(),
                    owner: "APL".into(),
                    amount: 9500,
                    stage: Stage::Won,
                },
            ],
            vec![
                ProductionType {
                    id: "PT001".into(),
                    name: "Standard".into(),
                },
                ProductionType {
                    id: "PT002".into(),
                    name: "Premium".into(),
                },
                ProductionType {
                    id: "PT003".into(),
                    name: "Custom".into(),
                },
            ],
        )
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn opportunities(&self) -> &[Opportunity] {
        &self.opportunities
    }

    pub fn production_types(&self) -> &[ProductionType] {
        &self.production_types
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn contact(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn opportunity(&self, id: &str) -> Option<&Opportunity> {
        self.opportunities.iter().find(|o| o.id == id)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    // -- Employees ---------------------------------------------------------

    /// New employees go to the top of the list.
    pub fn add_employee(&mut self, employee: Employee) {
        debug!(id = %employee.id, "add employee");
        self.employees.insert(0, employee);
        self.touch();
    }

    /// Replace the employee with the same id. Returns false when none matched.
    pub fn update_employee(&mut self, employee: Employee) -> bool {
        match self.employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => {
                debug!(id = %employee.id, "update employee");
                *existing = employee;
                self.touch();
                true
            }
            None => false,
        }
    }

    pub fn remove_employee(&mut self, id: &str) -> bool {
        let before = self.employees.len();
        self.employees.retain(|e| e.id != id);
        let removed = self.employees.len() < before;
        if removed {
            debug!(id, "remove employee");
            self.touch();
        }
        removed
    }

    // -- Contacts ----------------------------------------------------------

    pub fn add_contact(&mut self, contact: Contact) {
        debug!(id = %contact.id, "add contact");
        self.contacts.insert(0, contact);
        self.touch();
    }

    /// Create a contact with a generated `C######` id and return that id.
    ///
    /// Blank name falls back to [`DEFAULT_CONTACT_NAME`].
    pub fn create_contact(&mut self, name: &str, city: &str, email: &str) -> String {
        let id = contact_id_from_millis(chrono::Utc::now().timestamp_millis());
        let name = if name.trim().is_empty() {
            DEFAULT_CONTACT_NAME
        } else {
            name.trim()
        };
        self.add_contact(Contact::new(id.clone(), name, city.trim(), email.trim()));
        id
    }

    pub fn update_contact(&mut self, contact: Contact) -> bool {
        match self.contacts.iter_mut().find(|c| c.id == contact.id) {
            Some(existing) => {
                *existing = contact;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Case-insensitive substring filter on contact names, in store order.
    pub fn filter_contacts(&self, query: &str) -> Vec<&Contact> {
        let q = query.to_lowercase();
        self.contacts
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&q))
            .collect()
    }

    // -- Opportunities -----------------------------------------------------

    pub fn add_opportunity(&mut self, opportunity: Opportunity) {
        self.opportunities.push(opportunity);
        self.touch();
    }

    /// Move an opportunity to another board column.
    pub fn move_opportunity(&mut self, id: &str, stage: Stage) -> bool {
        match self.opportunities.iter_mut().find(|o| o.id == id) {
            Some(opp) => {
                debug!(id, from = %opp.stage, to = %stage, "move opportunity");
                opp.stage = stage;
                self.touch();
                true
            }
            None => false,
        }
    }

    pub fn opportunities_in(&self, stage: Stage) -> impl Iterator<Item = &Opportunity> {
        self.opportunities.iter().filter(move |o| o.stage == stage)
    }

    // -- Production types --------------------------------------------------

    /// Picker filter: case-insensitive substring on the type name.
    pub fn filter_production_types(&self, query: &str) -> Vec<&ProductionType> {
        let q = query.to_lowercase();
        self.production_types
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&q))
            .collect()
    }
}

/// `C` followed by the last six digits of the timestamp.
fn contact_id_from_millis(millis: i64) -> String {
    format!("C{:06}", millis.rem_euclid(1_000_000))
}
