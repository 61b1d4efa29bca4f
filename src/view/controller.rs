// src/view/controller.rs

use crate::catalog::distinct_locations;
use crate::domain::listing::{Catalog, Listing};
use crate::domain::query::{query, SortKey};
use crate::view::card::{CardPhase, Ticket};
use std::sync::Arc;

/// Current values of the search box and the two dropdowns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryControls {
    pub search: String,
    pub location: Option<String>,
    pub sort: Option<SortKey>,
}

impl QueryControls {
    /// Build from raw form values. A blank location and blank or unknown
    /// sort values mean "not set".
    pub fn from_params(search: &str, location: &str, sort: &str) -> Self {
        Self {
            search: search.to_string(),
            location: location_param(location),
            sort: SortKey::from_param(sort),
        }
    }
}

/// Location dropdown value to filter. Only the "All locations" option's
/// empty value means no filter; anything else is matched exactly as sent.
pub fn location_param(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}

/// UI state for one visitor: active category, control values, the current
/// result set and the expansion phase of every rendered card.
#[derive(Debug)]
pub struct ViewController {
    catalog: Arc<Catalog>,
    category: String,
    controls: QueryControls,
    locations: Vec<String>,
    results: Vec<Listing>,
    phases: Vec<CardPhase>,
    next_ticket: Ticket,
    generation: u64,
}

impl ViewController {
    pub fn new(catalog: Arc<Catalog>, category: &str) -> Self {
        let mut vc = Self {
            catalog,
            category: String::new(),
            controls: QueryControls::default(),
            locations: Vec::new(),
            results: Vec::new(),
            phases: Vec::new(),
            next_ticket: 1,
            generation: 0,
        };
        vc.select_category(category);
        vc
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn controls(&self) -> &QueryControls {
        &self.controls
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn results(&self) -> &[Listing] {
        &self.results
    }

    /// Bumped every time the result set is replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self, index: usize) -> Option<CardPhase> {
        self.phases.get(index).copied()
    }

    /// Cards in render order.
    pub fn cards(&self) -> impl Iterator<Item = (usize, &Listing, CardPhase)> {
        self.results
            .iter()
            .zip(self.phases.iter().copied())
            .enumerate()
            .map(|(i, (l, p))| (i, l, p))
    }

    /// The card that is expanded or about to be.
    pub fn expanded_index(&self) -> Option<usize> {
        self.phases.iter().position(|p| p.is_expanding_or_expanded())
    }

    /// Switch tabs: controls go back to their defaults and the location
    /// options are rebuilt for the new category.
    pub fn select_category(&mut self, category: &str) {
        tracing::debug!(category, "select category");
        self.category = category.to_string();
        self.controls = QueryControls::default();
        self.locations = distinct_locations(&self.catalog, category);
        self.rerender();
    }

    pub fn set_search(&mut self, term: &str) {
        self.controls.search = term.to_string();
        self.rerender();
    }

    pub fn set_location(&mut self, location: Option<String>) {
        self.controls.location = location;
        self.rerender();
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) {
        self.controls.sort = sort;
        self.rerender();
    }

    /// Replace all three controls at once (one form submission).
    pub fn apply_controls(&mut self, controls: QueryControls) {
        self.controls = controls;
        self.rerender();
    }

    /// Open card `index`, closing whichever card was open.
    /// Returns false for an index outside the current result set.
    pub fn expand(&mut self, index: usize) -> bool {
        if index >= self.phases.len() {
            return false;
        }

        for i in 0..self.phases.len() {
            if i != index && self.phases[i].is_expanding_or_expanded() {
                let ticket = self.issue_ticket();
                self.phases[i] = self.phases[i].close(ticket);
            }
        }

        let ticket = self.issue_ticket();
        self.phases[index] = self.phases[index].open(ticket);
        true
    }

    pub fn collapse(&mut self, index: usize) -> bool {
        if index >= self.phases.len() {
            return false;
        }
        let ticket = self.issue_ticket();
        self.phases[index] = self.phases[index].close(ticket);
        true
    }

    /// A card's transition finished. Events from an older render or an
    /// interrupted transition carry a stale ticket and change nothing.
    pub fn settle(&mut self, index: usize, ticket: Ticket) -> bool {
        let Some(phase) = self.phases.get_mut(index) else {
            return false;
        };
        let next = phase.settle(ticket);
        if next == *phase {
            tracing::debug!(index, ticket, "stale settle ignored");
            return false;
        }
        *phase = next;
        true
    }

    fn issue_ticket(&mut self) -> Ticket {
        let t = self.next_ticket;
        self.next_ticket += 1;
        t
    }

    fn collapse_all(&mut self) {
        for phase in &mut self.phases {
            *phase = CardPhase::Collapsed;
        }
    }

    fn rerender(&mut self) {
        self.collapse_all();
        self.results = query(
            &self.catalog,
            &self.category,
            &self.controls.search,
            self.controls.location.as_deref(),
            self.controls.sort,
        );
        self.phases = vec![CardPhase::Collapsed; self.results.len()];
        self.generation += 1;
        tracing::debug!(
            category = %self.category,
            results = self.results.len(),
            generation = self.generation,
            "result set rebuilt"
        );
    }
}
