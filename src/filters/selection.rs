//! Filter Selections
//!
//! Sorted, de-duplicated option sets per facet, toggled by shopper interaction.

use std::str::FromStr;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::filters::{Facet, FacetError};

/// A sorted set of selected option identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    options: SmallVec<[String; 4]>,
}

impl OptionSet {
    /// Creates an option set from string slices.
    pub fn from_strs(options: &[&str]) -> Self {
        let mut set = Self::default();

        for option in options {
            set.add(option);
        }

        set
    }

    /// Check if the set contains an option.
    pub fn contains(&self, option: &str) -> bool {
        self.position(option).is_ok()
    }

    /// Add an option; returns false if it was already selected.
    pub fn add(&mut self, option: &str) -> bool {
        match self.position(option) {
            Ok(_) => false,
            Err(pos) => {
                self.options.insert(pos, option.to_string());
                true
            }
        }
    }

    /// Remove an option; returns false if it was not selected.
    pub fn remove(&mut self, option: &str) -> bool {
        match self.position(option) {
            Ok(pos) => {
                self.options.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Select the option if absent, deselect it if present.
    ///
    /// Returns true when the option is selected afterwards.
    pub fn toggle(&mut self, option: &str) -> bool {
        if self.remove(option) {
            false
        } else {
            self.add(option)
        }
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Number of selected options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Iterate over the selected options in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(String::as_str)
    }

    fn position(&self, option: &str) -> Result<usize, usize> {
        self.options
            .binary_search_by(|probe| probe.as_str().cmp(option))
    }
}

/// Active filter selections, keyed by facet.
///
/// A facet with no selected options places no constraint on the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    facets: FxHashMap<Facet, OptionSet>,
}

impl FilterSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects options for a facet.
    #[must_use]
    pub fn with(mut self, facet: Facet, options: &[&str]) -> Self {
        let set = self.facets.entry(facet).or_default();

        for option in options {
            set.add(option);
        }

        self
    }

    /// Selects an option.
    pub fn select(&mut self, facet: Facet, option: &str) -> bool {
        self.facets.entry(facet).or_default().add(option)
    }

    /// Deselects an option.
    pub fn deselect(&mut self, facet: Facet, option: &str) -> bool {
        self.facets
            .get_mut(&facet)
            .is_some_and(|set| set.remove(option))
    }

    /// Toggles an option, returning true when it is selected afterwards.
    pub fn toggle(&mut self, facet: Facet, option: &str) -> bool {
        self.facets.entry(facet).or_default().toggle(option)
    }

    /// Clears every option of a facet.
    pub fn clear(&mut self, facet: Facet) {
        self.facets.remove(&facet);
    }

    /// Returns the facet's selected options when it constrains the listing.
    pub fn active(&self, facet: Facet) -> Option<&OptionSet> {
        self.facets.get(&facet).filter(|set| !set.is_empty())
    }

    /// Check if an option is selected.
    pub fn is_selected(&self, facet: Facet, option: &str) -> bool {
        self.facets
            .get(&facet)
            .is_some_and(|set| set.contains(option))
    }

    /// Check if no facet constrains the listing.
    pub fn is_empty(&self) -> bool {
        self.facets.values().all(OptionSet::is_empty)
    }

    /// Parses a `facet=option` pair and selects it.
    ///
    /// # Errors
    ///
    /// Returns a [`FacetError`] if the pair is malformed or names an unknown facet.
    pub fn select_pair(&mut self, pair: &str) -> Result<(), FacetError> {
        let (facet, option) = pair
            .split_once('=')
            .filter(|(_, option)| !option.trim().is_empty())
            .ok_or_else(|| FacetError::MalformedPair(pair.to_string()))?;

        self.select(Facet::from_str(facet.trim())?, option.trim());

        Ok(())
    }
}
