//! Which fuel types are shown.
//!
//! Each fuel type carries two independent facts:
//! - `enabled`: derived from the loaded window (does it have any value?)
//! - `selected`: the user's choice, kept across reloads
//!
//! A fuel type is visible only when both hold. Disabled types report
//! `selected == false` and cannot be toggled, but the stored preference is
//! restored as soon as a later window has data for them again.

use crate::align::AlignedSeries;
use crate::registry::FuelType;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-fuel-type state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FuelTypeVisibility {
    /// `None` until the fuel type has been enabled at least once.
    preference: Option<bool>,
    enabled: bool,
}

impl FuelTypeVisibility {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn selected(&self) -> bool {
        self.enabled && self.preference.unwrap_or(false)
    }

    pub fn visible(&self) -> bool {
        self.selected()
    }

    fn load(&mut self, fuel_type: FuelType, has_data: bool) {
        self.enabled = has_data;
        if has_data && self.preference.is_none() {
            self.preference = Some(fuel_type.is_default_visible());
        }
    }

    fn toggle(&mut self) -> bool {
        match self.preference {
            Some(p) if self.enabled => {
                self.preference = Some(!p);
                true
            }
            _ => false,
        }
    }
}

/// Flags exposed to views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibilityFlags {
    pub selected: bool,
    pub enabled: bool,
}

/// The single visibility state of a dashboard. Mutation goes through
/// [`VisibilityState::load`] and [`VisibilityState::toggle`] only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityState {
    entries: BTreeMap<FuelType, FuelTypeVisibility>,
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilityState {
    /// Nothing loaded yet: every fuel type is disabled.
    pub fn new() -> Self {
        Self {
            entries: FuelType::ALL
                .into_iter()
                .map(|f| (f, FuelTypeVisibility::default()))
                .collect(),
        }
    }

    /// Rebuild the enabled flags from a newly loaded window.
    ///
    /// Depends only on the content of `series`, so loading the same window
    /// twice leaves the state unchanged.
    pub fn load(&mut self, series: &AlignedSeries) {
        for (fuel_type, entry) in self.entries.iter_mut() {
            entry.load(*fuel_type, series.has_data(*fuel_type));
        }
        log::debug!(
            "visibility after load: visible={:?}",
            self.visible_fuel_types()
        );
    }

    /// Flip the selection of an enabled fuel type. Returns `false` (and changes
    /// nothing) for a disabled one.
    pub fn toggle(&mut self, fuel_type: FuelType) -> bool {
        let changed = self
            .entries
            .get_mut(&fuel_type)
            .map(FuelTypeVisibility::toggle)
            .unwrap_or(false);
        if !changed {
            log::debug!("ignored toggle of disabled fuel type {fuel_type}");
        }
        changed
    }

    /// Select or deselect explicitly; a no-op for disabled fuel types.
    pub fn set_selected(&mut self, fuel_type: FuelType, selected: bool) -> bool {
        if self.is_enabled(fuel_type) && self.is_selected(fuel_type) != selected {
            self.toggle(fuel_type)
        } else {
            false
        }
    }

    pub fn get(&self, fuel_type: FuelType) -> FuelTypeVisibility {
        self.entries.get(&fuel_type).copied().unwrap_or_default()
    }

    pub fn flags(&self, fuel_type: FuelType) -> VisibilityFlags {
        let entry = self.get(fuel_type);
        VisibilityFlags {
            selected: entry.selected(),
            enabled: entry.enabled(),
        }
    }

    pub fn is_enabled(&self, fuel_type: FuelType) -> bool {
        self.get(fuel_type).enabled()
    }

    pub fn is_selected(&self, fuel_type: FuelType) -> bool {
        self.get(fuel_type).selected()
    }

    pub fn is_visible(&self, fuel_type: FuelType) -> bool {
        self.get(fuel_type).visible()
    }

    /// Visible fuel types in registry order.
    pub fn visible_fuel_types(&self) -> Vec<FuelType> {
        self.entries
            .iter()
            .filter(|(_, e)| e.visible())
            .map(|(f, _)| *f)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FuelType, VisibilityFlags)> + '_ {
        self.entries.keys().map(|f| (*f, self.flags(*f)))
    }
}
