//! Delivery grouping for the cargo grid and container breakdowns.

use hauler_core::{Scu, names};
use serde::Serialize;
use thiserror::Error;

use crate::route::RoutePlan;

/// Standard container sizes, largest first.
pub const BOX_SIZES: [u8; 7] = [32, 24, 16, 8, 4, 2, 1];

/// Colours handed to new groups in order.
pub const GROUP_PALETTE: [&str; 8] = [
    "#4dd4ac", "#ec4899", "#fbbf24", "#8b5cf6", "#3b82f6", "#f97316", "#84cc16", "#06b6d4",
];

/// Number of containers of one size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoxCount {
    pub size: u8,
    pub count: u32,
}

/// Split `scu` into the largest containers allowed by `max_box_size`.
///
/// A limit below 1 allows no containers, so the breakdown is empty.
pub fn box_breakdown(scu: Scu, max_box_size: u8) -> Vec<BoxCount> {
    let mut remaining = scu;
    let mut boxes = Vec::new();
    for size in BOX_SIZES.into_iter().filter(|&size| size <= max_box_size) {
        let count = remaining / u32::from(size);
        if count > 0 {
            boxes.push(BoxCount { size, count });
            remaining -= count * u32::from(size);
        }
    }
    boxes
}

/// Render a breakdown as `2x32 + 1x8`.
pub fn format_breakdown(boxes: &[BoxCount]) -> String {
    boxes
        .iter()
        .map(|b| format!("{}x{}", b.count, b.size))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Cargo grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CargoGridLayout {
    pub cols: usize,
    pub rows: usize,
}

impl Default for CargoGridLayout {
    fn default() -> Self {
        Self { cols: 2, rows: 4 }
    }
}

impl CargoGridLayout {
    pub fn cells(&self) -> usize {
        self.cols * self.rows
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupItem {
    pub mission_id: String,
    pub commodity: String,
    pub quantity: Scu,
}

/// Deliveries bound for one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CargoGroup {
    /// Normalized destination name.
    pub key: String,
    pub location: String,
    pub label: String,
    pub color: String,
    pub cell: usize,
    pub items: Vec<GroupItem>,
}

impl CargoGroup {
    pub fn scu(&self) -> Scu {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CargoError {
    #[error("no cargo group for destination '{0}'")]
    UnknownGroup(String),
}

/// Cargo groups placed on the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CargoLayout {
    pub grid: CargoGridLayout,
    pub groups: Vec<CargoGroup>,
}

impl CargoLayout {
    /// Group the plan's deliveries by destination in first-seen order.
    ///
    /// Groups that already exist in `previous` keep their colour, label and
    /// cell; new groups take the lowest free cell.
    pub fn build(plan: &RoutePlan, previous: Option<&CargoLayout>) -> Self {
        let mut groups: Vec<CargoGroup> = Vec::new();
        for delivery in &plan.deliveries {
            let key = names::normalize(&delivery.location);
            let item = GroupItem {
                mission_id: delivery.item.mission_id.clone(),
                commodity: delivery.item.commodity.clone(),
                quantity: delivery.item.quantity,
            };
            if let Some(group) = groups.iter_mut().find(|group| group.key == key) {
                group.items.push(item);
                continue;
            }

            let color = GROUP_PALETTE[groups.len() % GROUP_PALETTE.len()];
            let existing = previous.and_then(|layout| layout.group(&key));
            groups.push(CargoGroup {
                location: delivery.location.clone(),
                label: existing.map_or_else(|| delivery.location.clone(), |g| g.label.clone()),
                color: existing.map_or_else(|| color.to_string(), |g| g.color.clone()),
                cell: existing.map_or(usize::MAX, |g| g.cell),
                key,
                items: vec![item],
            });
        }

        let mut occupied: Vec<usize> = groups
            .iter()
            .map(|group| group.cell)
            .filter(|&cell| cell != usize::MAX)
            .collect();
        let mut next_cell = 0;
        for group in groups.iter_mut().filter(|group| group.cell == usize::MAX) {
            while occupied.contains(&next_cell) {
                next_cell += 1;
            }
            group.cell = next_cell;
            occupied.push(next_cell);
        }

        Self {
            grid: previous.map(|layout| layout.grid).unwrap_or_default(),
            groups,
        }
    }

    /// Group for a destination, matched case-insensitively.
    pub fn group(&self, location: &str) -> Option<&CargoGroup> {
        let key = names::normalize(location);
        self.groups.iter().find(|group| group.key == key)
    }

    pub fn group_at(&self, cell: usize) -> Option<&CargoGroup> {
        self.groups.iter().find(|group| group.cell == cell)
    }

    fn group_mut(&mut self, location: &str) -> Result<&mut CargoGroup, CargoError> {
        let key = names::normalize(location);
        self.groups
            .iter_mut()
            .find(|group| group.key == key)
            .ok_or_else(|| CargoError::UnknownGroup(location.to_string()))
    }

    /// Move a group to `cell`, swapping with whichever group sits there.
    pub fn move_group(&mut self, location: &str, cell: usize) -> Result<(), CargoError> {
        let from = self.group_mut(location)?.cell;
        if let Some(occupant) = self.groups.iter_mut().find(|group| group.cell == cell) {
            occupant.cell = from;
        }
        self.group_mut(location)?.cell = cell;
        Ok(())
    }

    pub fn set_color(&mut self, location: &str, color: &str) -> Result<(), CargoError> {
        self.group_mut(location)?.color = color.to_string();
        Ok(())
    }

    pub fn set_label(&mut self, location: &str, label: &str) -> Result<(), CargoError> {
        self.group_mut(location)?.label = label.to_string();
        Ok(())
    }

    pub fn set_grid(&mut self, grid: CargoGridLayout) {
        self.grid = grid;
    }
}
