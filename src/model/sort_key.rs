// Airwaves - sort_key.rs
// Copyright (C) 2021  The Airwaves developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Fractional sort keys.
//!
//! Items are ordered by a real-valued key. Moving an item computes one new
//! key from its future neighbours, so a drag-and-drop reorder writes a
//! single row no matter how long the list is. Repeatedly inserting between
//! the same two neighbours halves the gap every time; once it drops below
//! the rebalance epsilon the whole sibling set is renumbered to integers.

use crate::config;

#[derive(Display, Copy, Debug, Clone, EnumString, PartialEq, Eq)]
#[strum(serialize_all = "kebab_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Descending
    }
}

/// The result of a move.
#[derive(Debug, Clone, PartialEq)]
pub enum Reorder {
    /// Only the moved item gets a new key.
    Single(f64),
    /// Every item gets a fresh key. The keys are listed in display order
    /// after the move, the moved item sits at the target index.
    Renumber(Vec<f64>),
}

/// Key for an item appended on top of `max`, the largest key among its
/// siblings. Used whenever a station is (re-)added to a collection.
pub fn key_after(max: Option<f64>) -> f64 {
    max.unwrap_or(0.0) + 1.0
}

/// Computes the key for an item inserted at `target` into `siblings`.
///
/// `siblings` are the keys of the other items as currently displayed in
/// `order`, without the item being moved. `target` is clamped to
/// `siblings.len()`.
pub fn key_for_position(siblings: &[f64], target: usize, order: SortOrder) -> f64 {
    let target = target.min(siblings.len());
    if siblings.is_empty() {
        return 1.0;
    }
    let first = siblings[0];
    let last = siblings[siblings.len() - 1];

    match order {
        SortOrder::Descending => {
            if target == 0 {
                first + 1.0
            } else if target == siblings.len() {
                // Halving keeps keys positive, but can't go below a
                // non-positive minimum.
                if last > 0.0 {
                    last / 2.0
                } else {
                    last - 1.0
                }
            } else {
                let above = siblings[target - 1];
                let below = siblings[target];
                above - (above - below) / 2.0
            }
        }
        SortOrder::Ascending => {
            if target == siblings.len() {
                last + 1.0
            } else if target == 0 {
                if first > 0.0 {
                    first / 2.0
                } else {
                    first - 1.0
                }
            } else {
                let below = siblings[target - 1];
                let above = siblings[target];
                below + (above - below) / 2.0
            }
        }
    }
}

/// Like `key_for_position`, but falls back to renumbering all items when
/// the new key would sit closer than `epsilon` to one of its neighbours.
pub fn reorder(siblings: &[f64], target: usize, order: SortOrder, epsilon: f64) -> Reorder {
    let target = target.min(siblings.len());
    let key = key_for_position(siblings, target, order);
    settle(siblings, target, key, order, epsilon)
}

/// Moves the item at `from` of `keys`, the whole list as displayed, to
/// `target`.
///
/// Moving to either end goes past the extreme key of the whole list, the
/// moved item included. An item already on top moved to the top still gets
/// a key above its old one.
pub fn move_item(keys: &[f64], from: usize, target: usize, order: SortOrder, epsilon: f64) -> Reorder {
    let siblings: Vec<f64> = keys.iter().enumerate().filter(|(i, _)| *i != from).map(|(_, key)| *key).collect();
    let target = target.min(siblings.len());

    let key = if target == 0 {
        key_for_position(keys, 0, order)
    } else if target == siblings.len() {
        key_for_position(keys, keys.len(), order)
    } else {
        key_for_position(&siblings, target, order)
    };
    settle(&siblings, target, key, order, epsilon)
}

/// Same as `move_item` with the default epsilon.
pub fn move_item_default(keys: &[f64], from: usize, target: usize, order: SortOrder) -> Reorder {
    move_item(keys, from, target, order, config::SORT_KEY_EPSILON)
}

fn settle(siblings: &[f64], target: usize, key: f64, order: SortOrder, epsilon: f64) -> Reorder {
    let neighbours = [target.checked_sub(1).map(|i| siblings[i]), siblings.get(target).copied()];
    let crowded = neighbours.iter().flatten().any(|neighbour| (neighbour - key).abs() < epsilon);

    if crowded {
        debug!("Sort key gap below {} at position {}, renumbering {} items", epsilon, target, siblings.len() + 1);
        Reorder::Renumber(renumber(siblings.len() + 1, order))
    } else {
        Reorder::Single(key)
    }
}

/// Integer keys for `count` items in display order.
pub fn renumber(count: usize, order: SortOrder) -> Vec<f64> {
    match order {
        SortOrder::Descending => (1..=count).rev().map(|k| k as f64).collect(),
        SortOrder::Ascending => (1..=count).map(|k| k as f64).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESC: [f64; 3] = [3.0, 2.0, 1.0];
    const ASC: [f64; 3] = [1.0, 2.0, 3.0];

    #[test]
    fn descending_front_is_above_maximum() {
        assert_eq!(key_for_position(&DESC, 0, SortOrder::Descending), 4.0);
    }

    #[test]
    fn descending_end_is_below_minimum_and_positive() {
        let key = key_for_position(&DESC, 3, SortOrder::Descending);
        assert_eq!(key, 0.5);
        assert!(key > 0.0);
    }

    #[test]
    fn descending_end_with_non_positive_minimum() {
        assert_eq!(key_for_position(&[1.0, 0.0], 2, SortOrder::Descending), -1.0);
        assert_eq!(key_for_position(&[-2.0], 1, SortOrder::Descending), -3.0);
    }

    #[test]
    fn descending_middle_is_midpoint() {
        assert_eq!(key_for_position(&DESC, 1, SortOrder::Descending), 2.5);
        assert_eq!(key_for_position(&DESC, 2, SortOrder::Descending), 1.5);
    }

    #[test]
    fn ascending_mirror() {
        assert_eq!(key_for_position(&ASC, 3, SortOrder::Ascending), 4.0);
        assert_eq!(key_for_position(&ASC, 0, SortOrder::Ascending), 0.5);
        assert_eq!(key_for_position(&ASC, 1, SortOrder::Ascending), 1.5);
        assert_eq!(key_for_position(&[0.0, 1.0], 0, SortOrder::Ascending), -1.0);
    }

    #[test]
    fn empty_list_and_clamping() {
        assert_eq!(key_for_position(&[], 0, SortOrder::Descending), 1.0);
        assert_eq!(key_for_position(&[], 5, SortOrder::Ascending), 1.0);
        assert_eq!(key_for_position(&DESC, 42, SortOrder::Descending), 0.5);
    }

    #[test]
    fn key_after_maximum() {
        assert_eq!(key_after(None), 1.0);
        assert_eq!(key_after(Some(7.5)), 8.5);
    }

    #[test]
    fn repeated_midpoints_trigger_renumbering() {
        let mut above = 2.0;
        let below = 1.0;
        let mut renumbered = false;

        for _ in 0..100 {
            match reorder(&[above, below], 1, SortOrder::Descending, 1e-9) {
                Reorder::Single(key) => {
                    assert!(key < above && key > below);
                    above = key;
                }
                Reorder::Renumber(keys) => {
                    assert_eq!(keys, vec![3.0, 2.0, 1.0]);
                    renumbered = true;
                    break;
                }
            }
        }
        assert!(renumbered);
    }

    #[test]
    fn moving_the_top_item_to_the_top_raises_it() {
        match move_item(&DESC, 0, 0, SortOrder::Descending, 1e-9) {
            Reorder::Single(key) => assert!(key > 3.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn moving_the_bottom_item_to_the_bottom_lowers_it() {
        match move_item(&DESC, 2, 2, SortOrder::Descending, 1e-9) {
            Reorder::Single(key) => assert!(key < 1.0 && key > 0.0),
            other => panic!("unexpected {:?}", other),
        }
        match move_item(&ASC, 2, 2, SortOrder::Ascending, 1e-9) {
            Reorder::Single(key) => assert!(key > 3.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn moving_between_siblings_uses_the_midpoint() {
        // [3, 2, 1], move the top item below "2"
        assert_eq!(move_item(&DESC, 0, 1, SortOrder::Descending, 1e-9), Reorder::Single(1.5));
        // Only item
        assert_eq!(move_item(&[5.0], 0, 0, SortOrder::Descending, 1e-9), Reorder::Single(6.0));
    }

    #[test]
    fn renumber_follows_display_order() {
        assert_eq!(renumber(3, SortOrder::Descending), vec![3.0, 2.0, 1.0]);
        assert_eq!(renumber(2, SortOrder::Ascending), vec![1.0, 2.0]);
    }
}
