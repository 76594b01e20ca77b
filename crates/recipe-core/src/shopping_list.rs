//! Shopping list aggregation
//!
//! A user's cart is a set of recipes. The shopping list is the sum of every
//! ingredient amount across those recipes, one line per ingredient.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::entities::Ingredient;
use crate::value_objects::Id;

/// Download file name of the rendered list
pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// One aggregated ingredient as produced by the storage layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientTotal {
    pub ingredient: Ingredient,
    pub total: i64,
}

/// Summed ingredients of a cart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    lines: Vec<IngredientTotal>,
}

impl ShoppingList {
    /// Build a list from per-ingredient rows
    ///
    /// Rows naming the same ingredient id are merged by summing their totals.
    /// Lines are ordered by ingredient name, then id.
    pub fn from_totals<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = IngredientTotal>,
    {
        let mut index: HashMap<Id, usize> = HashMap::new();
        let mut lines: Vec<IngredientTotal> = Vec::new();

        for row in rows {
            match index.get(&row.ingredient.id) {
                Some(&pos) => lines[pos].total += row.total,
                None => {
                    index.insert(row.ingredient.id, lines.len());
                    lines.push(row);
                }
            }
        }

        lines.sort_by(|a, b| {
            a.ingredient
                .name
                .cmp(&b.ingredient.name)
                .then(a.ingredient.id.cmp(&b.ingredient.id))
        });

        Self { lines }
    }

    pub fn lines(&self) -> &[IngredientTotal] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Aggregated amount for an ingredient, if it is on the list
    pub fn total_for(&self, ingredient_id: Id) -> Option<i64> {
        self.lines
            .iter()
            .find(|line| line.ingredient.id == ingredient_id)
            .map(|line| line.total)
    }

    /// Render as the plain-text download body
    ///
    /// Each line reads ` - {Name} ({unit}) - {total}` and ends with `\n`.
    /// An empty list renders as an empty string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            // Writing into a String cannot fail
            let _ = writeln!(
                out,
                " - {} ({}) - {}",
                title_case(&line.ingredient.name),
                line.ingredient.measurement_unit,
                line.total
            );
        }
        out
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
