//! Recipe entity <-> model mappers

use recipe_core::entities::{Ingredient, Recipe, RecipeIngredient};
use recipe_core::shopping_list::IngredientTotal;
use recipe_core::value_objects::Id;

use crate::models::{IngredientTotalModel, RecipeIngredientModel, RecipeModel};

/// Convert RecipeModel to Recipe entity
impl From<RecipeModel> for Recipe {
    fn from(model: RecipeModel) -> Self {
        Recipe {
            id: Id::new(model.id),
            author_id: Id::new(model.author_id),
            name: model.name,
            image: model.image,
            text: model.text,
            cooking_time: model.cooking_time,
            pub_date: model.pub_date,
        }
    }
}

impl From<RecipeIngredientModel> for RecipeIngredient {
    fn from(model: RecipeIngredientModel) -> Self {
        RecipeIngredient {
            ingredient: Ingredient {
                id: Id::new(model.id),
                name: model.name,
                measurement_unit: model.measurement_unit,
            },
            amount: model.amount,
        }
    }
}

impl From<IngredientTotalModel> for IngredientTotal {
    fn from(model: IngredientTotalModel) -> Self {
        IngredientTotal {
            ingredient: Ingredient {
                id: Id::new(model.id),
                name: model.name,
                measurement_unit: model.measurement_unit,
            },
            total: model.total,
        }
    }
}

/// Split ingredient references into parallel arrays for `UNNEST`
pub fn ingredient_columns(
    items: &[recipe_core::entities::IngredientAmount],
) -> (Vec<i64>, Vec<i32>) {
    items
        .iter()
        .map(|item| (item.ingredient_id.into_inner(), item.amount))
        .unzip()
}

/// Raw ids for binding as `BIGINT[]`
pub fn raw_ids(ids: &[Id]) -> Vec<i64> {
    ids.iter().map(|id| id.into_inner()).collect()
}
