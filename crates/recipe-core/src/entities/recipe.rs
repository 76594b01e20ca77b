//! Recipe entity and its ingredient/tag composition

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::entities::Ingredient;
use crate::error::DomainError;
use crate::value_objects::Id;

/// Maximum recipe name length
pub const RECIPE_NAME_MAX_LEN: usize = 200;

/// Recipe entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: Id,
    pub author_id: Id,
    pub name: String,
    /// Stored image path relative to the media root
    pub image: String,
    pub text: String,
    /// Minutes, always >= 1
    pub cooking_time: i32,
    pub pub_date: DateTime<Utc>,
}

impl Recipe {
    #[inline]
    pub fn is_authored_by(&self, user_id: Id) -> bool {
        self.author_id == user_id
    }
}

/// An ingredient line of a recipe, resolved to the ingredient itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub amount: i32,
}

/// An ingredient reference as submitted by a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: Id,
    pub amount: i32,
}

/// Data required to insert a recipe with its ingredients and tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub author_id: Id,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub ingredients: Vec<IngredientAmount>,
    pub tag_ids: Vec<Id>,
}

impl NewRecipe {
    /// Check the shape rules that do not need the database
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.name)?;
        validate_text(&self.text)?;
        validate_cooking_time(self.cooking_time)?;
        validate_ingredients(&self.ingredients)?;
        validate_tags(&self.tag_ids)
    }
}

/// Partial update of a recipe; `None` leaves the field untouched
///
/// A present `ingredients` or `tag_ids` list replaces the whole set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub ingredients: Option<Vec<IngredientAmount>>,
    pub tag_ids: Option<Vec<Id>>,
}

impl RecipeChanges {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(text) = &self.text {
            validate_text(text)?;
        }
        if let Some(minutes) = self.cooking_time {
            validate_cooking_time(minutes)?;
        }
        if let Some(ingredients) = &self.ingredients {
            validate_ingredients(ingredients)?;
        }
        if let Some(tags) = &self.tag_ids {
            validate_tags(tags)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err(DomainError::ValidationError("Recipe name must not be empty".to_string()));
    }
    if name.chars().count() > RECIPE_NAME_MAX_LEN {
        return Err(DomainError::ContentTooLong { max: RECIPE_NAME_MAX_LEN });
    }
    Ok(())
}

fn validate_text(text: &str) -> Result<(), DomainError> {
    if text.trim().is_empty() {
        return Err(DomainError::ValidationError("Recipe text must not be empty".to_string()));
    }
    Ok(())
}

fn validate_cooking_time(minutes: i32) -> Result<(), DomainError> {
    if minutes < 1 {
        return Err(DomainError::InvalidCookingTime(minutes));
    }
    Ok(())
}

fn validate_ingredients(ingredients: &[IngredientAmount]) -> Result<(), DomainError> {
    if ingredients.is_empty() {
        return Err(DomainError::ValidationError(
            "A recipe needs at least one ingredient".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(ingredients.len());
    for item in ingredients {
        if item.amount < 1 {
            return Err(DomainError::InvalidAmount {
                ingredient_id: item.ingredient_id,
                amount: item.amount,
            });
        }
        if !seen.insert(item.ingredient_id) {
            return Err(DomainError::DuplicateIngredient(item.ingredient_id));
        }
    }
    Ok(())
}

fn validate_tags(tag_ids: &[Id]) -> Result<(), DomainError> {
    if tag_ids.is_empty() {
        return Err(DomainError::ValidationError(
            "A recipe needs at least one tag".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(tag_ids.len());
    if let Some(dup) = tag_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(DomainError::DuplicateTag(*dup));
    }
    Ok(())
}
