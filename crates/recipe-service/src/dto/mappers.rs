//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Conversions that depend on the requester take it as an argument.

use recipe_core::entities::{Ingredient, Recipe, RecipeIngredient, Tag, User};

use super::responses::{
    IngredientResponse, RecipeIngredientResponse, RegisteredUserResponse, ShortRecipeResponse,
    TagResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl UserResponse {
    pub fn new(user: &User, is_subscribed: bool) -> Self {
        Self {
            email: user.email.clone(),
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_subscribed,
        }
    }
}

impl From<&User> for RegisteredUserResponse {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

// ============================================================================
// Catalog Mappers
// ============================================================================

impl From<&Tag> for TagResponse {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
            color: tag.color.as_str().to_string(),
            slug: tag.slug.as_str().to_string(),
        }
    }
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self::from(&tag)
    }
}

impl From<&Ingredient> for IngredientResponse {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name.clone(),
            measurement_unit: ingredient.measurement_unit.clone(),
        }
    }
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self::from(&ingredient)
    }
}

// ============================================================================
// Recipe Mappers
// ============================================================================

impl From<&RecipeIngredient> for RecipeIngredientResponse {
    fn from(line: &RecipeIngredient) -> Self {
        Self {
            id: line.ingredient.id,
            name: line.ingredient.name.clone(),
            measurement_unit: line.ingredient.measurement_unit.clone(),
            amount: line.amount,
        }
    }
}

impl ShortRecipeResponse {
    /// `image_url` is the public URL of the stored image
    pub fn new(recipe: &Recipe, image_url: String) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            image: image_url,
            cooking_time: recipe.cooking_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_core::{HexColor, Id, Slug};

    #[test]
    fn test_tag_response_uses_normalized_color() {
        let tag = Tag {
            id: Id::new(1),
            name: "Breakfast".to_string(),
            color: HexColor::parse("#e26c2d").unwrap(),
            slug: Slug::parse("breakfast").unwrap(),
        };

        let response = TagResponse::from(&tag);
        assert_eq!(response.color, "#E26C2D");
        assert_eq!(response.slug, "breakfast");
    }

    #[test]
    fn test_recipe_ingredient_response_flattens_ingredient() {
        let line = RecipeIngredient {
            ingredient: Ingredient {
                id: Id::new(4),
                name: "flour".to_string(),
                measurement_unit: "g".to_string(),
            },
            amount: 250,
        };

        let response = RecipeIngredientResponse::from(&line);
        assert_eq!(response.id, Id::new(4));
        assert_eq!(response.measurement_unit, "g");
        assert_eq!(response.amount, 250);
    }
}
