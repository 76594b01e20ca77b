//! Repository traits (ports)

mod repositories;

pub use repositories::{
    FollowRepository, IngredientRepository, Page, PageRequest, RecipeFilter,
    RecipeListRepository, RecipeRepository, RepoResult, TagRepository, UserRepository,
};
