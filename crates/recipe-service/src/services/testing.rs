//! In-memory repositories for service tests

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use recipe_cache::{RedisPool, RedisPoolConfig};
use recipe_common::{ImageStorage, JwtService, StorageConfig};
use recipe_core::entities::{
    Follow, Ingredient, IngredientAmount, NewIngredient, NewRecipe, NewTag, NewUser, Recipe,
    RecipeChanges, RecipeIngredient, RecipeList, Tag, User,
};
use recipe_core::traits::{
    FollowRepository, IngredientRepository, Page, PageRequest, RecipeFilter,
    RecipeListRepository, RecipeRepository, RepoResult, TagRepository, UserRepository,
};
use recipe_core::{DomainError, HexColor, Id, IngredientTotal, Slug};

use super::context::{ServiceContext, ServiceContextBuilder};

#[derive(Default)]
struct State {
    next_id: i64,
    users: Vec<(User, String)>,
    tags: Vec<Tag>,
    ingredients: Vec<Ingredient>,
    recipes: Vec<Recipe>,
    /// (recipe, line)
    recipe_ingredients: Vec<(Id, IngredientAmount)>,
    /// (recipe, tag)
    recipe_tags: Vec<(Id, Id)>,
    /// (follower, author)
    follows: Vec<(Id, Id)>,
    /// (user, recipe)
    favorites: Vec<(Id, Id)>,
    /// (user, recipe)
    cart: Vec<(Id, Id)>,
}

impl State {
    fn next_id(&mut self) -> Id {
        self.next_id += 1;
        Id::new(self.next_id)
    }

    fn list(&mut self, list: RecipeList) -> &mut Vec<(Id, Id)> {
        match list {
            RecipeList::Favorites => &mut self.favorites,
            RecipeList::ShoppingCart => &mut self.cart,
        }
    }

    fn ingredient(&self, id: Id) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }
}

fn paginate<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    let total = i64::try_from(items.len()).unwrap_or(i64::MAX);
    Page::new(items.iter().skip(offset).take(limit).cloned().collect(), total)
}

/// Shared in-memory store implementing every repository trait
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert_user(&self, username: &str, password_hash: &str) -> User {
        let mut state = self.state.lock();
        let now = Utc::now();
        let user = User {
            id: state.next_id(),
            email: format!("{username}@example.com"),
            username: username.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            created_at: now,
            updated_at: now,
        };
        state.users.push((user.clone(), password_hash.to_string()));
        user
    }

    pub fn insert_ingredient(&self, name: &str, unit: &str) -> Ingredient {
        let mut state = self.state.lock();
        let ingredient = Ingredient {
            id: state.next_id(),
            name: name.to_string(),
            measurement_unit: unit.to_string(),
        };
        state.ingredients.push(ingredient.clone());
        ingredient
    }

    pub fn insert_tag(&self, slug: &str) -> Tag {
        let mut state = self.state.lock();
        let id = state.next_id();
        let tag = Tag {
            id,
            name: slug.to_string(),
            color: HexColor::parse(&format!("#{:06X}", id.into_inner())).unwrap(),
            slug: Slug::parse(slug).unwrap(),
        };
        state.tags.push(tag.clone());
        tag
    }

    pub fn insert_recipe(&self, author: Id, lines: &[(Id, i32)], tags: &[Id]) -> Recipe {
        let mut state = self.state.lock();
        let recipe = Recipe {
            id: state.next_id(),
            author_id: author,
            name: "Recipe".to_string(),
            image: "recipes/seed.png".to_string(),
            text: "Cook.".to_string(),
            cooking_time: 10,
            pub_date: Utc::now(),
        };
        for (ingredient_id, amount) in lines {
            state.recipe_ingredients.push((
                recipe.id,
                IngredientAmount {
                    ingredient_id: *ingredient_id,
                    amount: *amount,
                },
            ));
        }
        for tag_id in tags {
            state.recipe_tags.push((recipe.id, *tag_id));
        }
        state.recipes.push(recipe.clone());
        recipe
    }

    pub fn follow_count(&self) -> usize {
        self.state.lock().follows.len()
    }

    pub fn list_len(&self, list: RecipeList) -> usize {
        self.state.lock().list(list).len()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<User>> {
        let state = self.state.lock();
        Ok(state.users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let state = self.state.lock();
        Ok(state
            .users
            .iter()
            .find(|(u, _)| u.email.eq_ignore_ascii_case(email))
            .map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        let state = self.state.lock();
        Ok(state.users.iter().any(|(u, _)| u.username == username))
    }

    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let mut state = self.state.lock();
        if state.users.iter().any(|(u, _)| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DomainError::EmailAlreadyExists);
        }
        if state.users.iter().any(|(u, _)| u.username == user.username) {
            return Err(DomainError::UsernameAlreadyExists);
        }
        let now = Utc::now();
        let created = User {
            id: state.next_id(),
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: now,
            updated_at: now,
        };
        state.users.push((created.clone(), password_hash.to_string()));
        Ok(created)
    }

    async fn list(&self, page: PageRequest) -> RepoResult<Page<User>> {
        let state = self.state.lock();
        let users: Vec<User> = state.users.iter().map(|(u, _)| u.clone()).collect();
        Ok(paginate(&users, page))
    }

    async fn get_password_hash(&self, id: Id) -> RepoResult<Option<String>> {
        let state = self.state.lock();
        Ok(state.users.iter().find(|(u, _)| u.id == id).map(|(_, h)| h.clone()))
    }

    async fn update_password(&self, id: Id, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        let entry = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        entry.1 = password_hash.to_string();
        Ok(())
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Tag>> {
        Ok(self.state.lock().tags.iter().find(|t| t.id == id).cloned())
    }

    async fn list_all(&self) -> RepoResult<Vec<Tag>> {
        let mut tags = self.state.lock().tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(tags)
    }

    async fn find_by_ids(&self, ids: &[Id]) -> RepoResult<Vec<Tag>> {
        let state = self.state.lock();
        Ok(state.tags.iter().filter(|t| ids.contains(&t.id)).cloned().collect())
    }

    async fn create(&self, tag: &NewTag) -> RepoResult<Tag> {
        let mut state = self.state.lock();
        if state.tags.iter().any(|t| t.slug == tag.slug) {
            return Err(DomainError::TagAlreadyExists);
        }
        let created = Tag {
            id: state.next_id(),
            name: tag.name.clone(),
            color: tag.color.clone(),
            slug: tag.slug.clone(),
        };
        state.tags.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl IngredientRepository for InMemoryStore {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Ingredient>> {
        Ok(self.state.lock().ingredient(id).cloned())
    }

    async fn search(&self, name: Option<&str>) -> RepoResult<Vec<Ingredient>> {
        let state = self.state.lock();
        let mut found: Vec<(u8, Ingredient)> = state
            .ingredients
            .iter()
            .filter_map(|i| match name {
                Some(term) => i.search_rank(term).map(|rank| (rank, i.clone())),
                None => Some((0, i.clone())),
            })
            .collect();
        found.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.name.cmp(&b.1.name)));
        Ok(found.into_iter().map(|(_, i)| i).collect())
    }

    async fn find_by_ids(&self, ids: &[Id]) -> RepoResult<Vec<Ingredient>> {
        let state = self.state.lock();
        Ok(state
            .ingredients
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect())
    }

    async fn create(&self, ingredient: &NewIngredient) -> RepoResult<Ingredient> {
        Ok(self.insert_ingredient(&ingredient.name, &ingredient.measurement_unit))
    }
}

#[async_trait]
impl RecipeRepository for InMemoryStore {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Recipe>> {
        Ok(self.state.lock().recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, filter: &RecipeFilter, page: PageRequest) -> RepoResult<Page<Recipe>> {
        let state = self.state.lock();
        let has_tag = |recipe: &Recipe| {
            filter.tag_slugs.is_empty()
                || state.recipe_tags.iter().any(|(r, t)| {
                    *r == recipe.id
                        && state
                            .tags
                            .iter()
                            .any(|tag| tag.id == *t && filter.tag_slugs.iter().any(|s| s == tag.slug.as_str()))
                })
        };
        let in_list = |entries: &[(Id, Id)], user: Option<Id>, recipe: &Recipe| {
            user.map_or(true, |u| entries.contains(&(u, recipe.id)))
        };

        let mut recipes: Vec<Recipe> = state
            .recipes
            .iter()
            .filter(|r| filter.author_id.map_or(true, |a| r.author_id == a))
            .filter(|r| has_tag(*r))
            .filter(|r| in_list(state.favorites.as_slice(), filter.favorited_by, *r))
            .filter(|r| in_list(state.cart.as_slice(), filter.in_cart_of, *r))
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        Ok(paginate(&recipes, page))
    }

    async fn create(&self, recipe: &NewRecipe) -> RepoResult<Recipe> {
        let lines: Vec<(Id, i32)> = recipe
            .ingredients
            .iter()
            .map(|i| (i.ingredient_id, i.amount))
            .collect();
        let created = self.insert_recipe(recipe.author_id, &lines, &recipe.tag_ids);

        let mut state = self.state.lock();
        let stored = state
            .recipes
            .iter_mut()
            .find(|r| r.id == created.id)
            .ok_or(DomainError::RecipeNotFound(created.id))?;
        stored.name.clone_from(&recipe.name);
        stored.image.clone_from(&recipe.image);
        stored.text.clone_from(&recipe.text);
        stored.cooking_time = recipe.cooking_time;
        Ok(stored.clone())
    }

    async fn update(&self, id: Id, changes: &RecipeChanges) -> RepoResult<Recipe> {
        let mut state = self.state.lock();
        let stored = state
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(DomainError::RecipeNotFound(id))?;
        if let Some(name) = &changes.name {
            stored.name.clone_from(name);
        }
        if let Some(image) = &changes.image {
            stored.image.clone_from(image);
        }
        if let Some(text) = &changes.text {
            stored.text.clone_from(text);
        }
        if let Some(minutes) = changes.cooking_time {
            stored.cooking_time = minutes;
        }
        let updated = stored.clone();

        if let Some(items) = &changes.ingredients {
            state.recipe_ingredients.retain(|(r, _)| *r != id);
            state.recipe_ingredients.extend(items.iter().map(|i| (id, *i)));
        }
        if let Some(tags) = &changes.tag_ids {
            state.recipe_tags.retain(|(r, _)| *r != id);
            state.recipe_tags.extend(tags.iter().map(|t| (id, *t)));
        }
        Ok(updated)
    }

    async fn delete(&self, id: Id) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.recipes.len();
        state.recipes.retain(|r| r.id != id);
        if state.recipes.len() == before {
            return Err(DomainError::RecipeNotFound(id));
        }
        state.recipe_ingredients.retain(|(r, _)| *r != id);
        state.recipe_tags.retain(|(r, _)| *r != id);
        state.favorites.retain(|(_, r)| *r != id);
        state.cart.retain(|(_, r)| *r != id);
        Ok(())
    }

    async fn ingredients_for(&self, recipe_id: Id) -> RepoResult<Vec<RecipeIngredient>> {
        let state = self.state.lock();
        Ok(state
            .recipe_ingredients
            .iter()
            .filter(|(r, _)| *r == recipe_id)
            .filter_map(|(_, line)| {
                state.ingredient(line.ingredient_id).map(|ingredient| RecipeIngredient {
                    ingredient: ingredient.clone(),
                    amount: line.amount,
                })
            })
            .collect())
    }

    async fn tags_for(&self, recipe_id: Id) -> RepoResult<Vec<Tag>> {
        let state = self.state.lock();
        Ok(state
            .recipe_tags
            .iter()
            .filter(|(r, _)| *r == recipe_id)
            .filter_map(|(_, t)| state.tags.iter().find(|tag| tag.id == *t).cloned())
            .collect())
    }

    async fn find_by_author(&self, author_id: Id, limit: Option<i64>) -> RepoResult<Vec<Recipe>> {
        let mut recipes: Vec<Recipe> = self
            .state
            .lock()
            .recipes
            .iter()
            .filter(|r| r.author_id == author_id)
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        if let Some(limit) = limit {
            recipes.truncate(usize::try_from(limit).unwrap_or(0));
        }
        Ok(recipes)
    }

    async fn count_by_author(&self, author_id: Id) -> RepoResult<i64> {
        let state = self.state.lock();
        let count = state.recipes.iter().filter(|r| r.author_id == author_id).count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn exists(&self, user_id: Id, author_id: Id) -> RepoResult<bool> {
        Ok(self.state.lock().follows.contains(&(user_id, author_id)))
    }

    async fn create(&self, follow: &Follow) -> RepoResult<()> {
        let mut state = self.state.lock();
        let key = (follow.user_id, follow.author_id);
        if state.follows.contains(&key) {
            return Err(DomainError::AlreadySubscribed(follow.author_id));
        }
        state.follows.push(key);
        Ok(())
    }

    async fn delete(&self, user_id: Id, author_id: Id) -> RepoResult<bool> {
        let mut state = self.state.lock();
        let before = state.follows.len();
        state.follows.retain(|f| *f != (user_id, author_id));
        Ok(state.follows.len() != before)
    }

    async fn list_authors(&self, user_id: Id, page: PageRequest) -> RepoResult<Page<User>> {
        let state = self.state.lock();
        let authors: Vec<User> = state
            .follows
            .iter()
            .filter(|(u, _)| *u == user_id)
            .filter_map(|(_, a)| state.users.iter().find(|(u, _)| u.id == *a).map(|(u, _)| u.clone()))
            .collect();
        Ok(paginate(&authors, page))
    }
}

#[async_trait]
impl RecipeListRepository for InMemoryStore {
    async fn contains(&self, list: RecipeList, user_id: Id, recipe_id: Id) -> RepoResult<bool> {
        Ok(self.state.lock().list(list).contains(&(user_id, recipe_id)))
    }

    async fn add(&self, list: RecipeList, user_id: Id, recipe_id: Id) -> RepoResult<()> {
        let mut state = self.state.lock();
        let entries = state.list(list);
        if entries.contains(&(user_id, recipe_id)) {
            return Err(list.already_present(recipe_id));
        }
        entries.push((user_id, recipe_id));
        Ok(())
    }

    async fn remove(&self, list: RecipeList, user_id: Id, recipe_id: Id) -> RepoResult<bool> {
        let mut state = self.state.lock();
        let entries = state.list(list);
        let before = entries.len();
        entries.retain(|e| *e != (user_id, recipe_id));
        Ok(entries.len() != before)
    }

    /// One row per recipe line; merging is left to `ShoppingList`
    async fn shopping_cart_totals(&self, user_id: Id) -> RepoResult<Vec<IngredientTotal>> {
        let state = self.state.lock();
        let rows = state
            .cart
            .iter()
            .filter(|(u, _)| *u == user_id)
            .flat_map(|(_, recipe_id)| {
                state
                    .recipe_ingredients
                    .iter()
                    .filter(move |(r, _)| r == recipe_id)
            })
            .filter_map(|(_, line)| {
                state.ingredient(line.ingredient_id).map(|ingredient| IngredientTotal {
                    ingredient: ingredient.clone(),
                    total: i64::from(line.amount),
                })
            })
            .collect();
        Ok(rows)
    }
}

/// Build a context over the in-memory store
///
/// Pools are lazy and never touched by repository-only code paths.
pub fn test_context(store: &Arc<InMemoryStore>) -> ServiceContext {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .unwrap();
    let redis = RedisPool::new(RedisPoolConfig::default()).unwrap();
    let storage = StorageConfig {
        upload_dir: std::env::temp_dir()
            .join("recipe-service-tests")
            .to_string_lossy()
            .into_owned(),
        media_url: "/media/".to_string(),
        max_file_size_mb: 1,
    };

    ServiceContextBuilder::new()
        .pool(pool)
        .redis_pool(Arc::new(redis))
        .user_repo(store.clone())
        .tag_repo(store.clone())
        .ingredient_repo(store.clone())
        .recipe_repo(store.clone())
        .follow_repo(store.clone())
        .recipe_list_repo(store.clone())
        .jwt_service(Arc::new(JwtService::new("test-secret", 3600)))
        .image_storage(Arc::new(ImageStorage::new(&storage)))
        .build()
        .unwrap()
}
