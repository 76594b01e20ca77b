//! User entity <-> model mapper

use recipe_core::entities::User;
use recipe_core::value_objects::Id;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Id::new(model.id),
            email: model.email,
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
