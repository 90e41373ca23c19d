//! User account management.
//!
//! Mutations are admin-only, except that a user may edit their own profile
//! (never their role). Every path that deletes or edits a user preserves the
//! invariant that at least one admin exists.

use crate::{EngineError, ResultEngine, Role, User};

use super::{Engine, normalize_required_name};

/// Full-replace payload for [`Engine::update_user`]. A `None` password keeps
/// the current one.
#[derive(Clone, Debug)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: Role,
}

impl Engine {
    fn admin_count(&self) -> usize {
        self.store
            .users()
            .iter()
            .filter(|user| user.role.is_admin())
            .count()
    }

    /// Creates the first admin account. Only valid while no admin exists;
    /// regular user creation goes through [`Engine::new_user`].
    pub fn bootstrap_admin(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ResultEngine<String> {
        if self.admin_count() > 0 {
            return Err(EngineError::ExistingKey("an admin already exists".to_string()));
        }
        let user = User::new(
            name.to_string(),
            email.to_string(),
            password.to_string(),
            Role::Admin,
        )?;
        let id = user.id.clone();
        self.store.insert_user(user)?;
        self.store.commit()?;
        Ok(id)
    }

    pub fn new_user(
        &mut self,
        acting: &User,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> ResultEngine<String> {
        if !acting.role.is_admin() {
            return Err(EngineError::Forbidden(
                "only admins can create users".to_string(),
            ));
        }
        let name = normalize_required_name(name, "user")?;
        if self
            .store
            .users()
            .iter()
            .any(|user| user.email == email.trim())
        {
            return Err(EngineError::ExistingKey(email.trim().to_string()));
        }
        let user = User::new(name, email.to_string(), password.to_string(), role)?;
        let id = user.id.clone();
        self.store.insert_user(user)?;
        self.store.commit()?;
        Ok(id)
    }

    pub fn update_user(
        &mut self,
        acting: &User,
        user_id: &str,
        update: UserUpdate,
    ) -> ResultEngine<()> {
        let current = self.require_user(user_id)?.clone();

        if !acting.role.is_admin() {
            if acting.id != user_id {
                return Err(EngineError::Forbidden(
                    "cannot edit another user".to_string(),
                ));
            }
            if update.role != current.role {
                return Err(EngineError::Forbidden(
                    "cannot change own role".to_string(),
                ));
            }
        }

        // Demoting the only admin would leave the system without one.
        if current.role.is_admin() && !update.role.is_admin() && self.admin_count() <= 1 {
            return Err(EngineError::LastAdmin(current.name));
        }

        let name = normalize_required_name(&update.name, "user")?;
        let email = update.email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(EngineError::InvalidInput(format!("invalid email: {email}")));
        }
        // The email is the login identity; it must stay unique across
        // accounts, same as at creation time.
        if self
            .store
            .users()
            .iter()
            .any(|user| user.id != user_id && user.email == email)
        {
            return Err(EngineError::ExistingKey(email));
        }
        let replacement = User {
            id: current.id,
            name,
            email,
            password: update.password.unwrap_or(current.password),
            role: update.role,
        };
        self.store.replace_user(replacement)?;
        self.store.commit()?;
        Ok(())
    }

    pub fn delete_user(&mut self, acting: &User, user_id: &str) -> ResultEngine<()> {
        if !acting.role.is_admin() {
            return Err(EngineError::Forbidden(
                "only admins can delete users".to_string(),
            ));
        }
        let target = self.require_user(user_id)?;

        if target.role.is_admin() && self.admin_count() <= 1 {
            return Err(EngineError::LastAdmin(target.name.clone()));
        }
        if self
            .store
            .cards()
            .iter()
            .any(|card| card.user_id == user_id)
        {
            return Err(EngineError::InUse(format!("user {user_id} owns cards")));
        }
        if self
            .store
            .orders()
            .iter()
            .any(|order| order.user_id == user_id)
        {
            return Err(EngineError::InUse(format!("user {user_id} has orders")));
        }

        self.store.remove_user(user_id)?;
        self.store.commit()?;
        Ok(())
    }
}
