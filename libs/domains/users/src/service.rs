use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::{JwtAuth, JwtClaims};
use crud::{CrudError, CrudRepository, CrudService, Resource};
use domain_roles::{Role, RoleService};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, LoginResponse, User};
use crate::permission::{Permission, PermissionEvaluator, SelfAccessEvaluator};

/// Account management on top of the generic CRUD contract: password
/// hashing, role membership, login and self-access checks.
pub struct UserService<R, RR> {
    users: CrudService<User, R>,
    roles: RoleService<RR>,
    auth: JwtAuth,
    evaluator: Arc<dyn PermissionEvaluator>,
}

impl<R, RR> UserService<R, RR>
where
    R: CrudRepository<User>,
    RR: CrudRepository<Role>,
{
    pub fn new(repository: R, roles: RoleService<RR>, auth: JwtAuth) -> Self {
        Self {
            users: CrudService::new(repository),
            roles,
            auth,
            evaluator: Arc::new(SelfAccessEvaluator),
        }
    }

    pub fn with_evaluator(mut self, evaluator: impl PermissionEvaluator + 'static) -> Self {
        self.evaluator = Arc::new(evaluator);
        self
    }

    pub fn crud(&self) -> &CrudService<User, R> {
        &self.users
    }

    pub async fn find_all(&self) -> UserResult<Vec<User>> {
        Ok(self.users.find_all().await?)
    }

    pub async fn get(&self, username: &str) -> UserResult<User> {
        Ok(self.users.get(&username.to_string()).await?)
    }

    /// Create an account, storing only the hash of the supplied password.
    /// New accounts hold no roles; they are granted with [`add_role`](Self::add_role).
    #[instrument(skip_all, fields(username = %user.username))]
    pub async fn register(&self, mut user: User) -> UserResult<User> {
        self.users.check_doesnt_exist(&user.username).await?;
        self.users.validate(&user)?;

        user.roles.clear();
        user.password = hash_password(&user.password)?;
        let created = self.users.save(user).await?;
        tracing::info!("User registered");
        Ok(created)
    }

    /// Overwrite the stored profile with `incoming`.
    ///
    /// An empty password, or one matching the stored hash, keeps the stored
    /// hash; any other value is hashed and replaces it. Roles are kept as
    /// stored.
    #[instrument(skip_all, fields(principal = %principal.sub, username = %username))]
    pub async fn update(
        &self,
        principal: &JwtClaims,
        username: &str,
        mut incoming: User,
    ) -> UserResult<User> {
        let mut stored = self.get(username).await?;
        self.authorize(principal, &stored, Permission::Write)?;

        incoming.password = if incoming.password.is_empty()
            || verify_password(&incoming.password, &stored.password)
        {
            stored.password.clone()
        } else {
            hash_password(&incoming.password)?
        };
        incoming.roles = stored.roles.clone();

        stored.copy_from(incoming);
        Ok(self.users.save(stored).await?)
    }

    /// Delete an account. Absent accounts are not an error.
    #[instrument(skip_all, fields(principal = %principal.sub, username = %username))]
    pub async fn delete(&self, principal: &JwtClaims, username: &str) -> UserResult<()> {
        let Some(stored) = self.users.find(&username.to_string()).await? else {
            return Ok(());
        };
        self.authorize(principal, &stored, Permission::Delete)?;
        Ok(self.users.delete(&stored).await?)
    }

    pub async fn roles(&self, username: &str) -> UserResult<Vec<Role>> {
        Ok(self.get(username).await?.roles)
    }

    /// A role held by the user, matched exactly by name.
    pub async fn role(&self, username: &str, role: &str) -> UserResult<Role> {
        self.get(username)
            .await?
            .roles
            .into_iter()
            .find(|r| r.name == role)
            .ok_or_else(|| CrudError::not_found(Role::NAME, role).into())
    }

    /// Grant an existing role. Granting a held role is a no-op.
    #[instrument(skip(self))]
    pub async fn add_role(&self, username: &str, role: &str) -> UserResult<User> {
        let mut user = self.get(username).await?;
        let role = self.roles.get(&role.to_string()).await?;

        if user.roles.contains(&role) {
            return Ok(user);
        }
        user.roles.push(role);
        Ok(self.users.save(user).await?)
    }

    /// The stored user when `password` matches its hash.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> UserResult<User> {
        let user = self
            .users
            .find(&username.to_string())
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(password, &user.password) {
            return Err(UserError::InvalidCredentials);
        }
        Ok(user)
    }

    #[instrument(skip_all, fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> UserResult<LoginResponse> {
        let user = self
            .verify_credentials(&request.username, &request.password)
            .await
            .inspect_err(|_| tracing::info!("Login rejected"))?;

        let access_token = self
            .auth
            .create_access_token(&user.username, &user.role_names())
            .map_err(|e| UserError::Token(e.to_string()))?;

        tracing::info!("Login succeeded");
        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.auth.access_ttl_secs(),
        })
    }

    fn authorize(&self, principal: &JwtClaims, target: &User, permission: Permission) -> UserResult<()> {
        if self.evaluator.has_permission(principal, target, permission) {
            return Ok(());
        }
        Err(UserError::Forbidden(format!(
            "'{}' may not {} user '{}'",
            principal.sub, permission, target.username
        )))
    }
}

impl<R, RR> Clone for UserService<R, RR> {
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            roles: self.roles.clone(),
            auth: self.auth.clone(),
            evaluator: Arc::clone(&self.evaluator),
        }
    }
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

/// Unparseable stored hashes never verify.
fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password is not a valid hash");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_helpers::JwtConfig;
    use crud::{DOESNT_EXIST, InMemoryRepository};
    use mockall::mock;

    type TestService = UserService<InMemoryRepository<User>, InMemoryRepository<Role>>;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("test-secret-that-is-long-enough-for-hs256").unwrap())
    }

    fn service() -> TestService {
        let roles = RoleService::new(InMemoryRepository::with_items([
            Role::new("player"),
            Role::new("organizer"),
        ]));
        UserService::new(InMemoryRepository::new(), roles, auth())
    }

    fn claims(sub: &str) -> JwtClaims {
        JwtClaims {
            sub: sub.to_string(),
            roles: vec![],
            exp: 0,
            iat: 0,
            jti: "test".to_string(),
        }
    }

    async fn registered(service: &TestService) -> User {
        let user = User {
            surname: "old".into(),
            ..User::new("alba", "correct horse")
        };
        service.register(user).await.unwrap()
    }

    #[tokio::test]
    async fn test_register_stores_hash() {
        let service = service();
        let created = registered(&service).await;

        assert_ne!(created.password, "correct horse");
        assert!(created.password.starts_with("$argon2"));
        assert!(verify_password("correct horse", &created.password));
    }

    #[tokio::test]
    async fn test_register_twice_conflicts() {
        let service = service();
        registered(&service).await;

        let err = service
            .register(User::new("alba", "other"))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Crud(CrudError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_register_validates_before_hashing() {
        let err = service().register(User::new("alba", "")).await.unwrap_err();
        assert!(matches!(err, UserError::Crud(CrudError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_copies_fields_and_keeps_password_when_empty() {
        let service = service();
        let original = registered(&service).await;

        let incoming = User {
            surname: "new".into(),
            ..User::new("alba", "")
        };
        let updated = service
            .update(&claims("alba"), "alba", incoming)
            .await
            .unwrap();

        assert_eq!(updated.surname, "new");
        assert_eq!(updated.password, original.password);
    }

    #[tokio::test]
    async fn test_update_with_same_password_keeps_hash() {
        let service = service();
        let original = registered(&service).await;

        let updated = service
            .update(&claims("alba"), "alba", User::new("alba", "correct horse"))
            .await
            .unwrap();
        assert_eq!(updated.password, original.password);
    }

    #[tokio::test]
    async fn test_update_with_new_password_rehashes() {
        let service = service();
        let original = registered(&service).await;

        let updated = service
            .update(&claims("alba"), "alba", User::new("alba", "battery staple"))
            .await
            .unwrap();
        assert_ne!(updated.password, original.password);
        assert!(verify_password("battery staple", &updated.password));
        assert!(service.verify_credentials("alba", "correct horse").await.is_err());
    }

    #[tokio::test]
    async fn test_update_of_other_user_is_forbidden() {
        let service = service();
        registered(&service).await;

        let err = service
            .update(&claims("bruno"), "alba", User::new("alba", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Forbidden(_)));
        assert_eq!(service.get("alba").await.unwrap().surname, "old");
    }

    #[tokio::test]
    async fn test_delete_requires_self_and_is_idempotent() {
        let service = service();
        registered(&service).await;

        let err = service.delete(&claims("bruno"), "alba").await.unwrap_err();
        assert!(matches!(err, UserError::Forbidden(_)));

        service.delete(&claims("alba"), "alba").await.unwrap();
        service.delete(&claims("alba"), "alba").await.unwrap();
        assert!(service.crud().find(&"alba".to_string()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_cannot_change_roles() {
        let service = service();
        registered(&service).await;
        service.add_role("alba", "player").await.unwrap();

        let incoming = User {
            roles: vec![Role::new("ghost"), Role::new("organizer")],
            ..User::new("alba", "")
        };
        let updated = service
            .update(&claims("alba"), "alba", incoming)
            .await
            .unwrap();

        assert_eq!(updated.roles, vec![Role::new("player")]);
        assert_eq!(service.roles("alba").await.unwrap(), vec![Role::new("player")]);
    }

    #[tokio::test]
    async fn test_register_ignores_supplied_roles() {
        let user = User {
            roles: vec![Role::new("organizer")],
            ..User::new("alba", "correct horse")
        };

        let created = service().register(user).await.unwrap();
        assert!(created.roles.is_empty());
    }

    #[tokio::test]
    async fn test_add_role_requires_existing_role_and_deduplicates() {
        let service = service();
        registered(&service).await;

        let err = service.add_role("alba", "admin").await.unwrap_err();
        let UserError::Crud(err) = err else {
            panic!("expected crud error");
        };
        assert_eq!(err.code(), Some(DOESNT_EXIST));

        service.add_role("alba", "player").await.unwrap();
        let user = service.add_role("alba", "player").await.unwrap();
        assert_eq!(user.roles, vec![Role::new("player")]);
        assert_eq!(service.roles("alba").await.unwrap(), vec![Role::new("player")]);
    }

    #[tokio::test]
    async fn test_role_lookup_is_exact() {
        let service = service();
        registered(&service).await;
        service.add_role("alba", "player").await.unwrap();

        assert_eq!(service.role("alba", "player").await.unwrap(), Role::new("player"));
        let err = service.role("alba", "Player").await.unwrap_err();
        assert!(matches!(
            err,
            UserError::Crud(CrudError::NotFound { resource: "Role", .. })
        ));
    }

    #[tokio::test]
    async fn test_login_issues_token_with_roles() {
        let service = service();
        registered(&service).await;
        service.add_role("alba", "organizer").await.unwrap();

        let response = service
            .login(&LoginRequest {
                username: "alba".into(),
                password: "correct horse".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.token_type, "Bearer");

        let claims = auth().verify_token(&response.access_token).unwrap();
        assert_eq!(claims.sub, "alba");
        assert_eq!(claims.roles, vec!["organizer".to_string()]);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let service = service();
        registered(&service).await;

        for (username, password) in [("alba", "wrong"), ("nobody", "correct horse")] {
            let err = service
                .login(&LoginRequest {
                    username: username.into(),
                    password: password.into(),
                })
                .await
                .unwrap_err();
            assert!(matches!(err, UserError::InvalidCredentials));
        }
    }

    #[tokio::test]
    async fn test_generated_usernames_are_unsupported() {
        let err = service().crud().create_generated().await.unwrap_err();
        assert!(matches!(err, CrudError::IdRequired { resource: "User" }));
    }

    mock! {
        Evaluator {}

        impl PermissionEvaluator for Evaluator {
            fn has_permission(&self, principal: &JwtClaims, target: &User, permission: Permission) -> bool;
            fn has_permission_for_id(
                &self,
                principal: &JwtClaims,
                target_id: &str,
                target_type: &str,
                permission: Permission,
            ) -> bool;
        }
    }

    #[tokio::test]
    async fn test_update_consults_evaluator_for_write() {
        let mut evaluator = MockEvaluator::new();
        evaluator
            .expect_has_permission()
            .withf(|principal, target, permission| {
                principal.sub == "admin"
                    && target.username == "alba"
                    && *permission == Permission::Write
            })
            .times(1)
            .returning(|_, _, _| true);

        let service = service().with_evaluator(evaluator);
        registered(&service).await;

        let updated = service
            .update(&claims("admin"), "alba", User::new("alba", ""))
            .await
            .unwrap();
        assert_eq!(updated.surname, "");
    }
}
