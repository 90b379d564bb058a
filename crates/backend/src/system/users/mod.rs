pub mod repository;
pub mod service;

/// Stored account; the password hash never leaves the repository layer.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

impl From<User> for contracts::system::auth::UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}
