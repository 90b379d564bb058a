pub mod login;
pub mod signup;

/// Which of the two public pages is shown to an anonymous visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScreen {
    #[default]
    Login,
    Signup,
}
