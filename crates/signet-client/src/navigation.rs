use std::fmt;

/// Dashboard locations a view or a guard can send the user to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Signatures,
    Signature(String),
    Verifications,
    Verification(String),
    Register,
    Verify,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Signatures => "/signatures".to_owned(),
            Route::Signature(id) => format!("/signatures/{id}"),
            Route::Verifications => "/verifications".to_owned(),
            Route::Verification(id) => format!("/verifications/{id}"),
            Route::Register => "/register".to_owned(),
            Route::Verify => "/verify".to_owned(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
