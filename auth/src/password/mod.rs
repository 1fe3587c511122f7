pub mod pbkdf2;

pub use pbkdf2::generate_salt;
pub use pbkdf2::PasswordHasher;
