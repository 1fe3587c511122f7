pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::AccessClaims;
pub use claims::ISSUER;
pub use claims::SUBJECT;
pub use errors::JwtError;
pub use handler::JwtHandler;
