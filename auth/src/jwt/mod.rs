use jsonwebtoken::Algorithm;

pub mod claims;
pub mod errors;
pub mod issuer;
pub mod secret;
pub mod validator;

pub use claims::Claims;
pub use errors::JwtError;
pub use issuer::TokenIssuer;
pub use secret::SigningSecret;
pub use validator::TokenValidator;

/// The only algorithm tokens are signed with and accepted under.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;
