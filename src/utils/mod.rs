pub mod secret;

pub use secret::{OsSecretSource, SecretSource};
