//! The helper exercised by the verification case.

/// Text the helper is contracted to return.
pub const HELLO_WORLD: &str = "Hello World";

/// Returns the fixed greeting.
///
/// # Examples
///
/// ```rust
/// use hello_verifier::greeting::{HELLO_WORLD, get_hello_world};
///
/// assert_eq!(get_hello_world(), HELLO_WORLD);
/// ```
#[must_use]
pub const fn get_hello_world() -> &'static str {
    HELLO_WORLD
}
