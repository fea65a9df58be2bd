//! Short identifier generation.
//!
//! Identifiers are random URL-safe base64 strings. They are unique only in
//! the statistical sense; the store's unique constraint is what actually
//! rejects a repeat, and [`crate::application::services::RegistryService`]
//! regenerates on collision.

use base64::Engine as _;
use rand::RngCore;

/// Default identifier length in characters.
pub const DEFAULT_ID_LENGTH: usize = 8;

/// Identifiers that collide with static routes and are never issued.
///
/// Matched case-sensitively, like the router.
const RESERVED_IDS: &[&str] = &["health", "url"];

/// Returns true if `id` is shadowed by a static route.
pub fn is_reserved(id: &str) -> bool {
    RESERVED_IDS.contains(&id)
}

/// Produces short, URL-safe identifiers for new links.
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh identifier. Never fails.
    fn generate(&self) -> String;
}

/// Random identifier generator backed by the thread-local CSPRNG.
///
/// Output alphabet is `[A-Za-z0-9_-]`, so every character carries 6 bits.
#[derive(Debug, Clone)]
pub struct RandomIdGenerator {
    length: usize,
}

impl RandomIdGenerator {
    /// Creates a generator producing identifiers of `length` characters.
    ///
    /// A zero length is bumped to one.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_LENGTH)
    }
}

impl RandomIdGenerator {
    fn draw(&self) -> String {
        // Enough bytes that the encoding is never shorter than `length`.
        let mut buffer = vec![0u8; self.length * 3 / 4 + 1];
        rand::rng().fill_bytes(&mut buffer);

        let mut id = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buffer);
        id.truncate(self.length);
        id
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        first_unreserved(|| self.draw())
    }
}

/// Draws candidates until one is not reserved.
fn first_unreserved(mut draw: impl FnMut() -> String) -> String {
    loop {
        let id = draw();
        if !is_reserved(&id) {
            return id;
        }
    }
}
