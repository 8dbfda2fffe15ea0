use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Opaque bearer token for a logged-in session.
pub fn generate_session_token(length: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
