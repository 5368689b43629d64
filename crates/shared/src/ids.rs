//! Identifier generation for sessions and conversations.
//!
//! Sessions are ephemeral per-event identities, not durable accounts. The
//! conversation id for a matched pair is derived from the two session ids so
//! that both parties compute the same value without coordination.

use rand::Rng;

/// Prefix for server-issued session ids.
pub const SESSION_ID_PREFIX: &str = "s_";

/// Number of random characters after the prefix.
const SESSION_ID_RANDOM_LEN: usize = 24;

/// Generate a fresh session id in the form `s_<24 alphanumerics>`.
pub fn generate_session_id() -> String {
    let mut rng = rand::thread_rng();
    let chars: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    let suffix: String = (0..SESSION_ID_RANDOM_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..chars.len());
            chars[idx] as char
        })
        .collect();

    format!("{}{}", SESSION_ID_PREFIX, suffix)
}

/// Derive the conversation id for a pair of sessions.
///
/// The two ids are sorted and joined with `_`, so `match_id(a, b)` and
/// `match_id(b, a)` are always equal.
pub fn match_id(session_a: &str, session_b: &str) -> String {
    let (first, second) = if session_a <= session_b {
        (session_a, session_b)
    } else {
        (session_b, session_a)
    };
    format!("{}_{}", first, second)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_format() {
        let id = generate_session_id();
        assert!(id.starts_with(SESSION_ID_PREFIX));
        assert_eq!(id.len(), SESSION_ID_PREFIX.len() + 24);
        assert!(id[SESSION_ID_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_session_id_uniqueness() {
        let ids: std::collections::HashSet<_> = (0..100).map(|_| generate_session_id()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_match_id_commutative() {
        let a = "s_aaaaaaaaaaaaaaaaaaaaaaaa";
        let b = "s_zzzzzzzzzzzzzzzzzzzzzzzz";
        assert_eq!(match_id(a, b), match_id(b, a));
    }

    #[test]
    fn test_match_id_commutative_generated() {
        for _ in 0..20 {
            let a = generate_session_id();
            let b = generate_session_id();
            assert_eq!(match_id(&a, &b), match_id(&b, &a));
        }
    }

    #[test]
    fn test_match_id_sorted_order() {
        assert_eq!(match_id("s_bbb", "s_aaa"), "s_aaa_s_bbb");
        assert_eq!(match_id("s_aaa", "s_bbb"), "s_aaa_s_bbb");
    }

    #[test]
    fn test_match_id_deterministic() {
        let a = "s_0j3kfm2l9qpx7c4nvb81wzty";
        let b = "s_71hdu5sm3kfob2xq9rcew0na";
        assert_eq!(match_id(a, b), match_id(a, b));
    }

    #[test]
    fn test_match_id_equal_sessions() {
        // Degenerate input, still deterministic
        assert_eq!(match_id("s_aaa", "s_aaa"), "s_aaa_s_aaa");
    }
}
