use rand::Rng;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const LOBBY_ID_LENGTH: usize = 6;
pub const MAX_ID_ATTEMPTS: u32 = 32;

/// Every sampled id was already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub attempts: u32,
}

pub fn generate_lobby_id(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Sample ids until `claim` accepts one.
///
/// `claim` must check and store the candidate in one step and return `true`
/// once it owns the id, so a concurrent caller can never receive the same one.
pub fn generate_unique_lobby_id<F>(
    mut claim: F,
    length: usize,
    max_attempts: u32,
) -> Result<String, Collision>
where
    F: FnMut(&str) -> bool,
{
    for _ in 0..max_attempts {
        let id = generate_lobby_id(length);
        if claim(&id) {
            return Ok(id);
        }
    }
    Err(Collision {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generates_six_character_code() {
        let id = generate_lobby_id(LOBBY_ID_LENGTH);
        assert_eq!(id.len(), 6);
    }

    #[test]
    fn contains_only_ascii_letters() {
        for _ in 0..100 {
            let id = generate_lobby_id(LOBBY_ID_LENGTH);
            assert!(id.chars().all(|c| c.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn alphabet_is_mixed_case_letters() {
        assert_eq!(ALPHABET.len(), 52);
        let distinct: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(distinct.len(), 52);
    }

    #[test]
    fn retries_until_claimed() {
        let mut attempts = 0;

        let id = generate_unique_lobby_id(
            |_| {
                attempts += 1;
                attempts == 3
            },
            LOBBY_ID_LENGTH,
            MAX_ID_ATTEMPTS,
        )
        .unwrap();

        assert_eq!(id.len(), 6);
        assert_eq!(attempts, 3);
    }

    #[test]
    fn returns_immediately_when_no_collision() {
        let mut attempts = 0;
        let id = generate_unique_lobby_id(
            |_| {
                attempts += 1;
                true
            },
            LOBBY_ID_LENGTH,
            MAX_ID_ATTEMPTS,
        );
        assert!(id.is_ok());
        assert_eq!(attempts, 1);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let mut attempts = 0;
        let result = generate_unique_lobby_id(
            |_| {
                attempts += 1;
                false
            },
            LOBBY_ID_LENGTH,
            5,
        );

        assert_eq!(result, Err(Collision { attempts: 5 }));
        assert_eq!(attempts, 5);
    }
}
